//! Common Expression Language backend
//!
//! Bound values become CEL variables: maps turn into CEL maps so members are reachable with
//! dotted access, lists into CEL lists and timestamps into CEL timestamps. Expressions are
//! compiled on every execution; nothing is cached between scopes.

use super::{Backend, BackendError, Scope};
use crate::value::Value;
use cel_interpreter::objects::Map;
use cel_interpreter::{Context, Program};
use std::collections::HashMap;
use std::sync::Arc;

const LOG_TARGET: &str = "       cel";

/// The CEL backend, registered as `cel` and `CEL`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CelBackend;

impl CelBackend {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Backend for CelBackend {
    fn name(&self) -> &str {
        "cel"
    }

    fn aliases(&self) -> &[&str] {
        &["CEL"]
    }

    fn new_scope(&self) -> Box<dyn Scope> {
        Box::new(CelScope {
            context: Context::default(),
        })
    }
}

struct CelScope {
    context: Context<'static>,
}

impl Scope for CelScope {
    fn bind(&mut self, name: &str, value: &Value) -> Result<(), BackendError> {
        let cel_value = to_cel(value)?;
        self.context.add_variable_from_value(name, cel_value);
        Ok(())
    }

    fn execute(&self, source: &str) -> Result<Value, BackendError> {
        let program = Program::compile(source).map_err(|e| BackendError::compile(e.to_string()))?;
        let result = program.execute(&self.context).map_err(|e| BackendError::execution(e.to_string()))?;

        log::trace!(target: LOG_TARGET, "'{source}' produced {result:?}");
        Ok(from_cel(&result))
    }
}

fn to_cel(value: &Value) -> Result<cel_interpreter::Value, BackendError> {
    use cel_interpreter::Value as Cel;

    Ok(match value {
        Value::Null => Cel::Null,
        Value::Bool(b) => Cel::Bool(*b),
        Value::Int(i) => Cel::Int(*i),
        Value::UInt(u) => Cel::UInt(*u),
        Value::Float(f) => Cel::Float(*f),
        Value::String(s) => Cel::String(Arc::new(s.clone())),
        Value::Timestamp(ts) => Cel::Timestamp(*ts),
        Value::List(items) => {
            let cel_items = items.iter().map(to_cel).collect::<Result<Vec<_>, _>>()?;
            Cel::List(Arc::new(cel_items))
        }
        Value::Map(fields) => {
            let mut cel_fields: HashMap<String, Cel> = HashMap::with_capacity(fields.len());
            for (key, field) in fields {
                let _ = cel_fields.insert(key.clone(), to_cel(field)?);
            }
            Cel::Map(Map::from(cel_fields))
        }
        Value::Opaque { type_name } => {
            return Err(BackendError::binding(format!("values of type '{type_name}' cannot be bound")));
        }
    })
}

fn from_cel(value: &cel_interpreter::Value) -> Value {
    use cel_interpreter::Value as Cel;

    match value {
        Cel::Null => Value::Null,
        Cel::Bool(b) => Value::Bool(*b),
        Cel::Int(i) => Value::Int(*i),
        Cel::UInt(u) => Value::UInt(*u),
        Cel::Float(f) => Value::Float(*f),
        Cel::String(s) => Value::String(s.to_string()),
        Cel::Timestamp(ts) => Value::Timestamp(*ts),
        Cel::List(items) => Value::List(items.iter().map(from_cel).collect()),
        Cel::Map(_) => opaque("map"),
        Cel::Duration(_) => opaque("duration"),
        Cel::Bytes(_) => opaque("bytes"),
        Cel::Function(..) => opaque("function"),
        #[expect(unreachable_patterns, reason = "covers variants added by newer interpreter versions")]
        _ => opaque("unknown"),
    }
}

fn opaque(type_name: &str) -> Value {
    Value::Opaque {
        type_name: type_name.to_string(),
    }
}
