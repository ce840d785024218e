//! The neutral data model for candidates
//!
//! Candidates are converted to a [`Value`] before they are bound into a backend's scope. The
//! model is deliberately small: it covers what JSON-like documents carry, plus timestamps so
//! that date-valued fields can be compared inside expressions.

mod candidate;
mod value_kind;

pub use candidate::Candidate;
pub use value_kind::ValueKind;

use crate::Result;
use chrono::{DateTime, FixedOffset, TimeZone};
use ohno::IntoAppError;
use serde::Serialize;
use std::collections::BTreeMap;

/// A dynamically-typed value exchanged with expression backends.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
    Timestamp(DateTime<FixedOffset>),
    List(Vec<Self>),
    Map(BTreeMap<String, Self>),

    /// A backend result with no counterpart in this model. It can be inspected but never bound.
    Opaque { type_name: String },
}

impl Value {
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::UInt(_) => ValueKind::UInt,
            Self::Float(_) => ValueKind::Float,
            Self::String(_) => ValueKind::String,
            Self::Timestamp(_) => ValueKind::Timestamp,
            Self::List(_) => ValueKind::List,
            Self::Map(_) => ValueKind::Map,
            Self::Opaque { type_name } => ValueKind::Opaque(type_name.clone()),
        }
    }

    /// Converts any serializable value by way of its JSON representation.
    ///
    /// Dates serialized by serde end up as strings; implement [`Candidate`] by hand to bind
    /// them as [`Value::Timestamp`].
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be serialized to JSON
    pub fn from_serializable<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        let json = serde_json::to_value(value).into_app_err("converting candidate to a value")?;
        Ok(Self::from(json))
    }

    /// Looks up a member of a map value
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Map(map) => map.get(key),
            _ => None,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Self::UInt(u)
                } else {
                    n.as_f64().map_or(Self::Null, Self::Float)
                }
            }
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            serde_json::Value::Object(fields) => Self::Map(fields.into_iter().map(|(k, v)| (k, Self::from(v))).collect()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Self::UInt(u)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Value {
    fn from(dt: DateTime<Tz>) -> Self {
        Self::Timestamp(dt.fixed_offset())
    }
}

impl From<Vec<Self>> for Value {
    fn from(items: Vec<Self>) -> Self {
        Self::List(items)
    }
}

impl From<BTreeMap<String, Self>> for Value {
    fn from(fields: BTreeMap<String, Self>) -> Self {
        Self::Map(fields)
    }
}
