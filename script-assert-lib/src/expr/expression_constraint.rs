use super::{DeclarationError, RuleConfiguration};
use crate::backends::{Backend, BackendError, BackendRegistry};
use crate::value::{Candidate, Value};
use std::sync::{Arc, OnceLock};

const LOG_TARGET: &str = "      expr";

/// Checks candidates against one expression rule.
///
/// Initialization only stores the configuration; the backend is looked up on first use. Once a
/// backend has been found it is reused by later evaluations, while a failed lookup is retried
/// every time. Each evaluation binds the candidate into its own scope, so concurrent evaluations
/// on the same constraint never see each other's candidates.
#[derive(Debug)]
pub struct ExpressionConstraint {
    config: RuleConfiguration,
    registry: Arc<BackendRegistry>,
    backend: OnceLock<Arc<dyn Backend>>,
}

impl ExpressionConstraint {
    /// Creates a constraint that resolves its backend from [`BackendRegistry::shared`]
    #[must_use]
    pub fn initialize(config: RuleConfiguration) -> Self {
        Self::with_registry(config, BackendRegistry::shared())
    }

    /// Creates a constraint that resolves its backend from `registry`
    #[must_use]
    pub fn with_registry(config: RuleConfiguration, registry: Arc<BackendRegistry>) -> Self {
        Self {
            config,
            registry,
            backend: OnceLock::new(),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &RuleConfiguration {
        &self.config
    }

    /// Evaluates the rule's expression with `candidate` bound under the rule's alias
    ///
    /// Returns `Ok(true)` if the candidate satisfies the rule and `Ok(false)` if it does not.
    ///
    /// # Errors
    ///
    /// Returns a [`DeclarationError`] if the rule cannot produce a verdict
    pub fn evaluate<C: Candidate + ?Sized>(&self, candidate: &C) -> Result<bool, DeclarationError> {
        self.evaluate_value(&candidate.to_value())
    }

    /// Like [`evaluate`](Self::evaluate), for a candidate that is already a [`Value`]
    ///
    /// # Errors
    ///
    /// Returns a [`DeclarationError`] if the rule cannot produce a verdict
    pub fn evaluate_value(&self, candidate: &Value) -> Result<bool, DeclarationError> {
        let backend = self.backend()?;

        let mut scope = backend.new_scope();
        let produced = scope
            .bind(self.config.alias(), candidate)
            .and_then(|()| scope.execute(self.config.expression()));

        match self.classify(produced) {
            Ok(verdict) => {
                log::trace!(target: LOG_TARGET, "Expression \"{}\" evaluated to {verdict}", self.config.expression());
                Ok(verdict)
            }
            Err(e) => {
                log::debug!(target: LOG_TARGET, "Rule cannot be evaluated: {e}");
                Err(e)
            }
        }
    }

    fn backend(&self) -> Result<&Arc<dyn Backend>, DeclarationError> {
        if let Some(backend) = self.backend.get() {
            return Ok(backend);
        }

        let language = self.config.language();
        let resolved = self.registry.resolve(language).ok_or_else(|| DeclarationError::UnresolvedBackend {
            language: language.to_string(),
        })?;

        log::debug!(target: LOG_TARGET, "Resolved backend '{}' for language '{language}'", resolved.name());
        Ok(self.backend.get_or_init(|| resolved))
    }

    /// Turns whatever the backend produced into a verdict; only a boolean counts.
    fn classify(&self, produced: Result<Value, BackendError>) -> Result<bool, DeclarationError> {
        match produced {
            Ok(Value::Bool(verdict)) => Ok(verdict),
            Ok(other) => Err(DeclarationError::NonBooleanResult {
                expression: self.config.expression().to_string(),
                found: other.kind(),
            }),
            Err(source) => Err(DeclarationError::ExpressionExecutionFailure {
                expression: self.config.expression().to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::{BackendErrorKind, Scope};
    use crate::value::ValueKind;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Records every scope it hands out and answers with a fixed result
    #[derive(Debug)]
    struct RecordingBackend {
        result: Result<Value, BackendError>,
        scopes_opened: AtomicUsize,
        bound: Arc<Mutex<Vec<(String, Value)>>>,
    }

    impl RecordingBackend {
        fn returning(result: Result<Value, BackendError>) -> Arc<Self> {
            Arc::new(Self {
                result,
                scopes_opened: AtomicUsize::new(0),
                bound: Arc::new(Mutex::new(Vec::new())),
            })
        }
    }

    struct RecordingScope {
        result: Result<Value, BackendError>,
        bindings: Vec<(String, Value)>,
        bound: Arc<Mutex<Vec<(String, Value)>>>,
    }

    impl Scope for RecordingScope {
        fn bind(&mut self, name: &str, value: &Value) -> Result<(), BackendError> {
            self.bindings.push((name.to_string(), value.clone()));
            self.bound.lock().unwrap().push((name.to_string(), value.clone()));
            Ok(())
        }

        fn execute(&self, _source: &str) -> Result<Value, BackendError> {
            // A fresh scope must hold exactly the one candidate binding
            assert_eq!(self.bindings.len(), 1);
            self.result.clone()
        }
    }

    impl Backend for RecordingBackend {
        fn name(&self) -> &str {
            "recording"
        }

        fn new_scope(&self) -> Box<dyn Scope> {
            let _ = self.scopes_opened.fetch_add(1, Ordering::SeqCst);
            Box::new(RecordingScope {
                result: self.result.clone(),
                bindings: Vec::new(),
                bound: Arc::clone(&self.bound),
            })
        }
    }

    fn constraint_with(backend: Arc<RecordingBackend>, alias: Option<&str>) -> ExpressionConstraint {
        let mut registry = BackendRegistry::new();
        registry.register(backend);
        let config = RuleConfiguration::new("recording", "expr", alias.map(str::to_string)).unwrap();
        ExpressionConstraint::with_registry(config, Arc::new(registry))
    }

    #[test]
    fn test_boolean_results_are_verdicts() {
        let constraint = constraint_with(RecordingBackend::returning(Ok(Value::Bool(true))), None);
        assert!(constraint.evaluate_value(&Value::Null).unwrap());

        let constraint = constraint_with(RecordingBackend::returning(Ok(Value::Bool(false))), None);
        assert!(!constraint.evaluate_value(&Value::Null).unwrap());
    }

    #[test]
    fn test_candidate_is_bound_under_alias() {
        let backend = RecordingBackend::returning(Ok(Value::Bool(true)));
        let constraint = constraint_with(Arc::clone(&backend), Some("event"));

        let _ = constraint.evaluate_value(&Value::Int(7)).unwrap();

        let bound = backend.bound.lock().unwrap();
        assert_eq!(*bound, vec![("event".to_string(), Value::Int(7))]);
    }

    #[test]
    fn test_each_evaluation_opens_a_fresh_scope() {
        let backend = RecordingBackend::returning(Ok(Value::Bool(true)));
        let constraint = constraint_with(Arc::clone(&backend), None);

        for i in 0..3 {
            let _ = constraint.evaluate_value(&Value::Int(i)).unwrap();
        }

        assert_eq!(backend.scopes_opened.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_null_result_is_not_a_verdict() {
        let constraint = constraint_with(RecordingBackend::returning(Ok(Value::Null)), None);
        let err = constraint.evaluate_value(&Value::Null).unwrap_err();
        assert_eq!(
            err,
            DeclarationError::NonBooleanResult {
                expression: "expr".to_string(),
                found: ValueKind::Null,
            }
        );
    }

    #[test]
    fn test_non_boolean_result_reports_its_kind() {
        let constraint = constraint_with(RecordingBackend::returning(Ok(Value::from("yes"))), None);
        let err = constraint.evaluate_value(&Value::Null).unwrap_err();
        assert!(matches!(err, DeclarationError::NonBooleanResult { found: ValueKind::String, .. }));
    }

    #[test]
    fn test_backend_failure_is_execution_failure() {
        let constraint = constraint_with(RecordingBackend::returning(Err(BackendError::compile("bad"))), None);
        let err = constraint.evaluate_value(&Value::Null).unwrap_err();

        let DeclarationError::ExpressionExecutionFailure { expression, source } = err else {
            panic!("expected an execution failure, got {err:?}");
        };
        assert_eq!(expression, "expr");
        assert_eq!(source.kind(), BackendErrorKind::Compile);
    }

    #[test]
    fn test_unknown_language_fails_only_when_evaluating() {
        let config = RuleConfiguration::new("foo", "true", None).unwrap();
        let constraint = ExpressionConstraint::with_registry(config, Arc::new(BackendRegistry::with_builtin()));

        for _ in 0..2 {
            let err = constraint.evaluate_value(&Value::Null).unwrap_err();
            assert_eq!(
                err,
                DeclarationError::UnresolvedBackend {
                    language: "foo".to_string()
                }
            );
        }
    }

    #[test]
    fn test_resolved_backend_is_cached() {
        let backend = RecordingBackend::returning(Ok(Value::Bool(true)));
        let constraint = constraint_with(backend, None);
        assert!(constraint.backend.get().is_none());

        let _ = constraint.evaluate_value(&Value::Null).unwrap();
        assert!(constraint.backend.get().is_some());
    }

    #[test]
    fn test_initialize_uses_shared_registry() {
        let constraint = ExpressionConstraint::initialize(RuleConfiguration::new("cel", "true", None).unwrap());
        assert!(constraint.evaluate_value(&Value::Null).unwrap());
        assert_eq!(constraint.config().language(), "cel");
    }

    #[test]
    fn test_constraint_is_send_and_sync() {
        const fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ExpressionConstraint>();
    }
}
