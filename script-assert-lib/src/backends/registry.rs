use super::{Backend, CelBackend};
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

const LOG_TARGET: &str = "  backends";

static SHARED: LazyLock<Arc<BackendRegistry>> = LazyLock::new(|| Arc::new(BackendRegistry::with_builtin()));

/// A directory of expression backends keyed by language identifier.
///
/// Identifiers are matched exactly, including case. Registering a backend makes it available
/// under its [`name`](Backend::name) and each of its [`aliases`](Backend::aliases); a later
/// registration replaces an earlier one for the same identifier.
#[derive(Debug, Default)]
pub struct BackendRegistry {
    backends: HashMap<String, Arc<dyn Backend>>,
}

impl BackendRegistry {
    /// Creates an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the backends that ship with this library
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(CelBackend::new()));
        registry
    }

    /// The process-wide registry used by [`ExpressionConstraint::initialize`](crate::expr::ExpressionConstraint::initialize)
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::clone(&SHARED)
    }

    pub fn register(&mut self, backend: Arc<dyn Backend>) {
        let identifiers = core::iter::once(backend.name()).chain(backend.aliases().iter().copied());
        for identifier in identifiers {
            log::debug!(target: LOG_TARGET, "Registering backend '{}' as '{identifier}'", backend.name());
            if self.backends.insert(identifier.to_string(), Arc::clone(&backend)).is_some() {
                log::debug!(target: LOG_TARGET, "Replaced previously registered backend for '{identifier}'");
            }
        }
    }

    /// Finds the backend registered under `language`
    #[must_use]
    pub fn resolve(&self, language: &str) -> Option<Arc<dyn Backend>> {
        self.backends.get(language).map(Arc::clone)
    }

    #[must_use]
    pub fn contains(&self, language: &str) -> bool {
        self.backends.contains_key(language)
    }

    /// All registered identifiers, sorted
    #[must_use]
    pub fn languages(&self) -> Vec<&str> {
        let mut languages: Vec<&str> = self.backends.keys().map(String::as_str).collect();
        languages.sort_unstable();
        languages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::{BackendError, Scope};
    use crate::value::Value;

    #[derive(Debug)]
    struct ConstantBackend {
        name: &'static str,
        result: bool,
    }

    struct ConstantScope(bool);

    impl Scope for ConstantScope {
        fn bind(&mut self, _name: &str, _value: &Value) -> Result<(), BackendError> {
            Ok(())
        }

        fn execute(&self, _source: &str) -> Result<Value, BackendError> {
            Ok(Value::Bool(self.0))
        }
    }

    impl Backend for ConstantBackend {
        fn name(&self) -> &str {
            self.name
        }

        fn aliases(&self) -> &[&str] {
            &["const"]
        }

        fn new_scope(&self) -> Box<dyn Scope> {
            Box::new(ConstantScope(self.result))
        }
    }

    #[test]
    fn test_empty_registry_resolves_nothing() {
        let registry = BackendRegistry::new();
        assert!(registry.resolve("cel").is_none());
        assert!(registry.languages().is_empty());
    }

    #[test]
    fn test_builtin_registry_has_cel() {
        let registry = BackendRegistry::with_builtin();
        assert!(registry.contains("cel"));
        assert!(registry.contains("CEL"));
        assert_eq!(registry.resolve("cel").unwrap().name(), "cel");
    }

    #[test]
    fn test_resolution_is_case_sensitive() {
        let registry = BackendRegistry::with_builtin();
        assert!(registry.resolve("Cel").is_none());
    }

    #[test]
    fn test_register_name_and_aliases() {
        let mut registry = BackendRegistry::new();
        registry.register(Arc::new(ConstantBackend {
            name: "always",
            result: true,
        }));

        assert_eq!(registry.languages(), vec!["always", "const"]);
        assert_eq!(registry.resolve("const").unwrap().name(), "always");
    }

    #[test]
    fn test_later_registration_replaces_earlier() {
        let mut registry = BackendRegistry::new();
        registry.register(Arc::new(ConstantBackend {
            name: "always",
            result: true,
        }));
        registry.register(Arc::new(ConstantBackend {
            name: "never",
            result: false,
        }));

        // "const" now points at the second backend, "always" still at the first
        assert_eq!(registry.resolve("const").unwrap().name(), "never");
        assert_eq!(registry.resolve("always").unwrap().name(), "always");
    }

    #[test]
    fn test_shared_registry_is_reused() {
        let a = BackendRegistry::shared();
        let b = BackendRegistry::shared();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
