use core::fmt;

/// The stage at which a backend failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendErrorKind {
    /// A value could not be bound into the scope
    Binding,

    /// The expression source could not be compiled
    Compile,

    /// The expression failed while running
    Execution,
}

impl fmt::Display for BackendErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Binding => f.write_str("binding error"),
            Self::Compile => f.write_str("compile error"),
            Self::Execution => f.write_str("execution error"),
        }
    }
}

/// A failure reported by an expression backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct BackendError {
    kind: BackendErrorKind,
    message: String,
}

impl BackendError {
    #[must_use]
    pub fn new(kind: BackendErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn binding(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Binding, message)
    }

    #[must_use]
    pub fn compile(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Compile, message)
    }

    #[must_use]
    pub fn execution(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Execution, message)
    }

    #[must_use]
    pub const fn kind(&self) -> BackendErrorKind {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_stage() {
        let err = BackendError::compile("unexpected token ')'");
        assert_eq!(err.to_string(), "compile error: unexpected token ')'");
        assert_eq!(err.kind(), BackendErrorKind::Compile);
        assert_eq!(err.message(), "unexpected token ')'");
    }
}
