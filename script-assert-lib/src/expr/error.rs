use crate::backends::BackendError;
use crate::value::ValueKind;
use core::fmt;

/// A field of a [`RuleConfiguration`](super::RuleConfiguration).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleField {
    Language,
    Expression,
    Alias,
}

impl fmt::Display for RuleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Language => f.write_str("language"),
            Self::Expression => f.write_str("expression"),
            Self::Alias => f.write_str("alias"),
        }
    }
}

/// A rule was declared with an empty language, expression, or alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("the {field} of a rule must not be empty")]
pub struct InvalidConfiguration {
    pub field: RuleField,
}

/// A rule cannot produce a verdict.
///
/// These errors describe a broken rule, not an invalid candidate. Callers should surface them as
/// configuration problems rather than as validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeclarationError {
    #[error("no expression backend is registered for language '{language}'")]
    UnresolvedBackend { language: String },

    #[error("error while executing expression \"{expression}\"")]
    ExpressionExecutionFailure {
        expression: String,
        #[source]
        source: BackendError,
    },

    #[error("expression \"{expression}\" returned {found}, but it must return either true or false")]
    NonBooleanResult { expression: String, found: ValueKind },
}
