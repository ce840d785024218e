use serde::Serialize;

/// What happened when one rule was checked against one candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// The expression evaluated to `true`
    Passed,

    /// The expression evaluated to `false`
    Failed { message: String },

    /// The rule could not produce a verdict
    Error { message: String },

    /// The evaluation did not finish in time
    TimedOut,
}

impl Outcome {
    /// Whether this outcome should make a check fail
    #[must_use]
    pub const fn is_problem(&self) -> bool {
        !matches!(self, Self::Passed)
    }
}

/// The outcome of one rule for one candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub candidate: String,
    pub rule: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl Verdict {
    #[must_use]
    pub const fn new(candidate: String, rule: String, outcome: Outcome) -> Self {
        Self { candidate, rule, outcome }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_passed_is_not_a_problem() {
        assert!(!Outcome::Passed.is_problem());
        assert!(Outcome::Failed { message: String::new() }.is_problem());
        assert!(Outcome::Error { message: String::new() }.is_problem());
        assert!(Outcome::TimedOut.is_problem());
    }
}
