//! Expression-based constraint evaluation
//!
//! This module implements the rule lifecycle: a [`RuleConfiguration`] is built once when a rule
//! is declared, an [`ExpressionConstraint`] is initialized from it, and the constraint then
//! checks any number of candidates.
//!
//! # Implementation Model
//!
//! Failures are split by when they happen and what they mean:
//!
//! 1. **Construction time**: [`RuleConfiguration::new`] rejects an empty language, an empty
//!    expression, or an explicitly empty alias with [`InvalidConfiguration`].
//! 2. **Evaluation time**: [`ExpressionConstraint::evaluate`] reports a [`DeclarationError`] when
//!    the rule itself cannot produce a verdict: the language has no backend, the expression fails
//!    to compile or run, or it produces something other than a boolean.
//!
//! A `false` verdict is not an error. It means the candidate failed the rule.
//!
//! Backend lookup is deferred to the first evaluation so rules can be declared before the
//! backends they need are registered. Every evaluation binds the candidate into a fresh scope.

mod error;
mod expression_constraint;
mod rule_configuration;

pub use error::{DeclarationError, InvalidConfiguration, RuleField};
pub use expression_constraint::ExpressionConstraint;
pub use rule_configuration::{DEFAULT_ALIAS, RuleConfiguration};
