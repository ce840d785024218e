//! Named rules declared in rule files
//!
//! A rule file lists rules, each with a name, an optional message, and the language, expression,
//! and alias that make up its [`RuleConfiguration`](crate::expr::RuleConfiguration). Files may be
//! written in TOML, YAML, or JSON; the format is chosen by file extension.
//!
//! ```toml
//! timeout = "2s"
//!
//! [[rules]]
//! name = "dates_ordered"
//! expression = "timestamp(_this.start_date) < timestamp(_this.end_date)"
//! message = "an event must start before it ends"
//! ```

mod rule;
mod rule_set;

pub use rule::{DEFAULT_LANGUAGE, Rule};
pub use rule_set::{DEFAULT_RULES_FILE, DEFAULT_RULES_TOML, DocumentFormat, RuleSet};
