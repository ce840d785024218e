#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for script-assert
//!
//! This library checks whole objects against declarative rules. A rule is a single boolean
//! expression, written in a named expression language, that sees the object being checked
//! under an alias (by default `_this`).
//!
//! # Module Organization
//!
//! - [`value`]: The neutral data model candidates are converted to before binding
//! - [`backends`]: Pluggable expression backends and the registry that resolves them by name
//! - [`expr`]: Rule configuration and the expression constraint evaluator
//! - [`rules`]: Named rules loaded from rule files
//! - [`reports`]: Verdict output in console and JSON formats
//! - [`commands`]: Command-line interface and orchestration
//!
//! # Example
//!
//! ```
//! use script_assert_lib::expr::{ExpressionConstraint, RuleConfiguration};
//! use script_assert_lib::value::Value;
//! use std::collections::BTreeMap;
//!
//! let config = RuleConfiguration::new("cel", "_this.min <= _this.max", None).unwrap();
//! let constraint = ExpressionConstraint::initialize(config);
//!
//! let candidate = Value::Map(BTreeMap::from([
//!     ("min".to_string(), Value::Int(1)),
//!     ("max".to_string(), Value::Int(10)),
//! ]));
//!
//! assert!(constraint.evaluate(&candidate).unwrap());
//! ```

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod backends;
pub mod expr;
pub mod rules;
pub mod value;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

#[cfg(any(debug_assertions, test))]
pub mod reports;
#[cfg(not(any(debug_assertions, test)))]
mod reports;

pub use crate::commands::{Host, run};
