//! Command-line interface and orchestration for script-assert
//!
//! This module implements the CLI commands on top of the library: loading rule files, reading
//! candidate documents, running the checks, and reporting verdicts.
//!
//! # Implementation Model
//!
//! ## Commands
//!
//! - **check**: Evaluate every rule of a rule file against one or more candidate documents and
//!   report a verdict per pair
//! - **validate**: Load a rule file and make sure every rule names a registered language
//! - **init**: Generate a default rule file
//! - **languages**: List the registered expression backends
//!
//! ## Execution Flow
//!
//! The `run` function parses command-line arguments using clap and routes to the appropriate
//! command handler. Evaluations in `check` run on Tokio's blocking pool so that a per-evaluation
//! timeout can be enforced from the outside; the evaluator itself is synchronous.
//!
//! The `common` module provides shared functionality like logging setup and color mode handling.

mod check;
mod common;
mod host;
mod init;
mod languages;
mod run;
mod validate;

pub use check::{CheckArgs, check_candidates};
pub use common::{ColorMode, LogLevel, OutputFormat};
pub use host::Host;
pub use init::{InitArgs, init_rules};
pub use languages::list_languages;
pub use run::run;
pub use validate::{ValidateArgs, validate_rules};
