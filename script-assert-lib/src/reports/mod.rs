//! Report generation for rule verdicts
//!
//! Two generators are provided, each accessed through a `generate` function:
//! - **Console**: one line per candidate and rule, optionally colored
//! - **JSON**: machine-readable structured data
//!
//! Both operate on a slice of [`Verdict`] in the order the checks were requested.

mod console;
mod json;
mod verdict;

pub use console::generate as generate_console;
pub use json::generate as generate_json;
pub use verdict::{Outcome, Verdict};
