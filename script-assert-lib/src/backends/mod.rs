//! Pluggable expression backends
//!
//! A backend is an expression engine identified by name. The evaluator never talks to an engine
//! directly: it asks a [`BackendRegistry`] for the backend registered under a rule's language,
//! opens a fresh [`Scope`] for every evaluation, binds the candidate into it, and executes the
//! rule's expression there.
//!
//! Scopes are never shared between evaluations, so a backend only has to be safe for concurrent
//! calls to [`Backend::new_scope`]; each scope is used by one thread and then dropped.
//!
//! The library ships one backend, [`CelBackend`], built on the Common Expression Language.

mod backend_error;
mod cel;
mod registry;

pub use backend_error::{BackendError, BackendErrorKind};
pub use cel::CelBackend;
pub use registry::BackendRegistry;

use crate::value::Value;
use core::fmt::Debug;

/// An expression engine that can be selected by name.
pub trait Backend: Send + Sync + Debug {
    /// The primary identifier of this backend
    fn name(&self) -> &str;

    /// Additional identifiers this backend answers to
    fn aliases(&self) -> &[&str] {
        &[]
    }

    /// Opens a new, empty evaluation scope
    fn new_scope(&self) -> Box<dyn Scope>;
}

/// A single-use evaluation context created by a [`Backend`].
pub trait Scope {
    /// Makes `value` visible to expressions under `name`.
    ///
    /// The name is used verbatim; the backend's syntax decides which names are usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot represent the value
    fn bind(&mut self, name: &str, value: &Value) -> Result<(), BackendError>;

    /// Compiles and runs `source` against the values bound so far
    ///
    /// # Errors
    ///
    /// Returns an error if the source does not compile or fails while running
    fn execute(&self, source: &str) -> Result<Value, BackendError>;
}
