//! Shared data model of the groovyscope inference engine.
//!
//! Front ends (CLI, editors) depend on this crate only; the engine in
//! `groovyscope-groovy` produces these types.

pub mod diagnostics;
pub mod error;
pub mod models;
pub mod resolver;

pub use diagnostics::{Diagnostic, DiagnosticKind, Severity};
pub use error::{ApiError, ApiResult};
pub use models::*;
pub use resolver::TypeResolver;
