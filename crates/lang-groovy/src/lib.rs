//! Static type inference for Groovy source.
//!
//! [`InferenceEngine`] parses units with the snippet [`parser`], publishes
//! their declarations over the built-in JDK/GDK bindings and answers
//! [`groovyscope_api::TypeResolver`] queries.

pub mod ast;
pub mod config;
pub mod error;
pub mod inference;
pub mod parser;

pub use config::{ExtraImports, GroovyVersion, InferenceOptions};
pub use error::{GroovyError, Result};
pub use inference::{CompilationUnit, InferenceEngine};
