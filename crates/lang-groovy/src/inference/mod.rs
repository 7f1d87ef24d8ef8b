//! Groovy Type Inference System
//!
//! Resolves the static type of the expression at a source range.
//!
//! # Architecture
//!
//! ```text
//! InferenceDriver           →  walks the unit, keeps the ScopeStack
//!       │
//!       ▼
//! LookupChain (tiers)       →  stc, local, member + dgm, type name, duck
//!       │
//!       ▼
//! GroovyTypeSystem (trait)  →  JDK bindings overlaid with published sources
//! ```
//!
//! # Key Traits
//!
//! - [`TypeProvider`] - Resolves binary names to type information
//! - [`InheritanceProvider`] - Walks the supertype hierarchy
//! - [`MemberProvider`] - Finds members in types
//! - [`GroovyTypeSystem`] - Combines all three
//! - [`lookup::TypeLookup`] - One strategy of the lookup chain
//!
//! # Usage
//!
//! ```ignore
//! use groovyscope_groovy::InferenceEngine;
//! use groovyscope_api::{Span, TypeResolver};
//!
//! let engine = InferenceEngine::default();
//! let unit = engine.analyze("Search.groovy", "def x = [1]\nx");
//! let resolution = unit.resolve(Span::new(12, 13));
//! ```

pub mod adapters;
pub mod attributes;
pub mod chain;
pub mod context;
pub mod core;
pub mod dgm;
pub mod driver;
pub mod engine;
pub mod lookup;
pub mod scope;
pub mod verify;

pub use core::type_system::{GroovyTypeSystem, InheritanceProvider, MemberProvider, TypeProvider};

pub use core::types::{
    ElementTarget, MemberInfo, MemberKind, ParameterInfo, TypeDecl, TypeInfo, TypeKind, TypeParameter,
};

pub use attributes::{CallTarget, InferredAttribute, NodeAttributes};
pub use chain::{LookupChain, LookupTier};
pub use dgm::{ClosureParams, DgmSignature, DgmTable};
pub use driver::InferenceDriver;
pub use engine::{CompilationUnit, InferenceEngine};
pub use lookup::{LookupResult, Receiver, TypeLookup};
