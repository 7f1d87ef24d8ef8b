//! Core type-system abstractions: traits, declaration records, subtyping,
//! generics substitution and name normalization.

pub mod generics;
pub mod imports;
pub mod normalization;
pub mod subtyping;
pub mod type_system;
pub mod types;

pub use generics::GenericsSpec;
pub use imports::{ImportScope, NameResolution};
pub use normalization::{TypeNormalizer, TypeProblem};
pub use type_system::{GroovyTypeSystem, InheritanceProvider, MemberProvider, TypeProvider};
pub use types::*;
