//! Binding sources: the built-in JDK/GDK table, the registry holding
//! published source declarations, and the overlay stacking them.

pub mod jdk;
pub mod overlay;
pub mod registry;
pub mod source;

pub use jdk::jdk_registry;
pub use overlay::OverlayTypeSystem;
pub use registry::{TypeDeclBuilder, TypeRegistry};
pub use source::{PublishedUnit, publish};
