pub mod resolution;
pub mod span;
pub mod type_ref;

pub use resolution::*;
pub use span::*;
pub use type_ref::*;
