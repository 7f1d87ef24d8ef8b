//! Variable scopes of one traversal and the typing of iteration variables.

mod frame;
pub mod iteration;
mod stack;

pub use frame::{FrameId, FrameKind, ScopeFrame, VariableInfo};
pub use iteration::{closure_param_types, element_type, map_key_value};
pub use stack::ScopeStack;
