//! The scope stack of one traversal.

use super::frame::{FrameId, FrameKind, ScopeFrame, VariableInfo};
use groovyscope_api::TypeRef;
use tracing::trace;

/// Frames from the module (bottom) to the innermost construct (top).
///
/// Frame ids are stack positions, so the parent of a frame is always the
/// frame right below it.
#[derive(Debug, Clone, Default)]
pub struct ScopeStack {
    frames: Vec<ScopeFrame>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_frame(&mut self, kind: FrameKind) -> FrameId {
        self.push_frame_with_type_params(kind, Vec::new())
    }

    pub fn push_frame_with_type_params(&mut self, kind: FrameKind, type_params: Vec<String>) -> FrameId {
        let parent = self.current();
        let id = self.frames.len();
        trace!("push frame {} {:?}", id, kind);
        self.frames
            .push(ScopeFrame::new(kind, parent).with_type_params(type_params));
        id
    }

    pub fn pop_frame(&mut self) -> Option<ScopeFrame> {
        let frame = self.frames.pop();
        if let Some(frame) = &frame {
            trace!("pop frame {:?}", frame.kind);
        }
        frame
    }

    pub fn current(&self) -> Option<FrameId> {
        self.frames.len().checked_sub(1)
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn frame(&self, id: FrameId) -> Option<&ScopeFrame> {
        self.frames.get(id)
    }

    /// Declares `name` in the innermost frame.
    pub fn declare(&mut self, name: impl Into<String>, info: VariableInfo) {
        if let Some(frame) = self.frames.last_mut() {
            frame.declare(name, info);
        }
    }

    /// Innermost declaration of `name`.
    pub fn lookup(&self, name: &str) -> Option<&VariableInfo> {
        self.frames.iter().rev().find_map(|f| f.get(name))
    }

    /// Records a new type for a dynamically typed variable after an
    /// assignment. Explicitly typed variables keep their declared type.
    pub fn update(&mut self, name: &str, type_ref: TypeRef) -> bool {
        let Some(info) = self.frames.iter_mut().rev().find_map(|f| f.get_mut(name)) else {
            return false;
        };
        if info.explicit {
            return false;
        }
        info.type_ref = type_ref;
        true
    }

    /// Binary name of the innermost enclosing class.
    pub fn enclosing_type(&self) -> Option<&str> {
        self.frames.iter().rev().find_map(|f| match &f.kind {
            FrameKind::Class(fqn) => Some(fqn.as_str()),
            _ => None,
        })
    }

    /// Whether the innermost method (if any) is static.
    pub fn in_static_context(&self) -> bool {
        self.frames
            .iter()
            .rev()
            .find_map(|f| match f.kind {
                FrameKind::Method { is_static } => Some(is_static),
                FrameKind::Class(_) => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }

    /// Whether the innermost frame is a class body (field declarations).
    pub fn in_class_body(&self) -> bool {
        matches!(self.frames.last().map(|f| &f.kind), Some(FrameKind::Class(_)))
    }

    pub fn is_type_parameter(&self, name: &str) -> bool {
        self.frames
            .iter()
            .any(|f| f.type_params().iter().any(|p| p == name))
    }

    /// Type parameter names visible from the innermost frame.
    pub fn type_parameters(&self) -> impl Iterator<Item = &str> {
        self.frames
            .iter()
            .flat_map(|f| f.type_params().iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ty(s: &str) -> TypeRef {
        TypeRef::parse(s).unwrap()
    }

    #[test]
    fn inner_declarations_shadow_outer_ones() {
        let mut scope = ScopeStack::new();
        scope.push_frame(FrameKind::Module);
        scope.declare("x", VariableInfo::explicit(ty("java.lang.String"), None));
        scope.push_frame(FrameKind::Closure);
        scope.declare("x", VariableInfo::inferred(ty("java.lang.Integer"), None));
        assert_eq!(scope.lookup("x").unwrap().type_ref, ty("java.lang.Integer"));

        scope.pop_frame();
        assert_eq!(scope.lookup("x").unwrap().type_ref, ty("java.lang.String"));
        assert!(scope.lookup("y").is_none());
    }

    #[test]
    fn only_dynamic_variables_take_reassigned_types() {
        let mut scope = ScopeStack::new();
        scope.push_frame(FrameKind::Method { is_static: false });
        scope.declare("a", VariableInfo::explicit(ty("java.lang.Number"), None));
        scope.declare("b", VariableInfo::inferred(ty("java.lang.Integer"), None));

        assert!(!scope.update("a", ty("java.lang.Integer")));
        assert!(scope.update("b", ty("java.lang.String")));
        assert_eq!(scope.lookup("a").unwrap().type_ref, ty("java.lang.Number"));
        assert_eq!(scope.lookup("b").unwrap().type_ref, ty("java.lang.String"));
    }

    #[test]
    fn class_frames_name_the_enclosing_type() {
        let mut scope = ScopeStack::new();
        scope.push_frame(FrameKind::Module);
        assert_eq!(scope.enclosing_type(), None);
        scope.push_frame_with_type_params(FrameKind::Class("p.Box".into()), vec!["T".into()]);
        scope.push_frame_with_type_params(FrameKind::Method { is_static: true }, vec!["U".into()]);
        scope.push_frame(FrameKind::Closure);

        assert_eq!(scope.enclosing_type(), Some("p.Box"));
        assert!(scope.in_static_context());
        assert!(scope.is_type_parameter("T"));
        assert!(scope.is_type_parameter("U"));
        assert_eq!(scope.type_parameters().collect::<Vec<_>>(), vec!["T", "U"]);
        assert_eq!(scope.frame(3).unwrap().parent, Some(2));
    }
}
