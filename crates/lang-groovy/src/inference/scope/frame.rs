use groovyscope_api::{Span, TypeRef};
use indexmap::IndexMap;

pub type FrameId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameKind {
    Module,
    /// Class body; carries the binary name of the class.
    Class(String),
    Method { is_static: bool },
    Closure,
    Block,
    Loop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableInfo {
    pub type_ref: TypeRef,
    /// Span of the declaring binding; `None` for synthetic variables such as `it`.
    pub span: Option<Span>,
    /// Declared with a type rather than `def` or inferred.
    pub explicit: bool,
}

impl VariableInfo {
    pub fn explicit(type_ref: TypeRef, span: Option<Span>) -> Self {
        Self {
            type_ref,
            span,
            explicit: true,
        }
    }

    pub fn inferred(type_ref: TypeRef, span: Option<Span>) -> Self {
        Self {
            type_ref,
            span,
            explicit: false,
        }
    }
}

/// One lexical level of variable bindings.
#[derive(Debug, Clone)]
pub struct ScopeFrame {
    pub kind: FrameKind,
    pub parent: Option<FrameId>,
    variables: IndexMap<String, VariableInfo>,
    type_params: Vec<String>,
}

impl ScopeFrame {
    pub fn new(kind: FrameKind, parent: Option<FrameId>) -> Self {
        Self {
            kind,
            parent,
            variables: IndexMap::new(),
            type_params: Vec::new(),
        }
    }

    pub fn with_type_params(mut self, names: Vec<String>) -> Self {
        self.type_params = names;
        self
    }

    /// Declares `name`, shadowing an earlier declaration in this frame.
    pub fn declare(&mut self, name: impl Into<String>, info: VariableInfo) {
        self.variables.insert(name.into(), info);
    }

    pub fn get(&self, name: &str) -> Option<&VariableInfo> {
        self.variables.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut VariableInfo> {
        self.variables.get_mut(name)
    }

    /// Variables in declaration order.
    pub fn variables(&self) -> impl Iterator<Item = (&str, &VariableInfo)> {
        self.variables.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn type_params(&self) -> &[String] {
        &self.type_params
    }
}
