use super::expr::ExprId;
use groovyscope_api::Span;

/// A type as written in source, before name resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeNode {
    /// Dotted name as written (`Map.Entry`, `java.util.List`, `T`).
    pub name: String,
    pub args: Vec<TypeNode>,
    pub dims: usize,
    pub span: Span,
}

impl TypeNode {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            dims: 0,
            span,
        }
    }

    /// `def` and `var` declare a dynamically typed slot.
    pub fn is_dynamic(&self) -> bool {
        self.dims == 0 && (self.name == "def" || self.name == "var")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeParamNode {
    pub name: String,
    pub bounds: Vec<TypeNode>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Modifiers {
    pub visibility: Option<Visibility>,
    pub is_static: bool,
    pub is_final: bool,
    pub is_abstract: bool,
}

impl Modifiers {
    pub fn to_strings(&self) -> Vec<String> {
        let mut out = Vec::new();
        match self.visibility {
            Some(Visibility::Public) => out.push("public".to_string()),
            Some(Visibility::Protected) => out.push("protected".to_string()),
            Some(Visibility::Private) => out.push("private".to_string()),
            None => {}
        }
        if self.is_static {
            out.push("static".to_string());
        }
        if self.is_final {
            out.push("final".to_string());
        }
        if self.is_abstract {
            out.push("abstract".to_string());
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationNode {
    pub name: TypeNode,
    pub args: Vec<(String, ExprId)>,
    pub span: Span,
}
