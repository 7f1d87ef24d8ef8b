use super::expr::ExprId;
use super::stmt::Block;
use super::types::{AnnotationNode, Modifiers, TypeNode, TypeParamNode};
use groovyscope_api::Span;

#[derive(Debug, Clone, PartialEq)]
pub struct ImportDecl {
    /// Dotted path without the trailing `.*`.
    pub path: String,
    pub star: bool,
    pub alias: Option<String>,
    pub is_static: bool,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Class,
    Interface,
    Enum,
    Annotation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    /// Binary simple name; nested classes use `Outer$Inner`.
    pub name: String,
    pub name_span: Span,
    pub kind: ClassKind,
    pub type_params: Vec<TypeParamNode>,
    pub superclass: Option<TypeNode>,
    pub interfaces: Vec<TypeNode>,
    pub fields: Vec<FieldDecl>,
    pub methods: Vec<MethodDecl>,
    pub enum_constants: Vec<EnumConstant>,
    pub annotations: Vec<AnnotationNode>,
    pub modifiers: Modifiers,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub name: String,
    pub binding: ExprId,
    /// `None` for `def`.
    pub ty: Option<TypeNode>,
    pub init: Option<ExprId>,
    pub modifiers: Modifiers,
    pub annotations: Vec<AnnotationNode>,
    pub span: Span,
}

impl FieldDecl {
    /// Groovy turns fields without an access modifier into properties.
    pub fn is_property(&self) -> bool {
        self.modifiers.visibility.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub name: String,
    pub name_span: Span,
    pub type_params: Vec<TypeParamNode>,
    /// `None` for `def` methods and constructors.
    pub return_type: Option<TypeNode>,
    pub params: Vec<Param>,
    pub body: Option<Block>,
    pub modifiers: Modifiers,
    pub annotations: Vec<AnnotationNode>,
    pub throws: Vec<TypeNode>,
    pub is_constructor: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub binding: ExprId,
    pub ty: Option<TypeNode>,
    pub default: Option<ExprId>,
    pub varargs: bool,
    pub annotations: Vec<AnnotationNode>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumConstant {
    pub name: String,
    pub binding: ExprId,
    pub args: Vec<ExprId>,
    pub span: Span,
}
