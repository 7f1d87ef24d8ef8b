use super::decl::Param;
use super::expr::ExprId;
use super::types::{Modifiers, TypeNode};
use groovyscope_api::Span;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub name: String,
    pub binding: ExprId,
    /// `None` for `def`.
    pub ty: Option<TypeNode>,
    pub init: Option<ExprId>,
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    Expr(ExprId),
    VarDecl(VarDecl),
    Block(Block),
    If {
        cond: ExprId,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        cond: ExprId,
        body: Box<Stmt>,
    },
    /// `for (x in xs)` and `for (T x : xs)`
    ForIn {
        var: Param,
        collection: ExprId,
        body: Box<Stmt>,
    },
    For {
        init: Vec<Stmt>,
        cond: Option<ExprId>,
        update: Vec<ExprId>,
        body: Box<Stmt>,
    },
    Return(Option<ExprId>),
    Throw(ExprId),
    Break,
    Continue,
}
