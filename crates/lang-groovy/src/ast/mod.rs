//! Groovy syntax tree.
//!
//! Expressions live in a per-module arena and are addressed by [`ExprId`], so
//! analysis results can be attached out of band instead of mutating nodes.
//! Statements and declarations are owned by their parents.

mod decl;
mod expr;
mod stmt;
mod types;

pub use decl::*;
pub use expr::*;
pub use stmt::*;
pub use types::*;

use groovyscope_api::Span;

/// Malformed input the parser skipped over or closed implicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub span: Span,
}

/// One parsed compilation unit (a script and/or class declarations).
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    /// File base name; scripts compile to a class of this name.
    pub name: String,
    pub package: Option<String>,
    pub imports: Vec<ImportDecl>,
    pub classes: Vec<ClassDecl>,
    /// Methods declared at script level.
    pub methods: Vec<MethodDecl>,
    /// Script body.
    pub statements: Vec<Stmt>,
    pub source_len: usize,
    /// Problems the parser recovered from, in source order.
    pub syntax_errors: Vec<SyntaxError>,
    exprs: Vec<Expr>,
    parents: Vec<Option<ExprId>>,
}

impl Module {
    pub(crate) fn new(name: String, source_len: usize) -> Self {
        Self {
            name,
            package: None,
            imports: Vec::new(),
            classes: Vec::new(),
            methods: Vec::new(),
            statements: Vec::new(),
            source_len,
            syntax_errors: Vec::new(),
            exprs: Vec::new(),
            parents: Vec::new(),
        }
    }

    pub(crate) fn alloc(&mut self, span: Span, kind: ExprKind) -> ExprId {
        let id = ExprId(self.exprs.len() as u32);
        self.exprs.push(Expr { span, kind });
        id
    }

    /// Drops expressions allocated after `len` (parser backtracking).
    pub(crate) fn truncate(&mut self, len: usize) {
        self.exprs.truncate(len);
    }

    pub(crate) fn expr_mut(&mut self, id: ExprId) -> &mut Expr {
        &mut self.exprs[id.index()]
    }

    /// Computes the parent links once parsing is complete.
    pub(crate) fn link_parents(&mut self) {
        let mut parents = vec![None; self.exprs.len()];
        for (index, expr) in self.exprs.iter().enumerate() {
            for child in expr.kind.children() {
                parents[child.index()] = Some(ExprId(index as u32));
            }
        }
        self.parents = parents;
    }

    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    pub fn exprs(&self) -> impl Iterator<Item = (ExprId, &Expr)> {
        self.exprs
            .iter()
            .enumerate()
            .map(|(i, e)| (ExprId(i as u32), e))
    }

    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    pub fn parent(&self, id: ExprId) -> Option<ExprId> {
        self.parents.get(id.index()).copied().flatten()
    }

    /// The smallest expression whose span covers `span`.
    pub fn innermost_covering(&self, span: Span) -> Option<ExprId> {
        self.exprs()
            .filter(|(_, e)| e.span.covers(&span))
            .min_by_key(|(id, e)| (e.span.len(), *id))
            .map(|(id, _)| id)
    }

    /// The expression with exactly this span, preferring the innermost.
    pub fn expr_at(&self, span: Span) -> Option<ExprId> {
        self.exprs()
            .find(|(_, e)| e.span == span)
            .map(|(id, _)| id)
    }

    pub fn qualify(&self, simple_name: &str) -> String {
        match &self.package {
            Some(pkg) if !pkg.is_empty() => format!("{}.{}", pkg, simple_name),
            _ => simple_name.to_string(),
        }
    }

    /// Fully qualified name of the class a script body compiles into.
    pub fn script_class(&self) -> String {
        self.qualify(&self.name)
    }

    /// Whether the unit has script statements or script-level methods.
    pub fn is_script(&self) -> bool {
        !self.statements.is_empty() || !self.methods.is_empty()
    }
}
