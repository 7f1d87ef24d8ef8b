use super::decl::Param;
use super::stmt::Block;
use super::types::TypeNode;
use groovyscope_api::Span;

/// Index of an expression in its module's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprId(pub u32);

impl ExprId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub span: Span,
    pub kind: ExprKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(String),
    Long(String),
    BigInteger(String),
    Float(String),
    Double(String),
    BigDecimal(String),
    String(String),
    Boolean(bool),
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    And,
    Or,
    In,
    /// `<=>`
    Compare,
    /// `<<`
    LeftShift,
}

impl BinaryOp {
    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Neg,
    Plus,
    Inc,
    Dec,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapEntry {
    pub key: ExprId,
    pub value: ExprId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClosureExpr {
    /// `None` when the closure declares no parameter list (implicit `it`).
    pub params: Option<Vec<Param>>,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Literal(Literal),
    /// A reference to a variable, field or type by simple name.
    Variable(String),
    /// The name introduced by a declaration (local, parameter, field, loop variable).
    Binding(String),
    /// The member name of a property access or method call.
    Name(String),
    This,
    Super,
    List(Vec<ExprId>),
    Map(Vec<MapEntry>),
    Range {
        from: ExprId,
        to: ExprId,
        inclusive: bool,
    },
    Property {
        receiver: ExprId,
        name: ExprId,
        safe: bool,
        spread: bool,
    },
    MethodCall {
        receiver: Option<ExprId>,
        name: ExprId,
        args: Vec<ExprId>,
        safe: bool,
        spread: bool,
    },
    New {
        ty: TypeNode,
        args: Vec<ExprId>,
    },
    Index {
        receiver: ExprId,
        index: ExprId,
    },
    Binary {
        op: BinaryOp,
        lhs: ExprId,
        rhs: ExprId,
    },
    Unary {
        op: UnaryOp,
        operand: ExprId,
    },
    Assign {
        op: Option<BinaryOp>,
        target: ExprId,
        value: ExprId,
    },
    Ternary {
        cond: ExprId,
        then: ExprId,
        otherwise: ExprId,
    },
    Elvis {
        value: ExprId,
        fallback: ExprId,
    },
    /// `expr as Type`
    Cast {
        expr: ExprId,
        ty: TypeNode,
    },
    InstanceOf {
        expr: ExprId,
        ty: TypeNode,
    },
    Closure(ClosureExpr),
}

impl ExprKind {
    /// Direct expression children, excluding closure bodies.
    pub fn children(&self) -> Vec<ExprId> {
        match self {
            ExprKind::Literal(_)
            | ExprKind::Variable(_)
            | ExprKind::Binding(_)
            | ExprKind::Name(_)
            | ExprKind::This
            | ExprKind::Super => Vec::new(),
            ExprKind::List(items) => items.clone(),
            ExprKind::Map(entries) => entries.iter().flat_map(|e| [e.key, e.value]).collect(),
            ExprKind::Range { from, to, .. } => vec![*from, *to],
            ExprKind::Property { receiver, name, .. } => vec![*receiver, *name],
            ExprKind::MethodCall {
                receiver,
                name,
                args,
                ..
            } => receiver
                .iter()
                .copied()
                .chain(std::iter::once(*name))
                .chain(args.iter().copied())
                .collect(),
            ExprKind::New { args, .. } => args.clone(),
            ExprKind::Index { receiver, index } => vec![*receiver, *index],
            ExprKind::Binary { lhs, rhs, .. } => vec![*lhs, *rhs],
            ExprKind::Unary { operand, .. } => vec![*operand],
            ExprKind::Assign { target, value, .. } => vec![*target, *value],
            ExprKind::Ternary {
                cond,
                then,
                otherwise,
            } => vec![*cond, *then, *otherwise],
            ExprKind::Elvis { value, fallback } => vec![*value, *fallback],
            ExprKind::Cast { expr, .. } | ExprKind::InstanceOf { expr, .. } => vec![*expr],
            ExprKind::Closure(closure) => closure
                .params
                .iter()
                .flatten()
                .map(|p| p.binding)
                .collect(),
        }
    }
}
