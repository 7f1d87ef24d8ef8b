//! Constants, collection literals, constructor calls, casts and closures.

use super::{LookupResult, Receiver, TypeLookup};
use crate::ast::{ExprId, ExprKind, Literal, StmtKind};
use crate::inference::context::LookupContext;
use groovyscope_api::{Declaration, TypeRef};

pub const LIST: &str = "java.util.List";
pub const MAP: &str = "java.util.Map";
pub const RANGE: &str = "groovy.lang.Range";
pub const CLOSURE: &str = "groovy.lang.Closure";
const BOOLEAN: &str = "java.lang.Boolean";

pub struct LiteralLookup;

/// The boxed type of a constant.
pub fn literal_type(literal: &Literal) -> TypeRef {
    let name = match literal {
        Literal::Integer(_) => "java.lang.Integer",
        Literal::Long(_) => "java.lang.Long",
        Literal::BigInteger(_) => "java.math.BigInteger",
        Literal::Float(_) => "java.lang.Float",
        Literal::Double(_) => "java.lang.Double",
        Literal::BigDecimal(_) => "java.math.BigDecimal",
        Literal::String(_) => "java.lang.String",
        Literal::Boolean(_) => BOOLEAN,
        Literal::Null => groovyscope_api::OBJECT,
    };
    TypeRef::new(name)
}

impl TypeLookup for LiteralLookup {
    fn name(&self) -> &'static str {
        "literal"
    }

    fn lookup(&self, expr: ExprId, _receiver: Option<&Receiver>, ctx: &LookupContext<'_>) -> LookupResult {
        let element = |id: Option<&ExprId>| {
            id.and_then(|id| ctx.type_of(*id))
                .map(TypeRef::boxed)
                .unwrap_or_else(TypeRef::object)
        };

        match &ctx.expr(expr).kind {
            ExprKind::Literal(literal) => {
                LookupResult::exact(literal_type(literal)).with_declaration(Declaration::Literal)
            }
            ExprKind::List(items) => {
                LookupResult::inferred(TypeRef::generic(LIST, vec![element(items.first())]))
                    .with_declaration(Declaration::Literal)
            }
            ExprKind::Map(entries) => {
                let first = entries.first();
                let key = element(first.map(|e| &e.key));
                let value = element(first.map(|e| &e.value));
                LookupResult::inferred(TypeRef::generic(MAP, vec![key, value])).with_declaration(Declaration::Literal)
            }
            ExprKind::Range { from, .. } => {
                LookupResult::inferred(TypeRef::generic(RANGE, vec![element(Some(from))]))
                    .with_declaration(Declaration::Literal)
            }
            ExprKind::New { ty, .. } => {
                let created = ctx.resolve_type(ty);
                let declaring_type = created.name.clone();
                LookupResult::exact(created).with_declaration(Declaration::Constructor { declaring_type })
            }
            ExprKind::Cast { ty, .. } => LookupResult::exact(ctx.resolve_type(ty)),
            ExprKind::InstanceOf { .. } => LookupResult::exact(TypeRef::new(BOOLEAN)),
            ExprKind::Closure(closure) => {
                let returned = closure.body.stmts.last().and_then(|stmt| match &stmt.kind {
                    StmtKind::Expr(id) | StmtKind::Return(Some(id)) => Some(id),
                    _ => None,
                });
                LookupResult::inferred(TypeRef::generic(CLOSURE, vec![element(returned)]))
            }
            _ => LookupResult::unknown(),
        }
    }
}
