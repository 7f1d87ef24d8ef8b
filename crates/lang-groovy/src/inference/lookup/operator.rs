//! Operators, conditionals and array indexing.

use super::{LookupResult, Receiver, TypeLookup};
use crate::ast::{BinaryOp, ExprId, ExprKind, UnaryOp};
use crate::inference::context::LookupContext;
use crate::inference::core::generics::{as_supertype, resolve_member_type};
use groovyscope_api::{Declaration, TypeRef};

const BOOLEAN: &str = "java.lang.Boolean";
const INTEGER: &str = "java.lang.Integer";
const LONG: &str = "java.lang.Long";
const DOUBLE: &str = "java.lang.Double";
const FLOAT: &str = "java.lang.Float";
const BIG_INTEGER: &str = "java.math.BigInteger";
const BIG_DECIMAL: &str = "java.math.BigDecimal";
const STRING: &str = "java.lang.String";
const GSTRING: &str = "groovy.lang.GString";
const NUMERIC: &[&str] = &[
    "java.lang.Byte",
    "java.lang.Short",
    INTEGER,
    LONG,
    FLOAT,
    DOUBLE,
    BIG_INTEGER,
    BIG_DECIMAL,
    "java.lang.Number",
];

pub struct OperatorLookup;

impl TypeLookup for OperatorLookup {
    fn name(&self) -> &'static str {
        "operator"
    }

    fn lookup(&self, expr: ExprId, _receiver: Option<&Receiver>, ctx: &LookupContext<'_>) -> LookupResult {
        match &ctx.expr(expr).kind {
            ExprKind::Binary { op, lhs, rhs } => binary(ctx, *op, *lhs, *rhs),
            ExprKind::Unary { op, operand } => match op {
                UnaryOp::Not => LookupResult::inferred(TypeRef::new(BOOLEAN)),
                _ => known(ctx.type_of(*operand)),
            },
            ExprKind::Assign { op: None, value, .. } => known(ctx.type_of(*value)),
            ExprKind::Assign {
                op: Some(op),
                target,
                value,
            } => binary(ctx, *op, *target, *value),
            ExprKind::Ternary { then, otherwise, .. } => known(ctx.type_of(*then).or_else(|| ctx.type_of(*otherwise))),
            ExprKind::Elvis { value, fallback } => known(ctx.type_of(*value).or_else(|| ctx.type_of(*fallback))),
            ExprKind::Index { receiver, .. } => match ctx.type_of(*receiver).and_then(TypeRef::component) {
                Some(component) => LookupResult::inferred(component.boxed()),
                None => LookupResult::unknown(),
            },
            _ => LookupResult::unknown(),
        }
    }
}

fn known(ty: Option<&TypeRef>) -> LookupResult {
    match ty {
        Some(ty) => LookupResult::inferred(ty.boxed()),
        None => LookupResult::unknown(),
    }
}

fn binary(ctx: &LookupContext<'_>, op: BinaryOp, lhs: ExprId, rhs: ExprId) -> LookupResult {
    match op {
        BinaryOp::Eq
        | BinaryOp::NotEq
        | BinaryOp::Lt
        | BinaryOp::Gt
        | BinaryOp::LtEq
        | BinaryOp::GtEq
        | BinaryOp::And
        | BinaryOp::Or
        | BinaryOp::In => return LookupResult::inferred(TypeRef::new(BOOLEAN)),
        BinaryOp::Compare => return LookupResult::inferred(TypeRef::new(INTEGER)),
        _ => {}
    }

    let Some(left) = ctx.type_of(lhs).map(TypeRef::boxed) else {
        return LookupResult::unknown();
    };
    let right = ctx.type_of(rhs).map(TypeRef::boxed);

    if op == BinaryOp::LeftShift {
        return LookupResult::inferred(left);
    }
    if op == BinaryOp::Add && (is_string(&left) || right.as_ref().is_some_and(is_string)) {
        return LookupResult::inferred(TypeRef::new(STRING));
    }
    if let Some(right) = &right {
        if let Some(promoted) = promote(op, &left, right) {
            return LookupResult::inferred(promoted);
        }
    }
    if matches!(op, BinaryOp::Add | BinaryOp::Sub) && is_container(ctx, &left) {
        return LookupResult::inferred(left);
    }
    operator_method(ctx, op, &left, right)
}

fn is_string(ty: &TypeRef) -> bool {
    ty.dims == 0 && (ty.name == STRING || ty.name == GSTRING)
}

fn is_numeric(ty: &TypeRef) -> bool {
    ty.dims == 0 && NUMERIC.contains(&ty.name.as_str())
}

fn is_container(ctx: &LookupContext<'_>, ty: &TypeRef) -> bool {
    as_supertype(ctx.ts, ty, "java.util.Collection").is_some() || as_supertype(ctx.ts, ty, "java.util.Map").is_some()
}

/// Groovy's arithmetic result type for two boxed numeric operands.
fn promote(op: BinaryOp, left: &TypeRef, right: &TypeRef) -> Option<TypeRef> {
    if !op.is_arithmetic() || !is_numeric(left) || !is_numeric(right) {
        return None;
    }
    let either = |name: &str| left.name == name || right.name == name;
    let name = if either(DOUBLE) || either(FLOAT) {
        DOUBLE
    } else if either(BIG_DECIMAL) || op == BinaryOp::Div {
        BIG_DECIMAL
    } else if either(BIG_INTEGER) {
        BIG_INTEGER
    } else if either(LONG) {
        LONG
    } else {
        INTEGER
    };
    Some(TypeRef::new(name))
}

fn method_name(op: BinaryOp) -> Option<&'static str> {
    Some(match op {
        BinaryOp::Add => "plus",
        BinaryOp::Sub => "minus",
        BinaryOp::Mul => "multiply",
        BinaryOp::Div => "div",
        BinaryOp::Mod => "mod",
        BinaryOp::LeftShift => "leftShift",
        _ => return None,
    })
}

/// `a + b` dispatches to `a.plus(b)`, declared on the type or as an extension.
fn operator_method(ctx: &LookupContext<'_>, op: BinaryOp, left: &TypeRef, right: Option<TypeRef>) -> LookupResult {
    let Some(name) = method_name(op) else {
        return LookupResult::unknown();
    };
    let args = vec![right.unwrap_or_else(TypeRef::object)];

    let candidates: Vec<_> = ctx
        .ts
        .find_all_in_hierarchy(&left.name, name)
        .into_iter()
        .filter(|m| m.is_method() && m.arity() == 1)
        .collect();
    if let Some(method) = ctx.ts.resolve_method(&candidates, &args) {
        let ty = resolve_member_type(ctx.ts, left, &method, &args).boxed();
        return LookupResult::inferred(ty)
            .with_declaration(Declaration::Method {
                declaring_type: method.declaring_type.clone(),
                name: name.to_string(),
            })
            .with_declaring_type(TypeRef::new(method.declaring_type));
    }

    match ctx.dgm.find(ctx.ts, left, name, 1) {
        Some(signature) => LookupResult::inferred(signature.return_type(ctx.ts, left, &args)).with_declaration(
            Declaration::Extension {
                receiver: signature.receiver.clone(),
                name: name.to_string(),
            },
        ),
        None => LookupResult::unknown(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ty(s: &str) -> TypeRef {
        TypeRef::new(s)
    }

    #[test]
    fn numeric_promotion() {
        assert_eq!(promote(BinaryOp::Add, &ty(INTEGER), &ty(INTEGER)), Some(ty(INTEGER)));
        assert_eq!(promote(BinaryOp::Mul, &ty(INTEGER), &ty(LONG)), Some(ty(LONG)));
        assert_eq!(promote(BinaryOp::Sub, &ty(FLOAT), &ty(INTEGER)), Some(ty(DOUBLE)));
        assert_eq!(promote(BinaryOp::Div, &ty(INTEGER), &ty(INTEGER)), Some(ty(BIG_DECIMAL)));
        assert_eq!(promote(BinaryOp::Add, &ty(BIG_INTEGER), &ty(INTEGER)), Some(ty(BIG_INTEGER)));
        assert_eq!(promote(BinaryOp::Add, &ty(STRING), &ty(INTEGER)), None);
        assert_eq!(promote(BinaryOp::Eq, &ty(INTEGER), &ty(INTEGER)), None);
    }
}
