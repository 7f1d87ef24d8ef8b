//! Expressions naming a type: `String`, `java.util.List`, `Map.Entry`.

use super::{LookupResult, Receiver, TypeLookup};
use crate::ast::{ExprId, ExprKind, Module};
use crate::inference::context::LookupContext;

/// Resolves type names through the unit's imports. The result is
/// `java.lang.Class<T>` and marks the expression as a static receiver.
pub struct TypeNameLookup;

impl TypeLookup for TypeNameLookup {
    fn name(&self) -> &'static str {
        "type-name"
    }

    fn lookup(&self, expr: ExprId, receiver: Option<&Receiver>, ctx: &LookupContext<'_>) -> LookupResult {
        match &ctx.expr(expr).kind {
            ExprKind::Variable(name) => {
                if ctx.scope.lookup(name).is_some() || ctx.scope.is_type_parameter(name) {
                    return LookupResult::unknown();
                }
                match ctx.imports.resolve(ctx.ts, name).best() {
                    Some(fqn) => LookupResult::type_literal(fqn),
                    None => LookupResult::unknown(),
                }
            }
            ExprKind::Property { name, .. } => {
                let Some(member) = ctx.name_of(*name) else {
                    return LookupResult::unknown();
                };
                if let Some(outer) = receiver.filter(|r| r.is_static) {
                    let nested = format!("{}${}", outer.type_ref.name, member);
                    if ctx.ts.has_type(&nested) {
                        return LookupResult::type_literal(&nested);
                    }
                    return LookupResult::unknown();
                }
                if receiver.is_some() {
                    return LookupResult::unknown();
                }
                match dotted_path(ctx.module, expr).map(|path| ctx.imports.resolve(ctx.ts, &path)) {
                    Some(resolution) => match resolution.best() {
                        Some(fqn) => LookupResult::type_literal(fqn),
                        None => LookupResult::unknown(),
                    },
                    None => LookupResult::unknown(),
                }
            }
            _ => LookupResult::unknown(),
        }
    }
}

/// `a.b.c` for a chain of plain property accesses over a variable.
fn dotted_path(module: &Module, id: ExprId) -> Option<String> {
    match &module.expr(id).kind {
        ExprKind::Variable(name) => Some(name.clone()),
        ExprKind::Property {
            receiver,
            name,
            safe: false,
            spread: false,
        } => {
            let ExprKind::Name(member) = &module.expr(*name).kind else {
                return None;
            };
            Some(format!("{}.{}", dotted_path(module, *receiver)?, member))
        }
        _ => None,
    }
}
