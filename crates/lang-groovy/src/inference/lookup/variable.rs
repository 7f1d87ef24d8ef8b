//! Local variables, parameters, `this` and `super`.

use super::{LookupResult, Receiver, TypeLookup};
use crate::ast::{ExprId, ExprKind};
use crate::inference::context::LookupContext;
use groovyscope_api::{Confidence, Declaration, TypeRef};

pub struct VariableLookup;

impl TypeLookup for VariableLookup {
    fn name(&self) -> &'static str {
        "variable"
    }

    fn lookup(&self, expr: ExprId, _receiver: Option<&Receiver>, ctx: &LookupContext<'_>) -> LookupResult {
        let node = ctx.expr(expr);
        match &node.kind {
            ExprKind::Variable(name) | ExprKind::Binding(name) => {
                let Some(info) = ctx.scope.lookup(name) else {
                    return LookupResult::unknown();
                };
                let confidence = if info.explicit {
                    Confidence::Exact
                } else {
                    Confidence::Inferred
                };
                LookupResult::inferred(info.type_ref.clone())
                    .with_confidence(confidence)
                    .with_declaration(Declaration::Variable {
                        name: name.clone(),
                        span: info.span.unwrap_or(node.span),
                    })
            }
            ExprKind::This => {
                let Some(enclosing) = ctx.enclosing_type() else {
                    return LookupResult::unknown();
                };
                if ctx.scope.in_static_context() {
                    return LookupResult::type_literal(enclosing);
                }
                LookupResult::exact(TypeRef::new(enclosing)).with_declaration(Declaration::Type {
                    fqn: enclosing.to_string(),
                })
            }
            ExprKind::Super => {
                let Some(superclass) = ctx.enclosing_type().and_then(|e| ctx.ts.get_superclass(e)) else {
                    return LookupResult::unknown();
                };
                let fqn = superclass.name.clone();
                LookupResult::exact(superclass).with_declaration(Declaration::Type { fqn })
            }
            _ => LookupResult::unknown(),
        }
    }
}
