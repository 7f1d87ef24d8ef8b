//! Types recorded by the static type checker.

use super::{LookupResult, Receiver, TypeLookup};
use crate::ast::{ExprId, ExprKind};
use crate::inference::context::LookupContext;
use groovyscope_api::{Declaration, TypeRef};

/// Reads [`crate::inference::attributes::NodeAttributes`].
///
/// Type checking exists from Groovy 2.0 on; older versions never record
/// attributes, so the lookup stays silent there. Variables the checker
/// could not bind defer to the other strategies.
pub struct StcTypeLookup;

impl TypeLookup for StcTypeLookup {
    fn name(&self) -> &'static str {
        "stc"
    }

    fn lookup(&self, expr: ExprId, receiver: Option<&Receiver>, ctx: &LookupContext<'_>) -> LookupResult {
        if !ctx.version.has_static_type_checking() {
            return LookupResult::unknown();
        }
        let Some(attribute) = ctx.attributes.get(expr) else {
            return LookupResult::unknown();
        };
        let node = ctx.expr(expr);

        if let ExprKind::Variable(name) = &node.kind {
            if attribute.dynamic {
                return LookupResult::unknown();
            }
            if let Some(ty) = &attribute.inferred_type {
                let declaration = match ctx.scope.lookup(name).and_then(|v| v.span) {
                    Some(span) => Declaration::Variable {
                        name: name.clone(),
                        span,
                    },
                    None => Declaration::Node { span: node.span },
                };
                return LookupResult::inferred(ty.boxed()).with_declaration(declaration);
            }
        }

        if let Some(ty) = &attribute.inferred_type {
            let mut result = LookupResult::inferred(ty.boxed()).with_declaration(Declaration::Node { span: node.span });
            if let Some(receiver) = receiver {
                result = result.with_declaring_type(receiver.type_ref.clone());
            }
            return result;
        }

        if let (ExprKind::Property { .. }, Some(target)) = (&node.kind, &attribute.direct_call_target) {
            return LookupResult::inferred(target.returns.boxed())
                .with_declaration(Declaration::Method {
                    declaring_type: target.declaring_type.name.clone(),
                    name: target.name.clone(),
                })
                .with_declaring_type(target.declaring_type.clone());
        }

        LookupResult::unknown()
    }
}

impl StcTypeLookup {
    /// Inferred type of a field declared with `def`.
    pub fn field_type(ctx: &LookupContext<'_>, declaring_type: &str, name: &str) -> Option<TypeRef> {
        if !ctx.version.has_static_type_checking() {
            return None;
        }
        ctx.attributes.field_type(declaring_type, name).map(TypeRef::boxed)
    }

    /// Inferred return type of a `def` method.
    pub fn return_type(ctx: &LookupContext<'_>, declaring_type: &str, name: &str) -> Option<TypeRef> {
        if !ctx.version.has_static_type_checking() {
            return None;
        }
        ctx.attributes.return_type(declaring_type, name).map(TypeRef::boxed)
    }
}
