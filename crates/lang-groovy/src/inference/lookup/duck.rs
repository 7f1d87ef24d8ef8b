//! Last resort for dynamic member accesses.

use super::{LookupResult, Receiver, TypeLookup};
use crate::ast::{ExprId, ExprKind};
use crate::inference::context::LookupContext;
use groovyscope_api::TypeRef;

/// A member the receiver's type does not declare may still exist at
/// runtime, so the access stays `Unknown` but renders as `Object`.
pub struct DuckTypeLookup;

impl TypeLookup for DuckTypeLookup {
    fn name(&self) -> &'static str {
        "duck"
    }

    fn lookup(&self, expr: ExprId, receiver: Option<&Receiver>, ctx: &LookupContext<'_>) -> LookupResult {
        let member_access = matches!(
            ctx.expr(expr).kind,
            ExprKind::Property { .. } | ExprKind::MethodCall { receiver: Some(_), .. }
        );
        if member_access && receiver.is_some() {
            LookupResult::fallback(TypeRef::object())
        } else {
            LookupResult::unknown()
        }
    }
}
