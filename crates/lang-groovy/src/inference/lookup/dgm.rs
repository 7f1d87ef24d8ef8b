//! Extension methods from the active [`DgmTable`](crate::inference::dgm::DgmTable).

use super::{LookupResult, Receiver, TypeLookup};
use crate::ast::{ExprId, ExprKind};
use crate::inference::adapters::registry::getter_name;
use crate::inference::context::LookupContext;
use crate::inference::core::generics::as_supertype;
use crate::inference::dgm::DgmSignature;
use groovyscope_api::{Declaration, TypeRef};

const LIST: &str = "java.util.List";
const RANGE: &str = "groovy.lang.Range";

/// Method calls, getter-style properties (`list.first`) and subscripts
/// (`map['k']`, through `getAt`) resolved against extension methods.
pub struct DgmLookup;

impl TypeLookup for DgmLookup {
    fn name(&self) -> &'static str {
        "dgm"
    }

    fn lookup(&self, expr: ExprId, receiver: Option<&Receiver>, ctx: &LookupContext<'_>) -> LookupResult {
        match &ctx.expr(expr).kind {
            ExprKind::MethodCall {
                receiver: target,
                name,
                args,
                ..
            } => {
                let Some(name) = ctx.name_of(*name) else {
                    return LookupResult::unknown();
                };
                let on = match (target, receiver) {
                    (Some(_), Some(receiver)) => receiver.expression_type(),
                    (None, _) => match ctx.enclosing_type() {
                        Some(owner) => TypeRef::new(owner),
                        None => return LookupResult::unknown(),
                    },
                    (Some(_), None) => return LookupResult::unknown(),
                };
                let arg_types = ctx.arg_types(args);
                extension(ctx, &on, name, &arg_types)
            }
            ExprKind::Property { name, .. } => {
                let (Some(receiver), Some(name)) = (receiver, ctx.name_of(*name)) else {
                    return LookupResult::unknown();
                };
                extension(ctx, &receiver.expression_type(), &getter_name(name), &[])
            }
            ExprKind::Index { receiver: target, index } => {
                let Some(on) = ctx.type_of(*target).cloned() else {
                    return LookupResult::unknown();
                };
                let index_type = ctx.type_of(*index).cloned().unwrap_or_else(TypeRef::object);
                let is_list = as_supertype(ctx.ts, &on, LIST).is_some();
                if is_list && as_supertype(ctx.ts, &index_type, RANGE).is_some() {
                    return LookupResult::inferred(on.boxed()).with_declaration(Declaration::Extension {
                        receiver: LIST.to_string(),
                        name: "getAt".to_string(),
                    });
                }
                extension(ctx, &on, "getAt", &[index_type])
            }
            _ => LookupResult::unknown(),
        }
    }
}

fn extension(ctx: &LookupContext<'_>, on: &TypeRef, name: &str, arg_types: &[TypeRef]) -> LookupResult {
    match ctx.dgm.find(ctx.ts, on, name, arg_types.len()) {
        Some(signature) => signature_result(ctx, signature, on, arg_types),
        None => LookupResult::unknown(),
    }
}

fn signature_result(
    ctx: &LookupContext<'_>,
    signature: &DgmSignature,
    on: &TypeRef,
    arg_types: &[TypeRef],
) -> LookupResult {
    LookupResult::inferred(signature.return_type(ctx.ts, on, arg_types))
        .with_declaration(Declaration::Extension {
            receiver: signature.receiver.clone(),
            name: signature.name.clone(),
        })
        .with_declaring_type(
            TypeRef::parse(&signature.receiver).unwrap_or_else(|_| TypeRef::new(signature.receiver.as_str())),
        )
}
