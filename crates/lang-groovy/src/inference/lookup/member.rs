//! Fields, properties and methods declared on the receiver's type.

use super::stc::StcTypeLookup;
use super::{CLASS, LookupResult, Receiver, TypeLookup};
use crate::ast::{ExprId, ExprKind};
use crate::inference::adapters::registry::getter_name;
use crate::inference::context::LookupContext;
use crate::inference::core::generics::{as_supertype, resolve_member_type};
use crate::inference::core::types::{MemberInfo, MemberKind};
use crate::inference::scope::map_key_value;
use groovyscope_api::{Confidence, Declaration, OBJECT, TypeRef};
use tracing::trace;

const INTEGER: &str = "java.lang.Integer";

/// Resolves member accesses, including implicit-`this` references and
/// statically imported members.
///
/// Properties are tried as a field or property, then as a `getX`/`isX`
/// getter, then as a same-named method; a map receiver finally treats the
/// name as a key.
pub struct MemberLookup;

impl TypeLookup for MemberLookup {
    fn name(&self) -> &'static str {
        "member"
    }

    fn lookup(&self, expr: ExprId, receiver: Option<&Receiver>, ctx: &LookupContext<'_>) -> LookupResult {
        match &ctx.expr(expr).kind {
            ExprKind::Property { name, .. } => match (receiver, ctx.name_of(*name)) {
                (Some(receiver), Some(name)) => property(ctx, receiver, name).unwrap_or_else(LookupResult::unknown),
                _ => LookupResult::unknown(),
            },
            ExprKind::MethodCall {
                receiver: target,
                name,
                args,
                ..
            } => {
                let Some(name) = ctx.name_of(*name) else {
                    return LookupResult::unknown();
                };
                let arg_types = ctx.arg_types(args);
                let found = match (target, receiver) {
                    (Some(_), Some(receiver)) => method(ctx, receiver, name, &arg_types),
                    (None, _) => implicit(ctx, name, |ctx, receiver, name| method(ctx, receiver, name, &arg_types)),
                    (Some(_), None) => None,
                };
                found.unwrap_or_else(LookupResult::unknown)
            }
            ExprKind::Variable(name) if ctx.scope.lookup(name).is_none() => {
                implicit(ctx, name, property).unwrap_or_else(LookupResult::unknown)
            }
            ExprKind::Binding(name) if ctx.scope.in_class_body() => ctx
                .enclosing_type()
                .and_then(|owner| property(ctx, &Receiver::instance(TypeRef::new(owner)), name))
                .unwrap_or_else(LookupResult::unknown),
            _ => LookupResult::unknown(),
        }
    }
}

/// Looks `name` up on the enclosing type, then on statically imported owners.
fn implicit<F>(ctx: &LookupContext<'_>, name: &str, find: F) -> Option<LookupResult>
where
    F: Fn(&LookupContext<'_>, &Receiver, &str) -> Option<LookupResult>,
{
    if let Some(owner) = ctx.enclosing_type() {
        let receiver = Receiver {
            type_ref: TypeRef::new(owner),
            is_static: ctx.scope.in_static_context(),
        };
        if let Some(found) = find(ctx, &receiver, name) {
            return Some(found);
        }
    }
    ctx.imports
        .static_member_owners(name)
        .into_iter()
        .find_map(|(owner, member)| {
            trace!("trying static import {}.{}", owner, member);
            find(ctx, &Receiver::of_type(&owner), &member)
        })
}

/// A property access `receiver.name`.
pub(crate) fn property(ctx: &LookupContext<'_>, receiver: &Receiver, name: &str) -> Option<LookupResult> {
    let ty = &receiver.type_ref;
    if ty.is_array() {
        return (name == "length").then(|| {
            LookupResult::exact(TypeRef::new(INTEGER)).with_declaring_type(ty.clone())
        });
    }
    let owner = ty.boxed();
    if receiver.is_static {
        return property_on(ctx, &owner, name, true)
            .or_else(|| property_on(ctx, &receiver.expression_type(), name, false));
    }
    property_on(ctx, &owner, name, false)
}

fn property_on(ctx: &LookupContext<'_>, owner: &TypeRef, name: &str, static_only: bool) -> Option<LookupResult> {
    let applies = |m: &MemberInfo| !static_only || m.is_static();
    let members = |member_name: &str| -> Vec<MemberInfo> {
        ctx.ts
            .find_all_in_hierarchy(&owner.name, member_name)
            .into_iter()
            .filter(|m| applies(m))
            .collect()
    };

    if let Some(field) = members(name).into_iter().find(MemberInfo::is_variable) {
        return Some(member_result(ctx, owner, &field, &[], true));
    }

    let getter = getter_name(name);
    let is_getter = format!("is{}", &getter[3..]);
    for accessor in [getter, is_getter] {
        if let Some(method) = members(&accessor)
            .into_iter()
            .find(|m| m.is_method() && m.arity() == 0)
        {
            return Some(member_result(ctx, owner, &method, &[], true));
        }
    }

    let mut methods: Vec<MemberInfo> = members(name).into_iter().filter(MemberInfo::is_method).collect();
    methods.sort_by_key(|m| m.arity() != 0);
    if let Some(method) = methods.first() {
        let arity_ok = method.arity() == 0;
        return Some(member_result(ctx, owner, method, &[], arity_ok));
    }

    if static_only {
        return None;
    }
    let (key, value) = map_key_value(ctx.ts, owner)?;
    Some(
        LookupResult::inferred(value.boxed())
            .with_declaration(Declaration::Property {
                declaring_type: "java.util.Map".to_string(),
                name: name.to_string(),
            })
            .with_declaring_type(TypeRef::generic("java.util.Map", vec![key, TypeRef::object()])),
    )
}

/// A method call `receiver.name(args)`.
pub(crate) fn method(
    ctx: &LookupContext<'_>,
    receiver: &Receiver,
    name: &str,
    arg_types: &[TypeRef],
) -> Option<LookupResult> {
    let owner = if receiver.type_ref.is_array() {
        TypeRef::object()
    } else {
        receiver.type_ref.boxed()
    };
    if receiver.is_static {
        return method_on(ctx, &owner, name, arg_types, true)
            .or_else(|| method_on(ctx, &receiver.expression_type(), name, arg_types, false));
    }
    method_on(ctx, &owner, name, arg_types, false)
}

fn method_on(
    ctx: &LookupContext<'_>,
    owner: &TypeRef,
    name: &str,
    arg_types: &[TypeRef],
    static_only: bool,
) -> Option<LookupResult> {
    let mut signatures: Vec<Vec<TypeRef>> = Vec::new();
    let candidates: Vec<MemberInfo> = ctx
        .ts
        .find_all_in_hierarchy(&owner.name, name)
        .into_iter()
        .filter(|m| m.is_method() && (!static_only || m.is_static()))
        .filter(|m| {
            // overridden declarations further up the hierarchy
            let signature = m.erased_signature();
            if signatures.contains(&signature) {
                false
            } else {
                signatures.push(signature);
                true
            }
        })
        .collect();
    let chosen = ctx.ts.resolve_method(&candidates, arg_types)?;
    let arity_ok = chosen.arity() == arg_types.len()
        || (chosen.is_varargs() && arg_types.len() + 1 >= chosen.arity());
    Some(member_result(ctx, owner, &chosen, arg_types, arity_ok))
}

/// The typed result of accessing `member` on `owner`.
///
/// Members declared without a type (`def`) report what the type checker
/// inferred for them, or their declared `Object`, and are never `Exact`.
fn member_result(
    ctx: &LookupContext<'_>,
    owner: &TypeRef,
    member: &MemberInfo,
    arg_types: &[TypeRef],
    arity_ok: bool,
) -> LookupResult {
    let declared = resolve_member_type(ctx.ts, owner, member, arg_types).boxed();
    let (ty, confidence) = if member.explicit_type {
        let confidence = if arity_ok {
            Confidence::Exact
        } else {
            Confidence::Inferred
        };
        (declared, confidence)
    } else {
        let checked = if member.is_variable() {
            StcTypeLookup::field_type(ctx, &member.declaring_type, &member.name)
        } else {
            StcTypeLookup::return_type(ctx, &member.declaring_type, &member.name)
        };
        (checked.unwrap_or(declared), Confidence::Inferred)
    };

    let declaring_type = member.declaring_type.clone();
    let declaration = match member.kind {
        MemberKind::Field => Declaration::Field {
            declaring_type: declaring_type.clone(),
            name: member.name.clone(),
        },
        MemberKind::Property => Declaration::Property {
            declaring_type: declaring_type.clone(),
            name: member.name.clone(),
        },
        MemberKind::Method => Declaration::Method {
            declaring_type: declaring_type.clone(),
            name: member.name.clone(),
        },
        MemberKind::Constructor => Declaration::Constructor {
            declaring_type: declaring_type.clone(),
        },
    };
    let viewed = if owner.name == CLASS || declaring_type == OBJECT {
        TypeRef::new(declaring_type.as_str())
    } else {
        as_supertype(ctx.ts, owner, &declaring_type).unwrap_or_else(|| TypeRef::new(declaring_type.as_str()))
    };

    LookupResult::inferred(ty)
        .with_confidence(confidence)
        .with_declaration(declaration)
        .with_declaring_type(viewed)
}
