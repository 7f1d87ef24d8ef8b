//! Generics substitution.
//!
//! A [`GenericsSpec`] maps type-parameter names to the types they stand for
//! in one particular instantiation. Member types are declared in terms of
//! their declaring type's parameters, so resolving `map.entrySet()` means
//! building the spec of the receiver, carrying it up the supertype edges to
//! the declaring type, and substituting the declared return type through it.

use super::type_system::GroovyTypeSystem;
use super::types::{MemberInfo, TypeParameter};
use groovyscope_api::TypeRef;
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::debug;

/// Type-parameter name to type, scoped to one declaring type or method.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenericsSpec {
    map: HashMap<String, TypeRef>,
}

impl GenericsSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, ty: TypeRef) {
        self.map.insert(name.into(), ty);
    }

    pub fn get(&self, name: &str) -> Option<&TypeRef> {
        self.map.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Binds `params` positionally to `supplied`.
    ///
    /// A raw use (or any arity mismatch) binds every parameter to the
    /// erasure of its first bound instead.
    pub fn create(params: &[TypeParameter], supplied: &[TypeRef]) -> Self {
        let mut spec = Self::new();
        if params.len() == supplied.len() {
            for (param, ty) in params.iter().zip(supplied) {
                spec.insert(param.name.clone(), ty.clone());
            }
        } else {
            for param in params {
                spec.insert(param.name.clone(), param.erased_bound());
            }
        }
        spec
    }

    /// Replaces parameter occurrences at any depth. Array dimensions of the
    /// occurrence are added to the replacement.
    pub fn substitute(&self, ty: &TypeRef) -> TypeRef {
        if ty.args.is_empty() {
            if let Some(replacement) = self.map.get(&ty.name) {
                return replacement.clone().array_of(ty.dims);
            }
            return ty.clone();
        }

        TypeRef {
            name: ty.name.clone(),
            args: ty.args.iter().map(|arg| self.substitute(arg)).collect(),
            dims: ty.dims,
        }
    }

    /// The spec of a supertype reached over one edge.
    ///
    /// `edge_args` are the arguments written on the edge (`AbstractMap<K,V>`
    /// in `HashMap<K,V> extends AbstractMap<K,V>`), expressed in the child's
    /// parameters; each is substituted through `child` before being bound to
    /// the supertype's `edge_params`.
    pub fn compose_along_edge(
        child: &GenericsSpec,
        edge_args: &[TypeRef],
        edge_params: &[TypeParameter],
    ) -> GenericsSpec {
        let substituted: Vec<TypeRef> = edge_args.iter().map(|arg| child.substitute(arg)).collect();
        GenericsSpec::create(edge_params, &substituted)
    }
}

fn type_parameters_of<T: GroovyTypeSystem + ?Sized>(ts: &T, fqn: &str) -> Vec<TypeParameter> {
    ts.get_type_info(fqn)
        .map(|info| info.type_parameters)
        .unwrap_or_default()
}

/// The spec of `receiver` for its own type parameters.
pub fn spec_for_type<T: GroovyTypeSystem + ?Sized>(ts: &T, receiver: &TypeRef) -> GenericsSpec {
    GenericsSpec::create(&type_parameters_of(ts, &receiver.name), &receiver.args)
}

/// The spec of `declaring` as seen from `receiver`.
///
/// Walks supertype edges breadth first, composing specs along the way. When
/// `declaring` is not an ancestor of `receiver` the declaring type's raw spec
/// (its bounds) is returned.
pub fn spec_for_declaring_type<T: GroovyTypeSystem + ?Sized>(
    ts: &T,
    receiver: &TypeRef,
    declaring: &str,
) -> GenericsSpec {
    let start = spec_for_type(ts, receiver);
    if receiver.name == declaring {
        return start;
    }

    let mut visited = HashSet::from([receiver.name.clone()]);
    let mut queue = VecDeque::from([(receiver.name.clone(), start)]);

    while let Some((fqn, spec)) = queue.pop_front() {
        let edges = ts.get_superclass(&fqn).into_iter().chain(ts.get_interfaces(&fqn));
        for edge in edges {
            if !visited.insert(edge.name.clone()) {
                continue;
            }
            let params = type_parameters_of(ts, &edge.name);
            let next = GenericsSpec::compose_along_edge(&spec, &edge.args, &params);
            if edge.name == declaring {
                return next;
            }
            queue.push_back((edge.name, next));
        }
    }

    GenericsSpec::create(&type_parameters_of(ts, declaring), &[])
}

/// `receiver` viewed as an instance of its ancestor `target`, e.g.
/// `HashMap<String,Integer>` as `Map<String,Integer>`.
///
/// Returns `None` when `target` is not an ancestor.
pub fn as_supertype<T: GroovyTypeSystem + ?Sized>(
    ts: &T,
    receiver: &TypeRef,
    target: &str,
) -> Option<TypeRef> {
    if receiver.dims > 0 {
        return None;
    }
    if receiver.name != target && !ts.walk_ancestors(&receiver.name).any(|a| a == target) {
        return None;
    }
    let params = type_parameters_of(ts, target);
    let spec = spec_for_declaring_type(ts, receiver, target);
    let args = params
        .iter()
        .map(|p| spec.get(&p.name).cloned().unwrap_or_else(|| p.erased_bound()))
        .collect();
    Some(TypeRef::generic(target, args))
}

/// Extends `receiver_spec` with bindings for the method's own type parameters.
///
/// Parameters are inferred by unifying the declared parameter types with the
/// argument types; anything left unbound falls back to its bound.
pub fn method_spec<T: GroovyTypeSystem + ?Sized>(
    ts: &T,
    member: &MemberInfo,
    receiver_spec: &GenericsSpec,
    arg_types: &[TypeRef],
) -> GenericsSpec {
    let mut spec = receiver_spec.clone();
    if member.type_parameters.is_empty() {
        return spec;
    }

    let vars: HashSet<&str> = member.type_parameters.iter().map(|p| p.name.as_str()).collect();
    let mut bound = HashMap::new();
    let params = member.parameters.as_deref().unwrap_or_default();

    for (i, arg) in arg_types.iter().enumerate() {
        let Some(param) = params.get(i).or_else(|| params.last().filter(|p| p.is_varargs)) else {
            break;
        };
        let mut declared = param.type_ref.clone();
        let spreads = param.is_varargs && (arg_types.len() != params.len() || arg.dims < declared.dims);
        if spreads {
            if let Some(component) = declared.component() {
                declared = component;
            }
        }
        unify(ts, &declared, arg, &vars, &mut bound);
    }

    for param in &member.type_parameters {
        let ty = bound
            .remove(&param.name)
            .unwrap_or_else(|| param.erased_bound());
        spec.insert(param.name.clone(), ty);
    }
    spec
}

fn unify<T: GroovyTypeSystem + ?Sized>(
    ts: &T,
    declared: &TypeRef,
    actual: &TypeRef,
    vars: &HashSet<&str>,
    bound: &mut HashMap<String, TypeRef>,
) {
    if declared.args.is_empty() && vars.contains(declared.name.as_str()) {
        if actual.dims >= declared.dims {
            let mut ty = actual.clone();
            ty.dims -= declared.dims;
            bound.entry(declared.name.clone()).or_insert_with(|| ty.boxed());
        }
        return;
    }

    if declared.dims > 0 {
        if let (Some(d), Some(a)) = (declared.component(), actual.component()) {
            unify(ts, &d, &a, vars, bound);
        }
        return;
    }

    if declared.args.is_empty() || actual.dims > 0 {
        return;
    }

    let viewed = if actual.name == declared.name {
        Some(actual.clone())
    } else {
        as_supertype(ts, actual, &declared.name)
    };
    if let Some(viewed) = viewed {
        if viewed.args.len() == declared.args.len() {
            for (d, a) in declared.args.iter().zip(&viewed.args) {
                unify(ts, d, a, vars, bound);
            }
        }
    }
}

/// The type of `member` when accessed on `receiver` with `arg_types`.
pub fn resolve_member_type<T: GroovyTypeSystem + ?Sized>(
    ts: &T,
    receiver: &TypeRef,
    member: &MemberInfo,
    arg_types: &[TypeRef],
) -> TypeRef {
    let receiver_spec = spec_for_declaring_type(ts, receiver, &member.declaring_type);
    let spec = if member.is_method() {
        method_spec(ts, member, &receiver_spec, arg_types)
    } else {
        receiver_spec
    };
    spec.substitute(&member.type_ref)
}

/// Whether any instantiation in `ty` supplies the wrong number of arguments.
pub fn has_malformed_arity<T: GroovyTypeSystem + ?Sized>(ts: &T, ty: &TypeRef) -> bool {
    if !ty.args.is_empty() {
        if let Some(info) = ts.get_type_info(&ty.name) {
            if info.type_parameters.len() != ty.args.len() {
                return true;
            }
        }
    }
    ty.args.iter().any(|arg| has_malformed_arity(ts, arg))
}

/// Erases malformed instantiations to raw, at any depth.
///
/// Types the type system does not know keep their arguments.
pub fn normalize_arity<T: GroovyTypeSystem + ?Sized>(ts: &T, ty: &TypeRef) -> TypeRef {
    if ty.args.is_empty() {
        return ty.clone();
    }
    if let Some(info) = ts.get_type_info(&ty.name) {
        if info.type_parameters.len() != ty.args.len() {
            debug!(
                "erasing {} to raw: {} type arguments for {} parameters",
                ty,
                ty.args.len(),
                info.type_parameters.len()
            );
            return ty.erasure();
        }
    }
    TypeRef {
        name: ty.name.clone(),
        args: ty.args.iter().map(|arg| normalize_arity(ts, arg)).collect(),
        dims: ty.dims,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::adapters::jdk::jdk_registry;
    use crate::inference::core::types::ParameterInfo;

    fn ty(s: &str) -> TypeRef {
        TypeRef::parse(s).unwrap()
    }

    #[test]
    fn substitutes_at_any_depth_keeping_dims() {
        let mut spec = GenericsSpec::new();
        spec.insert("K", ty("java.lang.String"));
        spec.insert("V", ty("java.util.List<java.lang.Integer>"));
        let declared = ty("java.util.Map$Entry<K,V[]>[]");
        assert_eq!(
            spec.substitute(&declared).to_string(),
            "java.util.Map$Entry<java.lang.String,java.util.List<java.lang.Integer>[]>[]"
        );
    }

    #[test]
    fn raw_use_binds_to_bounds() {
        let params = vec![
            TypeParameter::new("K"),
            TypeParameter::bounded("V", ty("java.lang.Comparable<V>")),
        ];
        let spec = GenericsSpec::create(&params, &[]);
        assert_eq!(spec.get("K"), Some(&TypeRef::object()));
        assert_eq!(spec.get("V"), Some(&ty("java.lang.Comparable")));

        let mismatched = GenericsSpec::create(&params, &[ty("java.lang.String")]);
        assert_eq!(mismatched.get("K"), Some(&TypeRef::object()));
    }

    #[test]
    fn composes_edge_arguments_through_the_child() {
        let mut child = GenericsSpec::new();
        child.insert("T", ty("java.lang.String"));
        let composed = GenericsSpec::compose_along_edge(
            &child,
            &[ty("java.util.List<T>")],
            &[TypeParameter::new("E")],
        );
        assert_eq!(composed.get("E"), Some(&ty("java.util.List<java.lang.String>")));
    }

    #[test]
    fn walks_up_to_the_declaring_type() {
        let ts = jdk_registry();
        let receiver = ty("java.util.HashMap<java.lang.String,java.lang.Integer>");
        let spec = spec_for_declaring_type(ts, &receiver, "java.util.Map");
        assert_eq!(spec.get("K"), Some(&ty("java.lang.String")));
        assert_eq!(spec.get("V"), Some(&ty("java.lang.Integer")));

        let raw = spec_for_declaring_type(ts, &ty("java.util.HashMap"), "java.util.Map");
        assert_eq!(raw.get("V"), Some(&TypeRef::object()));
    }

    #[test]
    fn member_types_follow_the_receiver() {
        let ts = jdk_registry();
        let receiver = ty("java.util.HashMap<java.lang.String,java.lang.Integer>");
        let entry_set = ts.find_member_in_hierarchy("java.util.HashMap", "entrySet");
        let resolved = resolve_member_type(ts, &receiver, &entry_set[0], &[]);
        assert_eq!(
            resolved.to_string(),
            "java.util.Set<java.util.Map$Entry<java.lang.String,java.lang.Integer>>"
        );
    }

    #[test]
    fn infers_method_type_parameters_from_arguments() {
        let ts = jdk_registry();
        let member = MemberInfo::method(
            "Util",
            "first",
            ty("T"),
            vec![ParameterInfo::new("xs", ty("java.util.Collection<T>"))],
        )
        .with_type_parameters(vec![TypeParameter::new("T")]);

        let arg = ty("java.util.ArrayList<java.lang.String>");
        let spec = method_spec(ts, &member, &GenericsSpec::new(), &[arg]);
        assert_eq!(spec.get("T"), Some(&ty("java.lang.String")));

        let unbound = method_spec(ts, &member, &GenericsSpec::new(), &[]);
        assert_eq!(unbound.get("T"), Some(&TypeRef::object()));
    }

    #[test]
    fn erases_malformed_instantiations() {
        let ts = jdk_registry();
        let bad = ty("java.util.List<java.util.Map<java.lang.String>>");
        assert!(has_malformed_arity(ts, &bad));
        assert_eq!(
            normalize_arity(ts, &bad).to_string(),
            "java.util.List<java.util.Map>"
        );
        assert!(!has_malformed_arity(ts, &ty("java.util.Map<K,V>")));
    }
}
