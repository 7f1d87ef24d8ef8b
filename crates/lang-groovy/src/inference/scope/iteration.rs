//! Element types of iterated values and the parameters bound to closures
//! passed to extension methods.

use crate::inference::core::generics::{GenericsSpec, as_supertype};
use crate::inference::dgm::ClosureParams;
use crate::inference::GroovyTypeSystem;
use groovyscope_api::TypeRef;

pub const MAP: &str = "java.util.Map";
pub const MAP_ENTRY: &str = "java.util.Map$Entry";
pub const ITERABLE: &str = "java.lang.Iterable";
const ITERATOR: &str = "java.util.Iterator";
const ENUMERATION: &str = "java.util.Enumeration";
const INPUT_STREAM: &str = "java.io.InputStream";
const STRING: &str = "java.lang.String";
const BYTE: &str = "java.lang.Byte";
const INTEGER: &str = "java.lang.Integer";

/// Key and value types of a map, `None` when `ty` is not a map.
pub fn map_key_value<T: GroovyTypeSystem + ?Sized>(ts: &T, ty: &TypeRef) -> Option<(TypeRef, TypeRef)> {
    let map = as_supertype(ts, ty, MAP)?;
    let mut args = map.args.into_iter();
    let key = args.next().unwrap_or_else(TypeRef::object);
    let value = args.next().unwrap_or_else(TypeRef::object);
    Some((key, value))
}

fn first_argument<T: GroovyTypeSystem + ?Sized>(ts: &T, ty: &TypeRef, target: &str) -> Option<TypeRef> {
    let viewed = as_supertype(ts, ty, target)?;
    Some(viewed.args.into_iter().next().unwrap_or_else(TypeRef::object))
}

/// The type of each value produced when iterating over `ty`.
///
/// Anything that is not iterable iterates over itself.
pub fn element_type<T: GroovyTypeSystem + ?Sized>(ts: &T, ty: &TypeRef) -> TypeRef {
    if let Some(component) = ty.component() {
        return component.boxed();
    }
    let ty = ty.boxed();
    if let Some((key, value)) = map_key_value(ts, &ty) {
        return TypeRef::generic(MAP_ENTRY, vec![key, value]);
    }
    if let Some(elem) = first_argument(ts, &ty, ITERATOR).or_else(|| first_argument(ts, &ty, ENUMERATION)) {
        return elem;
    }
    if as_supertype(ts, &ty, INPUT_STREAM).is_some() {
        return TypeRef::new(BYTE);
    }
    if ty.name == STRING {
        return ty;
    }
    first_argument(ts, &ty, ITERABLE).unwrap_or(ty)
}

/// Types of the parameters a closure receives from an extension method.
///
/// `declared` is the number of parameters the closure literal declares (one
/// for the implicit `it`); `templates` instantiates `Fixed` rules.
pub fn closure_param_types<T: GroovyTypeSystem + ?Sized>(
    ts: &T,
    rule: &ClosureParams,
    receiver: &TypeRef,
    declared: usize,
    templates: &GenericsSpec,
    arg_types: &[TypeRef],
) -> Vec<TypeRef> {
    let elem = element_type(ts, receiver);
    let entry = map_key_value(ts, receiver);
    let index = TypeRef::new(INTEGER);

    match rule {
        ClosureParams::Element => match entry {
            Some((key, value)) if declared >= 2 => vec![key, value],
            _ => vec![elem],
        },
        ClosureParams::ElementWithIndex => match entry {
            Some((key, value)) if declared >= 3 => vec![key, value, index],
            _ => vec![elem, index],
        },
        ClosureParams::ElementOrPair => {
            if declared >= 2 {
                vec![elem.clone(), elem]
            } else {
                vec![elem]
            }
        }
        ClosureParams::Accumulator => vec![elem.clone(), elem],
        ClosureParams::AccumulatorWithSeed => {
            let seed = arg_types
                .first()
                .map(TypeRef::boxed)
                .unwrap_or_else(TypeRef::object);
            match entry {
                Some((key, value)) if declared >= 3 => vec![seed, key, value],
                _ => vec![seed, elem],
            }
        }
        ClosureParams::Receiver => vec![receiver.boxed()],
        ClosureParams::Fixed(params) => params
            .iter()
            .map(|p| templates.substitute(p).boxed())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::adapters::jdk::jdk_registry;

    fn ty(s: &str) -> TypeRef {
        TypeRef::parse(s).unwrap()
    }

    fn elem(s: &str) -> String {
        element_type(jdk_registry(), &ty(s)).to_string()
    }

    #[test]
    fn iteration_follows_the_source_type() {
        assert_eq!(elem("java.lang.Integer[]"), "java.lang.Integer");
        assert_eq!(elem("int[]"), "java.lang.Integer");
        assert_eq!(elem("java.util.ArrayList<java.lang.String>"), "java.lang.String");
        assert_eq!(
            elem("java.util.HashMap<java.lang.String,java.util.Date>"),
            "java.util.Map$Entry<java.lang.String,java.util.Date>"
        );
        assert_eq!(elem("java.util.Iterator<java.lang.Long>"), "java.lang.Long");
        assert_eq!(elem("java.io.DataInputStream"), "java.lang.Byte");
        assert_eq!(elem("java.lang.String"), "java.lang.String");
        assert_eq!(elem("groovy.lang.IntRange"), "java.lang.Integer");
    }

    #[test]
    fn raw_and_non_iterable_values() {
        assert_eq!(elem("java.util.LinkedList"), "java.lang.Object");
        assert_eq!(elem("java.lang.Integer"), "java.lang.Integer");
        assert_eq!(elem("java.util.Date"), "java.util.Date");
    }

    #[test]
    fn map_closures_take_entries_or_keys_and_values() {
        let ts = jdk_registry();
        let map = ty("java.util.Map<java.lang.Float,java.lang.Double>");
        let none = GenericsSpec::new();
        let one = closure_param_types(ts, &ClosureParams::Element, &map, 1, &none, &[]);
        assert_eq!(one[0].to_string(), "java.util.Map$Entry<java.lang.Float,java.lang.Double>");
        let two = closure_param_types(ts, &ClosureParams::Element, &map, 2, &none, &[]);
        assert_eq!(two, vec![ty("java.lang.Float"), ty("java.lang.Double")]);
        let three = closure_param_types(ts, &ClosureParams::ElementWithIndex, &map, 3, &none, &[]);
        assert_eq!(three[2], ty("java.lang.Integer"));
    }

    #[test]
    fn seeds_and_fixed_templates() {
        let ts = jdk_registry();
        let list = ty("java.util.List<java.lang.String>");
        let seeded = closure_param_types(
            ts,
            &ClosureParams::AccumulatorWithSeed,
            &list,
            2,
            &GenericsSpec::new(),
            &[ty("int")],
        );
        assert_eq!(seeded, vec![ty("java.lang.Integer"), ty("java.lang.String")]);

        let mut spec = GenericsSpec::new();
        spec.insert("$R", ty("java.lang.Long"));
        let fixed = ClosureParams::Fixed(vec![ty("$R")]);
        let bound = closure_param_types(ts, &fixed, &ty("java.lang.Long"), 1, &spec, &[]);
        assert_eq!(bound, vec![ty("java.lang.Long")]);
    }
}
