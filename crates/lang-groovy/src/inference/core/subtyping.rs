//! Subtyping rules implementation.
//!
//! Determines if one type is a subtype of another.
//! Supports:
//! - Identity
//! - Boxing (Groovy treats `int` and `Integer` alike)
//! - Primitive widening
//! - Classes and interfaces (by erasure)
//! - Arrays (covariant)

use crate::inference::core::type_system::GroovyTypeSystem;
use groovyscope_api::TypeRef;

/// Check if `sub` is a subtype of `super_type`.
///
/// Type arguments are ignored; only erasures are compared.
pub fn is_subtype<T: GroovyTypeSystem + ?Sized>(sub: &TypeRef, super_type: &TypeRef, ts: &T) -> bool {
    // 1. Reflexivity
    if sub == super_type {
        return true;
    }

    // 2. Object is a supertype of everything once boxed
    if super_type.is_object() {
        return true;
    }

    if sub.dims != super_type.dims {
        // Every array is an Object, and Object[] accepts reference arrays of more dimensions
        return super_type.dims > 0
            && sub.dims > super_type.dims
            && super_type.name == groovyscope_api::OBJECT;
    }

    if sub.dims > 0 {
        // Arrays of primitives are only related by identity
        if has_primitive_element(sub) || has_primitive_element(super_type) {
            return sub.name == super_type.name;
        }
        return is_class_subtype(&sub.name, &super_type.name, ts);
    }

    let (sub_boxed, super_boxed) = (sub.boxed(), super_type.boxed());
    if sub.is_primitive() && super_type.is_primitive() {
        return is_primitive_subtype(&sub.name, &super_type.name);
    }
    if sub_boxed.name == super_boxed.name {
        return true;
    }

    is_class_subtype(&sub_boxed.name, &super_boxed.name, ts)
}

fn has_primitive_element(ty: &TypeRef) -> bool {
    TypeRef::new(ty.name.clone()).is_primitive()
}

fn is_primitive_subtype(sub: &str, sup: &str) -> bool {
    match sub {
        "byte" => matches!(sup, "short" | "int" | "long" | "float" | "double"),
        "short" => matches!(sup, "int" | "long" | "float" | "double"),
        "char" => matches!(sup, "int" | "long" | "float" | "double"),
        "int" => matches!(sup, "long" | "float" | "double"),
        "long" => matches!(sup, "float" | "double"),
        "float" => matches!(sup, "double"),
        _ => false,
    }
}

fn is_class_subtype<T: GroovyTypeSystem + ?Sized>(sub_fqn: &str, super_fqn: &str, ts: &T) -> bool {
    if sub_fqn == super_fqn {
        return true;
    }

    ts.walk_ancestors(sub_fqn).any(|ancestor| ancestor == super_fqn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::adapters::jdk::jdk_registry;

    fn ty(s: &str) -> TypeRef {
        TypeRef::parse(s).unwrap()
    }

    #[test]
    fn collections_are_iterable() {
        let ts = jdk_registry();
        assert!(is_subtype(&ty("java.util.ArrayList"), &ty("java.lang.Iterable"), ts));
        assert!(is_subtype(
            &ty("java.util.HashMap<java.lang.String,java.lang.Integer>"),
            &ty("java.util.Map"),
            ts
        ));
        assert!(!is_subtype(&ty("java.util.Map"), &ty("java.util.Collection"), ts));
    }

    #[test]
    fn boxing_and_widening() {
        let ts = jdk_registry();
        assert!(is_subtype(&ty("int"), &ty("java.lang.Integer"), ts));
        assert!(is_subtype(&ty("int"), &ty("java.lang.Number"), ts));
        assert!(is_subtype(&ty("int"), &ty("long"), ts));
        assert!(!is_subtype(&ty("long"), &ty("int"), ts));
    }

    #[test]
    fn arrays_are_covariant() {
        let ts = jdk_registry();
        assert!(is_subtype(&ty("java.lang.String[]"), &ty("java.lang.Object[]"), ts));
        assert!(is_subtype(&ty("java.lang.String[][]"), &ty("java.lang.Object[]"), ts));
        assert!(is_subtype(&ty("int[]"), &ty("java.lang.Object"), ts));
        assert!(!is_subtype(&ty("int[]"), &ty("java.lang.Object[]"), ts));
        assert!(!is_subtype(&ty("java.lang.Object[]"), &ty("java.lang.String[]"), ts));
    }
}
