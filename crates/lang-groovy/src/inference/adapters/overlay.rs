//! A registry layered over another type system.
//!
//! Declarations in the top layer shadow same-named declarations below, which
//! lets a unit under analysis (or a set of project sources) be resolved
//! against the shared JDK registry without copying it.

use super::registry::TypeRegistry;
use crate::inference::core::types::{MemberInfo, TypeInfo};
use crate::inference::{GroovyTypeSystem, InheritanceProvider, MemberProvider, TypeProvider};
use groovyscope_api::TypeRef;

pub struct OverlayTypeSystem<'a, B: GroovyTypeSystem + ?Sized> {
    base: &'a B,
    top: TypeRegistry,
}

impl<'a, B: GroovyTypeSystem + ?Sized> OverlayTypeSystem<'a, B> {
    pub fn new(base: &'a B, top: TypeRegistry) -> Self {
        Self { base, top }
    }

    pub fn base(&self) -> &'a B {
        self.base
    }

    pub fn top(&self) -> &TypeRegistry {
        &self.top
    }

    pub fn top_mut(&mut self) -> &mut TypeRegistry {
        &mut self.top
    }

    pub fn into_top(self) -> TypeRegistry {
        self.top
    }

    fn shadows(&self, fqn: &str) -> bool {
        self.top.has_type(fqn)
    }
}

impl<B: GroovyTypeSystem + ?Sized> TypeProvider for OverlayTypeSystem<'_, B> {
    fn get_type_info(&self, fqn: &str) -> Option<TypeInfo> {
        self.top
            .get_type_info(fqn)
            .or_else(|| self.base.get_type_info(fqn))
    }

    fn has_type(&self, fqn: &str) -> bool {
        self.top.has_type(fqn) || self.base.has_type(fqn)
    }
}

impl<B: GroovyTypeSystem + ?Sized> InheritanceProvider for OverlayTypeSystem<'_, B> {
    fn get_superclass(&self, fqn: &str) -> Option<TypeRef> {
        if self.shadows(fqn) {
            self.top.get_superclass(fqn)
        } else {
            self.base.get_superclass(fqn)
        }
    }

    fn get_interfaces(&self, fqn: &str) -> Vec<TypeRef> {
        if self.shadows(fqn) {
            self.top.get_interfaces(fqn)
        } else {
            self.base.get_interfaces(fqn)
        }
    }
}

impl<B: GroovyTypeSystem + ?Sized> MemberProvider for OverlayTypeSystem<'_, B> {
    fn get_members(&self, type_fqn: &str, member_name: &str) -> Vec<MemberInfo> {
        if self.shadows(type_fqn) {
            self.top.get_members(type_fqn, member_name)
        } else {
            self.base.get_members(type_fqn, member_name)
        }
    }

    fn get_all_members(&self, type_fqn: &str) -> Vec<MemberInfo> {
        if self.shadows(type_fqn) {
            self.top.get_all_members(type_fqn)
        } else {
            self.base.get_all_members(type_fqn)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::adapters::jdk::jdk_registry;
    use crate::inference::adapters::registry::TypeDeclBuilder;

    #[test]
    fn top_layer_shadows_and_extends_the_base() {
        let mut top = TypeRegistry::new();
        TypeDeclBuilder::class("p.Bag")
            .type_params(&["E"])
            .extends("java.util.ArrayList<E>")
            .method("shake", "void", &[])
            .register(&mut top);
        let ts = OverlayTypeSystem::new(jdk_registry(), top);

        assert!(ts.has_type("p.Bag"));
        assert!(ts.has_type("java.util.List"));
        let ancestors: Vec<String> = ts.walk_ancestors("p.Bag").collect();
        assert_eq!(ancestors[0], "java.util.ArrayList");
        assert!(ancestors.contains(&"java.util.Collection".to_string()));
        assert_eq!(ts.find_member_in_hierarchy("p.Bag", "size")[0].declaring_type, "java.util.Collection");
    }

    #[test]
    fn shadowed_declarations_hide_base_members() {
        let mut top = TypeRegistry::new();
        TypeDeclBuilder::class("java.util.Date")
            .method("tick", "void", &[])
            .register(&mut top);
        let ts = OverlayTypeSystem::new(jdk_registry(), top);

        assert!(ts.get_members("java.util.Date", "getTime").is_empty());
        assert_eq!(ts.get_members("java.util.Date", "tick").len(), 1);
        assert!(ts.get_interfaces("java.util.Date").is_empty());
    }
}
