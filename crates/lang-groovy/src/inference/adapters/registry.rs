//! In-memory binding registry.
//!
//! Type declarations are nodes of a [`StableDiGraph`]; supertype edges carry
//! the type arguments written on the `extends`/`implements` clause. Supertypes
//! that are referenced before they are declared get a placeholder node which
//! is filled in when the declaration arrives.

use crate::inference::core::types::{
    ElementTarget, MemberInfo, MemberKind, ParameterInfo, TypeDecl, TypeInfo, TypeKind,
    TypeParameter,
};
use crate::inference::{InheritanceProvider, MemberProvider, TypeProvider};
use groovyscope_api::TypeRef;
use petgraph::Direction;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

#[derive(Debug, Clone)]
enum RegistryNode {
    Declared(TypeDecl),
    /// Referenced as a supertype but not (yet) declared.
    Placeholder(String),
}

impl RegistryNode {
    fn decl(&self) -> Option<&TypeDecl> {
        match self {
            RegistryNode::Declared(decl) => Some(decl),
            RegistryNode::Placeholder(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupertypeKind {
    Extends,
    Implements,
}

/// A supertype edge, child to parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupertypeEdge {
    pub kind: SupertypeKind,
    pub args: Vec<TypeRef>,
    /// Declaration order among the child's interfaces.
    pub position: usize,
}

/// Type declarations indexed by binary name.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    topology: StableDiGraph<RegistryNode, SupertypeEdge>,
    fqn_index: HashMap<String, NodeIndex>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a declaration, replacing any earlier one with the same name.
    pub fn add_type(&mut self, decl: TypeDecl) -> NodeIndex {
        let fqn = decl.info.fqn.clone();
        let idx = self.node_for(&fqn);

        let stale: Vec<_> = self
            .topology
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| e.id())
            .collect();
        for edge in stale {
            self.topology.remove_edge(edge);
        }

        if let Some(superclass) = &decl.info.superclass {
            let target = self.node_for(&superclass.name);
            self.topology.add_edge(
                idx,
                target,
                SupertypeEdge {
                    kind: SupertypeKind::Extends,
                    args: superclass.args.clone(),
                    position: 0,
                },
            );
        }
        for (position, iface) in decl.info.interfaces.iter().enumerate() {
            let target = self.node_for(&iface.name);
            self.topology.add_edge(
                idx,
                target,
                SupertypeEdge {
                    kind: SupertypeKind::Implements,
                    args: iface.args.clone(),
                    position,
                },
            );
        }

        if let Some(weight) = self.topology.node_weight_mut(idx) {
            *weight = RegistryNode::Declared(decl);
        }
        idx
    }

    fn node_for(&mut self, fqn: &str) -> NodeIndex {
        if let Some(&idx) = self.fqn_index.get(fqn) {
            return idx;
        }
        let idx = self
            .topology
            .add_node(RegistryNode::Placeholder(fqn.to_string()));
        self.fqn_index.insert(fqn.to_string(), idx);
        idx
    }

    /// Removes a declaration. Types extending it keep a placeholder parent.
    pub fn remove_type(&mut self, fqn: &str) -> Option<TypeDecl> {
        let idx = *self.fqn_index.get(fqn)?;
        let has_children = self
            .topology
            .edges_directed(idx, Direction::Incoming)
            .next()
            .is_some();

        if has_children {
            let old = std::mem::replace(
                self.topology.node_weight_mut(idx)?,
                RegistryNode::Placeholder(fqn.to_string()),
            );
            let stale: Vec<_> = self
                .topology
                .edges_directed(idx, Direction::Outgoing)
                .map(|e| e.id())
                .collect();
            for edge in stale {
                self.topology.remove_edge(edge);
            }
            return match old {
                RegistryNode::Declared(decl) => Some(decl),
                RegistryNode::Placeholder(_) => None,
            };
        }

        self.fqn_index.remove(fqn);
        match self.topology.remove_node(idx)? {
            RegistryNode::Declared(decl) => Some(decl),
            RegistryNode::Placeholder(_) => None,
        }
    }

    pub fn get_decl(&self, fqn: &str) -> Option<&TypeDecl> {
        let idx = self.fqn_index.get(fqn)?;
        self.topology.node_weight(*idx)?.decl()
    }

    /// Names of all declared (non-placeholder) types.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.topology
            .node_weights()
            .filter_map(RegistryNode::decl)
            .map(|d| d.info.fqn.as_str())
    }

    pub fn decls(&self) -> impl Iterator<Item = &TypeDecl> {
        self.topology.node_weights().filter_map(RegistryNode::decl)
    }

    pub fn len(&self) -> usize {
        self.type_names().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn supertype_edges(&self, fqn: &str, kind: SupertypeKind) -> Vec<TypeRef> {
        let Some(&idx) = self.fqn_index.get(fqn) else {
            return Vec::new();
        };
        let mut edges: Vec<(usize, TypeRef)> = self
            .topology
            .edges_directed(idx, Direction::Outgoing)
            .filter(|e| e.weight().kind == kind)
            .filter_map(|e| {
                let name = match self.topology.node_weight(e.target())? {
                    RegistryNode::Declared(decl) => decl.info.fqn.clone(),
                    RegistryNode::Placeholder(name) => name.clone(),
                };
                Some((e.weight().position, TypeRef::generic(name, e.weight().args.clone())))
            })
            .collect();
        edges.sort_by_key(|(position, _)| *position);
        edges.into_iter().map(|(_, ty)| ty).collect()
    }
}

impl TypeProvider for TypeRegistry {
    fn get_type_info(&self, fqn: &str) -> Option<TypeInfo> {
        self.get_decl(fqn).map(|d| d.info.clone())
    }

    fn has_type(&self, fqn: &str) -> bool {
        self.get_decl(fqn).is_some()
    }
}

impl InheritanceProvider for TypeRegistry {
    fn get_superclass(&self, fqn: &str) -> Option<TypeRef> {
        self.supertype_edges(fqn, SupertypeKind::Extends)
            .into_iter()
            .next()
    }

    fn get_interfaces(&self, fqn: &str) -> Vec<TypeRef> {
        self.supertype_edges(fqn, SupertypeKind::Implements)
    }
}

impl MemberProvider for TypeRegistry {
    fn get_members(&self, type_fqn: &str, member_name: &str) -> Vec<MemberInfo> {
        self.get_decl(type_fqn)
            .map(|d| {
                d.members
                    .iter()
                    .filter(|m| m.name == member_name)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    fn get_all_members(&self, type_fqn: &str) -> Vec<MemberInfo> {
        self.get_decl(type_fqn)
            .map(|d| d.members.clone())
            .unwrap_or_default()
    }
}

/// Parses a type written in declaration tables. Table entries are trusted,
/// so a malformed entry degrades to a plain name.
fn table_type(written: &str) -> TypeRef {
    TypeRef::parse(written).unwrap_or_else(|_| TypeRef::new(written.trim()))
}

/// `T` or `T extends java.lang.Comparable<T>`.
fn table_type_param(written: &str) -> TypeParameter {
    match written.split_once(" extends ") {
        Some((name, bounds)) => TypeParameter {
            name: name.trim().to_string(),
            bounds: bounds.split('&').map(table_type).collect(),
        },
        None => TypeParameter::new(written.trim()),
    }
}

/// Fluent builder for declaration tables and test fixtures.
///
/// Types are written in their rendered form (`java.util.Map$Entry<K,V>`);
/// a parameter type ending in `...` is a varargs parameter.
pub struct TypeDeclBuilder {
    decl: TypeDecl,
}

impl TypeDeclBuilder {
    fn with_kind(fqn: &str, kind: TypeKind) -> Self {
        let mut info = TypeInfo::new(fqn, kind);
        if kind == TypeKind::Class && fqn != groovyscope_api::OBJECT {
            info.superclass = Some(TypeRef::object());
        }
        if kind == TypeKind::Annotation {
            info.interfaces = vec![TypeRef::new("java.lang.annotation.Annotation")];
        }
        Self {
            decl: TypeDecl::new(info),
        }
    }

    pub fn class(fqn: &str) -> Self {
        Self::with_kind(fqn, TypeKind::Class)
    }

    pub fn interface(fqn: &str) -> Self {
        Self::with_kind(fqn, TypeKind::Interface)
    }

    pub fn enumeration(fqn: &str) -> Self {
        let builder = Self::with_kind(fqn, TypeKind::Enum);
        builder.extends(&format!("java.lang.Enum<{}>", fqn))
    }

    pub fn annotation(fqn: &str) -> Self {
        Self::with_kind(fqn, TypeKind::Annotation)
    }

    pub fn type_params(mut self, params: &[&str]) -> Self {
        self.decl.info.type_parameters = params.iter().map(|p| table_type_param(p)).collect();
        self
    }

    pub fn extends(mut self, superclass: &str) -> Self {
        if self.decl.info.kind == TypeKind::Interface {
            self.decl.info.interfaces.push(table_type(superclass));
        } else {
            self.decl.info.superclass = Some(table_type(superclass));
        }
        self
    }

    pub fn implements(mut self, iface: &str) -> Self {
        self.decl.info.interfaces.push(table_type(iface));
        self
    }

    pub fn modifiers(mut self, modifiers: &[&str]) -> Self {
        self.decl.info.modifiers = modifiers.iter().map(|m| m.to_string()).collect();
        self
    }

    pub fn targets(mut self, targets: &[ElementTarget]) -> Self {
        self.decl.info.annotation_targets = Some(targets.to_vec());
        self
    }

    pub fn field(mut self, name: &str, ty: &str) -> Self {
        let fqn = self.decl.info.fqn.clone();
        self.decl.members.push(MemberInfo::field(fqn, name, table_type(ty)));
        self
    }

    pub fn static_field(mut self, name: &str, ty: &str) -> Self {
        let fqn = self.decl.info.fqn.clone();
        self.decl.members.push(
            MemberInfo::field(fqn, name, table_type(ty)).with_modifiers(&["public", "static", "final"]),
        );
        self
    }

    /// A Groovy property: the field plus its synthesized getter.
    pub fn property(mut self, name: &str, ty: &str) -> Self {
        let fqn = self.decl.info.fqn.clone();
        let mut field = MemberInfo::field(fqn.clone(), name, table_type(ty));
        field.kind = MemberKind::Property;
        self.decl.members.push(field);
        self.decl
            .members
            .push(MemberInfo::method(fqn, getter_name(name), table_type(ty), Vec::new()));
        self
    }

    pub fn method(self, name: &str, returns: &str, params: &[&str]) -> Self {
        self.push_method(name, returns, params, &[], &["public"])
    }

    pub fn static_method(self, name: &str, returns: &str, params: &[&str]) -> Self {
        self.push_method(name, returns, params, &[], &["public", "static"])
    }

    pub fn abstract_method(self, name: &str, returns: &str, params: &[&str]) -> Self {
        self.push_method(name, returns, params, &[], &["public", "abstract"])
    }

    /// A method declaring its own type parameters, e.g. `<T> T[] toArray(T[])`.
    pub fn generic_method(self, type_params: &[&str], name: &str, returns: &str, params: &[&str]) -> Self {
        self.push_method(name, returns, params, type_params, &["public"])
    }

    pub fn static_generic_method(
        self,
        type_params: &[&str],
        name: &str,
        returns: &str,
        params: &[&str],
    ) -> Self {
        self.push_method(name, returns, params, type_params, &["public", "static"])
    }

    fn push_method(
        mut self,
        name: &str,
        returns: &str,
        params: &[&str],
        type_params: &[&str],
        modifiers: &[&str],
    ) -> Self {
        let fqn = self.decl.info.fqn.clone();
        let parameters = params
            .iter()
            .enumerate()
            .map(|(i, p)| ParameterInfo {
                name: format!("arg{}", i),
                type_ref: table_type(p),
                is_varargs: p.trim_end().ends_with("..."),
            })
            .collect();
        let method = MemberInfo::method(fqn, name, table_type(returns), parameters)
            .with_type_parameters(type_params.iter().map(|p| table_type_param(p)).collect())
            .with_modifiers(modifiers);
        self.decl.members.push(method);
        self
    }

    pub fn build(self) -> TypeDecl {
        self.decl
    }

    /// Builds and adds the declaration to `registry`.
    pub fn register(self, registry: &mut TypeRegistry) -> NodeIndex {
        registry.add_type(self.build())
    }
}

/// `name` to `getName`.
pub fn getter_name(property: &str) -> String {
    let mut chars = property.chars();
    match chars.next() {
        Some(first) => format!("get{}{}", first.to_uppercase(), chars.as_str()),
        None => "get".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::GroovyTypeSystem;

    fn registry() -> TypeRegistry {
        let mut reg = TypeRegistry::new();
        TypeDeclBuilder::class("java.lang.Object").register(&mut reg);
        TypeDeclBuilder::interface("p.Shape")
            .type_params(&["T"])
            .method("area", "T", &[])
            .register(&mut reg);
        TypeDeclBuilder::class("p.Square")
            .extends("p.Base")
            .implements("p.Shape<java.lang.Integer>")
            .implements("java.lang.Comparable<p.Square>")
            .property("side", "int")
            .register(&mut reg);
        reg
    }

    #[test]
    fn placeholders_are_filled_in_later() {
        let mut reg = registry();
        assert!(!reg.has_type("p.Base"));
        assert_eq!(reg.get_superclass("p.Square"), Some(TypeRef::new("p.Base")));

        TypeDeclBuilder::class("p.Base").method("name", "java.lang.String", &[]).register(&mut reg);
        assert!(reg.has_type("p.Base"));
        assert_eq!(reg.find_member_in_hierarchy("p.Square", "name").len(), 1);
    }

    #[test]
    fn interfaces_keep_declaration_order_and_arguments() {
        let reg = registry();
        let ifaces = reg.get_interfaces("p.Square");
        assert_eq!(ifaces[0].to_string(), "p.Shape<java.lang.Integer>");
        assert_eq!(ifaces[1].to_string(), "java.lang.Comparable<p.Square>");
        let ancestors: Vec<String> = reg.walk_ancestors("p.Square").collect();
        assert_eq!(ancestors[0], "p.Base");
    }

    #[test]
    fn properties_synthesize_getters() {
        let reg = registry();
        assert_eq!(reg.get_members("p.Square", "getSide")[0].type_ref, TypeRef::new("int"));
        assert_eq!(reg.get_members("p.Square", "side")[0].kind, MemberKind::Property);
    }

    #[test]
    fn redeclaring_replaces_edges() {
        let mut reg = registry();
        TypeDeclBuilder::class("p.Square").register(&mut reg);
        assert_eq!(reg.get_superclass("p.Square"), Some(TypeRef::object()));
        assert!(reg.get_interfaces("p.Square").is_empty());
        assert!(reg.remove_type("p.Square").is_some());
        assert!(!reg.has_type("p.Square"));
    }
}
