//! Results of the static type checker, stored beside the tree.
//!
//! Nodes are never mutated; a checker run (or a test) fills a
//! [`NodeAttributesBuilder`] and hands the frozen [`NodeAttributes`] to the
//! engine, where the STC lookup reads it.

use crate::ast::ExprId;
use groovyscope_api::TypeRef;
use std::collections::HashMap;

/// The method a property access was compiled to, e.g. `getName()` for `x.name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallTarget {
    pub declaring_type: TypeRef,
    pub name: String,
    pub returns: TypeRef,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InferredAttribute {
    pub inferred_type: Option<TypeRef>,
    pub direct_call_target: Option<CallTarget>,
    /// The checker could not bind the variable (dynamic variable).
    pub dynamic: bool,
}

/// Read-only attribute store keyed by expression.
#[derive(Debug, Clone, Default)]
pub struct NodeAttributes {
    nodes: HashMap<ExprId, InferredAttribute>,
    field_types: HashMap<(String, String), TypeRef>,
    return_types: HashMap<(String, String), TypeRef>,
}

impl NodeAttributes {
    pub fn builder() -> NodeAttributesBuilder {
        NodeAttributesBuilder::default()
    }

    pub fn get(&self, id: ExprId) -> Option<&InferredAttribute> {
        self.nodes.get(&id)
    }

    /// Inferred type of a field declared without a type.
    pub fn field_type(&self, declaring_type: &str, name: &str) -> Option<&TypeRef> {
        self.field_types
            .get(&(declaring_type.to_string(), name.to_string()))
    }

    /// Inferred return type of a `def` method.
    pub fn return_type(&self, declaring_type: &str, name: &str) -> Option<&TypeRef> {
        self.return_types
            .get(&(declaring_type.to_string(), name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.nodes.len() + self.field_types.len() + self.return_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Default)]
pub struct NodeAttributesBuilder {
    attributes: NodeAttributes,
}

impl NodeAttributesBuilder {
    fn node(&mut self, id: ExprId) -> &mut InferredAttribute {
        self.attributes.nodes.entry(id).or_default()
    }

    pub fn inferred(mut self, id: ExprId, ty: TypeRef) -> Self {
        self.node(id).inferred_type = Some(ty);
        self
    }

    pub fn dynamic(mut self, id: ExprId) -> Self {
        self.node(id).dynamic = true;
        self
    }

    pub fn direct_call(mut self, id: ExprId, target: CallTarget) -> Self {
        self.node(id).direct_call_target = Some(target);
        self
    }

    pub fn field_type(mut self, declaring_type: &str, name: &str, ty: TypeRef) -> Self {
        self.attributes
            .field_types
            .insert((declaring_type.to_string(), name.to_string()), ty);
        self
    }

    pub fn return_type(mut self, declaring_type: &str, name: &str, ty: TypeRef) -> Self {
        self.attributes
            .return_types
            .insert((declaring_type.to_string(), name.to_string()), ty);
        self
    }

    pub fn build(self) -> NodeAttributes {
        self.attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes_merge_per_node() {
        let attrs = NodeAttributes::builder()
            .inferred(ExprId(3), TypeRef::new("java.lang.String"))
            .dynamic(ExprId(3))
            .return_type("p.A", "run", TypeRef::new("java.lang.Integer"))
            .build();

        let node = attrs.get(ExprId(3)).unwrap();
        assert_eq!(node.inferred_type, Some(TypeRef::new("java.lang.String")));
        assert!(node.dynamic);
        assert!(attrs.get(ExprId(4)).is_none());
        assert_eq!(attrs.return_type("p.A", "run"), Some(&TypeRef::new("java.lang.Integer")));
        assert!(attrs.field_type("p.A", "run").is_none());
        assert_eq!(attrs.len(), 2);
    }
}
