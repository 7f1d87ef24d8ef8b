//! Type normalization logic.
//!
//! Converts type nodes as written in source into fully-qualified TypeRefs.

use super::generics::{has_malformed_arity, normalize_arity};
use super::imports::{ImportScope, NameResolution};
use super::type_system::GroovyTypeSystem;
use crate::ast::TypeNode;
use groovyscope_api::{Span, TypeRef};

/// A problem met while normalizing a type node. Normalization itself never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeProblem {
    Unresolved { name: String, span: Span },
    Ambiguous { name: String, candidates: Vec<String>, span: Span },
    Malformed { written: String, span: Span },
}

/// Resolves type nodes against the unit's imports and the type system.
pub struct TypeNormalizer<'a, T: GroovyTypeSystem + ?Sized> {
    ts: &'a T,
    imports: &'a ImportScope,
    type_params: Vec<String>,
}

impl<'a, T: GroovyTypeSystem + ?Sized> TypeNormalizer<'a, T> {
    pub fn new(ts: &'a T, imports: &'a ImportScope) -> Self {
        Self {
            ts,
            imports,
            type_params: Vec::new(),
        }
    }

    /// Names that denote type variables rather than types.
    pub fn with_type_params<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.type_params.extend(names.into_iter().map(Into::into));
        self
    }

    /// Normalizes `node`, dropping any problems.
    pub fn normalize(&self, node: &TypeNode) -> TypeRef {
        self.normalize_reporting(node, &mut Vec::new())
    }

    /// Normalizes `node`; unresolved names keep their written form and
    /// malformed instantiations degrade to raw.
    pub fn normalize_reporting(&self, node: &TypeNode, problems: &mut Vec<TypeProblem>) -> TypeRef {
        let ty = self.resolve_node(node, problems);
        if has_malformed_arity(self.ts, &ty) {
            problems.push(TypeProblem::Malformed {
                written: render(node),
                span: node.span,
            });
            return normalize_arity(self.ts, &ty);
        }
        ty
    }

    fn resolve_node(&self, node: &TypeNode, problems: &mut Vec<TypeProblem>) -> TypeRef {
        if node.is_dynamic() {
            return TypeRef::object();
        }

        let name = self.resolve_name(&node.name, node.span, problems);
        TypeRef {
            name,
            args: node
                .args
                .iter()
                .map(|arg| self.resolve_node(arg, problems))
                .collect(),
            dims: node.dims,
        }
    }

    /// Resolves one name as written, without type arguments.
    pub fn resolve_name(&self, written: &str, span: Span, problems: &mut Vec<TypeProblem>) -> String {
        if TypeRef::new(written).is_primitive() || self.type_params.iter().any(|p| p == written) {
            return written.to_string();
        }
        if written == "def" || written == "var" {
            return groovyscope_api::OBJECT.to_string();
        }

        match self.imports.resolve(self.ts, written) {
            NameResolution::Found(fqn) => fqn,
            NameResolution::Ambiguous(candidates) => {
                let first = candidates[0].clone();
                problems.push(TypeProblem::Ambiguous {
                    name: written.to_string(),
                    candidates,
                    span,
                });
                first
            }
            NameResolution::NotFound => {
                problems.push(TypeProblem::Unresolved {
                    name: written.to_string(),
                    span,
                });
                written.to_string()
            }
        }
    }
}

/// Renders a node the way it was written, e.g. `Map<String>[]`.
pub fn render(node: &TypeNode) -> String {
    let mut out = node.name.clone();
    if !node.args.is_empty() {
        let args: Vec<String> = node.args.iter().map(render).collect();
        out.push('<');
        out.push_str(&args.join(","));
        out.push('>');
    }
    for _ in 0..node.dims {
        out.push_str("[]");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::adapters::jdk::jdk_registry;

    fn node(name: &str, args: Vec<TypeNode>) -> TypeNode {
        let mut n = TypeNode::new(name, Span::default());
        n.args = args;
        n
    }

    #[test]
    fn qualifies_names_and_arguments() {
        let ts = jdk_registry();
        let imports = ImportScope::default();
        let normalizer = TypeNormalizer::new(ts, &imports);
        let written = node("Map", vec![node("String", vec![]), node("List", vec![node("Integer", vec![])])]);
        assert_eq!(
            normalizer.normalize(&written).to_string(),
            "java.util.Map<java.lang.String,java.util.List<java.lang.Integer>>"
        );
    }

    #[test]
    fn reports_unknown_and_malformed_types() {
        let ts = jdk_registry();
        let imports = ImportScope::default();
        let normalizer = TypeNormalizer::new(ts, &imports).with_type_params(["T"]);
        let mut problems = Vec::new();

        let ty = normalizer.normalize_reporting(&node("List", vec![node("T", vec![]), node("Foo", vec![])]), &mut problems);
        assert_eq!(ty, TypeRef::new("java.util.List"));
        assert!(matches!(&problems[0], TypeProblem::Unresolved { name, .. } if name == "Foo"));
        assert!(matches!(&problems[1], TypeProblem::Malformed { written, .. } if written == "List<T,Foo>"));
    }
}
