//! Context for type lookups.
//!
//! Holds everything a strategy may consult while typing one expression. It is
//! rebuilt by the driver for every query and borrowed immutably by the chain.

use crate::ast::{Expr, ExprId, ExprKind, Module, TypeNode};
use crate::config::GroovyVersion;
use crate::inference::attributes::NodeAttributes;
use crate::inference::core::imports::ImportScope;
use crate::inference::core::normalization::TypeNormalizer;
use crate::inference::dgm::DgmTable;
use crate::inference::lookup::LookupResult;
use crate::inference::scope::ScopeStack;
use crate::inference::GroovyTypeSystem;
use groovyscope_api::TypeRef;
use std::collections::HashMap;

pub struct LookupContext<'a> {
    pub ts: &'a dyn GroovyTypeSystem,
    pub module: &'a Module,
    pub imports: &'a ImportScope,
    pub scope: &'a ScopeStack,
    pub attributes: &'a NodeAttributes,
    pub dgm: &'a DgmTable,
    pub version: GroovyVersion,
    /// Results of the expressions typed so far in this traversal.
    pub resolved: &'a HashMap<ExprId, LookupResult>,
}

impl<'a> LookupContext<'a> {
    pub fn expr(&self, id: ExprId) -> &'a Expr {
        self.module.expr(id)
    }

    pub fn resolved(&self, id: ExprId) -> Option<&'a LookupResult> {
        self.resolved.get(&id)
    }

    /// The confidently known type of an already visited expression.
    pub fn type_of(&self, id: ExprId) -> Option<&'a TypeRef> {
        self.resolved(id).and_then(LookupResult::confident_type)
    }

    /// Argument types for overload selection; unknown arguments count as `Object`.
    pub fn arg_types(&self, args: &[ExprId]) -> Vec<TypeRef> {
        args.iter()
            .map(|arg| self.type_of(*arg).cloned().unwrap_or_else(TypeRef::object))
            .collect()
    }

    /// The simple name carried by a `Name` node.
    pub fn name_of(&self, id: ExprId) -> Option<&'a str> {
        match &self.expr(id).kind {
            ExprKind::Name(name) => Some(name.as_str()),
            _ => None,
        }
    }

    /// Resolves a written type against the imports and the type variables in scope.
    pub fn resolve_type(&self, node: &TypeNode) -> TypeRef {
        TypeNormalizer::new(self.ts, self.imports)
            .with_type_params(self.scope.type_parameters())
            .normalize(node)
    }

    pub fn enclosing_type(&self) -> Option<&'a str> {
        self.scope.enclosing_type()
    }
}
