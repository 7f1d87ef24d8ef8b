//! Type lookup strategies.
//!
//! Each strategy answers one question, "what is the type of this expression
//! given what is known so far", and reports how sure it is. The chain in
//! [`crate::inference::chain`] decides which answer wins.

mod dgm;
mod duck;
mod literal;
mod member;
mod operator;
mod stc;
mod type_name;
mod variable;

pub use dgm::DgmLookup;
pub use duck::DuckTypeLookup;
pub use literal::LiteralLookup;
pub use member::MemberLookup;
pub use operator::OperatorLookup;
pub use stc::StcTypeLookup;
pub use type_name::TypeNameLookup;
pub use variable::VariableLookup;

use crate::ast::ExprId;
use crate::inference::context::LookupContext;
use groovyscope_api::{Confidence, Declaration, Resolution, Span, TypeRef};

pub(crate) const CLASS: &str = "java.lang.Class";

/// The answer of one strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResult {
    pub type_ref: Option<TypeRef>,
    pub confidence: Confidence,
    pub declaration: Option<Declaration>,
    pub declaring_type: Option<TypeRef>,
    /// The expression names a type (`String` in `String.valueOf(1)`), so
    /// member accesses on it are static.
    pub names_type: bool,
}

impl LookupResult {
    pub fn unknown() -> Self {
        Self {
            type_ref: None,
            confidence: Confidence::Unknown,
            declaration: None,
            declaring_type: None,
            names_type: false,
        }
    }

    /// `Unknown`, but with a type to show when nothing better turns up.
    pub fn fallback(ty: TypeRef) -> Self {
        Self {
            type_ref: Some(ty),
            ..Self::unknown()
        }
    }

    pub fn inferred(ty: TypeRef) -> Self {
        Self {
            type_ref: Some(ty),
            confidence: Confidence::Inferred,
            ..Self::unknown()
        }
    }

    pub fn exact(ty: TypeRef) -> Self {
        Self {
            type_ref: Some(ty),
            confidence: Confidence::Exact,
            ..Self::unknown()
        }
    }

    /// `java.lang.Class<fqn>` for an expression naming the type `fqn`.
    pub fn type_literal(fqn: &str) -> Self {
        let mut result = Self::exact(TypeRef::generic(CLASS, vec![TypeRef::new(fqn)]));
        result.names_type = true;
        result.declaration = Some(Declaration::Type {
            fqn: fqn.to_string(),
        });
        result
    }

    pub fn with_declaration(mut self, declaration: Declaration) -> Self {
        self.declaration = Some(declaration);
        self
    }

    pub fn with_declaring_type(mut self, declaring_type: TypeRef) -> Self {
        self.declaring_type = Some(declaring_type);
        self
    }

    pub fn with_confidence(mut self, confidence: Confidence) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn is_confident(&self) -> bool {
        self.confidence.is_confident() && self.type_ref.is_some()
    }

    /// The confident type, if any.
    pub fn confident_type(&self) -> Option<&TypeRef> {
        if self.confidence.is_confident() {
            self.type_ref.as_ref()
        } else {
            None
        }
    }

    pub fn into_resolution(self, span: Span) -> Resolution {
        Resolution {
            type_ref: self.type_ref,
            confidence: self.confidence,
            declaration: self.declaration,
            declaring_type: self.declaring_type,
            span: Some(span),
        }
    }
}

/// The type a member access is made on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receiver {
    pub type_ref: TypeRef,
    /// The receiver names a type; only static members (and those of
    /// `java.lang.Class`) apply.
    pub is_static: bool,
}

impl Receiver {
    pub fn instance(type_ref: TypeRef) -> Self {
        Self {
            type_ref,
            is_static: false,
        }
    }

    pub fn of_type(fqn: &str) -> Self {
        Self {
            type_ref: TypeRef::new(fqn),
            is_static: true,
        }
    }

    /// The receiver described by a resolved expression.
    pub fn from_result(result: &LookupResult) -> Option<Self> {
        let ty = result.confident_type()?;
        if result.names_type {
            let named = ty.args.first().cloned().unwrap_or_else(TypeRef::object);
            return Some(Self {
                type_ref: named,
                is_static: true,
            });
        }
        Some(Self::instance(ty.clone()))
    }

    /// The type of the receiver expression itself (`Class<T>` when static).
    pub fn expression_type(&self) -> TypeRef {
        if self.is_static {
            TypeRef::generic(CLASS, vec![self.type_ref.clone()])
        } else {
            self.type_ref.clone()
        }
    }
}

/// A pluggable type lookup.
///
/// Lookups are pure: everything they may consult is reachable through the
/// context, and child expressions are already resolved when asked.
pub trait TypeLookup: Send + Sync {
    fn name(&self) -> &'static str;

    fn lookup(&self, expr: ExprId, receiver: Option<&Receiver>, ctx: &LookupContext<'_>) -> LookupResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_receivers_unwrap_class_literals() {
        let named = LookupResult::type_literal("java.util.Collections");
        let receiver = Receiver::from_result(&named).unwrap();
        assert!(receiver.is_static);
        assert_eq!(receiver.type_ref, TypeRef::new("java.util.Collections"));
        assert_eq!(receiver.expression_type().to_string(), "java.lang.Class<java.util.Collections>");

        assert!(Receiver::from_result(&LookupResult::fallback(TypeRef::object())).is_none());
    }

    #[test]
    fn resolutions_keep_provenance() {
        let result = LookupResult::inferred(TypeRef::new("java.lang.String"))
            .with_declaring_type(TypeRef::new("java.lang.Object"))
            .with_declaration(Declaration::Literal);
        let resolution = result.into_resolution(Span::new(1, 4));
        assert_eq!(resolution.type_name().as_deref(), Some("java.lang.String"));
        assert_eq!(resolution.span, Some(Span::new(1, 4)));
        assert_eq!(resolution.declaration, Some(Declaration::Literal));
    }
}
