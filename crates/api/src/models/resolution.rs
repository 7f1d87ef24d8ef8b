use super::span::Span;
use super::type_ref::TypeRef;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How sure a lookup is about the type it reports.
///
/// Ordered: `Unknown < Inferred < Exact`.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    /// Nothing conclusive; the next strategy should be asked.
    Unknown,
    /// Derived from flow, literals or extension tables.
    Inferred,
    /// Backed by an explicit declaration.
    Exact,
}

impl Confidence {
    pub fn is_confident(self) -> bool {
        self > Confidence::Unknown
    }
}

/// Where a resolved type came from.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Declaration {
    /// A local variable, parameter or loop variable.
    Variable { name: String, span: Span },
    Field {
        declaring_type: String,
        name: String,
    },
    Property {
        declaring_type: String,
        name: String,
    },
    Method {
        declaring_type: String,
        name: String,
    },
    Constructor { declaring_type: String },
    /// A DefaultGroovyMethods extension method.
    Extension { receiver: String, name: String },
    Type { fqn: String },
    Literal,
    /// An arbitrary node, e.g. one carrying a type-checker attribute.
    Node { span: Span },
}

/// The externally visible answer for a requested source range.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct Resolution {
    pub type_ref: Option<TypeRef>,
    pub confidence: Confidence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declaration: Option<Declaration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declaring_type: Option<TypeRef>,
    /// The node span the answer was computed for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl Resolution {
    pub fn unresolved() -> Self {
        Self {
            type_ref: None,
            confidence: Confidence::Unknown,
            declaration: None,
            declaring_type: None,
            span: None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.confidence.is_confident() && self.type_ref.is_some()
    }

    /// The rendered type, if the lookup was confident.
    pub fn type_name(&self) -> Option<String> {
        if self.is_resolved() {
            self.type_ref.as_ref().map(|t| t.to_string())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_ordering() {
        assert!(Confidence::Exact > Confidence::Inferred);
        assert!(Confidence::Inferred > Confidence::Unknown);
        assert!(!Confidence::Unknown.is_confident());
    }

    #[test]
    fn unresolved_has_no_type_name() {
        let mut res = Resolution::unresolved();
        res.type_ref = Some(TypeRef::object());
        assert_eq!(res.type_name(), None);
        res.confidence = Confidence::Inferred;
        assert_eq!(res.type_name().as_deref(), Some("java.lang.Object"));
    }

    #[test]
    fn serializes_declarations_with_a_tag() {
        let decl = Declaration::Extension {
            receiver: "java.lang.Object".into(),
            name: "each".into(),
        };
        let json = serde_json::to_value(&decl).unwrap();
        assert_eq!(json["kind"], "extension");
        assert_eq!(json["name"], "each");
    }
}
