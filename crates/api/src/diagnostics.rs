use crate::models::Span;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Categories of problems the analysis can report.
///
/// None of these abort inference; they are surfaced alongside results.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// An expression whose type could not be determined.
    Unresolved,
    /// A simple name reachable through more than one on-demand import.
    AmbiguousImport,
    /// Type arguments that do not match the declared arity.
    MalformedGenerics,
    /// A type reference naming no known type.
    UnresolvedType,
    /// An annotation used on an element kind its `@Target` excludes.
    AnnotationTarget,
    /// `@Override` on a method that overrides nothing.
    OverrideMismatch,
    /// A concrete class missing an implementation of an inherited abstract method.
    MissingAbstractImplementation,
    /// An annotation member declared with parameters or a throws clause.
    AnnotationMember,
    /// Source the parser had to skip or close implicitly.
    Syntax,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn error(kind: DiagnosticKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            severity: Severity::Error,
            message: message.into(),
            span,
        }
    }

    pub fn warning(kind: DiagnosticKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            severity: Severity::Warning,
            message: message.into(),
            span,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(
            f,
            "{}[{}..{}]: {}",
            level, self.span.start, self.span.end, self.message
        )
    }
}
