use crate::diagnostics::Diagnostic;
use crate::models::{Resolution, Span};

/// Answers "what is the static type of the expression at this range?".
pub trait TypeResolver {
    /// Resolves the innermost expression covering `range`.
    ///
    /// Never fails: an expression nobody can type yields
    /// [`Resolution::unresolved`].
    fn resolve(&self, range: Span) -> Resolution;

    /// Problems found while binding and verifying the unit.
    fn diagnostics(&self) -> Vec<Diagnostic> {
        Vec::new()
    }
}
