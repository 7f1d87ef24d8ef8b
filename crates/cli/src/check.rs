use groovyscope_api::{Diagnostic, LineIndex, Severity, TypeResolver};
use groovyscope_groovy::InferenceEngine;
use std::path::Path;
use tracing::info;

pub fn run(engine: &InferenceEngine, file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(file)?;
    let unit = engine.analyze(&file.to_string_lossy(), &contents);
    let diagnostics = unit.diagnostics();
    let index = LineIndex::new(&contents);

    for diagnostic in &diagnostics {
        println!("{}", render(&file.display().to_string(), &index, diagnostic));
    }
    info!("{}: {} problems", file.display(), diagnostics.len());

    if diagnostics.iter().any(|d| d.severity == Severity::Error) {
        return Err(format!("{} problems found in {}", diagnostics.len(), file.display()).into());
    }
    Ok(())
}

/// `path:line:col: error: message`, one-based like compiler output.
fn render(path: &str, index: &LineIndex, diagnostic: &Diagnostic) -> String {
    let (line, col) = index.position(diagnostic.span.start);
    let level = match diagnostic.severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    };
    format!("{}:{}:{}: {}: {}", path, line + 1, col + 1, level, diagnostic.message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use groovyscope_api::{DiagnosticKind, Span};

    #[test]
    fn test_render_uses_one_based_positions() {
        let contents = "class Foo {\n  Nope n\n}\n";
        let index = LineIndex::new(contents);
        let diagnostic = Diagnostic::error(
            DiagnosticKind::UnresolvedType,
            "Nope cannot be resolved to a type",
            Span::new(14, 18),
        );
        assert_eq!(
            render("Foo.groovy", &index, &diagnostic),
            "Foo.groovy:2:3: error: Nope cannot be resolved to a type"
        );
    }
}
