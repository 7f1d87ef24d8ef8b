use groovyscope_api::{ApiError, Span, TypeResolver};
use groovyscope_groovy::InferenceEngine;
use std::path::Path;
use tracing::debug;

/// How the queried range is given on the command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Range { offset: usize, length: usize },
    Text { text: String, first: bool },
}

impl Target {
    fn span(&self, contents: &str) -> Option<Span> {
        match self {
            Target::Range { offset, length } => Some(Span::new(*offset, offset + length)),
            Target::Text { text, first } => {
                let start = if *first { contents.find(text.as_str()) } else { contents.rfind(text.as_str()) }?;
                Some(Span::new(start, start + text.len()))
            }
        }
    }
}

pub fn run(engine: &InferenceEngine, file: &Path, target: Target, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(file)?;
    let span = target
        .span(&contents)
        .ok_or_else(|| format!("{:?} not found in {}", target, file.display()))?;
    if span.end > contents.len() {
        return Err(ApiError::SpanOutOfBounds {
            start: span.start,
            end: span.end,
            len: contents.len(),
        }
        .into());
    }

    let unit = engine.analyze(&file.to_string_lossy(), &contents);
    let resolution = unit.resolve(span);
    debug!("{:?} -> {:?}", span, resolution);

    if json {
        println!("{}", serde_json::to_string_pretty(&resolution)?);
    } else {
        println!("{}", resolution.type_name().as_deref().unwrap_or("<unresolved>"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_targets_default_to_the_last_occurrence() {
        let contents = "def x = 1\nx";
        let last = Target::Text {
            text: "x".to_string(),
            first: false,
        };
        let first = Target::Text {
            text: "x".to_string(),
            first: true,
        };
        assert_eq!(last.span(contents), Some(Span::new(10, 11)));
        assert_eq!(first.span(contents), Some(Span::new(4, 5)));
    }

    #[test]
    fn test_range_targets() {
        let target = Target::Range { offset: 3, length: 2 };
        assert_eq!(target.span(""), Some(Span::new(3, 5)));
        let missing = Target::Text {
            text: "y".to_string(),
            first: false,
        };
        assert_eq!(missing.span("x"), None);
    }
}
