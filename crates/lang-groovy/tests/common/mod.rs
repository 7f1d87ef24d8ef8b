//! Helpers shared by the inference integration tests.

use groovyscope_api::{Resolution, Span, TypeResolver};
use groovyscope_groovy::InferenceEngine;
use groovyscope_groovy::inference::adapters::{TypeDeclBuilder, TypeRegistry};

/// The unit name every snippet is analysed under, so scripts compile to `Search`.
pub const UNIT: &str = "Search.groovy";

/// The span of the last occurrence of `needle`.
#[allow(dead_code)]
pub fn last_span(contents: &str, needle: &str) -> Span {
    let start = contents
        .rfind(needle)
        .unwrap_or_else(|| panic!("'{}' not found in:\n{}", needle, contents));
    Span::new(start, start + needle.len())
}

/// The span of the first occurrence of `needle`.
#[allow(dead_code)]
pub fn first_span(contents: &str, needle: &str) -> Span {
    let start = contents
        .find(needle)
        .unwrap_or_else(|| panic!("'{}' not found in:\n{}", needle, contents));
    Span::new(start, start + needle.len())
}

#[allow(dead_code)]
pub fn resolve_in(engine: &InferenceEngine, contents: &str, span: Span) -> Resolution {
    engine.analyze(UNIT, contents).resolve(span)
}

#[allow(dead_code)]
pub fn resolve_at(contents: &str, span: Span) -> Resolution {
    resolve_in(&InferenceEngine::default(), contents, span)
}

/// Asserts the type of the last occurrence of `needle`.
#[allow(dead_code)]
pub fn assert_type(contents: &str, needle: &str, expected: &str) {
    assert_type_at(contents, last_span(contents, needle), expected);
}

/// Asserts the type of the whole snippet.
#[allow(dead_code)]
pub fn assert_type_of_all(contents: &str, expected: &str) {
    assert_type_at(contents, Span::new(0, contents.len()), expected);
}

#[allow(dead_code)]
pub fn assert_type_at(contents: &str, span: Span, expected: &str) {
    let resolution = resolve_at(contents, span);
    assert_eq!(
        resolution.type_name().as_deref(),
        Some(expected),
        "wrong type at {:?} in:\n{}\nresolution: {:?}",
        span,
        contents,
        resolution
    );
}

/// Same as [`assert_type`], with other units added to the engine first.
#[allow(dead_code)]
pub fn assert_type_with_units(units: &[(&str, &str)], contents: &str, needle: &str, expected: &str) {
    let mut engine = InferenceEngine::default();
    for (name, text) in units {
        engine.add_source(name, text);
    }
    let resolution = resolve_in(&engine, contents, last_span(contents, needle));
    assert_eq!(
        resolution.type_name().as_deref(),
        Some(expected),
        "wrong type for '{}' in:\n{}\nresolution: {:?}",
        needle,
        contents,
        resolution
    );
}

/// A small type system for engines that must not see the JDK tables.
///
/// Can be built using a fluent API.
#[allow(dead_code)]
pub struct MockTypeSystem {
    registry: TypeRegistry,
}

#[allow(dead_code)]
impl MockTypeSystem {
    /// A type system knowing only `java.lang.Object`.
    pub fn new() -> Self {
        let mut registry = TypeRegistry::new();
        TypeDeclBuilder::class("java.lang.Object")
            .method("toString", "java.lang.String", &[])
            .register(&mut registry);
        TypeDeclBuilder::class("java.lang.String").register(&mut registry);
        Self { registry }
    }

    /// Adds a plain class.
    pub fn add_class(self, fqn: &str, superclass: Option<&str>) -> Self {
        let builder = TypeDeclBuilder::class(fqn).extends(superclass.unwrap_or("java.lang.Object"));
        self.add(builder)
    }

    /// Adds any declaration.
    pub fn add(mut self, builder: TypeDeclBuilder) -> Self {
        builder.register(&mut self.registry);
        self
    }

    pub fn engine(self) -> InferenceEngine {
        InferenceEngine::default().with_base(self.registry)
    }
}
