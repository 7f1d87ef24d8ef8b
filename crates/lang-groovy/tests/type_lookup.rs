mod common;

use common::{MockTypeSystem, UNIT, last_span};
use groovyscope_api::{Confidence, Declaration, TypeRef, TypeResolver};
use groovyscope_groovy::inference::NodeAttributes;
use groovyscope_groovy::inference::adapters::TypeDeclBuilder;
use groovyscope_groovy::{GroovyVersion, InferenceEngine, InferenceOptions};

fn acme() -> InferenceEngine {
    MockTypeSystem::new()
        .add(
            TypeDeclBuilder::class("acme.Base")
                .extends("java.lang.Object")
                .method("name", "java.lang.String", &[])
                .property("label", "java.lang.String"),
        )
        .add_class("acme.Sub", Some("acme.Base"))
        .engine()
}

#[test]
fn inherited_methods_of_a_custom_type_system() {
    let engine = acme();
    let contents = "import acme.Sub\nnew Sub().name()";
    let unit = engine.analyze(UNIT, contents);
    let resolution = unit.resolve(last_span(contents, "name"));
    assert_eq!(resolution.type_name().as_deref(), Some("java.lang.String"));
    assert_eq!(resolution.confidence, Confidence::Exact);
    assert_eq!(
        resolution.declaration,
        Some(Declaration::Method {
            declaring_type: "acme.Base".to_string(),
            name: "name".to_string(),
        })
    );
}

#[test]
fn object_members_reach_every_custom_type() {
    let engine = acme();
    let contents = "import acme.Sub\nnew Sub().toString()";
    let unit = engine.analyze(UNIT, contents);
    let resolution = unit.resolve(last_span(contents, "toString"));
    assert_eq!(resolution.type_name().as_deref(), Some("java.lang.String"));
}

#[test]
fn properties_of_a_custom_type_system() {
    let engine = acme();
    let contents = "import acme.Sub\ndef s = new Sub()\ns.label";
    let unit = engine.analyze(UNIT, contents);
    let resolution = unit.resolve(last_span(contents, "label"));
    assert_eq!(resolution.type_name().as_deref(), Some("java.lang.String"));
}

#[test]
fn checker_attributes_type_variables() {
    let engine = InferenceEngine::default();
    let contents = "def x = compute()\nx";
    let span = last_span(contents, "x");
    let unit = engine.analyze(UNIT, contents);
    let id = unit.expr_at(span).unwrap();
    let unit = unit.with_attributes(
        NodeAttributes::builder()
            .inferred(id, TypeRef::new("java.lang.String"))
            .build(),
    );
    let resolution = unit.resolve(span);
    assert_eq!(resolution.type_name().as_deref(), Some("java.lang.String"));
    assert_eq!(resolution.confidence, Confidence::Inferred);
}

#[test]
fn checker_attributes_are_ignored_before_type_checking_existed() {
    let engine = InferenceEngine::new(InferenceOptions::default().with_version(GroovyVersion::V1_8)).unwrap();
    let contents = "def x = compute()\nx";
    let span = last_span(contents, "x");
    let unit = engine.analyze(UNIT, contents);
    let id = unit.expr_at(span).unwrap();
    let unit = unit.with_attributes(
        NodeAttributes::builder()
            .inferred(id, TypeRef::new("java.lang.String"))
            .build(),
    );
    assert_ne!(unit.resolve(span).type_name().as_deref(), Some("java.lang.String"));
}

#[test]
fn checker_return_types_of_untyped_methods() {
    let engine = InferenceEngine::default();
    let contents = "class A {\n  def run() { 1 }\n}\nnew A().run()";
    let span = last_span(contents, "run");

    let unit = engine.analyze(UNIT, contents);
    assert_eq!(unit.resolve(span).type_name().as_deref(), Some("java.lang.Object"));

    let unit = unit.with_attributes(
        NodeAttributes::builder()
            .return_type("A", "run", TypeRef::new("int"))
            .build(),
    );
    let resolution = unit.resolve(span);
    assert_eq!(resolution.type_name().as_deref(), Some("java.lang.Integer"));
    assert_eq!(resolution.confidence, Confidence::Inferred);
}

#[test]
fn unresolved_identifiers_stay_unknown() {
    let engine = InferenceEngine::default();
    for (contents, needle) in [("foo", "foo"), ("foo.bar.baz", "baz"), ("'abc'.nosuch", "nosuch")] {
        let resolution = engine.analyze(UNIT, contents).resolve(last_span(contents, needle));
        assert_eq!(resolution.confidence, Confidence::Unknown, "{}", contents);
        assert_eq!(resolution.type_name(), None, "{}", contents);
    }
}

#[test]
fn untyped_declarations_of_unknown_values_are_objects() {
    let engine = InferenceEngine::default();
    let contents = "def y = foo\ny";
    let unit = engine.analyze(UNIT, contents);

    let resolution = unit.resolve(last_span(contents, "y"));
    assert_eq!(resolution.type_name().as_deref(), Some("java.lang.Object"));
    assert_eq!(resolution.confidence, Confidence::Inferred);

    let initializer = unit.resolve(last_span(contents, "foo"));
    assert_eq!(initializer.confidence, Confidence::Unknown);
}

#[test]
fn prefix_casts_resolve_to_the_target_type() {
    let engine = InferenceEngine::default();
    for contents in ["def r = (String) 5\nr", "def r = (String) foo\nr"] {
        let resolution = engine.analyze(UNIT, contents).resolve(last_span(contents, "r"));
        assert_eq!(resolution.type_name().as_deref(), Some("java.lang.String"), "{}", contents);
    }

    let contents = "((List<String>) foo).get(0)";
    let resolution = engine.analyze(UNIT, contents).resolve(last_span(contents, "get"));
    assert_eq!(resolution.type_name().as_deref(), Some("java.lang.String"));
}
