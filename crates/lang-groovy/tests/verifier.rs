mod common;

use common::{UNIT, first_span};
use groovyscope_api::{Diagnostic, DiagnosticKind, TypeResolver};
use groovyscope_groovy::InferenceEngine;

fn diagnostics_with(engine: &InferenceEngine, name: &str, contents: &str) -> Vec<Diagnostic> {
    engine.analyze(name, contents).diagnostics()
}

fn diagnostics(contents: &str) -> Vec<Diagnostic> {
    diagnostics_with(&InferenceEngine::default(), UNIT, contents)
}

fn messages(diagnostics: &[Diagnostic]) -> Vec<&str> {
    diagnostics.iter().map(|d| d.message.as_str()).collect()
}

const IX: &str = "package p1\ninterface IX {\n   abstract void foo(IX x)\n}\n";
const X_BROKEN: &str = "package p2\nimport p1.*\nabstract class X implements IX {\n   void foo(I__X x){}\n}\n";
const X_FIXED: &str = "package p2\nimport p1.*\nabstract class X implements IX {\n   void foo(IX x){}\n}\n";
const Y: &str = "package p3\nimport p2.*\nclass Y extends X {\n}\n";

#[test]
fn clean_scripts_report_nothing() {
    assert!(diagnostics("def x = [1]\nx.each { println it }\n").is_empty());
    assert!(diagnostics("class Foo implements Runnable {\n  void run() {}\n}\n").is_empty());
}

#[test]
fn abstract_methods_must_be_implemented_across_units() {
    let mut engine = InferenceEngine::default();
    engine.add_source("IX.groovy", IX);
    engine.add_source("X.groovy", X_BROKEN);

    let found = diagnostics_with(&engine, "X.groovy", X_BROKEN);
    assert_eq!(messages(&found), vec!["I__X cannot be resolved to a type"]);
    assert_eq!(found[0].kind, DiagnosticKind::UnresolvedType);
    assert_eq!(found[0].span, first_span(X_BROKEN, "I__X"));

    let found = diagnostics_with(&engine, "Y.groovy", Y);
    assert_eq!(
        messages(&found),
        vec!["The type Y must implement the inherited abstract method IX.foo(IX)"]
    );
    assert_eq!(found[0].kind, DiagnosticKind::MissingAbstractImplementation);
    assert_eq!(found[0].span, first_span(Y, "Y"));
}

#[test]
fn fixing_the_superclass_clears_the_subclass() {
    let mut engine = InferenceEngine::default();
    engine.add_source("IX.groovy", IX);
    engine.add_source("X.groovy", X_FIXED);
    assert!(diagnostics_with(&engine, "X.groovy", X_FIXED).is_empty());
    assert!(diagnostics_with(&engine, "Y.groovy", Y).is_empty());
}

#[test]
fn abstract_classes_may_leave_methods_open() {
    let contents = "interface Shape {\n  double area()\n}\nabstract class Base implements Shape {}\nclass Square extends Base {\n  double area() { 1 }\n}\nclass Broken extends Base {}\n";
    let found = diagnostics(contents);
    assert_eq!(
        messages(&found),
        vec!["The type Broken must implement the inherited abstract method Shape.area()"]
    );
}

#[test]
fn override_must_override_something() {
    let contents = "class Base {\n  void run(String s) {}\n}\nclass Child extends Base {\n  @Override\n  void run(String s) {}\n  @Override\n  String toString() { '' }\n  @Override\n  void walk() {}\n}\n";
    let found = diagnostics(contents);
    assert_eq!(
        messages(&found),
        vec!["Method 'walk' from class 'Child' does not override method from its superclass or interfaces but is annotated with @Override."]
    );
    assert_eq!(found[0].kind, DiagnosticKind::OverrideMismatch);
}

#[test]
fn override_sees_generic_supertypes() {
    let contents = "abstract class Holder<T> {\n  abstract void put(T value)\n}\nclass Names extends Holder<String> {\n  @Override\n  void put(String value) {}\n}\n";
    assert!(diagnostics(contents).is_empty());
}

#[test]
fn annotation_targets_are_checked() {
    let contents = "import java.lang.annotation.*\n@Target(ElementType.FIELD)\n@interface Marker {}\nclass Foo {\n  @Marker\n  def bar() {}\n  @Marker\n  def baz\n}\n";
    let found = diagnostics(contents);
    assert_eq!(messages(&found), vec!["Annotation @Marker is not allowed on element METHOD"]);
    assert_eq!(found[0].kind, DiagnosticKind::AnnotationTarget);

    let found = diagnostics("@Override\nclass Foo {}\n");
    assert_eq!(
        messages(&found),
        vec!["Annotation @java.lang.Override is not allowed on element TYPE"]
    );
}

#[test]
fn unknown_annotations_are_unresolved_types() {
    let found = diagnostics("class Foo {\n  @Nope\n  def bar() {}\n}\n");
    assert_eq!(messages(&found), vec!["Nope cannot be resolved to a type"]);
}

#[test]
fn annotation_members_take_no_parameters() {
    let contents = "@interface Conf {\n  String value(int x)\n  String name() throws IOException\n}\n";
    let found = diagnostics(contents);
    assert_eq!(
        messages(&found),
        vec![
            "Annotation members may not have parameters.",
            "Annotation members may not have a throws clause.",
        ]
    );
    assert!(found.iter().all(|d| d.kind == DiagnosticKind::AnnotationMember));
}

#[test]
fn types_written_in_bodies_are_checked() {
    let contents = "def x = new Nope()\nList<String, Integer> y\n";
    let found = diagnostics(contents);
    assert_eq!(
        messages(&found),
        vec![
            "Nope cannot be resolved to a type",
            "Incorrect number of type arguments in List<String,Integer>",
        ]
    );
    assert_eq!(found[1].kind, DiagnosticKind::MalformedGenerics);
}

#[test]
fn ambiguous_on_demand_imports() {
    let mut engine = InferenceEngine::default();
    engine.add_source("a/Thing.groovy", "package a\nclass Thing {}\n");
    engine.add_source("b/Thing.groovy", "package b\nclass Thing {}\n");
    let found = diagnostics_with(&engine, UNIT, "import a.*\nimport b.*\nThing t\n");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].kind, DiagnosticKind::AmbiguousImport);
    assert!(found[0].message.starts_with("The type Thing is ambiguous"));
}
