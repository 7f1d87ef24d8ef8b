mod common;

use common::{UNIT, assert_type, assert_type_at, assert_type_of_all, last_span};
use groovyscope_api::{DiagnosticKind, Span, TypeResolver};
use groovyscope_groovy::InferenceEngine;

const DATA_TYPED: &str = "Map<String, Map<Integer, List<Date>>> dataTyped\n";

/// From the start of the last `dataTyped` to the last `]`.
fn receiver_span(contents: &str) -> Span {
    let start = contents.rfind("dataTyped").unwrap();
    let end = contents.rfind(']').unwrap() + 1;
    Span::new(start, end)
}

fn syntax_errors(contents: &str) -> usize {
    InferenceEngine::default()
        .analyze(UNIT, contents)
        .diagnostics()
        .iter()
        .filter(|d| d.kind == DiagnosticKind::Syntax)
        .count()
}

#[test]
fn after_array_access() {
    let contents = format!("{}dataTyped      ['foo'].", DATA_TYPED);
    assert_type_at(
        &contents,
        receiver_span(&contents),
        "java.util.Map<java.lang.Integer,java.util.List<java.util.Date>>",
    );
}

#[test]
fn after_multiple_array_accesses() {
    let contents = format!("{}dataTyped      ['foo'][5][2].", DATA_TYPED);
    assert_type_at(&contents, receiver_span(&contents), "java.util.Date");

    let contents = format!("{}dataTyped      ['foo'][5][2].t", DATA_TYPED);
    assert_type_at(&contents, receiver_span(&contents), "java.util.Date");
}

#[test]
fn receiver_of_a_trailing_dot() {
    assert_type("def s = 'a'\ns.", "s", "java.lang.String");
    assert_eq!(syntax_errors("def s = 'a'\ns."), 1);
}

#[test]
fn unterminated_call() {
    assert_type("def s = 'a'\ns.foo(", "s", "java.lang.String");
    assert_type("def s = 'a'\ns.concat('b'", "concat", "java.lang.String");
    assert_eq!(syntax_errors("def s = 'a'\ns.foo("), 1);
}

#[test]
fn unterminated_block() {
    let contents = "def s = 'a'\nif (s) {\n s\n";
    assert_type(contents, "s", "java.lang.String");
    assert_type("[1, 2].each {\n it\n", "it", "java.lang.Integer");
    assert_eq!(syntax_errors(contents), 1);
}

#[test]
fn unterminated_list() {
    assert_type_of_all("[1, 2", "java.util.List<java.lang.Integer>");
    assert_type_of_all("[a: 1", "java.util.Map<java.lang.String,java.lang.Integer>");
}

#[test]
fn statements_after_a_bad_class_header() {
    let contents = "class extends {\n int x\n}\ndef s = 'a'\ns";
    assert_type(contents, "s", "java.lang.String");
    assert_eq!(syntax_errors(contents), 1);
}

#[test]
fn statements_after_a_malformed_statement() {
    let contents = "def n = 1 +* 2\ndef s = 'a'\ns";
    assert_type(contents, "s", "java.lang.String");

    let engine = InferenceEngine::default();
    let unit = engine.analyze(UNIT, contents);
    let diagnostics = unit.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::Syntax);
    assert_eq!(diagnostics[0].span, last_span(contents, "*"));
}

#[test]
fn unknown_characters_are_skipped() {
    assert_type("def s = 'a' #\ns", "s", "java.lang.String");
    assert_eq!(syntax_errors("def s = 'a' #\ns"), 1);
}

#[test]
fn complete_source_has_no_syntax_errors() {
    assert_eq!(syntax_errors("def s = 'a'\ns.toUpperCase()"), 0);
}
