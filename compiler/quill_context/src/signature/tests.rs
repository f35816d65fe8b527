#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;
use quill_grammar::Grammar;
use quill_ir::{Position, SyntaxTree};
use quill_parse::parse_document;

use super::{call_site, CallSignatureDetails};

fn tree(source: &str) -> SyntaxTree {
    parse_document(Grammar::bundled().unwrap(), source)
}

fn details(source: &str, position: Position) -> Option<CallSignatureDetails> {
    call_site(&tree(source), position).map(|site| site.details)
}

fn expect(bracket: (u32, u32), call_index: usize, keyword_name: Option<&str>) -> Option<CallSignatureDetails> {
    Some(CallSignatureDetails {
        bracket: Position::new(bracket.0, bracket.1),
        call_index,
        keyword_name: keyword_name.map(str::to_owned),
    })
}

#[test]
fn test_open_call() {
    assert_eq!(details("foo(", Position::new(1, 4)), expect((1, 3), 0, None));
}

#[test]
fn test_keyword_argument() {
    assert_eq!(details("foo(a, b=", Position::new(1, 9)), expect((1, 3), 1, Some("b")));
}

#[test]
fn test_innermost_call_wins() {
    assert_eq!(details("foo(a, bar(", Position::new(1, 11)), expect((1, 10), 0, None));
}

#[test]
fn test_definition_headers_have_no_signature() {
    assert_eq!(details("def f(", Position::new(1, 6)), None);
    assert_eq!(details("class A(Base", Position::new(1, 12)), None);
    assert_eq!(details("def f(a, b):\n    pass\n", Position::new(1, 8)), None);
}

#[test]
fn test_inside_complete_call() {
    let source = "foo(a, b)\n";
    assert_eq!(details(source, Position::new(1, 8)), expect((1, 3), 1, None));
    assert_eq!(details(source, Position::new(1, 4)), expect((1, 3), 0, None));
}

#[test]
fn test_after_closed_call() {
    assert_eq!(details("foo(a)\n", Position::new(1, 6)), None);
    assert_eq!(details("foo(a)  ", Position::new(1, 8)), None);
}

#[test]
fn test_keyword_value_in_complete_call() {
    let source = "foo(b=1)\n";
    assert_eq!(details(source, Position::new(1, 7)), expect((1, 3), 0, Some("b")));
    assert_eq!(details(source, Position::new(1, 5)), expect((1, 3), 0, None));
}

#[test]
fn test_nested_complete_call_argument() {
    assert_eq!(
        details("foo(bar(1), ", Position::new(1, 12)),
        expect((1, 3), 1, None)
    );
}

#[test]
fn test_call_inside_function_body() {
    let source = "def f():\n    foo(x, ";
    assert_eq!(details(source, Position::new(2, 11)), expect((2, 7), 1, None));
    assert_eq!(details(source, Position::new(2, 10)), expect((2, 7), 1, None));
}

#[test]
fn test_decorator_call() {
    assert_eq!(details("@dec(a, ", Position::new(1, 8)), expect((1, 4), 1, None));
}

#[test]
fn test_grouping_paren_is_not_a_call() {
    assert_eq!(details("(a, ", Position::new(1, 4)), None);
    assert_eq!(details("x = 1\n", Position::new(1, 5)), None);
}

#[test]
fn test_bracket_leaf_is_reported() {
    let tree = tree("foo(");
    let site = call_site(&tree, Position::new(1, 4)).unwrap();
    assert_eq!(tree.value(site.bracket), Some("("));
}
