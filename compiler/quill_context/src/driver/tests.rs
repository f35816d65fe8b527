#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;
use quill_grammar::Grammar;
use quill_ir::{CodeLines, Position, Symbol};
use quill_parse::{parse_document, ParseStack};

use super::{normalize, parse_prefix, stack_at_position};
use crate::{ContextError, UnresolvableReason};

fn stack(source: &str, position: Position) -> Result<ParseStack<'static>, ContextError> {
    let grammar = Grammar::bundled().unwrap();
    let tree = parse_document(grammar, source);
    stack_at_position(grammar, &CodeLines::new(source), &tree, position)
}

fn symbols(stack: &ParseStack<'_>) -> Vec<Symbol> {
    stack.symbols().collect()
}

#[test]
fn test_open_call() {
    let stack = stack("foo(", Position::new(1, 4)).unwrap();
    assert_eq!(stack.top().map(|frame| frame.symbol()), Some(Symbol::Trailer));
}

#[test]
fn test_import_on_second_line() {
    let stack = stack("import os\nimport ", Position::new(2, 7)).unwrap();
    assert_eq!(
        symbols(&stack),
        vec![
            Symbol::FileInput,
            Symbol::Stmt,
            Symbol::SimpleStmt,
            Symbol::SmallStmt,
            Symbol::ImportStmt,
            Symbol::ImportName,
        ]
    );
}

#[test]
fn test_lone_semicolon_parses_as_nothing() {
    let stack = stack("a;", Position::new(1, 2)).unwrap();
    assert_eq!(symbols(&stack), vec![Symbol::FileInput]);
}

#[test]
fn test_start_of_document() {
    let stack = stack("x = 1\n", Position::START).unwrap();
    assert_eq!(symbols(&stack), vec![Symbol::FileInput]);
}

#[test]
fn test_inside_string_fails() {
    assert_eq!(
        stack("x = 'abc", Position::new(1, 8)).unwrap_err(),
        ContextError::Unresolvable {
            position: Position::new(1, 8),
            reason: UnresolvableReason::InsideString,
        }
    );
}

#[test]
fn test_normalize() {
    assert_eq!(normalize("  foo( \t"), "foo(");
    assert_eq!(normalize(";"), "");
    assert_eq!(normalize(" ; "), "");
    assert_eq!(normalize("a;"), "a;");
    assert_eq!(normalize(""), "");
}

#[test]
fn test_prefix_errors_are_recovered() {
    let grammar = Grammar::bundled().unwrap();
    let stack = parse_prefix(grammar, "x = = foo(");
    assert_eq!(stack.top().map(|frame| frame.symbol()), Some(Symbol::Trailer));
    assert_eq!(stack.frames()[0].symbol(), Symbol::FileInput);
}
