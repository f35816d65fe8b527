#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;
use quill_grammar::Grammar;

use crate::parse_document;
use crate::test_helpers::outline;

fn parse(source: &str) -> String {
    outline(&parse_document(Grammar::bundled().unwrap(), source))
}

#[test]
fn test_open_call_becomes_error_node() {
    assert_eq!(parse("foo(a, b="), "(file_input (error foo ( a , b =) END)");
}

#[test]
fn test_unterminated_string_becomes_error_leaf() {
    assert_eq!(parse("x = 'abc"), "(file_input (error x =) !'abc NL END)");
}

#[test]
fn test_damage_stays_inside_indented_block() {
    assert_eq!(
        parse("if x:\n    a b\n    c\n"),
        "(file_input (if_stmt if x : \
         (suite NL (error a) (simple_stmt b NL) (simple_stmt c NL))) END)"
    );
}

#[test]
fn test_statement_line_is_kept() {
    assert_eq!(
        parse("a; b c\n"),
        "(file_input (simple_stmt a ; b) (simple_stmt c NL) END)"
    );
}

#[test]
fn test_unexpected_indent_is_dropped_with_its_dedent() {
    assert_eq!(
        parse("x\n    y\nz\n"),
        "(file_input (simple_stmt x NL) (simple_stmt y NL) (simple_stmt z NL) END)"
    );
}

#[test]
fn test_unclosed_bracket_inside_function() {
    assert_eq!(
        parse("def f(a):\n    return (\n"),
        "(file_input (funcdef def f (parameters ( a )) : (suite NL (error return ())) END)"
    );
}

#[test]
fn test_unclosed_bracket_swallows_following_lines() {
    assert_eq!(
        parse("x = (\ny = 2\n"),
        "(file_input (error x = ( y) != (error 2) END)"
    );
}
