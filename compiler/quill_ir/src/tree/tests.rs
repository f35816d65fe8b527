use pretty_assertions::assert_eq;

use super::{Leaf, NodeId, SyntaxArena, SyntaxTree};
use crate::{Position, Symbol, Token, TokenKind};

fn leaf(arena: &mut SyntaxArena, kind: TokenKind, text: &str, prefix: &str, start: (u32, u32)) -> NodeId {
    let start = Position::from(start);
    let width = u32::try_from(text.len()).unwrap_or(0);
    let prefix_width = u32::try_from(prefix.len()).unwrap_or(0);
    let end = if text == "\n" {
        Position::new(start.line + 1, 0)
    } else {
        Position::new(start.line, start.column + width)
    };
    let token = Token::new(kind, text, start, end)
        .with_prefix(prefix, Position::new(start.line, start.column - prefix_width));
    arena.alloc_leaf(Leaf::from_token(token, false))
}

/// `foo( a)\n  ` as file_input[power[foo, trailer['(', a, ')']], NEWLINE, ENDMARKER].
fn call_tree() -> (SyntaxTree, [NodeId; 6]) {
    let mut arena = SyntaxArena::new();
    let foo = leaf(&mut arena, TokenKind::Name, "foo", "", (1, 0));
    let open = leaf(&mut arena, TokenKind::LPar, "(", "", (1, 3));
    let a = leaf(&mut arena, TokenKind::Name, "a", " ", (1, 5));
    let close = leaf(&mut arena, TokenKind::RPar, ")", "", (1, 6));
    let trailer = arena.alloc_node(Symbol::Trailer, vec![open, a, close]);
    let power = arena.alloc_node(Symbol::Power, vec![foo, trailer]);
    let newline = leaf(&mut arena, TokenKind::Newline, "\n", "", (1, 7));
    let end = leaf(&mut arena, TokenKind::EndMarker, "", "  ", (2, 2));
    let root = arena.alloc_node(Symbol::FileInput, vec![power, newline, end]);
    (SyntaxTree::new(arena, root), [foo, open, a, close, trailer, power])
}

#[test]
fn test_parents_are_recorded() {
    let (tree, [foo, open, _, _, trailer, power]) = call_tree();
    assert_eq!(tree.parent(open), Some(trailer));
    assert_eq!(tree.parent(trailer), Some(power));
    assert_eq!(tree.parent(foo), Some(power));
    assert_eq!(tree.parent(tree.root()), None);
    assert_eq!(tree.symbol(power), Some(Symbol::Power));
    assert_eq!(tree.child_index(trailer), Some(1));
}

#[test]
fn test_positions_come_from_leaves() {
    let (tree, [_, _, a, _, trailer, power]) = call_tree();
    assert_eq!(tree.start(power), Position::new(1, 0));
    assert_eq!(tree.end(power), Position::new(1, 7));
    assert_eq!(tree.start(trailer), Position::new(1, 3));
    assert_eq!(tree.prefix_start(a), Position::new(1, 4));
    assert_eq!(tree.start(a), Position::new(1, 5));
}

#[test]
fn test_previous_and_next_leaf_cross_subtrees() {
    let (tree, [foo, open, a, close, _, _]) = call_tree();
    assert_eq!(tree.previous_leaf(open), Some(foo));
    assert_eq!(tree.next_leaf(foo), Some(open));
    assert_eq!(tree.previous_leaf(close), Some(a));
    assert_eq!(tree.previous_leaf(foo), None);
    let newline = tree.next_leaf(close);
    assert!(newline.is_some_and(|id| tree.leaf_is(id, TokenKind::Newline)));
}

#[test]
fn test_code_reproduces_source() {
    let (tree, [_, _, _, _, trailer, _]) = call_tree();
    assert_eq!(tree.code(tree.root(), true), "foo( a)\n  ");
    assert_eq!(tree.code(trailer, false), "( a)");
}

#[test]
fn test_leaf_at_with_and_without_prefixes() {
    let (tree, [foo, open, a, _, _, _]) = call_tree();
    // End of `foo` is also the start of `(`; the earlier leaf wins.
    assert_eq!(tree.leaf_at_position(Position::new(1, 3), true), Some(foo));
    assert_eq!(tree.leaf_at_position(Position::new(1, 4), true), Some(open));
    assert_eq!(tree.leaf_at_position(Position::new(1, 5), false), Some(a));
    assert_eq!(tree.leaf_at_position(Position::new(1, 6), false), Some(a));
    // Inside the trailing indentation, which is the end marker's prefix.
    assert_eq!(tree.leaf_at_position(Position::new(2, 1), false), None);
    let end = tree.leaf_at_position(Position::new(2, 1), true);
    assert!(end.is_some_and(|id| tree.leaf_is(id, TokenKind::EndMarker)));
}

#[test]
fn test_leaf_predicates() {
    let mut arena = SyntaxArena::new();
    let token = Token::new(TokenKind::Name, "def", Position::START, Position::new(1, 3));
    let keyword = arena.alloc_leaf(Leaf::from_token(token.clone(), true));
    let error = arena.alloc_error_leaf(Leaf::from_token(token, false));
    assert!(arena.is_keyword(keyword, "def"));
    assert!(!arena.is_name(keyword));
    assert!(arena.is_error_leaf(error));
    assert!(!arena.leaf_is(error, TokenKind::Name));
    let node = arena.alloc_error_node(vec![keyword, error]);
    assert!(arena.is_error_node(node));
    assert_eq!(arena.leaves(node).collect::<Vec<_>>(), vec![keyword, error]);
}
