//! Finding the statement around a cursor.

use quill_ir::{NodeId, Position, Symbol, SyntaxTree, TokenKind};
use tracing::trace;

use crate::{ContextError, UnresolvableReason};

/// Nodes that group statements rather than being one.
const CONTAINERS: &[Symbol] = &[
    Symbol::FileInput,
    Symbol::Decorated,
    Symbol::SimpleStmt,
    Symbol::Suite,
    Symbol::IfStmt,
    Symbol::WhileStmt,
    Symbol::ForStmt,
    Symbol::TryStmt,
    Symbol::WithStmt,
    Symbol::Funcdef,
    Symbol::Classdef,
];

/// The innermost statement-level node whose span (ends inclusive) covers
/// `position`, descending through statement containers.
pub fn statement_at(tree: &SyntaxTree, position: Position) -> Option<NodeId> {
    let mut node = tree.root();
    'descend: loop {
        for &child in tree.children(node) {
            if tree.start(child) <= position && position <= tree.end(child) {
                if tree.symbol(child).is_some_and(|symbol| CONTAINERS.contains(&symbol)) {
                    node = child;
                    continue 'descend;
                }
                return Some(child);
            }
        }
        return None;
    }
}

/// The node whose text leads up to the cursor.
///
/// This is the statement at `position`, or the leaf there (prefix
/// included) when no statement covers it. A cursor at or before the start
/// of that node continues the previous statement instead.
///
/// Fails when the cursor sits in a string literal or in text the tokenizer
/// could not classify.
pub fn locate(tree: &SyntaxTree, position: Position) -> Result<NodeId, ContextError> {
    let located = statement_at(tree, position).or_else(|| tree.leaf_at_position(position, true));
    let Some(mut statement) = located else {
        return Err(ContextError::PositionOutOfRange { position });
    };
    if position <= tree.start(statement) {
        if let Some(previous) = tree.previous_leaf(tree.first_leaf(statement)) {
            statement = statement_at(tree, tree.start(previous)).unwrap_or(previous);
        }
    }
    trace!(?statement, start = %tree.start(statement), "statement located");

    if tree.is_error_leaf(statement) {
        return Err(unresolvable(tree, statement, position));
    }
    if tree.leaf_is(statement, TokenKind::String) {
        return Err(ContextError::Unresolvable {
            position,
            reason: UnresolvableReason::InsideString,
        });
    }

    if let Some(leaf) = tree.leaf_at_position(position, false) {
        let inside = tree.start(leaf) < position;
        if inside && tree.leaf_is(leaf, TokenKind::String) && position < tree.end(leaf) {
            return Err(ContextError::Unresolvable {
                position,
                reason: UnresolvableReason::InsideString,
            });
        }
        let error_token = tree
            .leaf(leaf)
            .is_some_and(|data| data.token == TokenKind::ErrorToken);
        if inside && error_token && tree.is_error_leaf(leaf) && position <= tree.end(leaf) {
            return Err(unresolvable(tree, leaf, position));
        }
    }
    Ok(statement)
}

fn unresolvable(tree: &SyntaxTree, leaf: NodeId, position: Position) -> ContextError {
    let reason = if tree.value(leaf).is_some_and(opens_string) {
        UnresolvableReason::InsideString
    } else {
        UnresolvableReason::ErrorLeaf
    };
    ContextError::Unresolvable { position, reason }
}

/// Text starting with a quote, after an optional string prefix.
fn opens_string(text: &str) -> bool {
    let body = text.trim_start_matches(|c: char| c.is_ascii_alphabetic());
    text.len() - body.len() <= 2 && body.starts_with(['\'', '"'])
}
