//! Finding the open call around a cursor and the argument slot it is in.

use quill_ir::{NodeId, Position, Symbol, SyntaxTree, TokenKind};
use tracing::trace;

/// Where a call's arguments start and which one the cursor is in.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CallSignatureDetails {
    /// Start of the `(` that opens the call.
    pub bracket: Position,
    /// Number of top-level commas between the bracket and the cursor.
    pub call_index: usize,
    /// Set when the cursor is in the value of a `name=` argument.
    pub keyword_name: Option<String>,
}

/// A call found in a tree: the bracket leaf plus its details.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallSite {
    pub bracket: NodeId,
    pub details: CallSignatureDetails,
}

/// The innermost call whose argument list is open at `position`.
///
/// Returns `None` outside any call, right after a closing `)`, and inside
/// a function or class definition header.
pub fn call_site(tree: &SyntaxTree, position: Position) -> Option<CallSite> {
    let mut leaf = tree.leaf_at_position(position, true)?;
    if tree.leaf_is(leaf, TokenKind::RPar) && tree.end(leaf) == position {
        leaf = tree.next_leaf(leaf)?;
    }
    // Blanks at the end of the document belong to whatever precedes them.
    if tree.leaf_is(leaf, TokenKind::EndMarker) {
        if let Some(previous) = tree.previous_leaf(leaf) {
            if !tree.leaf_is(previous, TokenKind::RPar) {
                leaf = previous;
            }
        }
    }

    let mut node = tree.parent(leaf);
    while let Some(current) = node {
        if is_definition(tree, current) {
            trace!(at = %tree.start(current), "definition header, no signature");
            return None;
        }
        for &child in tree.children(current) {
            let candidate =
                tree.is_error_node(child) && tree.start(child) < position && !is_definition(tree, child);
            if candidate {
                if let Some(site) = site_in_error_node(tree, child, position) {
                    return Some(site);
                }
            }
        }
        if tree.symbol(current) == Some(Symbol::Trailer) {
            let children = tree.children(current);
            if let Some(&bracket) = children.first() {
                if tree.leaf_is(bracket, TokenKind::LPar) {
                    return Some(site(tree, bracket, children, position));
                }
            }
        }
        node = tree.parent(current);
    }
    None
}

/// A definition, or the error node left by an unfinished definition header.
fn is_definition(tree: &SyntaxTree, node: NodeId) -> bool {
    match tree.symbol(node) {
        Some(Symbol::Funcdef | Symbol::Classdef) => true,
        Some(_) => false,
        None if tree.is_error_node(node) => {
            let first = tree.first_leaf(node);
            tree.is_keyword(first, "def") || tree.is_keyword(first, "class")
        }
        None => false,
    }
}

/// Search an error node, last child first, for a call bracket before the
/// cursor. A `(` at the very start of the node is a group, not a call.
fn site_in_error_node(tree: &SyntaxTree, node: NodeId, position: Position) -> Option<CallSite> {
    let children = tree.children(node);
    for (index, &child) in children.iter().enumerate().rev() {
        if index == 0 || !tree.leaf_is(child, TokenKind::LPar) || tree.end(child) > position {
            continue;
        }
        let Some(callee) = tree.previous_leaf(child) else {
            continue;
        };
        let in_primary = tree
            .parent(callee)
            .and_then(|parent| tree.symbol(parent))
            .is_some_and(|symbol| matches!(symbol, Symbol::Trailer | Symbol::Atom));
        if tree.is_name(callee) || in_primary {
            return Some(site(tree, child, &children[index..], position));
        }
    }
    None
}

/// `nodes` starts with the bracket and holds what follows it.
fn site(tree: &SyntaxTree, bracket: NodeId, nodes: &[NodeId], position: Position) -> CallSite {
    let (call_index, keyword_name) = index_and_key(tree, nodes, position);
    CallSite {
        bracket,
        details: CallSignatureDetails {
            bracket: tree.start(bracket),
            call_index,
            keyword_name,
        },
    }
}

fn index_and_key(tree: &SyntaxTree, nodes: &[NodeId], position: Position) -> (usize, Option<String>) {
    let before = |nodes: &[NodeId]| -> Vec<NodeId> {
        nodes
            .iter()
            .copied()
            .filter(|&node| tree.start(node) < position)
            .collect()
    };
    let mut nodes_before = before(nodes);
    if let Some(&last) = nodes_before.last() {
        if tree.symbol(last) == Some(Symbol::Arglist) {
            nodes_before = before(tree.children(last));
        }
    }

    let mut keyword = None;
    if let Some((&last, rest)) = nodes_before.split_last() {
        if tree.symbol(last) == Some(Symbol::Argument) {
            if let [name, equals, ..] = tree.children(last) {
                if tree.leaf_is(*equals, TokenKind::Equal) && tree.end(*equals) <= position {
                    keyword = tree.value(*name);
                }
            }
        } else if tree.leaf_is(last, TokenKind::Equal) {
            keyword = rest.last().and_then(|&name| tree.value(name));
        }
    }

    let commas = nodes_before
        .iter()
        .filter(|&&node| tree.leaf_is(node, TokenKind::Comma))
        .count();
    (commas, keyword.map(str::to_owned))
}

#[cfg(test)]
mod tests;
