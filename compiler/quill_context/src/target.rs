//! What a call calls.
//!
//! [`CallTargetResolver`] is where semantic evaluation plugs in: the
//! resolver is handed the bracket of a call and produces whatever the
//! caller wants cached next to the signature details.

use std::fmt;

use quill_ir::{NodeId, NodeKind, Position, SyntaxTree, TokenKind};

pub trait CallTargetResolver {
    type Target: Clone + fmt::Debug + Send + Sync;

    /// Resolve the expression immediately before `bracket`.
    fn resolve(&self, tree: &SyntaxTree, bracket: NodeId) -> Self::Target;
}

/// The callee as written.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CallTarget {
    /// Source text of the callee, e.g. `os.path.join`.
    pub expression: String,
    /// The callee's final name, when it ends in one.
    pub name: Option<String>,
}

impl fmt::Display for CallTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}

/// Resolves call targets from source text alone.
#[derive(Copy, Clone, Debug, Default)]
pub struct SyntacticResolver;

impl CallTargetResolver for SyntacticResolver {
    type Target = CallTarget;

    fn resolve(&self, tree: &SyntaxTree, bracket: NodeId) -> CallTarget {
        let previous = tree.previous_leaf(bracket);
        let name = previous
            .filter(|&leaf| tree.is_name(leaf))
            .and_then(|leaf| tree.value(leaf))
            .map(str::to_owned);
        let mut leaves = callee_leaves(tree, previous);
        leaves.reverse();
        CallTarget {
            expression: render(tree, &leaves),
            name,
        }
    }
}

/// Where the callee chain before `bracket` starts. A bracket with no
/// callee (a group) starts at itself.
pub(crate) fn callee_start(tree: &SyntaxTree, bracket: NodeId) -> Position {
    callee_leaves(tree, tree.previous_leaf(bracket))
        .last()
        .map_or_else(|| tree.start(bracket), |&leaf| tree.start(leaf))
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum Expect {
    /// A name or bracketed group must come next.
    Operand,
    /// After a name: only `.` continues the chain.
    Dot,
    /// After a group: a name, `.` or another group may come next.
    Primary,
}

/// Leaves of the dotted/trailer chain ending at `last`, in reverse order.
fn callee_leaves(tree: &SyntaxTree, last: Option<NodeId>) -> Vec<NodeId> {
    let mut leaves = Vec::new();
    let mut expect = Expect::Operand;
    let mut current = last;
    while let Some(leaf) = current {
        let kind = token_kind(tree, leaf);
        if kind.is_some_and(TokenKind::closes_bracket) && expect != Expect::Dot {
            let Some(open) = collect_group(tree, leaf, &mut leaves) else {
                break;
            };
            expect = Expect::Primary;
            current = tree.previous_leaf(open);
            continue;
        }
        if tree.is_name(leaf) && expect != Expect::Dot {
            expect = Expect::Dot;
        } else if kind == Some(TokenKind::Dot) && expect != Expect::Operand {
            expect = Expect::Operand;
        } else {
            break;
        }
        leaves.push(leaf);
        current = tree.previous_leaf(leaf);
    }
    // A dangling `.` is not part of the callee.
    if expect == Expect::Operand && leaves.last().is_some_and(|&leaf| token_kind(tree, leaf) == Some(TokenKind::Dot)) {
        leaves.pop();
    }
    leaves
}

/// Push the bracketed group ending at `close` (in reverse) and return its
/// opening leaf, or `None` if it is unbalanced.
fn collect_group(tree: &SyntaxTree, close: NodeId, leaves: &mut Vec<NodeId>) -> Option<NodeId> {
    let mark = leaves.len();
    let mut depth = 0usize;
    let mut current = Some(close);
    while let Some(leaf) = current {
        leaves.push(leaf);
        match token_kind(tree, leaf) {
            Some(kind) if kind.closes_bracket() => depth += 1,
            Some(kind) if kind.opens_bracket() => {
                depth -= 1;
                if depth == 0 {
                    return Some(leaf);
                }
            }
            _ => {}
        }
        current = tree.previous_leaf(leaf);
    }
    leaves.truncate(mark);
    None
}

fn token_kind(tree: &SyntaxTree, leaf: NodeId) -> Option<TokenKind> {
    match tree.kind(leaf) {
        NodeKind::Leaf(data) => Some(data.token),
        _ => None,
    }
}

fn render(tree: &SyntaxTree, leaves: &[NodeId]) -> String {
    let mut out = String::new();
    for (index, &leaf) in leaves.iter().enumerate() {
        if let Some(data) = tree.leaf(leaf) {
            if index > 0 {
                out.push_str(&data.prefix);
            }
            out.push_str(&data.value);
        }
    }
    out
}
