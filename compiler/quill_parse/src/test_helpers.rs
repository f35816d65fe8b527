//! Compact tree rendering for assertions.

use quill_ir::{NodeId, NodeKind, SyntaxTree, TokenKind};

/// Render a tree as nested lists: `(rule child ...)` for nodes,
/// `(error ...)` for error nodes, `!text` for error leaves. NEWLINE and
/// ENDMARKER leaves print as `NL` and `END`.
pub(crate) fn outline(tree: &SyntaxTree) -> String {
    let mut out = String::new();
    render(tree, tree.root(), &mut out);
    out
}

fn render(tree: &SyntaxTree, id: NodeId, out: &mut String) {
    match tree.kind(id) {
        NodeKind::Leaf(leaf) => out.push_str(match leaf.token {
            TokenKind::Newline => "NL",
            TokenKind::EndMarker => "END",
            _ => &leaf.value,
        }),
        NodeKind::ErrorLeaf(leaf) => {
            out.push('!');
            out.push_str(&leaf.value);
        }
        NodeKind::Node(_) | NodeKind::ErrorNode => {
            out.push('(');
            match tree.symbol(id) {
                Some(symbol) => out.push_str(symbol.name()),
                None => out.push_str("error"),
            }
            for &child in tree.children(id) {
                out.push(' ');
                render(tree, child, out);
            }
            out.push(')');
        }
    }
}
