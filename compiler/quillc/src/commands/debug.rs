//! Debug commands: `lex` and `parse` for inspecting the front end.

use std::fmt::Write;

use quill_ir::{NodeId, NodeKind, SyntaxTree};
use quill_lexer::Tokenizer;
use quill_parse::{parse_document, parse_strict};
use quill_stack::ensure_sufficient_stack;

use super::{grammar, read_file};

/// Lex a file and display the token stream.
pub fn lex_file(path: &str) {
    let content = read_file(path);
    let toks: Vec<_> = Tokenizer::new(&content).collect();

    println!("Tokens for '{}' ({} tokens):", path, toks.len());
    for tok in &toks {
        println!("  {} {:?} @ {}-{}", tok.kind.name(), tok.text, tok.start, tok.end);
    }
}

/// Parse a file and display its recovered syntax tree.
pub fn parse_file(path: &str) {
    let content = read_file(path);
    let grammar = grammar();
    let tree = parse_document(grammar, &content);

    println!("Parse tree for '{path}':");
    print!("{}", render_tree(&tree));

    if let Err(error) = parse_strict(grammar, &content) {
        println!();
        println!("Errors:");
        println!("  {error}");
    }
}

/// One line per node, children indented below their parent.
pub fn render_tree(tree: &SyntaxTree) -> String {
    let mut out = String::new();
    render_node(tree, tree.root(), 1, &mut out);
    out
}

fn render_node(tree: &SyntaxTree, id: NodeId, depth: usize, out: &mut String) {
    ensure_sufficient_stack(|| {
        let indent = "  ".repeat(depth);
        let start = tree.start(id);
        let _ = match tree.kind(id) {
            NodeKind::Leaf(leaf) if leaf.keyword => {
                writeln!(out, "{indent}keyword {:?} @ {start}", leaf.value)
            }
            NodeKind::Leaf(leaf) => writeln!(out, "{indent}{} {:?} @ {start}", leaf.token.name(), leaf.value),
            NodeKind::ErrorLeaf(leaf) => {
                writeln!(out, "{indent}error_leaf {} {:?} @ {start}", leaf.token.name(), leaf.value)
            }
            NodeKind::Node(symbol) => writeln!(out, "{indent}{symbol}"),
            NodeKind::ErrorNode => writeln!(out, "{indent}error_node"),
        };
        for &child in tree.children(id) {
            render_node(tree, child, depth + 1, out);
        }
    });
}
