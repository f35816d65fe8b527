//! Enumerating what may legally follow a parsed prefix.
//!
//! Starting from the innermost frame's state, every arc is a candidate:
//! terminals and keywords are recorded, nonterminals are expanded into
//! the labels that can start them, and an accepting arc hands over to the
//! enclosing frame. The walk uses an explicit worklist and visits each
//! `(symbol, state)` pair's labels once.

use quill_grammar::{Grammar, Label, LabelId};
use quill_ir::{Symbol, TokenKind};
use quill_parse::ParseStack;
use rustc_hash::FxHashSet;

/// Keywords and token kinds that may come next, in discovery order,
/// without duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Continuations<'g> {
    pub keywords: Vec<&'g str>,
    pub tokens: Vec<TokenKind>,
}

impl<'g> Continuations<'g> {
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty() && self.tokens.is_empty()
    }

    fn add_keyword(&mut self, keyword: &'g str) {
        if !self.keywords.contains(&keyword) {
            self.keywords.push(keyword);
        }
    }

    fn add_token(&mut self, kind: TokenKind) {
        if !self.tokens.contains(&kind) {
            self.tokens.push(kind);
        }
    }
}

#[derive(Copy, Clone, Debug)]
enum Work {
    /// Arcs out of the current state of the stack frame at this index.
    Frame(usize),
    Label(LabelId),
}

/// Everything that could follow the input that produced `stack`.
pub fn possible_continuations<'g>(grammar: &'g Grammar, stack: &ParseStack<'_>) -> Continuations<'g> {
    walk(grammar, stack, |_| {})
}

/// The `(symbol, state)` pairs whose arcs were expanded, in visiting order.
#[cfg(test)]
pub(crate) fn expanded_pairs(grammar: &Grammar, stack: &ParseStack<'_>) -> Vec<(Symbol, usize)> {
    let mut pairs = Vec::new();
    walk(grammar, stack, |pair| pairs.push(pair));
    pairs
}

/// `on_expand` sees each pair whose arcs are expanded.
fn walk<'g>(
    grammar: &'g Grammar,
    stack: &ParseStack<'_>,
    mut on_expand: impl FnMut((Symbol, usize)),
) -> Continuations<'g> {
    let mut found = Continuations::default();
    let mut visited: FxHashSet<(Symbol, usize)> = FxHashSet::default();
    let mut work: Vec<Work> = stack.len().checked_sub(1).map(Work::Frame).into_iter().collect();

    while let Some(item) = work.pop() {
        let mut next = Vec::new();
        match item {
            Work::Frame(index) => {
                let Some(frame) = stack.frames().get(index) else {
                    continue;
                };
                let pair = (frame.symbol(), frame.state());
                let fresh = visited.insert(pair);
                if fresh {
                    on_expand(pair);
                }
                for arc in frame.dfa().state(frame.state()).arcs() {
                    if arc.label.is_accept() {
                        if let Some(outer) = index.checked_sub(1) {
                            next.push(Work::Frame(outer));
                        }
                    } else if fresh {
                        next.push(Work::Label(arc.label));
                    }
                }
            }
            Work::Label(label) => match grammar.label(label) {
                Label::Token(kind) => found.add_token(*kind),
                Label::Keyword(keyword) => found.add_keyword(keyword),
                Label::Symbol(symbol) => {
                    let Some(dfa) = grammar.dfa(*symbol) else {
                        continue;
                    };
                    if !visited.insert((*symbol, 0)) {
                        continue;
                    }
                    on_expand((*symbol, 0));
                    next.extend(
                        dfa.state(0)
                            .arcs()
                            .iter()
                            .filter(|arc| !arc.label.is_accept())
                            .map(|arc| Work::Label(arc.label)),
                    );
                }
                Label::Accept => {}
            },
        }
        // Reversed so labels come off the worklist in arc order.
        work.extend(next.into_iter().rev());
    }
    found
}
