//! Token-at-a-time LL(1) driver over the grammar DFAs.

use quill_grammar::{Dfa, Grammar, Label, LabelId};
use quill_ir::{Leaf, NodeId, Position, SyntaxArena, SyntaxTree, Token, TokenKind};
use tracing::trace;

use crate::error::{ParseError, ParseErrorKind};
use crate::stack::{ParseStack, StackFrame};

/// What to do with a token that fits nowhere.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Repair the stack and keep going.
    #[default]
    Recover,
    /// Report a [`ParseError`].
    Strict,
}

/// Result of feeding one token.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Feed {
    /// More tokens are expected.
    Continue,
    /// The start rule is complete; further tokens are not consumed.
    Accepted,
}

enum Action<'g> {
    /// Consume the token, moving the top frame to the given state.
    Shift(usize),
    /// Enter a sub-rule; the top frame moves to the given state first.
    Push(&'g Dfa, usize),
    /// The top frame is complete.
    Pop,
    Reject,
}

pub struct Parser<'g> {
    grammar: &'g Grammar,
    mode: Mode,
    pub(crate) arena: SyntaxArena,
    pub(crate) stack: Vec<StackFrame<'g>>,
    root: Option<NodeId>,
    /// INDENT tokens seen minus DEDENT tokens applied.
    indent_counter: u32,
    /// Indent levels whose INDENT was discarded; the matching DEDENT is
    /// dropped too.
    omit_dedents: Vec<u32>,
    last_position: Position,
}

impl<'g> Parser<'g> {
    pub fn new(grammar: &'g Grammar, mode: Mode) -> Self {
        let stack = grammar
            .dfa(grammar.start())
            .map(StackFrame::new)
            .into_iter()
            .collect();
        Parser {
            grammar,
            mode,
            arena: SyntaxArena::new(),
            stack,
            root: None,
            indent_counter: 0,
            omit_dedents: Vec::new(),
            last_position: Position::START,
        }
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    /// The start rule has been completed.
    #[inline]
    pub fn is_accepted(&self) -> bool {
        self.root.is_some()
    }

    /// Feed one token.
    ///
    /// Only fails in [`Mode::Strict`].
    pub fn add_token(&mut self, token: Token) -> Result<Feed, ParseError> {
        self.last_position = token.end;
        if self.root.is_some() {
            return match self.mode {
                Mode::Recover => Ok(Feed::Accepted),
                Mode::Strict => Err(ParseError::new(ParseErrorKind::TrailingInput, token.start)),
            };
        }

        match token.kind {
            TokenKind::Dedent => {
                if self.omit_dedents.last() == Some(&self.indent_counter) {
                    self.omit_dedents.pop();
                    self.indent_counter = self.indent_counter.saturating_sub(1);
                    trace!(at = %token.start, "dedent dropped");
                    return Ok(Feed::Continue);
                }
                self.indent_counter = self.indent_counter.saturating_sub(1);
            }
            TokenKind::Indent => self.indent_counter += 1,
            _ => {}
        }

        let label = self.grammar.classify(token.kind, &token.text);
        loop {
            match self.decide(label) {
                Action::Shift(next) => {
                    let keyword = label.is_some_and(|id| matches!(self.grammar.label(id), Label::Keyword(_)));
                    self.shift(token, keyword, next);
                    return Ok(self.pop_completed());
                }
                Action::Push(dfa, next) => self.push(dfa, next),
                Action::Pop => {
                    self.pop();
                    if self.stack.is_empty() {
                        return self.add_token(token);
                    }
                }
                Action::Reject => match self.mode {
                    Mode::Strict => {
                        let kind = ParseErrorKind::UnexpectedToken {
                            kind: token.kind,
                            text: token.text,
                        };
                        return Err(ParseError::new(kind, token.start));
                    }
                    Mode::Recover => {
                        if self.recover(token.kind) {
                            continue;
                        }
                        self.discard(token);
                        return Ok(Feed::Continue);
                    }
                },
            }
        }
    }

    fn decide(&self, label: Option<LabelId>) -> Action<'g> {
        let grammar: &'g Grammar = self.grammar;
        let (Some(frame), Some(label)) = (self.stack.last(), label) else {
            return Action::Reject;
        };
        let state = frame.dfa.state(frame.state);
        for arc in state.arcs() {
            if arc.label == label {
                return Action::Shift(arc.next);
            }
            if let Label::Symbol(symbol) = grammar.label(arc.label) {
                if let Some(dfa) = grammar.dfa(*symbol) {
                    if dfa.starts_with(label) {
                        return Action::Push(dfa, arc.next);
                    }
                }
            }
        }
        if state.is_final() {
            Action::Pop
        } else {
            Action::Reject
        }
    }

    fn shift(&mut self, token: Token, keyword: bool, next: usize) {
        let Some(top) = self.stack.last_mut() else {
            return;
        };
        top.state = next;
        match token.kind {
            TokenKind::Indent => top.indented = true,
            TokenKind::Dedent => {}
            _ => {
                trace!(?token, rule = %top.symbol(), "shift");
                let leaf = self.arena.alloc_leaf(Leaf::from_token(token, keyword));
                top.nodes.push(leaf);
            }
        }
    }

    fn push(&mut self, dfa: &'g Dfa, next: usize) {
        if let Some(top) = self.stack.last_mut() {
            top.state = next;
        }
        self.stack.push(StackFrame::new(dfa));
    }

    /// Pop every frame whose only way forward is to finish.
    fn pop_completed(&mut self) -> Feed {
        while let Some(top) = self.stack.last() {
            if !top.dfa.state(top.state).is_accept_only(top.state) {
                break;
            }
            self.pop();
        }
        if self.root.is_some() {
            Feed::Accepted
        } else {
            Feed::Continue
        }
    }

    /// Close the top frame into a node and attach it to the frame below,
    /// or make it the root. A rule with a single child is replaced by that
    /// child, except the start rule.
    pub(crate) fn pop(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        let symbol = frame.symbol();
        let node = match frame.nodes.len() {
            0 if symbol != self.grammar.start() => return,
            1 if symbol != self.grammar.start() => frame.nodes[0],
            _ => self.arena.alloc_node(symbol, frame.nodes),
        };
        match self.stack.last_mut() {
            Some(parent) => parent.nodes.push(node),
            None => self.root = Some(node),
        }
    }

    /// Keep a token that fits nowhere as an error leaf on the top frame.
    fn discard(&mut self, token: Token) {
        match token.kind {
            TokenKind::Indent => {
                trace!(level = self.indent_counter, "indent dropped");
                self.omit_dedents.push(self.indent_counter);
            }
            TokenKind::Dedent => {}
            _ => {
                trace!(?token, "error leaf");
                let leaf = self.arena.alloc_error_leaf(Leaf::from_token(token, false));
                match self.stack.last_mut() {
                    Some(top) => top.nodes.push(leaf),
                    None => self.root = Some(leaf),
                }
            }
        }
    }

    // ─── Results ────────────────────────────────────────────────

    /// The live stack, for callers that stopped feeding early.
    pub fn into_stack(self) -> ParseStack<'g> {
        ParseStack {
            frames: self.stack,
            arena: self.arena,
        }
    }

    /// The finished tree, or an error if the start rule is incomplete.
    pub fn finish(self) -> Result<SyntaxTree, ParseError> {
        match self.root {
            Some(root) => Ok(SyntaxTree::new(self.arena, root)),
            None => Err(ParseError::new(ParseErrorKind::UnexpectedEnd, self.last_position)),
        }
    }

    /// The finished tree, closing any open frames as they stand.
    pub fn finish_recovered(mut self) -> SyntaxTree {
        while self.root.is_none() && !self.stack.is_empty() {
            self.pop();
        }
        let root = match self.root {
            Some(root) => root,
            None => self.arena.alloc_node(self.grammar.start(), Vec::new()),
        };
        SyntaxTree::new(self.arena, root)
    }
}
