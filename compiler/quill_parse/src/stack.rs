//! The parser's stack of partially recognized rules.

use quill_grammar::Dfa;
use quill_ir::{NodeId, Symbol, SyntaxArena};

/// One rule being recognized: its DFA, the current state, and the nodes
/// matched so far.
#[derive(Clone, Debug)]
pub struct StackFrame<'g> {
    pub(crate) dfa: &'g Dfa,
    pub(crate) state: usize,
    pub(crate) nodes: Vec<NodeId>,
    /// An INDENT has been consumed by this frame (only for `suite`).
    pub(crate) indented: bool,
}

impl<'g> StackFrame<'g> {
    pub(crate) fn new(dfa: &'g Dfa) -> Self {
        StackFrame {
            dfa,
            state: 0,
            nodes: Vec::new(),
            indented: false,
        }
    }

    #[inline]
    pub fn symbol(&self) -> Symbol {
        self.dfa.symbol()
    }

    #[inline]
    pub fn dfa(&self) -> &'g Dfa {
        self.dfa
    }

    /// Current DFA state index.
    #[inline]
    pub fn state(&self) -> usize {
        self.state
    }

    #[inline]
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }
}

/// Snapshot of the parser after the last token, outermost frame first.
///
/// The arena holds every node the frames refer to.
#[derive(Clone, Debug)]
pub struct ParseStack<'g> {
    pub(crate) frames: Vec<StackFrame<'g>>,
    pub(crate) arena: SyntaxArena,
}

impl<'g> ParseStack<'g> {
    #[inline]
    pub fn frames(&self) -> &[StackFrame<'g>] {
        &self.frames
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Innermost frame.
    pub fn top(&self) -> Option<&StackFrame<'g>> {
        self.frames.last()
    }

    /// Rule of every frame, outermost first.
    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.frames.iter().map(StackFrame::symbol)
    }

    /// Nodes of every frame, outermost first.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.frames.iter().flat_map(|frame| frame.nodes.iter().copied())
    }

    #[inline]
    pub fn arena(&self) -> &SyntaxArena {
        &self.arena
    }
}
