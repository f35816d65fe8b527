//! Concrete syntax tree.
//!
//! Nodes live in a [`SyntaxArena`] and refer to each other by [`NodeId`].
//! Every node records its parent, so navigation upward and sideways
//! (previous/next leaf) needs no auxiliary maps. Positions of interior
//! nodes are derived from their first and last leaves.
//!
//! Leaves keep the prefix (whitespace, comments) that preceded them in the
//! source; concatenating prefix and value of every leaf in order yields the
//! original text.

use std::fmt;
use std::ops::Deref;

use crate::{Position, Symbol, Token, TokenKind};

/// Index of a node in a [`SyntaxArena`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// Payload of a leaf or error leaf.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Leaf {
    /// Lexical kind of the token the leaf was built from.
    pub token: TokenKind,
    /// The leaf is a NAME the grammar reserves as a keyword.
    pub keyword: bool,
    pub value: String,
    pub prefix: String,
    pub prefix_start: Position,
    pub start: Position,
    pub end: Position,
}

impl Leaf {
    pub fn from_token(token: Token, keyword: bool) -> Self {
        Leaf {
            token: token.kind,
            keyword,
            value: token.text,
            prefix: token.prefix,
            prefix_start: token.prefix_start,
            start: token.start,
            end: token.end,
        }
    }
}

/// What a node is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Leaf(Leaf),
    /// A token the parser could not place.
    ErrorLeaf(Leaf),
    /// A completed (or partially completed) grammar rule.
    Node(Symbol),
    /// Partial rules flattened together during error recovery.
    ErrorNode,
}

#[derive(Clone, Debug)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Growable storage for syntax nodes.
///
/// The parser allocates into an arena while it runs; a finished parse wraps
/// the arena into an immutable [`SyntaxTree`].
#[derive(Clone, Debug, Default)]
pub struct SyntaxArena {
    nodes: Vec<NodeData>,
}

impl SyntaxArena {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ─── Allocation ─────────────────────────────────────────────

    pub fn alloc_leaf(&mut self, leaf: Leaf) -> NodeId {
        self.alloc(NodeKind::Leaf(leaf), Vec::new())
    }

    pub fn alloc_error_leaf(&mut self, leaf: Leaf) -> NodeId {
        self.alloc(NodeKind::ErrorLeaf(leaf), Vec::new())
    }

    /// Allocate an interior node and adopt `children`.
    pub fn alloc_node(&mut self, symbol: Symbol, children: Vec<NodeId>) -> NodeId {
        self.alloc(NodeKind::Node(symbol), children)
    }

    pub fn alloc_error_node(&mut self, children: Vec<NodeId>) -> NodeId {
        self.alloc(NodeKind::ErrorNode, children)
    }

    fn alloc(&mut self, kind: NodeKind, children: Vec<NodeId>) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        for &child in &children {
            if let Some(data) = self.nodes.get_mut(child.index()) {
                data.parent = Some(id);
            }
        }
        self.nodes.push(NodeData {
            kind,
            parent: None,
            children,
        });
        id
    }

    // ─── Node Accessors ─────────────────────────────────────────

    #[inline]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.index()].kind
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    /// Leaf payload of a leaf or error leaf.
    pub fn leaf(&self, id: NodeId) -> Option<&Leaf> {
        match self.kind(id) {
            NodeKind::Leaf(leaf) | NodeKind::ErrorLeaf(leaf) => Some(leaf),
            NodeKind::Node(_) | NodeKind::ErrorNode => None,
        }
    }

    pub fn symbol(&self, id: NodeId) -> Option<Symbol> {
        match self.kind(id) {
            NodeKind::Node(symbol) => Some(*symbol),
            _ => None,
        }
    }

    pub fn value(&self, id: NodeId) -> Option<&str> {
        self.leaf(id).map(|leaf| leaf.value.as_str())
    }

    #[inline]
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.leaf(id).is_some()
    }

    #[inline]
    pub fn is_error_leaf(&self, id: NodeId) -> bool {
        matches!(self.kind(id), NodeKind::ErrorLeaf(_))
    }

    #[inline]
    pub fn is_error_node(&self, id: NodeId) -> bool {
        matches!(self.kind(id), NodeKind::ErrorNode)
    }

    /// A regular (non-error) leaf of lexical kind `kind`.
    pub fn leaf_is(&self, id: NodeId, kind: TokenKind) -> bool {
        matches!(self.kind(id), NodeKind::Leaf(leaf) if leaf.token == kind)
    }

    /// A regular NAME leaf that is not a keyword.
    pub fn is_name(&self, id: NodeId) -> bool {
        matches!(self.kind(id), NodeKind::Leaf(leaf) if leaf.token == TokenKind::Name && !leaf.keyword)
    }

    /// A regular keyword leaf spelled `keyword`.
    pub fn is_keyword(&self, id: NodeId, keyword: &str) -> bool {
        matches!(self.kind(id), NodeKind::Leaf(leaf) if leaf.keyword && leaf.value == keyword)
    }

    /// Position of `id` among its parent's children.
    pub fn child_index(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&child| child == id)
    }

    // ─── Positions ──────────────────────────────────────────────

    pub fn first_leaf(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(&first) = self.children(current).first() {
            current = first;
        }
        current
    }

    pub fn last_leaf(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(&last) = self.children(current).last() {
            current = last;
        }
        current
    }

    /// Where the node's first token starts (prefix excluded).
    pub fn start(&self, id: NodeId) -> Position {
        self.leaf(self.first_leaf(id))
            .map_or(Position::START, |leaf| leaf.start)
    }

    pub fn end(&self, id: NodeId) -> Position {
        self.leaf(self.last_leaf(id))
            .map_or(Position::START, |leaf| leaf.end)
    }

    /// Where the prefix of the node's first token starts.
    pub fn prefix_start(&self, id: NodeId) -> Position {
        self.leaf(self.first_leaf(id))
            .map_or(Position::START, |leaf| leaf.prefix_start)
    }

    // ─── Navigation ─────────────────────────────────────────────

    /// The leaf immediately before `id` in source order.
    pub fn previous_leaf(&self, id: NodeId) -> Option<NodeId> {
        let mut current = id;
        loop {
            let parent = self.parent(current)?;
            let index = self.child_index(current)?;
            if index > 0 {
                return Some(self.last_leaf(self.children(parent)[index - 1]));
            }
            current = parent;
        }
    }

    /// The leaf immediately after `id` in source order.
    pub fn next_leaf(&self, id: NodeId) -> Option<NodeId> {
        let mut current = id;
        loop {
            let parent = self.parent(current)?;
            let index = self.child_index(current)?;
            if let Some(&next) = self.children(parent).get(index + 1) {
                return Some(self.first_leaf(next));
            }
            current = parent;
        }
    }

    /// Leaves under `id`, in source order.
    pub fn leaves(&self, id: NodeId) -> Leaves<'_> {
        Leaves {
            arena: self,
            stack: vec![id],
        }
    }

    /// Source text covered by `id`. The first leaf's prefix is included
    /// only when `include_prefix` is set.
    pub fn code(&self, id: NodeId, include_prefix: bool) -> String {
        let mut out = String::new();
        for (index, leaf_id) in self.leaves(id).enumerate() {
            if let Some(leaf) = self.leaf(leaf_id) {
                if index > 0 || include_prefix {
                    out.push_str(&leaf.prefix);
                }
                out.push_str(&leaf.value);
            }
        }
        out
    }

    /// The leaf under `from` that covers `position`.
    ///
    /// Picks the first child whose end is at or after `position`. Without
    /// `include_prefixes`, a position inside that child's prefix finds
    /// nothing.
    pub fn leaf_at(&self, from: NodeId, position: Position, include_prefixes: bool) -> Option<NodeId> {
        let mut current = from;
        loop {
            if self.is_leaf(current) {
                return Some(current);
            }
            let children = self.children(current);
            let index = children.partition_point(|&child| self.end(child) < position);
            let &child = children.get(index)?;
            if !include_prefixes && position < self.start(child) {
                return None;
            }
            current = child;
        }
    }
}

/// Depth-first iterator over the leaves of a subtree.
pub struct Leaves<'a> {
    arena: &'a SyntaxArena,
    stack: Vec<NodeId>,
}

impl Iterator for Leaves<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        while let Some(id) = self.stack.pop() {
            if self.arena.is_leaf(id) {
                return Some(id);
            }
            self.stack.extend(self.arena.children(id).iter().rev());
        }
        None
    }
}

/// A finished parse: an arena plus its root node.
#[derive(Clone, Debug)]
pub struct SyntaxTree {
    arena: SyntaxArena,
    root: NodeId,
}

impl SyntaxTree {
    pub fn new(arena: SyntaxArena, root: NodeId) -> Self {
        SyntaxTree { arena, root }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn arena(&self) -> &SyntaxArena {
        &self.arena
    }

    /// [`SyntaxArena::leaf_at`] from the root.
    pub fn leaf_at_position(&self, position: Position, include_prefixes: bool) -> Option<NodeId> {
        self.arena.leaf_at(self.root, position, include_prefixes)
    }
}

impl Deref for SyntaxTree {
    type Target = SyntaxArena;

    fn deref(&self) -> &SyntaxArena {
        &self.arena
    }
}

#[cfg(test)]
mod tests;
