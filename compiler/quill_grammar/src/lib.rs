//! LL(1) grammar tables.
//!
//! A [`Grammar`] is generated from EBNF rule text: each rule becomes an NFA,
//! then a minimized DFA, and every DFA gets the set of labels that can start
//! it. The tables drive both the pushdown parser and the continuation
//! walker, so they are the single source of truth for what may follow what.
//!
//! # Labels
//!
//! Arcs are labelled with [`LabelId`]s. Label 0 is [`Label::Accept`], the
//! marker arc every final state carries back to itself. Other labels are a
//! token kind, a keyword, or a nonterminal.
//!
//! The bundled grammar (a Python subset) is generated once per process and
//! shared through [`Grammar::bundled`].

mod automaton;
mod error;
mod generate;
mod meta;

use std::sync::OnceLock;

use quill_ir::{Symbol, TokenKind};
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

pub use error::GrammarError;

const BUNDLED_GRAMMAR: &str = include_str!("grammar.txt");

static BUNDLED: OnceLock<Result<Grammar, GrammarError>> = OnceLock::new();

/// Index into a grammar's label table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LabelId(u16);

impl LabelId {
    /// The accept label, `0`.
    pub const ACCEPT: LabelId = LabelId(0);

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn is_accept(self) -> bool {
        self.0 == 0
    }
}

/// What an arc label matches.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Label {
    /// The rule may end here.
    Accept,
    /// Any token of this kind (NAME matches only non-keywords).
    Token(TokenKind),
    /// A NAME spelled exactly like this.
    Keyword(Box<str>),
    /// A nested rule.
    Symbol(Symbol),
}

/// One DFA arc.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub label: LabelId,
    pub next: usize,
}

/// One DFA state and its outgoing arcs, in grammar order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DfaState {
    arcs: SmallVec<[Transition; 4]>,
    is_final: bool,
}

impl DfaState {
    #[inline]
    pub fn arcs(&self) -> &[Transition] {
        &self.arcs
    }

    #[inline]
    pub fn is_final(&self) -> bool {
        self.is_final
    }

    /// Target of the arc labelled `label`, if any.
    pub fn transition(&self, label: LabelId) -> Option<usize> {
        self.arcs.iter().find(|arc| arc.label == label).map(|arc| arc.next)
    }

    /// The state's only arc is the accept loop back to `index` itself,
    /// so nothing more can be consumed in it.
    pub fn is_accept_only(&self, index: usize) -> bool {
        matches!(
            self.arcs.as_slice(),
            [Transition { label, next }] if label.is_accept() && *next == index
        )
    }
}

/// Deterministic automaton for one rule.
#[derive(Clone, Debug)]
pub struct Dfa {
    symbol: Symbol,
    states: Vec<DfaState>,
    first: FxHashSet<LabelId>,
}

impl Dfa {
    #[inline]
    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    /// States; index 0 is the start state.
    #[inline]
    pub fn states(&self) -> &[DfaState] {
        &self.states
    }

    #[inline]
    pub fn state(&self, index: usize) -> &DfaState {
        &self.states[index]
    }

    /// Terminal labels that can begin this rule.
    #[inline]
    pub fn first(&self) -> &FxHashSet<LabelId> {
        &self.first
    }

    #[inline]
    pub fn starts_with(&self, label: LabelId) -> bool {
        self.first.contains(&label)
    }
}

/// Generated parse tables for a set of rules.
#[derive(Clone, Debug)]
pub struct Grammar {
    start: Symbol,
    /// Indexed by [`Symbol::index`]; `None` for symbols the rules omit.
    dfas: Vec<Option<Dfa>>,
    labels: Vec<Label>,
    tokens: FxHashMap<TokenKind, LabelId>,
    keywords: FxHashMap<Box<str>, LabelId>,
}

impl Grammar {
    /// Generate tables from rule text. The first rule is the start symbol.
    pub fn generate(text: &str) -> Result<Self, GrammarError> {
        generate::generate(text)
    }

    /// The bundled Python-subset grammar, generated on first use.
    pub fn bundled() -> Result<&'static Grammar, GrammarError> {
        match BUNDLED.get_or_init(|| Grammar::generate(BUNDLED_GRAMMAR)) {
            Ok(grammar) => Ok(grammar),
            Err(error) => Err(error.clone()),
        }
    }

    #[inline]
    pub fn start(&self) -> Symbol {
        self.start
    }

    pub fn dfa(&self, symbol: Symbol) -> Option<&Dfa> {
        self.dfas.get(symbol.index()).and_then(Option::as_ref)
    }

    /// Label behind `id`. Ids come from this grammar's own tables.
    #[inline]
    pub fn label(&self, id: LabelId) -> &Label {
        &self.labels[id.index()]
    }

    #[inline]
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Label a token matches: its keyword label when the token is a NAME
    /// spelled like a keyword, otherwise the label of its kind.
    pub fn classify(&self, kind: TokenKind, value: &str) -> Option<LabelId> {
        if kind == TokenKind::Name {
            if let Some(&id) = self.keywords.get(value) {
                return Some(id);
            }
        }
        self.tokens.get(&kind).copied()
    }

    pub fn is_keyword(&self, value: &str) -> bool {
        self.keywords.contains_key(value)
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.keywords.keys().map(AsRef::as_ref)
    }
}
