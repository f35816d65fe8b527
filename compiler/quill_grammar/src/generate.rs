//! Table generation: rule DFAs, label numbering and first sets.

use quill_ir::{Symbol, TokenKind};
use quill_stack::ensure_sufficient_stack;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use tracing::debug;

use crate::automaton::{self, DraftState};
use crate::{meta, Dfa, DfaState, Grammar, GrammarError, Label, LabelId, Transition};

type Drafts = FxHashMap<String, Vec<DraftState>>;

#[tracing::instrument(level = "debug", skip_all)]
pub(crate) fn generate(text: &str) -> Result<Grammar, GrammarError> {
    let rules = meta::parse(text)?;

    let mut order: Vec<(Symbol, String)> = Vec::with_capacity(rules.len());
    let mut drafts = Drafts::default();
    for rule in &rules {
        let symbol =
            Symbol::from_name(&rule.name).ok_or_else(|| GrammarError::UnknownRule(rule.name.clone()))?;
        let mut dfa = automaton::make_dfa(rule);
        automaton::simplify(&mut dfa);
        if drafts.insert(rule.name.clone(), dfa).is_some() {
            return Err(GrammarError::DuplicateRule(rule.name.clone()));
        }
        order.push((symbol, rule.name.clone()));
    }
    let Some(&(start, _)) = order.first() else {
        return Err(GrammarError::Empty);
    };

    let firsts = first_sets(&order, &drafts)?;

    let mut labels = LabelTable::new(&drafts);
    let mut dfas: Vec<Option<Dfa>> = vec![None; Symbol::ALL.len()];
    for (symbol, name) in &order {
        let draft = &drafts[name.as_str()];
        let mut states = Vec::with_capacity(draft.len());
        for (index, state) in draft.iter().enumerate() {
            let mut arcs = SmallVec::new();
            for (label, next) in &state.arcs {
                arcs.push(Transition {
                    label: labels.intern(name, label)?,
                    next: *next,
                });
            }
            if state.is_final {
                arcs.push(Transition {
                    label: LabelId::ACCEPT,
                    next: index,
                });
            }
            states.push(DfaState {
                arcs,
                is_final: state.is_final,
            });
        }
        let mut first = FxHashSet::default();
        for label in &firsts[name.as_str()] {
            first.insert(labels.intern(name, label)?);
        }
        dfas[symbol.index()] = Some(Dfa {
            symbol: *symbol,
            states,
            first,
        });
    }

    debug!(
        rules = order.len(),
        labels = labels.labels.len(),
        keywords = labels.keywords.len(),
        "grammar generated"
    );
    Ok(Grammar {
        start,
        dfas,
        labels: labels.labels,
        tokens: labels.tokens,
        keywords: labels.keywords,
    })
}

// ─── Labels ─────────────────────────────────────────────────────

/// Numbers label texts in first-use order. Label 0 is always Accept.
struct LabelTable<'d> {
    drafts: &'d Drafts,
    labels: Vec<Label>,
    by_text: FxHashMap<String, LabelId>,
    tokens: FxHashMap<TokenKind, LabelId>,
    keywords: FxHashMap<Box<str>, LabelId>,
}

impl<'d> LabelTable<'d> {
    fn new(drafts: &'d Drafts) -> Self {
        LabelTable {
            drafts,
            labels: vec![Label::Accept],
            by_text: FxHashMap::default(),
            tokens: FxHashMap::default(),
            keywords: FxHashMap::default(),
        }
    }

    fn intern(&mut self, rule: &str, text: &str) -> Result<LabelId, GrammarError> {
        if let Some(&id) = self.by_text.get(text) {
            return Ok(id);
        }
        let label = self.classify(rule, text)?;
        let id = LabelId(u16::try_from(self.labels.len()).unwrap_or(u16::MAX));
        match &label {
            Label::Token(kind) => {
                self.tokens.insert(*kind, id);
            }
            Label::Keyword(keyword) => {
                self.keywords.insert(keyword.clone(), id);
            }
            Label::Symbol(_) | Label::Accept => {}
        }
        self.labels.push(label);
        self.by_text.insert(text.to_owned(), id);
        Ok(id)
    }

    fn classify(&self, rule: &str, text: &str) -> Result<Label, GrammarError> {
        if text.starts_with(|c: char| c.is_ascii_alphabetic()) {
            if self.drafts.contains_key(text) {
                return Symbol::from_name(text)
                    .map(Label::Symbol)
                    .ok_or_else(|| GrammarError::UnknownRule(text.to_owned()));
            }
            return TokenKind::from_token_name(text)
                .map(Label::Token)
                .ok_or_else(|| GrammarError::UnknownName {
                    rule: rule.to_owned(),
                    name: text.to_owned(),
                });
        }
        let Some(inner) = text.strip_prefix('\'').and_then(|t| t.strip_suffix('\'')) else {
            return Err(GrammarError::UnknownName {
                rule: rule.to_owned(),
                name: text.to_owned(),
            });
        };
        if inner.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return Ok(Label::Keyword(inner.into()));
        }
        TokenKind::from_operator(inner)
            .map(Label::Token)
            .ok_or_else(|| GrammarError::UnknownOperator {
                rule: rule.to_owned(),
                text: text.to_owned(),
            })
    }
}

// ─── First Sets ─────────────────────────────────────────────────

enum FirstState {
    InProgress,
    Done(Vec<String>),
}

/// Terminal label texts that can start each rule, in arc order.
fn first_sets(
    order: &[(Symbol, String)],
    drafts: &Drafts,
) -> Result<FxHashMap<String, Vec<String>>, GrammarError> {
    let mut firsts: FxHashMap<String, FirstState> = FxHashMap::default();
    for (_, name) in order {
        if !firsts.contains_key(name.as_str()) {
            calc_first(name, drafts, &mut firsts)?;
        }
    }
    Ok(firsts
        .into_iter()
        .filter_map(|(name, state)| match state {
            FirstState::Done(set) => Some((name, set)),
            FirstState::InProgress => None,
        })
        .collect())
}

fn calc_first(
    name: &str,
    drafts: &Drafts,
    firsts: &mut FxHashMap<String, FirstState>,
) -> Result<(), GrammarError> {
    ensure_sufficient_stack(|| {
        firsts.insert(name.to_owned(), FirstState::InProgress);
        let Some(start) = drafts.get(name).and_then(|dfa| dfa.first()) else {
            return Err(GrammarError::UnknownRule(name.to_owned()));
        };

        let mut total: Vec<String> = Vec::new();
        // (arc label, terminals it can start with)
        let mut per_arc: Vec<(&str, Vec<String>)> = Vec::new();
        for (label, _) in &start.arcs {
            if drafts.contains_key(label.as_str()) {
                match firsts.get(label.as_str()) {
                    Some(FirstState::InProgress) => {
                        return Err(GrammarError::LeftRecursion(name.to_owned()));
                    }
                    Some(FirstState::Done(_)) => {}
                    None => calc_first(label, drafts, firsts)?,
                }
                let Some(FirstState::Done(set)) = firsts.get(label.as_str()) else {
                    return Err(GrammarError::LeftRecursion(name.to_owned()));
                };
                for terminal in set {
                    if !total.contains(terminal) {
                        total.push(terminal.clone());
                    }
                }
                per_arc.push((label.as_str(), set.clone()));
            } else {
                if !total.contains(label) {
                    total.push(label.clone());
                }
                per_arc.push((label.as_str(), vec![label.clone()]));
            }
        }

        let mut owner: FxHashMap<&str, &str> = FxHashMap::default();
        for (arc, set) in &per_arc {
            for terminal in set {
                if let Some(previous) = owner.insert(terminal.as_str(), *arc) {
                    return Err(GrammarError::Ambiguous {
                        rule: name.to_owned(),
                        label: terminal.clone(),
                        first: previous.to_owned(),
                        second: (*arc).to_owned(),
                    });
                }
            }
        }

        firsts.insert(name.to_owned(), FirstState::Done(total));
        Ok(())
    })
}
