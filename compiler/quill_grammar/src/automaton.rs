//! NFA to DFA conversion and state merging.
//!
//! Arc order is deterministic: NFA states are visited in creation order,
//! which follows the rule text left to right, and labels keep the order in
//! which they were first seen.

use std::collections::BTreeSet;

use crate::meta::RuleNfa;

/// A DFA state before labels are resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DraftState {
    pub(crate) nfaset: BTreeSet<usize>,
    pub(crate) is_final: bool,
    pub(crate) arcs: Vec<(String, usize)>,
}

impl DraftState {
    fn new(nfaset: BTreeSet<usize>, finish: usize) -> Self {
        let is_final = nfaset.contains(&finish);
        DraftState {
            nfaset,
            is_final,
            arcs: Vec::new(),
        }
    }

    /// Same finality and the same label-to-target map.
    fn same_as(&self, other: &DraftState) -> bool {
        self.is_final == other.is_final
            && self.arcs.len() == other.arcs.len()
            && self.arcs.iter().all(|arc| other.arcs.contains(arc))
    }
}

/// Epsilon closure of `state`.
fn closure(nfa: &RuleNfa, state: usize) -> BTreeSet<usize> {
    let mut set = BTreeSet::new();
    let mut stack = vec![state];
    while let Some(current) = stack.pop() {
        if set.insert(current) {
            for (label, next) in &nfa.states[current].arcs {
                if label.is_none() {
                    stack.push(*next);
                }
            }
        }
    }
    set
}

/// Subset construction.
pub(crate) fn make_dfa(nfa: &RuleNfa) -> Vec<DraftState> {
    let mut states = vec![DraftState::new(closure(nfa, nfa.start), nfa.finish)];
    let mut index = 0;
    while index < states.len() {
        let mut arcs: Vec<(String, BTreeSet<usize>)> = Vec::new();
        for &nfa_state in &states[index].nfaset {
            for (label, next) in &nfa.states[nfa_state].arcs {
                let Some(label) = label else { continue };
                let targets = closure(nfa, *next);
                match arcs.iter_mut().find(|(existing, _)| existing == label) {
                    Some((_, set)) => set.extend(targets),
                    None => arcs.push((label.clone(), targets)),
                }
            }
        }
        for (label, set) in arcs {
            let target = match states.iter().position(|state| state.nfaset == set) {
                Some(target) => target,
                None => {
                    states.push(DraftState::new(set, nfa.finish));
                    states.len() - 1
                }
            };
            states[index].arcs.push((label, target));
        }
        index += 1;
    }
    states
}

/// Merge equivalent states until none remain. State 0 stays the start.
pub(crate) fn simplify(states: &mut Vec<DraftState>) {
    while let Some((keep, drop)) = find_duplicate(states) {
        states.remove(drop);
        for state in states.iter_mut() {
            for (_, next) in &mut state.arcs {
                if *next == drop {
                    *next = keep;
                } else if *next > drop {
                    *next -= 1;
                }
            }
        }
    }
}

fn find_duplicate(states: &[DraftState]) -> Option<(usize, usize)> {
    for (i, first) in states.iter().enumerate() {
        for (j, second) in states.iter().enumerate().skip(i + 1) {
            if first.same_as(second) {
                return Some((i, j));
            }
        }
    }
    None
}
