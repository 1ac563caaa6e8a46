//! Subset construction algorithm for converting an automaton with epsilon
//! transitions and repeated symbols into a deterministic one.

use crate::formlang::automaton::{Automaton, Transition};
use crate::formlang::state::{StateId, StateSet};
use crate::formlang::symbol::Symbol;
use indexmap::IndexSet;
use log::{debug, trace};

/// The output of [`subset_construction`]: the deterministic automaton and,
/// for each of its states, the set of source states it stands for.
#[derive(Debug, Clone)]
pub struct SubsetConstruction {
    automaton: Automaton,
    subsets: Vec<StateSet>,
}

impl SubsetConstruction {
    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    /// `subsets()[i]` holds the source states merged into new state `i`.
    pub fn subsets(&self) -> &[StateSet] {
        &self.subsets
    }

    pub fn into_automaton(self) -> Automaton {
        self.automaton
    }
}

/// Convert an automaton to a DFA using the powerset construction algorithm.
///
/// New states are numbered in discovery order starting from the epsilon
/// closure of the initial state (always state 0). Symbols are tried in
/// ascending order so the numbering is reproducible.
pub fn subset_construction(source: &Automaton) -> SubsetConstruction {
    // Each DFA state corresponds to a set of source states; its position in
    // discovery order is its identifier.
    let mut subsets: IndexSet<StateSet> = IndexSet::new();
    let mut transitions: Vec<Vec<Transition>> = Vec::new();
    let mut final_states: Vec<StateId> = Vec::new();

    let initial = source.epsilon_closure(source.initial_state());
    debug!("subset 0 = {initial:?}");
    subsets.insert(initial);

    let mut current_index = 0;
    while let Some(current) = subsets.get_index(current_index).cloned() {
        let mut outgoing = Vec::new();

        for symbol in source.alphabet(&current) {
            let moved = source.transitions_on_set(&current, symbol);
            let next = source.epsilon_closure_set(&moved);

            if next.is_empty() {
                // No transition on this symbol
                continue;
            }

            let (next_index, inserted) = subsets.insert_full(next);
            if inserted {
                debug!("subset {next_index} = {:?}", subsets[next_index]);
            }
            trace!("{current_index} -> {next_index} on {symbol}");
            outgoing.push(Transition::new(next_index as StateId, Symbol::Char(symbol)));
        }

        if current.iter().any(|state| source.is_final_state(state)) {
            final_states.push(current_index as StateId);
        }

        transitions.push(outgoing);
        current_index += 1;
    }

    debug!(
        "subset construction produced {} states from {}",
        subsets.len(),
        source.states().len()
    );

    SubsetConstruction {
        automaton: Automaton::from_parts(transitions, final_states, 0),
        subsets: subsets.into_iter().collect(),
    }
}

impl Automaton {
    /// An equivalent deterministic, epsilon-free automaton. Returns a copy
    /// of `self` when it is already deterministic.
    pub fn determinize(&self) -> Automaton {
        if self.is_deterministic() {
            return self.clone();
        }
        subset_construction(self).into_automaton()
    }
}
