//! Epsilon closures, set-based transition lookup and acceptance testing.

use crate::formlang::automaton::Automaton;
use crate::formlang::state::{StateId, StateSet};
use crate::formlang::symbol::Symbol;
use std::collections::BTreeSet;

impl Automaton {
    /// Compute the epsilon closure of a single state.
    ///
    /// The result always contains `state` itself. States without an adjacency
    /// entry simply contribute nothing further.
    pub fn epsilon_closure(&self, state: StateId) -> StateSet {
        self.close_over(vec![state])
    }

    /// Get the epsilon closure of a set of states.
    pub fn epsilon_closure_set(&self, states: &StateSet) -> StateSet {
        self.close_over(states.iter().collect())
    }

    fn close_over(&self, mut stack: Vec<StateId>) -> StateSet {
        let mut closure = StateSet::with_capacity(self.adjacency().len());

        while let Some(s) = stack.pop() {
            if !closure.insert(s) {
                continue;
            }

            // Follow epsilon transitions
            for transition in self.transitions_from(s) {
                if transition.symbol.is_epsilon() && !closure.contains(transition.to) {
                    stack.push(transition.to);
                }
            }
        }

        closure
    }

    /// Every target of a transition from `state` carrying exactly `symbol`.
    /// Epsilon edges are only included when `symbol` is epsilon.
    pub fn transitions_on(&self, state: StateId, symbol: impl Into<Symbol>) -> StateSet {
        let symbol = symbol.into();
        self.transitions_from(state)
            .iter()
            .filter(|t| t.symbol == symbol)
            .map(|t| t.to)
            .collect()
    }

    /// Get the states reached from a set of states on `symbol`, without
    /// taking the epsilon closure of the result.
    pub fn transitions_on_set(&self, states: &StateSet, symbol: impl Into<Symbol>) -> StateSet {
        let symbol = symbol.into();
        let mut reached = StateSet::default();

        for state in states.iter() {
            reached.extend(
                self.transitions_from(state)
                    .iter()
                    .filter(|t| t.symbol == symbol)
                    .map(|t| t.to),
            );
        }

        reached
    }

    /// The non-epsilon characters labelling transitions leaving `states`,
    /// in ascending code point order.
    pub fn alphabet(&self, states: &StateSet) -> BTreeSet<char> {
        states
            .iter()
            .flat_map(|state| self.transitions_from(state))
            .filter_map(|t| t.symbol.as_char())
            .collect()
    }

    /// Run `input` from the initial state following the first matching
    /// transition for each character.
    ///
    /// Epsilon transitions are never expanded and only the first transition
    /// per symbol is followed, so the answer matches the textbook language
    /// only for deterministic automata. See [`Automaton::accepts`] for the
    /// non-deterministic case.
    pub fn is_accepted(&self, input: &str) -> bool {
        self.is_accepted_from(input, self.initial_state())
    }

    /// Like [`Automaton::is_accepted`], starting from `state`.
    pub fn is_accepted_from(&self, input: &str, state: StateId) -> bool {
        let mut current = state;
        for c in input.chars() {
            match self.next_state(current, c) {
                Some(next) => current = next,
                None => return false,
            }
        }
        self.is_final_state(current)
    }

    /// Acceptance under full NFA semantics: determinize, then run
    /// [`Automaton::is_accepted`] on the result.
    pub fn accepts(&self, input: &str) -> bool {
        self.determinize().is_accepted(input)
    }
}
