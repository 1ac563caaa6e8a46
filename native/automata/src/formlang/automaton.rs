//! Finite automaton model: adjacency lists keyed by source state, a final
//! state collection and a single initial state.

use crate::formlang::state::{StateId, StateSet};
use crate::formlang::symbol::Symbol;
use std::collections::HashSet;
use std::fmt;

/// An outgoing edge stored in the adjacency list of its source state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transition {
    pub to: StateId,
    pub symbol: Symbol,
}

impl Transition {
    pub fn new(to: StateId, symbol: Symbol) -> Self {
        Self { to, symbol }
    }
}

/// A finite automaton, deterministic or not, possibly with epsilon transitions.
///
/// Equality compares transition lists (in order), final states and the
/// initial state. Trailing states without transitions are not significant.
#[derive(Debug, Clone, Default)]
pub struct Automaton {
    /// Transitions grouped by source state. Insertion order within a list is
    /// kept, `next_state` answers with the first match.
    transitions: Vec<Vec<Transition>>,
    /// Final (accepting) states. May hold duplicates; queries treat it as a set.
    final_states: Vec<StateId>,
    /// Initial state
    initial_state: StateId,
}

impl Automaton {
    /// Create a new empty automaton with initial state 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an automaton from per-state transition lists, final states and
    /// an initial state.
    pub fn from_parts(
        transitions: Vec<Vec<Transition>>,
        final_states: Vec<StateId>,
        initial_state: StateId,
    ) -> Self {
        Self {
            transitions,
            final_states,
            initial_state,
        }
    }

    /// Append a transition to the list of `from`, growing the adjacency
    /// structure if needed. `to` is not validated.
    pub fn add_transition(&mut self, from: StateId, to: StateId, symbol: impl Into<Symbol>) {
        let idx = from as usize;
        if idx >= self.transitions.len() {
            self.transitions.resize_with(idx + 1, Vec::new);
        }
        self.transitions[idx].push(Transition::new(to, symbol.into()));
    }

    /// Add an epsilon transition from `from` to `to`.
    pub fn add_epsilon_transition(&mut self, from: StateId, to: StateId) {
        self.add_transition(from, to, Symbol::Epsilon);
    }

    /// Add a final (accepting) state.
    pub fn add_final_state(&mut self, state: StateId) {
        self.final_states.push(state);
    }

    /// Set the initial state, replacing the previous one.
    pub fn set_initial_state(&mut self, state: StateId) {
        self.initial_state = state;
    }

    pub fn initial_state(&self) -> StateId {
        self.initial_state
    }

    /// Final states in insertion order.
    pub fn final_states(&self) -> &[StateId] {
        &self.final_states
    }

    pub fn is_final_state(&self, state: StateId) -> bool {
        self.final_states.contains(&state)
    }

    /// Outgoing transitions of `state`, empty when it has no entry.
    pub fn transitions_from(&self, state: StateId) -> &[Transition] {
        self.transitions
            .get(state as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Per-state transition lists, indexed by source state.
    pub fn adjacency(&self) -> &[Vec<Transition>] {
        &self.transitions
    }

    /// Get all transitions as `(from, symbol, to)` in adjacency order.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, Symbol, StateId)> + '_ {
        self.transitions
            .iter()
            .enumerate()
            .flat_map(|(from, list)| list.iter().map(move |t| (from as StateId, t.symbol, t.to)))
    }

    pub fn num_transitions(&self) -> usize {
        self.transitions.iter().map(Vec::len).sum()
    }

    /// The first transition from `state` on `symbol`, if any.
    ///
    /// Only the first match in insertion order is returned, so for a
    /// non-deterministic automaton this is a partial answer; use
    /// [`Automaton::transitions_on`] for every target.
    pub fn next_state(&self, state: StateId, symbol: impl Into<Symbol>) -> Option<StateId> {
        let symbol = symbol.into();
        self.transitions_from(state)
            .iter()
            .find(|t| t.symbol == symbol)
            .map(|t| t.to)
    }

    /// True iff there is no epsilon transition and no state has two
    /// outgoing transitions on the same symbol.
    pub fn is_deterministic(&self) -> bool {
        let mut seen = HashSet::new();
        for list in &self.transitions {
            seen.clear();
            for transition in list {
                if transition.symbol.is_epsilon() || !seen.insert(transition.symbol) {
                    return false;
                }
            }
        }
        true
    }

    /// Every state the automaton mentions: sources with outgoing transitions,
    /// transition targets, final states and the initial state.
    pub fn states(&self) -> StateSet {
        let mut states = StateSet::with_capacity(self.transitions.len());
        for (from, list) in self.transitions.iter().enumerate() {
            if !list.is_empty() {
                states.insert(from as StateId);
            }
            states.extend(list.iter().map(|t| t.to));
        }
        states.extend(self.final_states.iter().copied());
        states.insert(self.initial_state);
        states
    }
}

impl PartialEq for Automaton {
    fn eq(&self, other: &Self) -> bool {
        fn trimmed(lists: &[Vec<Transition>]) -> &[Vec<Transition>] {
            let len = lists.iter().rposition(|l| !l.is_empty()).map_or(0, |i| i + 1);
            &lists[..len]
        }

        self.initial_state == other.initial_state
            && self.final_states == other.final_states
            && trimmed(&self.transitions) == trimmed(&other.transitions)
    }
}

impl Eq for Automaton {}

impl fmt::Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "States:")?;
        for state in self.states().iter() {
            write!(f, " {state}")?;
        }
        writeln!(f)?;
        writeln!(f, "Initial state: {}", self.initial_state)?;
        write!(f, "Final states:")?;
        for state in &self.final_states {
            write!(f, " {state}")?;
        }
        writeln!(f)?;
        for (from, symbol, to) in self.transitions() {
            writeln!(f, "{from} -> {to} on {symbol}")?;
        }
        Ok(())
    }
}
