//! State types for automata.

use fixedbitset::FixedBitSet;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A state identifier represented as a u32.
pub type StateId = u32;

/// States below this bound live in the bit set, larger ones in a sorted
/// side table, so a stray huge identifier costs one entry instead of a
/// bit per smaller identifier.
const DENSE_LIMIT: StateId = 1 << 16;

/// An ordered set of states.
///
/// Iteration always yields states in ascending order without duplicates.
/// Two sets are equal when they contain the same states, regardless of how
/// much capacity either one has reserved.
#[derive(Clone, Default)]
pub struct StateSet {
    dense: FixedBitSet,
    sparse: BTreeSet<StateId>,
}

impl StateSet {
    /// Create an empty set with room for states below `capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            dense: FixedBitSet::with_capacity(capacity.min(DENSE_LIMIT as usize)),
            sparse: BTreeSet::new(),
        }
    }

    pub fn singleton(state: StateId) -> Self {
        let mut set = Self::default();
        set.insert(state);
        set
    }

    /// Insert a state. Returns `true` if it was not present.
    pub fn insert(&mut self, state: StateId) -> bool {
        if state >= DENSE_LIMIT {
            return self.sparse.insert(state);
        }
        let idx = state as usize;
        if idx >= self.dense.len() {
            self.dense.grow(idx + 1);
        }
        !self.dense.put(idx)
    }

    pub fn contains(&self, state: StateId) -> bool {
        if state >= DENSE_LIMIT {
            self.sparse.contains(&state)
        } else {
            self.dense.contains(state as usize)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.dense.is_clear() && self.sparse.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dense.count_ones(..) + self.sparse.len()
    }

    /// Iterate over all states in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.dense
            .ones()
            .map(|i| i as StateId)
            .chain(self.sparse.iter().copied())
    }

    /// Add every state of `other` to this set.
    pub fn union_with(&mut self, other: &StateSet) {
        if other.dense.len() > self.dense.len() {
            self.dense.grow(other.dense.len());
        }
        self.dense.union_with(&other.dense);
        self.sparse.extend(other.sparse.iter().copied());
    }

    /// True when the two sets share at least one state.
    pub fn intersects(&self, other: &StateSet) -> bool {
        self.dense.intersection(&other.dense).next().is_some()
            || self.sparse.intersection(&other.sparse).next().is_some()
    }

    /// The states as a sorted vector.
    pub fn to_vec(&self) -> Vec<StateId> {
        self.iter().collect()
    }
}

impl PartialEq for StateSet {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for StateSet {}

impl Hash for StateSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for s in self.iter() {
            s.hash(state);
        }
    }
}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<StateId> for StateSet {
    fn from_iter<I: IntoIterator<Item = StateId>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl Extend<StateId> for StateSet {
    fn extend<I: IntoIterator<Item = StateId>>(&mut self, iter: I) {
        for state in iter {
            self.insert(state);
        }
    }
}
