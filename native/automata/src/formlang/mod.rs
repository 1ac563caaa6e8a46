//! Finite automata over characters.
//!
//! This module provides:
//! - An automaton model with optional epsilon transitions
//! - Epsilon closure and set-based transition lookup
//! - Subset construction (NFA to DFA conversion)
//! - A JSON interchange format with per-state display coordinates
//! - PyO3 bindings for Python interoperability (feature `python`)

mod automaton;
mod closure;
pub mod codec;
mod error;
mod layout;
#[cfg(feature = "python")]
mod python_bindings;
mod state;
mod subset_construction;
mod symbol;

pub use automaton::{Automaton, Transition};
pub use error::{CodecError, Result};
pub use layout::{Layout, Position};
#[cfg(feature = "python")]
pub use python_bindings::automaton_module;
pub use state::{StateId, StateSet};
pub use subset_construction::{SubsetConstruction, subset_construction};
pub use symbol::{EPSILON_LABEL, Symbol};
