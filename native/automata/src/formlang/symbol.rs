//! Symbol types for automata transitions.

use std::fmt;

/// Wire spelling of the epsilon marker.
pub const EPSILON_LABEL: &str = "ε";

/// The label carried by a transition: either a real input character or the
/// epsilon marker, which is consumed without reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    Char(char),
    Epsilon,
}

impl Symbol {
    /// Check if this is an epsilon transition.
    #[inline]
    pub fn is_epsilon(self) -> bool {
        matches!(self, Symbol::Epsilon)
    }

    /// The input character, or `None` for epsilon.
    #[inline]
    pub fn as_char(self) -> Option<char> {
        match self {
            Symbol::Char(c) => Some(c),
            Symbol::Epsilon => None,
        }
    }

    /// Parse a wire label: `"ε"` or exactly one character.
    pub fn from_label(label: &str) -> Option<Self> {
        if label == EPSILON_LABEL {
            return Some(Symbol::Epsilon);
        }
        let mut chars = label.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(Symbol::Char(c)),
            _ => None,
        }
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Symbol::Char(c)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Char(c) => write!(f, "{c}"),
            Symbol::Epsilon => f.write_str(EPSILON_LABEL),
        }
    }
}
