//! PyO3 bindings for the automaton module.

use crate::formlang::automaton::Automaton as RustAutomaton;
use crate::formlang::codec;
use crate::formlang::error::CodecError;
use crate::formlang::layout::Layout;
use crate::formlang::state::{StateId, StateSet};
use crate::formlang::symbol::Symbol;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

impl From<CodecError> for PyErr {
    fn from(err: CodecError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

/// `None` and `"ε"` select epsilon, any other single character is itself.
fn symbol_from_py(symbol: Option<&str>) -> PyResult<Symbol> {
    match symbol {
        None => Ok(Symbol::Epsilon),
        Some(label) => Symbol::from_label(label).ok_or_else(|| {
            PyValueError::new_err(format!(
                "symbol must be a single character or \"ε\", got {label:?}"
            ))
        }),
    }
}

/// A finite automaton with optional epsilon transitions.
#[pyclass(name = "Automaton", module = "automata.automaton")]
#[derive(Clone, Default)]
pub struct PyAutomaton {
    /// The underlying Rust automaton
    automaton: RustAutomaton,
    /// Coordinates read from or written to JSON
    layout: Layout,
}

#[pymethods]
impl PyAutomaton {
    #[new]
    fn new() -> Self {
        Self::default()
    }

    /// Add a transition. `symbol=None` adds an epsilon transition.
    #[pyo3(signature = (source, destination, symbol=None))]
    fn add_transition(
        &mut self,
        source: StateId,
        destination: StateId,
        symbol: Option<&str>,
    ) -> PyResult<()> {
        let symbol = symbol_from_py(symbol)?;
        self.automaton.add_transition(source, destination, symbol);
        Ok(())
    }

    fn add_final_state(&mut self, state: StateId) {
        self.automaton.add_final_state(state);
    }

    fn set_initial_state(&mut self, state: StateId) {
        self.automaton.set_initial_state(state);
    }

    fn is_final_state(&self, state: StateId) -> bool {
        self.automaton.is_final_state(state)
    }

    #[getter]
    fn initial_state(&self) -> StateId {
        self.automaton.initial_state()
    }

    #[getter]
    fn final_states(&self) -> Vec<StateId> {
        self.automaton.final_states().to_vec()
    }

    #[getter]
    fn states(&self) -> Vec<StateId> {
        self.automaton.states().to_vec()
    }

    /// All transitions as `(source, destination, symbol)` tuples.
    #[getter]
    fn transitions(&self) -> Vec<(StateId, StateId, String)> {
        self.automaton
            .transitions()
            .map(|(from, symbol, to)| (from, to, symbol.to_string()))
            .collect()
    }

    /// First transition target on `symbol`, or None.
    #[pyo3(signature = (state, symbol=None))]
    fn next_state(&self, state: StateId, symbol: Option<&str>) -> PyResult<Option<StateId>> {
        Ok(self.automaton.next_state(state, symbol_from_py(symbol)?))
    }

    fn is_deterministic(&self) -> bool {
        self.automaton.is_deterministic()
    }

    /// Deterministic acceptance from the initial state, or from `state`.
    #[pyo3(signature = (input, state=None))]
    fn is_accepted(&self, input: &str, state: Option<StateId>) -> bool {
        match state {
            Some(state) => self.automaton.is_accepted_from(input, state),
            None => self.automaton.is_accepted(input),
        }
    }

    fn accepts(&self, input: &str) -> bool {
        self.automaton.accepts(input)
    }

    fn epsilon_closure(&self, state: StateId) -> Vec<StateId> {
        self.automaton.epsilon_closure(state).to_vec()
    }

    fn epsilon_closure_of(&self, states: Vec<StateId>) -> Vec<StateId> {
        let states: StateSet = states.into_iter().collect();
        self.automaton.epsilon_closure_set(&states).to_vec()
    }

    #[pyo3(signature = (state, symbol=None))]
    fn transitions_on(&self, state: StateId, symbol: Option<&str>) -> PyResult<Vec<StateId>> {
        Ok(self
            .automaton
            .transitions_on(state, symbol_from_py(symbol)?)
            .to_vec())
    }

    #[pyo3(signature = (states, symbol=None))]
    fn transitions_on_set(&self, states: Vec<StateId>, symbol: Option<&str>) -> PyResult<Vec<StateId>> {
        let states: StateSet = states.into_iter().collect();
        Ok(self
            .automaton
            .transitions_on_set(&states, symbol_from_py(symbol)?)
            .to_vec())
    }

    /// Return an equivalent deterministic automaton. Coordinates fall back to
    /// the default grid since state numbers change.
    fn determinize(&self) -> PyAutomaton {
        PyAutomaton {
            automaton: self.automaton.determinize(),
            layout: Layout::new(),
        }
    }

    fn to_json(&self) -> PyResult<String> {
        Ok(codec::to_string_pretty(&self.automaton, &self.layout)?)
    }

    #[staticmethod]
    fn from_json(json: &str) -> PyResult<PyAutomaton> {
        let (automaton, layout) = codec::from_str(json)?;
        Ok(PyAutomaton { automaton, layout })
    }

    fn __repr__(&self) -> String {
        format!(
            "Automaton(states={}, transitions={}, initial_state={})",
            self.automaton.states().len(),
            self.automaton.num_transitions(),
            self.automaton.initial_state()
        )
    }

    fn __str__(&self) -> String {
        self.automaton.to_string()
    }
}

/// Parse a `q<integer>` state label.
#[pyfunction]
fn parse_state_label(label: &str) -> PyResult<StateId> {
    Ok(codec::parse_state_label(label)?)
}

/// Register the automaton submodule.
pub fn automaton_module(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyAutomaton>()?;
    m.add_function(wrap_pyfunction!(parse_state_label, m)?)?;
    Ok(())
}
