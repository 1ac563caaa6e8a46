//! JSON interchange format.
//!
//! ```json
//! {
//!   "start_state": "q0",
//!   "final_states": ["q1"],
//!   "transitions": [{ "from": "q0", "to": "q1", "char": "a" }],
//!   "states": { "q0": { "x": 100, "y": 100 }, "q1": { "x": 140, "y": 100 } }
//! }
//! ```
//!
//! States are labelled `q<integer>` and epsilon transitions carry `"ε"`.

use crate::formlang::automaton::Automaton;
use crate::formlang::error::{CodecError, Result};
use crate::formlang::layout::{Layout, Position};
use crate::formlang::state::StateId;
use crate::formlang::symbol::Symbol;
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

/// The serialized form of an automaton and its layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomatonDocument {
    pub start_state: String,
    pub final_states: Vec<String>,
    pub transitions: Vec<TransitionRecord>,
    pub states: IndexMap<String, Position>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub from: String,
    pub to: String,
    #[serde(rename = "char")]
    pub symbol: String,
}

/// Parse a `q<integer>` label.
pub fn parse_state_label(label: &str) -> Result<StateId> {
    label
        .strip_prefix('q')
        .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|digits| digits.parse().ok())
        .ok_or_else(|| CodecError::InvalidStateLabel(label.to_string()))
}

pub fn state_label(state: StateId) -> String {
    format!("q{state}")
}

fn parse_symbol(label: &str) -> Result<Symbol> {
    Symbol::from_label(label).ok_or_else(|| CodecError::InvalidSymbol(label.to_string()))
}

/// Build an automaton and its layout from a document.
///
/// Transitions are added in document order, then the initial state is set,
/// then final states are appended. Any malformed label fails the whole
/// decode.
pub fn decode(document: &AutomatonDocument) -> Result<(Automaton, Layout)> {
    let mut automaton = Automaton::new();

    for record in &document.transitions {
        let from = parse_state_label(&record.from)?;
        let to = parse_state_label(&record.to)?;
        let symbol = parse_symbol(&record.symbol)?;
        automaton.add_transition(from, to, symbol);
    }

    automaton.set_initial_state(parse_state_label(&document.start_state)?);

    for label in &document.final_states {
        automaton.add_final_state(parse_state_label(label)?);
    }

    let layout = document
        .states
        .iter()
        .map(|(label, &position)| parse_state_label(label).map(|state| (state, position)))
        .collect::<Result<Layout>>()?;

    debug!(
        "decoded automaton with {} transitions and {} positioned states",
        automaton.num_transitions(),
        layout.len()
    );

    Ok((automaton, layout))
}

/// Describe an automaton as a document.
///
/// `states` lists every state of the automaton plus any state only known to
/// the layout, in ascending order. States missing from the layout get their
/// default grid slot.
pub fn encode(automaton: &Automaton, layout: &Layout) -> AutomatonDocument {
    let transitions = automaton
        .transitions()
        .map(|(from, symbol, to)| TransitionRecord {
            from: state_label(from),
            to: state_label(to),
            symbol: symbol.to_string(),
        })
        .collect();

    let mut labelled = automaton.states();
    labelled.extend(layout.iter().map(|(state, _)| state));
    let states = labelled
        .iter()
        .map(|state| (state_label(state), layout.position_or_default(state)))
        .collect();

    AutomatonDocument {
        start_state: state_label(automaton.initial_state()),
        final_states: automaton
            .final_states()
            .iter()
            .map(|&state| state_label(state))
            .collect(),
        transitions,
        states,
    }
}

pub fn from_str(json: &str) -> Result<(Automaton, Layout)> {
    let document: AutomatonDocument = serde_json::from_str(json)?;
    decode(&document)
}

pub fn from_reader<R: Read>(reader: R) -> Result<(Automaton, Layout)> {
    let document: AutomatonDocument = serde_json::from_reader(reader)?;
    decode(&document)
}

pub fn to_string_pretty(automaton: &Automaton, layout: &Layout) -> Result<String> {
    Ok(serde_json::to_string_pretty(&encode(automaton, layout))?)
}

pub fn to_writer<W: Write>(mut writer: W, automaton: &Automaton, layout: &Layout) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, &encode(automaton, layout))?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE: &str = r#"{"start_state":"q0","final_states":["q1"],"transitions":[{"from":"q0","to":"q1","char":"a"}],"states":{"q0":{"x":100,"y":100},"q1":{"x":140,"y":100}}}"#;

    #[test]
    fn test_parse_state_label() {
        assert_eq!(parse_state_label("q0").unwrap(), 0);
        assert_eq!(parse_state_label("q42").unwrap(), 42);

        for bad in ["", "q", "0", "p1", "q-1", "q+1", "q1a", "q 1", "q99999999999"] {
            assert!(
                matches!(parse_state_label(bad), Err(CodecError::InvalidStateLabel(ref l)) if l == bad),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_decode_simple() {
        let (automaton, layout) = from_str(SIMPLE).unwrap();

        assert!(automaton.is_final_state(1));
        assert_eq!(automaton.next_state(0, 'a'), Some(1));
        assert!(automaton.is_deterministic());
        assert_eq!(automaton.initial_state(), 0);
        assert_eq!(layout.get(1), Some(Position::new(140, 100)));
    }

    #[test]
    fn test_decode_epsilon() {
        let json = r#"{"start_state":"q2","final_states":[],"transitions":[{"from":"q2","to":"q5","char":"ε"}],"states":{}}"#;
        let (automaton, layout) = from_str(json).unwrap();

        assert_eq!(automaton.initial_state(), 2);
        assert_eq!(automaton.transitions_on(2, Symbol::Epsilon).to_vec(), vec![5]);
        assert!(!automaton.is_deterministic());
        assert!(layout.is_empty());
    }

    #[test]
    fn test_decode_rejects_malformed_labels() {
        let bad_state = SIMPLE.replace(r#""to":"q1""#, r#""to":"x1""#);
        assert!(matches!(from_str(&bad_state), Err(CodecError::InvalidStateLabel(_))));

        let bad_start = SIMPLE.replace(r#""start_state":"q0""#, r#""start_state":"start""#);
        assert!(matches!(from_str(&bad_start), Err(CodecError::InvalidStateLabel(_))));

        let bad_symbol = SIMPLE.replace(r#""char":"a""#, r#""char":"ab""#);
        assert!(matches!(from_str(&bad_symbol), Err(CodecError::InvalidSymbol(_))));

        let bad_layout = SIMPLE.replace(r#""q1":{"x""#, r#""one":{"x""#);
        assert!(matches!(from_str(&bad_layout), Err(CodecError::InvalidStateLabel(_))));
    }

    #[test]
    fn test_decode_rejects_missing_fields() {
        for field in ["start_state", "final_states", "transitions", "states"] {
            let mut value: serde_json::Value = serde_json::from_str(SIMPLE).unwrap();
            value.as_object_mut().unwrap().remove(field);
            let json = value.to_string();
            assert!(matches!(from_str(&json), Err(CodecError::Json(_))), "{field}");
        }

        assert!(matches!(from_str("not json"), Err(CodecError::Json(_))));
    }

    #[test]
    fn test_huge_state_labels() {
        let json = r#"{"start_state":"q0","final_states":["q4294967295"],"transitions":[{"from":"q0","to":"q4294967295","char":"a"}],"states":{}}"#;
        let (automaton, layout) = from_str(json).unwrap();

        assert!(automaton.is_accepted("a"));
        assert_eq!(automaton.states().to_vec(), vec![0, StateId::MAX]);

        let document = encode(&automaton, &layout);
        assert_eq!(document.states.len(), 2);
        assert_eq!(
            document.states.get("q4294967295"),
            Some(&Layout::default_position(StateId::MAX))
        );
        assert_eq!(Layout::default_position(StateId::MAX), Position::new(300, 17_179_869_260));
    }

    #[test]
    fn test_encode() {
        let mut automaton = Automaton::new();
        automaton.add_transition(0, 1, 'a');
        automaton.add_epsilon_transition(1, 2);
        automaton.add_final_state(2);

        let mut layout = Layout::new();
        layout.insert(1, Position::new(7, 8));

        let document = encode(&automaton, &layout);
        assert_eq!(document.start_state, "q0");
        assert_eq!(document.final_states, vec!["q2"]);
        assert_eq!(
            document.transitions,
            vec![
                TransitionRecord { from: "q0".into(), to: "q1".into(), symbol: "a".into() },
                TransitionRecord { from: "q1".into(), to: "q2".into(), symbol: "ε".into() },
            ]
        );
        let states: Vec<(&str, Position)> =
            document.states.iter().map(|(label, &p)| (label.as_str(), p)).collect();
        assert_eq!(
            states,
            vec![
                ("q0", Position::new(100, 100)),
                ("q1", Position::new(7, 8)),
                ("q2", Position::new(180, 100)),
            ]
        );
    }

    #[test]
    fn test_round_trip_keeps_coordinates() {
        let json = r#"{
            "start_state": "q0",
            "final_states": ["q3"],
            "transitions": [
                {"from": "q0", "to": "q1", "char": "ε"},
                {"from": "q1", "to": "q3", "char": "b"},
                {"from": "q0", "to": "q3", "char": "a"}
            ],
            "states": {
                "q0": {"x": 12, "y": 34},
                "q1": {"x": 56, "y": 78},
                "q3": {"x": 90, "y": -1},
                "q7": {"x": 5, "y": 5}
            }
        }"#;
        let (automaton, layout) = from_str(json).unwrap();
        let text = to_string_pretty(&automaton, &layout).unwrap();
        let (again, again_layout) = from_str(&text).unwrap();

        assert_eq!(again, automaton);
        assert_eq!(again_layout, layout);

        let original: AutomatonDocument = serde_json::from_str(json).unwrap();
        let reencoded: AutomatonDocument = serde_json::from_str(&text).unwrap();
        assert_eq!(reencoded.states, original.states);
    }

    #[test]
    fn test_writer_and_reader() {
        let (automaton, layout) = from_str(SIMPLE).unwrap();

        let mut buffer = Vec::new();
        to_writer(&mut buffer, &automaton, &layout).unwrap();
        let (decoded, decoded_layout) = from_reader(buffer.as_slice()).unwrap();

        assert_eq!(decoded, automaton);
        assert_eq!(decoded_layout, layout);
    }

    #[test]
    fn test_field_names() {
        let (automaton, layout) = from_str(SIMPLE).unwrap();
        let value = serde_json::to_value(encode(&automaton, &layout)).unwrap();

        assert_eq!(value["start_state"], "q0");
        assert_eq!(value["final_states"][0], "q1");
        assert_eq!(value["transitions"][0]["char"], "a");
        assert_eq!(value["states"]["q1"]["x"], 140);
    }
}
