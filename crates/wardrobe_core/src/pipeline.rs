//! Pipeline orchestration: parse, gate on confidence, validate, apply.
//!
//! Pure sequencing with no state of its own. Persistence and transport are
//! the caller's business; every outcome carries the intent that produced
//! it so a client can always explain why nothing changed.

use tracing::info;

use crate::intent::Intent;
use crate::layout::{self, LayoutState};
use crate::parser::IntentParser;
use crate::validate::{validate, ValidationError};

/// Shown when a low-confidence intent carries no clarification of its own.
const DEFAULT_CLARIFICATION: &str = "Could not understand command";

/// Result of running one command through the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Confidence below the threshold or action unknown; nothing changed.
    NeedsClarification { intent: Intent, message: String },

    /// The validator rejected the parameters; nothing changed.
    Invalid {
        intent: Intent,
        error: ValidationError,
    },

    /// The intent was applied; `state` is the new layout.
    Applied { intent: Intent, state: LayoutState },
}

/// Run one command against a layout snapshot.
pub fn run(parser: &IntentParser, state: &LayoutState, command: &str) -> Outcome {
    let intent = parser.parse(command);
    info!(
        "parsed command: action={}, confidence={:.2}",
        intent.action, intent.confidence
    );

    if intent.needs_clarification() {
        let message = intent
            .clarification
            .clone()
            .unwrap_or_else(|| DEFAULT_CLARIFICATION.to_string());
        return Outcome::NeedsClarification { intent, message };
    }

    if let Err(error) = validate(&intent) {
        return Outcome::Invalid { intent, error };
    }

    let state = layout::apply(state, &intent);
    Outcome::Applied { intent, state }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::Action;

    #[test]
    fn applied_outcome_carries_intent_and_new_state() {
        let parser = IntentParser::deterministic();
        let state = LayoutState::new();

        match run(&parser, &state, "add a door") {
            Outcome::Applied {
                intent,
                state: next,
            } => {
                assert_eq!(intent.action, Action::AddDoor);
                assert_eq!(next.doors.len(), 1);
            }
            other => panic!("expected Applied, got {:?}", other),
        }
        // Original snapshot untouched.
        assert!(state.doors.is_empty());
    }

    #[test]
    fn gibberish_needs_clarification() {
        let parser = IntentParser::deterministic();
        let state = LayoutState::new();

        match run(&parser, &state, "asdkjhasd") {
            Outcome::NeedsClarification { intent, message } => {
                assert_eq!(intent.action, Action::Unknown);
                assert_eq!(intent.confidence, 0.0);
                assert!(!message.is_empty());
            }
            other => panic!("expected NeedsClarification, got {:?}", other),
        }
    }

    #[test]
    fn out_of_range_dimension_is_invalid() {
        let parser = IntentParser::deterministic();
        let state = LayoutState::new();

        match run(&parser, &state, "make it 500cm wide") {
            Outcome::Invalid { error, .. } => {
                assert_eq!(error.to_string(), "Width must be 100-400cm");
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
    }
}
