//! Intent schema shared by both parsing strategies.
//!
//! An [`Intent`] is created fresh per command, consumed once by the
//! validator and the layout engine, and discarded. It is also the JSON
//! contract the model-backed parser expects the LLM to emit.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Below this confidence the pipeline asks the user to rephrase instead of
/// acting.
pub const CLARIFICATION_THRESHOLD: f64 = 0.7;

/// Below this confidence the validator rejects the intent outright.
pub const MIN_ACTIONABLE_CONFIDENCE: f64 = 0.5;

/// Everything a command can ask for. Closed set so the layout engine's
/// dispatch is exhaustive; anything else the model invents deserializes to
/// [`Action::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    AddDoor,
    RemoveDoor,
    AddShelf,
    RemoveShelf,
    AddColumn,
    RemoveColumn,
    ChangeMaterial,
    SetDimensions,
    ModifyGrid,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::AddDoor => "add_door",
            Action::RemoveDoor => "remove_door",
            Action::AddShelf => "add_shelf",
            Action::RemoveShelf => "remove_shelf",
            Action::AddColumn => "add_column",
            Action::RemoveColumn => "remove_column",
            Action::ChangeMaterial => "change_material",
            Action::SetDimensions => "set_dimensions",
            Action::ModifyGrid => "modify_grid",
            Action::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// Optional parameters carried by an intent. Dimensions are in
/// centimeters on the wire; the layout engine converts to meters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntentParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    /// Width in cm
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Height in cm
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Depth in cm
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
}

impl IntentParameters {
    pub fn with_count(count: i64) -> Self {
        Self {
            count: Some(count),
            ..Self::default()
        }
    }
}

/// A parsed command: what to do, how sure we are, and what with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub action: Action,
    /// In [0, 1]; parsers clamp anything a model returns outside the range.
    pub confidence: f64,
    #[serde(default)]
    pub parameters: IntentParameters,
    /// Required whenever confidence is below [`CLARIFICATION_THRESHOLD`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clarification: Option<String>,
}

impl Intent {
    pub fn new(action: Action, confidence: f64, parameters: IntentParameters) -> Self {
        Self {
            action,
            confidence,
            parameters,
            clarification: None,
        }
    }

    /// Too ambiguous to act on: unknown action or low confidence.
    pub fn needs_clarification(&self) -> bool {
        self.action == Action::Unknown || self.confidence < CLARIFICATION_THRESHOLD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_wire_names_are_snake_case() {
        let json = serde_json::to_string(&Action::AddDoor).unwrap();
        assert_eq!(json, "\"add_door\"");
        let back: Action = serde_json::from_str("\"remove_column\"").unwrap();
        assert_eq!(back, Action::RemoveColumn);
    }

    #[test]
    fn unrecognized_action_deserializes_to_unknown() {
        let action: Action = serde_json::from_str("\"paint_it_blue\"").unwrap();
        assert_eq!(action, Action::Unknown);
    }

    #[test]
    fn intent_tolerates_missing_parameters() {
        let intent: Intent =
            serde_json::from_str(r#"{"action":"add_door","confidence":0.95}"#).unwrap();
        assert_eq!(intent.action, Action::AddDoor);
        assert_eq!(intent.parameters, IntentParameters::default());
        assert!(intent.clarification.is_none());
    }

    #[test]
    fn needs_clarification_gates_on_threshold_and_unknown() {
        let mut intent = Intent::new(Action::AddDoor, 0.85, IntentParameters::default());
        assert!(!intent.needs_clarification());
        intent.confidence = 0.69;
        assert!(intent.needs_clarification());
        intent.confidence = 0.95;
        intent.action = Action::Unknown;
        assert!(intent.needs_clarification());
    }
}
