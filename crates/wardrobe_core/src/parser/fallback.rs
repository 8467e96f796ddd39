//! Deterministic keyword parser - always available, never fails.
//!
//! Category checks run in a fixed priority order and the first match wins.
//! Confidences are fixed per category so tests can rely on them: 0.85 for
//! add/remove, 0.9 for materials, 0.88 for dimensions.

use regex::Regex;

use crate::intent::{Action, Intent, IntentParameters};
use crate::layout::Material;

const ADD_REMOVE_CONFIDENCE: f64 = 0.85;
const MATERIAL_CONFIDENCE: f64 = 0.9;
const DIMENSION_CONFIDENCE: f64 = 0.88;

const UNKNOWN_CLARIFICATION: &str = "I couldn't understand that command. Try: \
    \"add a door\", \"remove door\", \"add 3 shelves\", \"add a column\", \
    \"remove column\", \"make it 200cm wide\", \"change material to oak\"";

/// Parse a command with keywords alone. Total: every input produces a
/// well-formed intent with confidence in [0, 1].
pub fn parse(command: &str) -> Intent {
    let lower = command.to_lowercase();
    let removes = lower.contains("remove") || lower.contains("delete");

    if lower.contains("add") && lower.contains("door") {
        return count_intent(Action::AddDoor, &lower);
    }
    if removes && lower.contains("door") {
        return count_intent(Action::RemoveDoor, &lower);
    }
    if lower.contains("add") && (lower.contains("shelf") || lower.contains("shelves")) {
        return count_intent(Action::AddShelf, &lower);
    }
    if removes && (lower.contains("shelf") || lower.contains("shelves")) {
        return count_intent(Action::RemoveShelf, &lower);
    }
    if lower.contains("add") && lower.contains("column") {
        return count_intent(Action::AddColumn, &lower);
    }
    if removes && lower.contains("column") {
        return count_intent(Action::RemoveColumn, &lower);
    }

    if lower.contains("material") || lower.contains("wood") {
        for material in Material::ALL {
            if lower.contains(material.as_str()) {
                let mut parameters = IntentParameters::default();
                parameters.material = Some(material.as_str().to_string());
                return Intent::new(Action::ChangeMaterial, MATERIAL_CONFIDENCE, parameters);
            }
        }
    }

    // Dimension categories fall through to the next check when no
    // number+unit literal is present.
    if lower.contains("wide") || lower.contains("width") {
        if let Some(cm) = extract_centimeters(&lower) {
            let mut parameters = IntentParameters::default();
            parameters.width = Some(cm);
            return Intent::new(Action::SetDimensions, DIMENSION_CONFIDENCE, parameters);
        }
    }
    if lower.contains("tall") || lower.contains("height") {
        if let Some(cm) = extract_centimeters(&lower) {
            let mut parameters = IntentParameters::default();
            parameters.height = Some(cm);
            return Intent::new(Action::SetDimensions, DIMENSION_CONFIDENCE, parameters);
        }
    }
    if lower.contains("deep") || lower.contains("depth") {
        if let Some(cm) = extract_centimeters(&lower) {
            let mut parameters = IntentParameters::default();
            parameters.depth = Some(cm);
            return Intent::new(Action::SetDimensions, DIMENSION_CONFIDENCE, parameters);
        }
    }

    Intent {
        action: Action::Unknown,
        confidence: 0.0,
        parameters: IntentParameters::default(),
        clarification: Some(UNKNOWN_CLARIFICATION.to_string()),
    }
}

fn count_intent(action: Action, lower: &str) -> Intent {
    let re = Regex::new(r"\d+").unwrap();
    let count = re
        .find(lower)
        .and_then(|m| m.as_str().parse::<i64>().ok())
        .unwrap_or(1);
    Intent::new(action, ADD_REMOVE_CONFIDENCE, IntentParameters::with_count(count))
}

/// First `<number> cm` or `<number> m` literal, normalized to centimeters.
fn extract_centimeters(lower: &str) -> Option<f64> {
    let re = Regex::new(r"(\d+(?:\.\d+)?)\s*(cm|m)").unwrap();
    let caps = re.captures(lower)?;
    let value: f64 = caps[1].parse().ok()?;
    match &caps[2] {
        "m" => Some(value * 100.0),
        _ => Some(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_door_with_implicit_count() {
        let intent = parse("add a door");
        assert_eq!(intent.action, Action::AddDoor);
        assert_eq!(intent.confidence, 0.85);
        assert_eq!(intent.parameters.count, Some(1));
    }

    #[test]
    fn add_door_with_explicit_count() {
        let intent = parse("please add 2 doors");
        assert_eq!(intent.action, Action::AddDoor);
        assert_eq!(intent.parameters.count, Some(2));
    }

    #[test]
    fn delete_counts_as_remove() {
        assert_eq!(parse("delete door").action, Action::RemoveDoor);
        assert_eq!(parse("delete 2 shelves").action, Action::RemoveShelf);
    }

    #[test]
    fn shelves_plural_is_recognized() {
        let intent = parse("add 3 shelves");
        assert_eq!(intent.action, Action::AddShelf);
        assert_eq!(intent.parameters.count, Some(3));
    }

    #[test]
    fn columns_add_and_remove() {
        assert_eq!(parse("add a column").action, Action::AddColumn);
        assert_eq!(parse("remove column").action, Action::RemoveColumn);
    }

    #[test]
    fn material_scan_matches_catalog_order() {
        let intent = parse("change material to oak");
        assert_eq!(intent.action, Action::ChangeMaterial);
        assert_eq!(intent.confidence, 0.9);
        assert_eq!(intent.parameters.material.as_deref(), Some("oak"));
    }

    #[test]
    fn wood_keyword_also_triggers_material() {
        let intent = parse("I want cherry wood");
        assert_eq!(intent.action, Action::ChangeMaterial);
        assert_eq!(intent.parameters.material.as_deref(), Some("cherry"));
    }

    #[test]
    fn unknown_material_falls_through_to_unknown() {
        let intent = parse("change material to plastic");
        assert_eq!(intent.action, Action::Unknown);
        assert_eq!(intent.confidence, 0.0);
    }

    #[test]
    fn width_in_centimeters() {
        let intent = parse("make it 200cm wide");
        assert_eq!(intent.action, Action::SetDimensions);
        assert_eq!(intent.confidence, 0.88);
        assert_eq!(intent.parameters.width, Some(200.0));
        assert_eq!(intent.parameters.height, None);
    }

    #[test]
    fn meters_normalize_to_centimeters() {
        let intent = parse("2.5m tall");
        assert_eq!(intent.action, Action::SetDimensions);
        assert_eq!(intent.parameters.height, Some(250.0));
    }

    #[test]
    fn depth_keyword_maps_to_depth() {
        let intent = parse("60cm deep please");
        assert_eq!(intent.parameters.depth, Some(60.0));
    }

    #[test]
    fn dimension_keyword_without_unit_is_unknown() {
        let intent = parse("make it wider");
        assert_eq!(intent.action, Action::Unknown);
    }

    #[test]
    fn gibberish_is_unknown_with_clarification() {
        let intent = parse("asdkjhasd");
        assert_eq!(intent.action, Action::Unknown);
        assert_eq!(intent.confidence, 0.0);
        assert!(intent.clarification.is_some());
    }

    #[test]
    fn parser_is_total_over_odd_inputs() {
        for input in ["", "   ", "çöğüş 🪑", "add", "door door door", "9999999"] {
            let intent = parse(input);
            assert!((0.0..=1.0).contains(&intent.confidence), "{:?}", input);
        }
    }
}
