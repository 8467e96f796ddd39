//! Intent validation against domain rules.
//!
//! Pure and independent of how the intent was produced. Error display
//! strings are part of the contract: clients and tests match on them.

use thiserror::Error;

use crate::intent::{Action, Intent, MIN_ACTIONABLE_CONFIDENCE};
use crate::layout::Material;

/// Allowed dimension ranges, in centimeters.
pub const WIDTH_RANGE_CM: (f64, f64) = (100.0, 400.0);
pub const HEIGHT_RANGE_CM: (f64, f64) = (150.0, 300.0);
pub const DEPTH_RANGE_CM: (f64, f64) = (40.0, 80.0);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Confidence too low")]
    ConfidenceTooLow,

    #[error("Count must be at least 1")]
    CountTooSmall,

    #[error("Material name required")]
    MaterialMissing,

    #[error("Material must be one of: oak, walnut, pine, birch, cherry")]
    UnknownMaterial,

    #[error("At least one dimension required")]
    DimensionMissing,

    #[error("Width must be 100-400cm")]
    WidthOutOfRange,

    #[error("Height must be 150-300cm")]
    HeightOutOfRange,

    #[error("Depth must be 40-80cm")]
    DepthOutOfRange,

    #[error("Unknown action")]
    UnknownAction,
}

/// Check an intent's parameters against the domain rules. The confidence
/// floor is checked before any action-specific rule.
pub fn validate(intent: &Intent) -> Result<(), ValidationError> {
    if intent.confidence < MIN_ACTIONABLE_CONFIDENCE {
        return Err(ValidationError::ConfidenceTooLow);
    }

    match intent.action {
        Action::AddDoor
        | Action::RemoveDoor
        | Action::AddShelf
        | Action::RemoveShelf
        | Action::AddColumn
        | Action::RemoveColumn => {
            if matches!(intent.parameters.count, Some(count) if count < 1) {
                return Err(ValidationError::CountTooSmall);
            }
            Ok(())
        }

        Action::ChangeMaterial => {
            let Some(material) = intent.parameters.material.as_deref() else {
                return Err(ValidationError::MaterialMissing);
            };
            if material.parse::<Material>().is_err() {
                return Err(ValidationError::UnknownMaterial);
            }
            Ok(())
        }

        Action::SetDimensions | Action::ModifyGrid => {
            let p = &intent.parameters;
            if p.width.is_none() && p.height.is_none() && p.depth.is_none() {
                return Err(ValidationError::DimensionMissing);
            }
            if matches!(p.width, Some(w) if !(WIDTH_RANGE_CM.0..=WIDTH_RANGE_CM.1).contains(&w)) {
                return Err(ValidationError::WidthOutOfRange);
            }
            if matches!(p.height, Some(h) if !(HEIGHT_RANGE_CM.0..=HEIGHT_RANGE_CM.1).contains(&h))
            {
                return Err(ValidationError::HeightOutOfRange);
            }
            if matches!(p.depth, Some(d) if !(DEPTH_RANGE_CM.0..=DEPTH_RANGE_CM.1).contains(&d)) {
                return Err(ValidationError::DepthOutOfRange);
            }
            Ok(())
        }

        Action::Unknown => Err(ValidationError::UnknownAction),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::IntentParameters;

    fn intent(action: Action, confidence: f64) -> Intent {
        Intent::new(action, confidence, IntentParameters::default())
    }

    #[test]
    fn confidence_floor_beats_action_rules() {
        // Even an unknown action reports low confidence first.
        let low = intent(Action::Unknown, 0.3);
        assert_eq!(validate(&low), Err(ValidationError::ConfidenceTooLow));
    }

    #[test]
    fn count_rules() {
        let mut i = intent(Action::AddDoor, 0.85);
        assert_eq!(validate(&i), Ok(()));
        i.parameters.count = Some(0);
        assert_eq!(validate(&i), Err(ValidationError::CountTooSmall));
        i.parameters.count = Some(-2);
        assert_eq!(validate(&i), Err(ValidationError::CountTooSmall));
        i.parameters.count = Some(3);
        assert_eq!(validate(&i), Ok(()));
    }

    #[test]
    fn material_must_be_in_catalog() {
        let mut i = intent(Action::ChangeMaterial, 0.9);
        assert_eq!(validate(&i), Err(ValidationError::MaterialMissing));

        i.parameters.material = Some("plastic".to_string());
        let err = validate(&i).unwrap_err();
        assert_eq!(err, ValidationError::UnknownMaterial);
        assert!(err.to_string().contains("Material must be one of"));

        i.parameters.material = Some("BIRCH".to_string());
        assert_eq!(validate(&i), Ok(()));
    }

    #[test]
    fn dimension_rules_check_centimeter_ranges() {
        let mut i = intent(Action::SetDimensions, 0.88);
        assert_eq!(validate(&i), Err(ValidationError::DimensionMissing));

        i.parameters.width = Some(500.0);
        let err = validate(&i).unwrap_err();
        assert_eq!(err, ValidationError::WidthOutOfRange);
        assert_eq!(err.to_string(), "Width must be 100-400cm");

        i.parameters.width = Some(200.0);
        assert_eq!(validate(&i), Ok(()));

        i.parameters.height = Some(100.0);
        assert_eq!(validate(&i), Err(ValidationError::HeightOutOfRange));
        i.parameters.height = Some(240.0);
        i.parameters.depth = Some(90.0);
        assert_eq!(validate(&i), Err(ValidationError::DepthOutOfRange));
    }

    #[test]
    fn modify_grid_shares_dimension_rules() {
        let mut i = intent(Action::ModifyGrid, 0.88);
        i.parameters.depth = Some(60.0);
        assert_eq!(validate(&i), Ok(()));
    }

    #[test]
    fn unknown_action_is_always_invalid() {
        assert_eq!(
            validate(&intent(Action::Unknown, 0.95)),
            Err(ValidationError::UnknownAction)
        );
    }

    #[test]
    fn validation_is_idempotent() {
        let mut i = intent(Action::SetDimensions, 0.88);
        i.parameters.width = Some(500.0);
        assert_eq!(validate(&i), validate(&i));
    }
}
