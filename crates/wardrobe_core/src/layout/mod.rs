//! The parametric wardrobe model and its deterministic layout engine.

mod engine;

pub use engine::apply;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Schema version written into every persisted state blob. Blobs carrying
/// any other value are refused rather than coerced.
pub const STATE_VERSION: u32 = 1;

/// Default thickness for frame, doors and shelves, meters.
pub const DEFAULT_THICKNESS: f64 = 0.02;

/// Outer dimensions in meters. Inputs arrive in centimeters and are
/// converted by the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

/// The closed material catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Material {
    Oak,
    Walnut,
    Pine,
    Birch,
    Cherry,
}

impl Material {
    pub const ALL: [Material; 5] = [
        Material::Oak,
        Material::Walnut,
        Material::Pine,
        Material::Birch,
        Material::Cherry,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Material::Oak => "oak",
            Material::Walnut => "walnut",
            Material::Pine => "pine",
            Material::Birch => "birch",
            Material::Cherry => "cherry",
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Error)]
#[error("unknown material: {0}")]
pub struct ParseMaterialError(String);

impl FromStr for Material {
    type Err = ParseMaterialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Material::ALL
            .into_iter()
            .find(|m| m.as_str() == lower)
            .ok_or_else(|| ParseMaterialError(s.to_string()))
    }
}

/// A door panel. All doors in a state share one width; `x` is the left
/// edge along the front, meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Door {
    pub id: String,
    pub x: f64,
    pub width: f64,
}

/// A shelf, positioned by the height of its center, meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shelf {
    pub id: String,
    pub y: f64,
}

/// A vertical divider. Columns have no width of their own in the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub x: f64,
}

/// Failure to accept a stored/supplied state blob. Distinct from intent
/// validation: the core never guesses its way around a malformed state.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("state blob is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("unsupported state version {found} (expected {STATE_VERSION})")]
    VersionMismatch { found: u32 },
}

/// The wardrobe's full configuration. Owned by the caller and long-lived;
/// the engine never mutates one in place, it returns a new value.
///
/// Field names follow the persisted camelCase JSON shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutState {
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    #[serde(default)]
    pub doors: Vec<Door>,
    #[serde(default)]
    pub shelves: Vec<Shelf>,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<Material>,
    #[serde(default = "default_thickness")]
    pub frame_thickness: f64,
    #[serde(default = "default_thickness")]
    pub door_thickness: f64,
    #[serde(default = "default_thickness")]
    pub shelf_thickness: f64,
}

fn default_thickness() -> f64 {
    DEFAULT_THICKNESS
}

impl Default for LayoutState {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            dimensions: None,
            doors: Vec::new(),
            shelves: Vec::new(),
            columns: Vec::new(),
            material: None,
            frame_thickness: DEFAULT_THICKNESS,
            door_thickness: DEFAULT_THICKNESS,
            shelf_thickness: DEFAULT_THICKNESS,
        }
    }
}

impl LayoutState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a persisted blob, refusing anything that is not the current
    /// schema.
    pub fn from_json(json: &str) -> Result<Self, StateError> {
        let state: LayoutState = serde_json::from_str(json)?;
        if state.version != STATE_VERSION {
            return Err(StateError::VersionMismatch {
                found: state.version,
            });
        }
        Ok(state)
    }

    pub fn to_json(&self) -> Result<String, StateError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn material_parses_case_insensitively() {
        assert_eq!("Oak".parse::<Material>().unwrap(), Material::Oak);
        assert_eq!("WALNUT".parse::<Material>().unwrap(), Material::Walnut);
        assert!("plastic".parse::<Material>().is_err());
    }

    #[test]
    fn state_round_trips_through_json() {
        let mut state = LayoutState::new();
        state.dimensions = Some(Dimensions {
            width: 2.0,
            height: 2.4,
            depth: 0.6,
        });
        state.material = Some(Material::Cherry);
        state.doors.push(Door {
            id: "door-1".to_string(),
            x: 0.89,
            width: 0.02,
        });

        let json = state.to_json().unwrap();
        let back = LayoutState::from_json(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn persisted_fields_are_camel_case() {
        let json = LayoutState::new().to_json().unwrap();
        assert!(json.contains("\"frameThickness\""));
        assert!(json.contains("\"doorThickness\""));
        assert!(json.contains("\"shelfThickness\""));
    }

    #[test]
    fn missing_thickness_defaults_to_two_centimeters() {
        let state = LayoutState::from_json(r#"{"version":1}"#).unwrap();
        assert_eq!(state.frame_thickness, DEFAULT_THICKNESS);
        assert_eq!(state.door_thickness, DEFAULT_THICKNESS);
        assert_eq!(state.shelf_thickness, DEFAULT_THICKNESS);
        assert!(state.doors.is_empty());
    }

    #[test]
    fn wrong_version_is_refused() {
        let err = LayoutState::from_json(r#"{"version":7}"#).unwrap_err();
        assert!(matches!(err, StateError::VersionMismatch { found: 7 }));
    }

    #[test]
    fn missing_version_is_refused() {
        assert!(LayoutState::from_json(r#"{"doors":[]}"#).is_err());
    }
}
