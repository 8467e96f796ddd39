//! Command parsing - model-backed when a backend is wired in, with a
//! deterministic keyword fallback that is always available.
//!
//! [`IntentParser::parse`] never fails. Backend trouble of any kind
//! (transport error, non-JSON reply, timeout) is logged and silently
//! resolved by the fallback parser, so callers always receive a
//! well-formed [`Intent`].

pub mod backend;
pub mod fallback;

pub use backend::{BackendError, TextGenerationBackend};

use anyhow::{anyhow, Result};
use tracing::{debug, warn};

use crate::intent::{Intent, CLARIFICATION_THRESHOLD};

/// Fixed instruction set sent to the model: recognized actions, required
/// parameters, and worked examples. The model is told to answer with one
/// JSON object in the [`Intent`] shape.
pub const SYSTEM_PROMPT: &str = r#"You are an AI assistant for a wardrobe configurator. Parse user commands into structured actions.

Available actions:
- add_door: Add doors to the wardrobe (optional count parameter, defaults to 1)
- remove_door: Remove doors from the wardrobe (optional count parameter, defaults to 1)
- change_material: Change wardrobe material (requires material name)
- modify_grid: Change wardrobe dimensions (requires width, height, or depth)
- add_shelf: Add shelves to the wardrobe (optional count parameter, defaults to 1)
- remove_shelf: Remove shelves from the wardrobe (optional count parameter, defaults to 1)
- add_column: Add columns to the wardrobe (optional count parameter, defaults to 1)
- remove_column: Remove columns from the wardrobe (optional count parameter, defaults to 1)
- set_dimensions: Set specific dimensions (requires width/height/depth in cm)

Materials available: oak, walnut, pine, birch, cherry

Respond ONLY with valid JSON in this exact format:
{
  "action": "action_name",
  "confidence": 0.0-1.0,
  "parameters": {},
  "clarification": "optional message if confidence < 0.7"
}

Examples:
- "add a door" -> {"action": "add_door", "confidence": 0.95, "parameters": {"count": 1}}
- "add 2 doors" -> {"action": "add_door", "confidence": 0.95, "parameters": {"count": 2}}
- "remove door" -> {"action": "remove_door", "confidence": 0.95, "parameters": {"count": 1}}
- "delete door" -> {"action": "remove_door", "confidence": 0.95, "parameters": {"count": 1}}
- "change material to oak" -> {"action": "change_material", "confidence": 0.98, "parameters": {"material": "oak"}}
- "make it 200cm wide" -> {"action": "set_dimensions", "confidence": 0.92, "parameters": {"width": 200}}
- "add a shelf" -> {"action": "add_shelf", "confidence": 0.95, "parameters": {"count": 1}}
- "add 3 shelves" -> {"action": "add_shelf", "confidence": 0.95, "parameters": {"count": 3}}
- "add a column" -> {"action": "add_column", "confidence": 0.95, "parameters": {"count": 1}}
- "remove column" -> {"action": "remove_column", "confidence": 0.95, "parameters": {"count": 1}}

If unclear, set confidence < 0.7 and provide clarification."#;

const LOW_CONFIDENCE_CLARIFICATION: &str =
    "I'm not confident I understood that correctly. Could you rephrase?";

/// Turns raw command text into an [`Intent`], via the model when one is
/// configured and via keywords otherwise.
pub struct IntentParser {
    backend: Option<Box<dyn TextGenerationBackend>>,
}

impl IntentParser {
    /// Keyword-only parser; what you get when no model is configured.
    pub fn deterministic() -> Self {
        Self { backend: None }
    }

    pub fn with_backend(backend: Box<dyn TextGenerationBackend>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// Parse a command. Never fails; see the module docs for the fallback
    /// contract.
    pub fn parse(&self, command: &str) -> Intent {
        let Some(backend) = &self.backend else {
            return fallback::parse(command);
        };

        match parse_with_backend(backend.as_ref(), command) {
            Ok(intent) => intent,
            Err(err) => {
                warn!("model parse failed, using fallback parser: {}", err);
                fallback::parse(command)
            }
        }
    }
}

fn parse_with_backend(backend: &dyn TextGenerationBackend, command: &str) -> Result<Intent> {
    let reply = backend.complete(SYSTEM_PROMPT, command)?;
    debug!("model reply ({} bytes)", reply.len());

    let json =
        extract_json(&reply).ok_or_else(|| anyhow!("no JSON object in model reply"))?;
    let mut intent: Intent = serde_json::from_str(&json)?;

    intent.confidence = intent.confidence.clamp(0.0, 1.0);
    if intent.confidence < CLARIFICATION_THRESHOLD && intent.clarification.is_none() {
        intent.clarification = Some(LOW_CONFIDENCE_CLARIFICATION.to_string());
    }

    Ok(intent)
}

/// Pull one JSON object out of a model reply, tolerating markdown fences
/// and surrounding prose.
fn extract_json(reply: &str) -> Option<String> {
    let t = reply.trim();
    if t.starts_with('{') && t.ends_with('}') {
        return Some(t.to_string());
    }
    if let Some(start) = t.find("```json") {
        let body = &t[start + 7..];
        if let Some(end) = body.find("```") {
            return Some(body[..end].trim().to_string());
        }
    }
    if let (Some(start), Some(end)) = (t.find('{'), t.rfind('}')) {
        if start < end {
            return Some(t[start..=end].to_string());
        }
    }
    None
}
