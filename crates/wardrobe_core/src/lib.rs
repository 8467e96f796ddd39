//! Wardrobe Core - the NLP intent pipeline for the wardrobe configurator.
//!
//! Free-text commands ("add a door", "make it 200cm wide") are parsed into
//! structured, confidence-scored intents, validated against domain rules,
//! and applied to a parametric layout by a deterministic engine that keeps
//! doors, shelves and columns evenly spaced.
//!
//! The crate is pure with respect to shared state: every pipeline run takes
//! an immutable snapshot of the layout and returns a new one. Persistence
//! and transport are collaborator concerns; the sole entry point for them
//! is [`pipeline::run`].

pub mod intent;
pub mod layout;
pub mod parser;
pub mod pipeline;
pub mod validate;

pub use intent::{
    Action, Intent, IntentParameters, CLARIFICATION_THRESHOLD, MIN_ACTIONABLE_CONFIDENCE,
};
pub use layout::{
    Column, Dimensions, Door, LayoutState, Material, Shelf, StateError, STATE_VERSION,
};
pub use parser::{BackendError, IntentParser, TextGenerationBackend};
pub use pipeline::{run, Outcome};
pub use validate::{validate, ValidationError};
