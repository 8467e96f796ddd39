//! JSON file persistence for layout states.
//!
//! Thin wrapper over the core's versioned JSON shape: a blob that is not
//! the current schema is refused here, never patched up.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use wardrobe_core::LayoutState;

pub fn load(path: &Path) -> Result<LayoutState> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading state file {}", path.display()))?;
    let state = LayoutState::from_json(&raw)
        .with_context(|| format!("state file {} is not a supported layout", path.display()))?;
    Ok(state)
}

/// Writes via a sibling temp file and a rename, so an interrupted save
/// leaves the previous state intact.
pub fn save(path: &Path, state: &LayoutState) -> Result<()> {
    let json = state.to_json()?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).with_context(|| format!("writing state file {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("replacing state file {}", path.display()))?;
    Ok(())
}
