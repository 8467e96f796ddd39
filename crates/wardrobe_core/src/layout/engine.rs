//! Deterministic re-layout of doors, shelves and columns.
//!
//! [`apply`] takes a validated intent and an existing state and returns the
//! post-command state. Adds and removes of doors and columns re-flow every
//! element of the row so spacing stays even; shelves keep their positions
//! on remove and only the newest are dropped. These asymmetries are
//! long-standing product behavior, not accidents - see DESIGN.md before
//! unifying anything here.

use uuid::Uuid;

use super::{Column, Dimensions, Door, LayoutState, Material, Shelf};
use crate::intent::{Action, Intent};

/// Minimum gap between doors or columns, meters.
const MIN_SPACING_X: f64 = 0.10;

/// Minimum clearance between a shelf and the frame or its neighbors, meters.
const MIN_SPACING_Y: f64 = 0.04;

/// Horizontal layout falls back to this width when no dimensions are set.
const FALLBACK_WIDTH: f64 = 1.8;

/// Shelf layout falls back to this height when no dimensions are set.
const FALLBACK_HEIGHT: f64 = 2.2;

/// First `set_dimensions` on a dimensionless state starts from here.
const SEED_DIMENSIONS: Dimensions = Dimensions {
    width: 2.0,
    height: 2.4,
    depth: 0.6,
};

/// Apply a validated intent, returning the new state. The input is never
/// mutated. An unknown action is a no-op copy; the validator gates it out
/// before we get here.
pub fn apply(state: &LayoutState, intent: &Intent) -> LayoutState {
    let mut next = state.clone();
    let count = intent.parameters.count.unwrap_or(1).max(0) as usize;

    match intent.action {
        Action::AddDoor => add_doors(&mut next, count),
        Action::RemoveDoor => remove_doors(&mut next, count),
        Action::AddShelf => add_shelves(&mut next, count),
        Action::RemoveShelf => pop_shelves(&mut next, count),
        Action::AddColumn => add_columns(&mut next, count),
        Action::RemoveColumn => remove_columns(&mut next, count),
        Action::ChangeMaterial => change_material(&mut next, intent),
        Action::SetDimensions | Action::ModifyGrid => set_dimensions(&mut next, intent),
        Action::Unknown => {}
    }

    next
}

fn element_id(kind: &str) -> String {
    format!("{}-{}", kind, Uuid::new_v4())
}

fn add_doors(state: &mut LayoutState, count: usize) {
    // All doors share the width of the first one; a first-ever door starts
    // at the panel thickness.
    let door_width = state
        .doors
        .first()
        .map(|d| d.width)
        .unwrap_or(state.door_thickness);
    for _ in 0..count {
        state.doors.push(Door {
            id: element_id("door"),
            x: 0.0,
            width: door_width,
        });
    }
    reflow_doors(state);
}

fn remove_doors(state: &mut LayoutState, count: usize) {
    for _ in 0..count {
        if state.doors.pop().is_none() {
            break;
        }
    }
    if !state.doors.is_empty() {
        reflow_doors(state);
    }
}

/// Doors span `[doorThickness, width - doorThickness]`. With `n` doors of
/// uniform width `w` over span `W`, each sits at
/// `x0 + gap*(i+1) + w*i` where `gap = max(0.10, (W - n*w) / (n+1))`.
/// Every door is repositioned, new and pre-existing alike.
fn reflow_doors(state: &mut LayoutState) {
    let width = state.dimensions.map(|d| d.width).unwrap_or(FALLBACK_WIDTH);
    let x0 = state.door_thickness;
    let x1 = width - state.door_thickness;
    let span = x1 - x0;

    let n = state.doors.len() as f64;
    let door_width = state
        .doors
        .first()
        .map(|d| d.width)
        .unwrap_or(state.door_thickness);
    let gap = f64::max(MIN_SPACING_X, (span - n * door_width) / (n + 1.0));

    for (i, door) in state.doors.iter_mut().enumerate() {
        door.x = x0 + gap * (i as f64 + 1.0) + door_width * i as f64;
        door.width = door_width;
    }
}

/// Shelves are appended into evenly divided slots computed from the final
/// total; existing shelves keep their `y`.
fn add_shelves(state: &mut LayoutState, count: usize) {
    let height = state
        .dimensions
        .map(|d| d.height)
        .unwrap_or(FALLBACK_HEIGHT);
    let existing = state.shelves.len();
    let total = existing + count;

    let half = state.shelf_thickness / 2.0;
    let start = state.frame_thickness + half + MIN_SPACING_Y;
    let end = height - state.frame_thickness - half - MIN_SPACING_Y;
    let step = (end - start) / (total as f64 + 1.0);

    for i in 0..count {
        let index = existing + i;
        state.shelves.push(Shelf {
            id: element_id("shelf"),
            y: start + step * (index as f64 + 1.0),
        });
    }
}

/// Removal drops the newest shelves; survivors are not re-flowed.
fn pop_shelves(state: &mut LayoutState, count: usize) {
    for _ in 0..count {
        if state.shelves.pop().is_none() {
            break;
        }
    }
}

fn add_columns(state: &mut LayoutState, count: usize) {
    for _ in 0..count {
        state.columns.push(Column {
            id: element_id("column"),
            x: 0.0,
        });
    }
    reflow_columns(state);
}

fn remove_columns(state: &mut LayoutState, count: usize) {
    for _ in 0..count {
        if state.columns.pop().is_none() {
            break;
        }
    }
    if !state.columns.is_empty() {
        reflow_columns(state);
    }
}

/// Columns carry no width; what is evenly distributed is the section
/// between them: `sectionWidth = (available - (n+1)*0.10) / n`, and column
/// `i` sits at `frameThickness + 0.10*(i+1) + sectionWidth*i`. Close to
/// the door formula but not the same thing.
fn reflow_columns(state: &mut LayoutState) {
    if state.columns.is_empty() {
        return;
    }
    let width = state.dimensions.map(|d| d.width).unwrap_or(FALLBACK_WIDTH);
    let available = width - 2.0 * state.frame_thickness;
    let n = state.columns.len() as f64;
    let section = (available - MIN_SPACING_X * (n + 1.0)) / n;

    for (i, column) in state.columns.iter_mut().enumerate() {
        column.x = state.frame_thickness + MIN_SPACING_X * (i as f64 + 1.0) + section * i as f64;
    }
}

fn change_material(state: &mut LayoutState, intent: &Intent) {
    // The validator constrained the name to the catalog; anything else is
    // left untouched.
    if let Some(material) = intent
        .parameters
        .material
        .as_deref()
        .and_then(|m| m.parse::<Material>().ok())
    {
        state.material = Some(material);
    }
}

/// Overwrites whichever dimensions are present, converting cm to m.
/// Existing doors/shelves/columns keep their positions even though the
/// bounds changed; re-flow only happens on add/remove.
fn set_dimensions(state: &mut LayoutState, intent: &Intent) {
    let dims = state.dimensions.get_or_insert(SEED_DIMENSIONS);
    if let Some(width) = intent.parameters.width {
        dims.width = width / 100.0;
    }
    if let Some(height) = intent.parameters.height {
        dims.height = height / 100.0;
    }
    if let Some(depth) = intent.parameters.depth {
        dims.depth = depth / 100.0;
    }
}
