//! Placement snapping
//!
//! Each axis is resolved independently. Priority per axis:
//! 1. Alignment with another tool's coordinate
//! 2. Nearest grid line
//! 3. Canvas centerline (vertical axis only)
//!
//! A candidate applies when the raw coordinate is strictly closer than
//! `SNAP_THRESHOLD`. With no candidate the raw coordinate is kept as is.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::PlacedTool;
use crate::centerline;
use crate::consts::{GRID_SIZE, SNAP_THRESHOLD};

/// Alignment lines active for the current drag (for rendering)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapGuides {
    /// Vertical guide at this x
    pub x: Option<f32>,
    /// Horizontal guide at this y
    pub y: Option<f32>,
}

impl SnapGuides {
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none()
    }
}

/// Resolve a raw pointer position into a placement position.
///
/// `exclude` is the id of the tool being moved, so it never snaps to itself.
pub fn resolve_position(
    raw: Vec2,
    exclude: Option<u32>,
    tools: &[PlacedTool],
) -> (Vec2, SnapGuides) {
    let others = || tools.iter().filter(move |t| Some(t.id) != exclude);

    let x = nearest_tool_coord(raw.x, others().map(|t| t.pos.x)).or_else(|| grid_snap(raw.x));

    let y = snap_vertical(raw.y, others().map(|t| t.pos.y), centerline());

    let guides = SnapGuides { x, y };
    (Vec2::new(x.unwrap_or(raw.x), y.unwrap_or(raw.y)), guides)
}

/// Tool alignment, then grid, then the horizontal centerline at `center`.
///
/// With the shipped canvas the centerline is itself a grid line, so the last
/// step only matters for canvas heights that are not a multiple of the grid.
fn snap_vertical(raw: f32, tool_ys: impl Iterator<Item = f32>, center: f32) -> Option<f32> {
    nearest_tool_coord(raw, tool_ys)
        .or_else(|| grid_snap(raw))
        .or_else(|| within(raw, center))
}

#[inline]
fn within(raw: f32, candidate: f32) -> Option<f32> {
    ((raw - candidate).abs() < SNAP_THRESHOLD).then_some(candidate)
}

fn grid_snap(raw: f32) -> Option<f32> {
    within(raw, (raw / GRID_SIZE).round() * GRID_SIZE)
}

/// Closest in-threshold coordinate among other tools
fn nearest_tool_coord(raw: f32, coords: impl Iterator<Item = f32>) -> Option<f32> {
    coords
        .filter_map(|c| within(raw, c))
        .min_by(|a, b| {
            (raw - a)
                .abs()
                .partial_cmp(&(raw - b).abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}
