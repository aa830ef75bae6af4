//! Quantum Shot - bend a particle stream onto a target
//!
//! Core modules:
//! - `sim`: Deterministic simulation (snap resolver, force fields, particles, scoring)
//! - `game`: Phase progression and the input surface that mutates tools
//! - `level`: Static level table
//! - `tuning`: Data-driven physics balance
//! - `highscores`: Local leaderboard
//! - `persistence`: Record store abstraction
//! - `platform`: Browser/native platform abstraction
//! - `render`: Read-only snapshot handed to the renderer

pub mod game;
pub mod highscores;
pub mod level;
pub mod persistence;
pub mod platform;
pub mod render;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::{Game, GameEvent, GameState};
pub use highscores::{Leaderboard, LeaderboardEntry};
pub use level::{LEVELS, LevelConfig};
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Canvas dimensions (pixels)
    pub const CANVAS_WIDTH: f32 = 1000.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Grid pitch used for snapping
    pub const GRID_SIZE: f32 = 50.0;
    /// Snap distance (exclusive)
    pub const SNAP_THRESHOLD: f32 = 15.0;

    /// Cannon muzzle, on the horizontal centerline
    pub const CANNON_X: f32 = 50.0;
    pub const CANNON_Y: f32 = CANVAS_HEIGHT / 2.0;

    /// Target x when a level doesn't specify one
    pub const DEFAULT_TARGET_X: f32 = CANVAS_WIDTH - 150.0;

    /// Pick radius for round tools (attractor/repulsor)
    pub const TOOL_PICK_RADIUS: f32 = 45.0;
    /// Pick box half-extents for slits
    pub const SLIT_PICK_HALF_WIDTH: f32 = 25.0;
    pub const SLIT_PICK_HALF_HEIGHT: f32 = 90.0;

    /// Minimum accuracy (%) required to advance to the next level
    pub const ADVANCE_MIN_ACCURACY: u8 = 10;
}

/// Horizontal centerline of the canvas (the cannon's firing axis)
#[inline]
pub fn centerline() -> f32 {
    consts::CANVAS_HEIGHT / 2.0
}

/// Whether a point lies within the canvas bounds (edges inclusive)
#[inline]
pub fn in_canvas(pos: Vec2) -> bool {
    pos.x <= consts::CANVAS_WIDTH && pos.y >= 0.0 && pos.y <= consts::CANVAS_HEIGHT
}
