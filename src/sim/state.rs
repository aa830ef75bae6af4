//! Core simulation types
//!
//! Particles are private to the simulator; tools are owned by the game
//! controller and lent to the simulator for the duration of a tick.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Simulation running, tools editable
    #[default]
    Planning,
    /// Simulation running, tools frozen, evaluation pending
    Fired,
    /// Simulation paused on the evaluated snapshot
    Result,
}

impl GamePhase {
    /// Whether the simulator advances in this phase
    pub fn is_simulating(&self) -> bool {
        matches!(self, GamePhase::Planning | GamePhase::Fired)
    }
}

/// Which set of physical rules the particles follow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PhysicsMode {
    /// Broad spawn jitter, diffraction through slits
    #[default]
    Wave,
    /// Straight-line spawn, no diffraction
    Classical,
}

impl PhysicsMode {
    pub fn toggled(self) -> Self {
        match self {
            PhysicsMode::Wave => PhysicsMode::Classical,
            PhysicsMode::Classical => PhysicsMode::Wave,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PhysicsMode::Wave => "Wave",
            PhysicsMode::Classical => "Classical",
        }
    }
}

/// Placeable tool variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolKind {
    Attractor,
    Repulsor,
    /// Wall with two gaps
    Slit,
}

impl ToolKind {
    /// Parse a tool name coming from the input layer. Unknown names yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "attractor" => Some(ToolKind::Attractor),
            "repulsor" => Some(ToolKind::Repulsor),
            "slit" | "divider" => Some(ToolKind::Slit),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolKind::Attractor => "Attractor",
            ToolKind::Repulsor => "Repulsor",
            ToolKind::Slit => "Slit",
        }
    }
}

/// A tool placed on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacedTool {
    pub id: u32,
    pub kind: ToolKind,
    pub pos: Vec2,
}

impl PlacedTool {
    pub fn new(id: u32, kind: ToolKind, pos: Vec2) -> Self {
        Self { id, kind, pos }
    }

    /// Whether a pointer at `point` grabs this tool
    pub fn hit_test(&self, point: Vec2) -> bool {
        use crate::consts::*;

        let d = self.pos - point;
        match self.kind {
            ToolKind::Slit => d.x.abs() < SLIT_PICK_HALF_WIDTH && d.y.abs() < SLIT_PICK_HALF_HEIGHT,
            ToolKind::Attractor | ToolKind::Repulsor => d.length() < TOOL_PICK_RADIUS,
        }
    }
}

/// A simulated particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks lived so far
    pub age: u32,
    pub max_life: u32,
    /// Render hue in degrees; no physical meaning
    pub hue: f32,
}

impl Particle {
    /// Advance one tick of free flight
    #[inline]
    pub fn integrate(&mut self) {
        self.pos += self.vel;
        self.age += 1;
    }

    #[inline]
    pub fn expired(&self) -> bool {
        self.age > self.max_life
    }
}

/// Seed plus stream counter; each recreated particle set gets a fresh stream
#[derive(Debug, Clone)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed.wrapping_add(self.stream))
    }

    /// Derive a fresh stream (used whenever the particle set is recreated)
    pub fn next_stream(&mut self) -> Pcg32 {
        self.stream += 1;
        self.to_rng()
    }
}
