//! Deterministic simulation module
//!
//! All physics and scoring logic lives here. This module must be pure:
//! - Caller-driven ticks and clock readings only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod field;
pub mod scoring;
pub mod snap;
pub mod state;
pub mod tick;

pub use field::{ToolEffect, apply_tool, reflect_velocity};
pub use scoring::{PendingEvaluation, ScoringEngine, evaluate};
pub use snap::{SnapGuides, resolve_position};
pub use state::{GamePhase, Particle, PhysicsMode, PlacedTool, RngState, ToolKind};
pub use tick::{Simulator, TickInput};
