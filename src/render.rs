//! Render collaborator interface
//!
//! The renderer receives one of these per frame and owns no simulation state.

use glam::Vec2;

use crate::sim::{GamePhase, Particle, PhysicsMode, PlacedTool, SnapGuides};

/// Read-only view of everything needed to draw a frame
#[derive(Debug, Clone, Copy)]
pub struct RenderSnapshot<'a> {
    pub particles: &'a [Particle],
    pub tools: &'a [PlacedTool],
    pub phase: GamePhase,
    pub mode: PhysicsMode,
    pub target: Vec2,
    /// Radius of the scoring zone around `target`
    pub hit_radius: f32,
    /// Alignment lines for the active drag
    pub guides: SnapGuides,
    pub selected: Option<u32>,
    pub dragging: Option<u32>,
}

impl RenderSnapshot<'_> {
    /// Particles currently inside the scoring zone (drawn with a link to the target)
    pub fn hits(&self) -> impl Iterator<Item = &Particle> + '_ {
        let (target, radius) = (self.target, self.hit_radius);
        self.particles
            .iter()
            .filter(move |p| p.pos.distance(target) <= radius)
    }

    /// Particle opacity fades with age
    pub fn particle_alpha(particle: &Particle) -> f32 {
        if particle.max_life == 0 {
            return 0.0;
        }
        (1.0 - particle.age as f32 / particle.max_life as f32).clamp(0.0, 1.0)
    }
}
