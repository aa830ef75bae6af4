//! Tool force fields and solid-body responses
//!
//! One function per tool variant. Attraction and repulsion are field effects
//! and behave the same in both physics modes; only slit diffraction depends
//! on the mode.

use glam::Vec2;
use rand::Rng;

use super::state::{Particle, PhysicsMode, PlacedTool, ToolKind};
use crate::tuning::Tuning;

/// What a tool did to a particle this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolEffect {
    /// Particle survives (possibly deflected)
    Pass,
    /// Particle hit a wall and must be removed
    Blocked,
}

/// Apply one tool's influence to a particle in place
pub fn apply_tool<R: Rng>(
    tool: &PlacedTool,
    particle: &mut Particle,
    mode: PhysicsMode,
    tuning: &Tuning,
    rng: &mut R,
) -> ToolEffect {
    match tool.kind {
        ToolKind::Attractor => {
            attract(tool.pos, particle, tuning);
            ToolEffect::Pass
        }
        ToolKind::Repulsor => {
            repel(tool.pos, particle, tuning);
            ToolEffect::Pass
        }
        ToolKind::Slit => slit(tool.pos, particle, mode, tuning, rng),
    }
}

/// Unit vector from particle to tool, and the distance.
/// `None` when the particle sits exactly on the tool center (no direction).
fn toward(center: Vec2, particle: &Particle) -> Option<(Vec2, f32)> {
    let delta = center - particle.pos;
    let dist = delta.length();
    (dist > f32::EPSILON).then(|| (delta / dist, dist))
}

fn attract(center: Vec2, particle: &mut Particle, tuning: &Tuning) {
    let Some((dir, dist)) = toward(center, particle) else {
        return;
    };
    if dist < tuning.attractor_radius {
        particle.vel += dir * tuning.field_force(tuning.attraction_strength, dist);
    }
}

fn repel(center: Vec2, particle: &mut Particle, tuning: &Tuning) {
    let Some((dir, dist)) = toward(center, particle) else {
        return;
    };
    if dist < tuning.repulsor_radius {
        particle.vel -= dir * tuning.field_force(tuning.repulsion_strength, dist);
    }
    // Solid body: mirror velocity across the contact normal and push out
    if dist < tuning.repulsor_body_radius {
        particle.vel = reflect_velocity(particle.vel, dir);
        particle.pos -= dir * tuning.bounce_nudge;
    }
}

fn slit<R: Rng>(
    center: Vec2,
    particle: &mut Particle,
    mode: PhysicsMode,
    tuning: &Tuning,
    rng: &mut R,
) -> ToolEffect {
    let d = particle.pos - center;
    let inside = d.x.abs() < tuning.slit_width / 2.0 && d.y.abs() < tuning.slit_height / 2.0;
    if !inside {
        return ToolEffect::Pass;
    }

    let half_gap = tuning.slit_gap_size / 2.0;
    let in_gap = (d.y + tuning.slit_gap_offset).abs() < half_gap
        || (d.y - tuning.slit_gap_offset).abs() < half_gap;
    if !in_gap {
        return ToolEffect::Blocked;
    }

    if mode == PhysicsMode::Wave && d.x.abs() < tuning.diffraction_band {
        particle.vel.y += (rng.random::<f32>() - 0.5) * tuning.diffraction_strength;
    }
    ToolEffect::Pass
}

/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}
