//! Per-tick particle simulation
//!
//! Advanced once per display frame by the caller. Each tick:
//! spawn at the cannon, integrate, apply every tool (except the one being
//! dragged), then cull expired, out-of-bounds and blocked particles.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::field::{ToolEffect, apply_tool};
use super::state::{Particle, PhysicsMode, PlacedTool, RngState};
use crate::consts::{CANNON_X, CANNON_Y};
use crate::in_canvas;
use crate::tuning::Tuning;

/// Per-tick inputs borrowed from the controller
#[derive(Debug, Clone, Copy)]
pub struct TickInput<'a> {
    /// Tool snapshot for this tick
    pub tools: &'a [PlacedTool],
    /// Tool frozen while the player drags it
    pub dragging: Option<u32>,
}

/// Owns the live particle set
#[derive(Debug, Clone)]
pub struct Simulator {
    mode: PhysicsMode,
    tuning: Tuning,
    rng_state: RngState,
    rng: Pcg32,
    particles: Vec<Particle>,
    /// Ticks since the particle set was last recreated
    time_ticks: u64,
}

impl Simulator {
    pub fn new(seed: u64, mode: PhysicsMode, tuning: Tuning) -> Self {
        let rng_state = RngState::new(seed);
        let rng = rng_state.to_rng();
        Self {
            mode,
            tuning,
            rng_state,
            rng,
            particles: Vec::new(),
            time_ticks: 0,
        }
    }

    pub fn mode(&self) -> PhysicsMode {
        self.mode
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Discard every particle and switch rules. Called on mode or level change.
    pub fn reset(&mut self, mode: PhysicsMode) {
        self.mode = mode;
        self.particles.clear();
        self.time_ticks = 0;
        self.rng = self.rng_state.next_stream();
    }

    /// Advance the simulation by one tick
    pub fn tick(&mut self, input: &TickInput<'_>) {
        self.time_ticks += 1;
        self.spawn();

        let Self {
            mode,
            tuning,
            rng,
            particles,
            ..
        } = self;

        particles.retain_mut(|p| {
            p.integrate();

            let mut blocked = false;
            for tool in input.tools {
                if Some(tool.id) == input.dragging {
                    continue;
                }
                if apply_tool(tool, p, *mode, tuning, rng) == ToolEffect::Blocked {
                    blocked = true;
                }
            }

            !blocked && !p.expired() && in_canvas(p.pos)
        });
    }

    fn spawn(&mut self) {
        let t = &self.tuning;
        let (count, wave) = match self.mode {
            PhysicsMode::Wave => (t.wave_emission_rate, true),
            PhysicsMode::Classical => (t.classical_emission_rate, false),
        };

        for _ in 0..count {
            let rng = &mut self.rng;
            let particle = if wave {
                Particle {
                    pos: Vec2::new(CANNON_X, CANNON_Y + centered(rng, t.wave_spawn_spread)),
                    vel: Vec2::new(
                        t.particle_speed + rng.random::<f32>() * t.wave_speed_jitter,
                        centered(rng, t.wave_velocity_spread),
                    ),
                    age: 0,
                    max_life: t.particle_max_life,
                    hue: 180.0 + rng.random::<f32>() * 40.0,
                }
            } else {
                Particle {
                    pos: Vec2::new(CANNON_X, CANNON_Y),
                    vel: Vec2::new(t.particle_speed, 0.0),
                    age: 0,
                    max_life: t.particle_max_life,
                    hue: 35.0 + rng.random::<f32>() * 10.0,
                }
            };
            self.particles.push(particle);
        }
    }
}

/// Uniform sample in [-width/2, width/2)
#[inline]
fn centered(rng: &mut Pcg32, width: f32) -> f32 {
    (rng.random::<f32>() - 0.5) * width
}
