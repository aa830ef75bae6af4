//! Data-driven physics and scoring balance
//!
//! Defaults reproduce the shipped game feel. Any subset can be overridden
//! from JSON; missing fields keep their default.

use serde::{Deserialize, Serialize};

/// Physics and scoring knobs read by the simulator and scoring engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Emission ===
    /// Particles emitted per tick in wave-like mode
    pub wave_emission_rate: u32,
    /// Particles emitted per tick in classical mode
    pub classical_emission_rate: u32,
    /// Base horizontal launch speed (px/tick)
    pub particle_speed: f32,
    /// Extra random horizontal speed in wave-like mode, U[0, jitter)
    pub wave_speed_jitter: f32,
    /// Full width of the vertical spawn offset in wave-like mode
    pub wave_spawn_spread: f32,
    /// Full width of the initial vertical velocity in wave-like mode
    pub wave_velocity_spread: f32,
    /// Ticks a particle lives before expiring
    pub particle_max_life: u32,

    // === Fields ===
    pub attractor_radius: f32,
    pub attraction_strength: f32,
    pub repulsor_radius: f32,
    pub repulsion_strength: f32,
    /// Multiplier on distance in `strength / (dist * decay + 1)`
    pub force_decay: f32,
    /// Solid body radius of a repulsor (bounces particles)
    pub repulsor_body_radius: f32,
    /// Outward push applied after a bounce so particles don't stick
    pub bounce_nudge: f32,

    // === Slit ===
    pub slit_width: f32,
    pub slit_height: f32,
    /// Height of each gap
    pub slit_gap_size: f32,
    /// Vertical offset of each gap center from the slit center
    pub slit_gap_offset: f32,
    /// Horizontal band around the slit centerline where diffraction kicks in
    pub diffraction_band: f32,
    /// Full width of the random vertical velocity kick on diffraction
    pub diffraction_strength: f32,

    // === Scoring ===
    /// Delay between fire and evaluation for a freshly touched scene (ms)
    pub observation_window_ms: f64,
    /// Distance from target within which a particle counts as a hit
    pub hit_radius: f32,
    /// Fewer live particles than this scores zero
    pub min_sample: usize,
    /// Points per accuracy percent, before the level multiplier
    pub points_per_percent: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            wave_emission_rate: 15,
            classical_emission_rate: 5,
            particle_speed: 5.0,
            wave_speed_jitter: 0.5,
            wave_spawn_spread: 20.0,
            wave_velocity_spread: 0.5,
            particle_max_life: 600,

            attractor_radius: 250.0,
            attraction_strength: 0.25,
            repulsor_radius: 150.0,
            repulsion_strength: 0.35,
            force_decay: 0.05,
            repulsor_body_radius: 40.0,
            bounce_nudge: 2.0,

            slit_width: 20.0,
            slit_height: 160.0,
            slit_gap_size: 25.0,
            slit_gap_offset: 30.0,
            diffraction_band: 5.0,
            diffraction_strength: 1.5,

            observation_window_ms: 8000.0,
            hit_radius: 50.0,
            min_sample: 5,
            points_per_percent: 10,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning override
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Inverse-distance falloff shared by both field tools
    #[inline]
    pub fn field_force(&self, strength: f32, dist: f32) -> f32 {
        strength / (dist * self.force_decay + 1.0)
    }
}
