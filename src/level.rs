//! Static level table, ordered by id

use glam::Vec2;

use crate::consts::{CANVAS_HEIGHT, DEFAULT_TARGET_X};

/// An immutable level definition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelConfig {
    pub id: u32,
    /// Target x; `None` means the default far-right position
    pub target_x: Option<f32>,
    pub target_y: f32,
    pub title: &'static str,
    pub description: &'static str,
}

impl LevelConfig {
    pub fn target(&self) -> Vec2 {
        Vec2::new(self.target_x.unwrap_or(DEFAULT_TARGET_X), self.target_y)
    }
}

pub const LEVELS: &[LevelConfig] = &[
    LevelConfig {
        id: 1,
        target_x: None,
        target_y: CANVAS_HEIGHT / 2.0,
        title: "Level 1: Alignment",
        description: "The target is in line with the cannon. Calibrate your aim.",
    },
    LevelConfig {
        id: 2,
        target_x: None,
        target_y: 100.0,
        title: "Level 2: Elevation",
        description: "The target sits near the top. Use attractors or repulsors to bend the path.",
    },
    LevelConfig {
        id: 3,
        target_x: Some(200.0),
        target_y: CANVAS_HEIGHT - 100.0,
        title: "Level 3: Hook",
        description: "The target is behind you on the left! Use repulsors to bounce the wave back.",
    },
];

/// Look up a level, falling back to the first one for unknown ids
pub fn level(id: u32) -> &'static LevelConfig {
    LEVELS.iter().find(|l| l.id == id).unwrap_or(&LEVELS[0])
}

/// Whether `id` is the highest level
pub fn is_final(id: u32) -> bool {
    LEVELS.last().is_none_or(|l| l.id <= id)
}

pub fn next_level(id: u32) -> Option<&'static LevelConfig> {
    LEVELS.iter().find(|l| l.id > id)
}
