//! Monster entities

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Monster types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonsterKind {
    #[default]
    Zombie,
    Skeleton,
    Boss,
}

/// Spawn template for a monster
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonsterConfig {
    pub kind: MonsterKind,
    pub hp: u32,
    /// Horizontal speed in pixels per frame
    pub speed: f32,
    /// Points drained from the player when it crosses the boundary
    pub damage: u32,
    /// Score awarded for the kill
    pub score_value: u64,
}

impl Default for MonsterConfig {
    fn default() -> Self {
        Self::zombie(1.0)
    }
}

impl MonsterConfig {
    pub fn zombie(speed: f32) -> Self {
        Self {
            kind: MonsterKind::Zombie,
            hp: 10,
            speed,
            damage: 10,
            score_value: 50,
        }
    }
}

/// A monster owned by the entity manager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: MonsterKind,
    pub hp: u32,
    pub max_hp: u32,
    pub pos: Vec2,
    pub speed: f32,
    pub damage: u32,
    pub score_value: u64,
    /// False once killed; dead entities stay until removed
    pub active: bool,
    /// Set when the boundary callback fired for the current crossing
    pub crossed: bool,
}

impl Entity {
    pub fn new(id: u32, config: &MonsterConfig, pos: Vec2) -> Self {
        Self {
            id,
            kind: config.kind,
            hp: config.hp,
            max_hp: config.hp,
            pos,
            speed: config.speed,
            damage: config.damage,
            score_value: config.score_value,
            active: config.hp > 0,
            crossed: false,
        }
    }

    /// Remaining health as a fraction (for health bars)
    pub fn health_fraction(&self) -> f32 {
        if self.max_hp == 0 {
            0.0
        } else {
            self.hp as f32 / self.max_hp as f32
        }
    }

    /// Subtract health, saturating at zero. Returns true if this hit killed it.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        if !self.active {
            return false;
        }
        self.hp = self.hp.saturating_sub(amount);
        if self.hp == 0 {
            self.active = false;
            return true;
        }
        false
    }
}
