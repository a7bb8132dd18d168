//! Collectible rewards floating over the playfield

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Reward types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardKind {
    #[default]
    Score,
    Health,
    Weapon,
    PowerUp,
}

/// Spawn template for a reward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    pub kind: RewardKind,
    pub value: u32,
    /// Effect length for power-ups (0 otherwise)
    pub duration_ms: f64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            kind: RewardKind::Score,
            value: 20,
            duration_ms: 0.0,
        }
    }
}

/// What collecting a reward yielded
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collected {
    pub kind: RewardKind,
    pub value: u32,
    pub duration_ms: f64,
}

/// Bob height in pixels
const FLOAT_AMPLITUDE: f32 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    pub id: u32,
    pub kind: RewardKind,
    pub value: u32,
    pub duration_ms: f64,
    pub pos: Vec2,
    /// Resting height the bob oscillates around
    pub base_y: f32,
    pub collected: bool,
}

impl Reward {
    pub fn new(id: u32, config: &RewardConfig, pos: Vec2) -> Self {
        Self {
            id,
            kind: config.kind,
            value: config.value,
            duration_ms: config.duration_ms,
            pos,
            base_y: pos.y,
            collected: false,
        }
    }

    /// Take the reward. Only the first call yields anything.
    pub fn collect(&mut self) -> Collected {
        if self.collected {
            return Collected {
                kind: self.kind,
                value: 0,
                duration_ms: 0.0,
            };
        }
        self.collected = true;
        Collected {
            kind: self.kind,
            value: self.value,
            duration_ms: self.duration_ms,
        }
    }

    /// Gentle vertical bob
    pub fn update(&mut self, time_secs: f64) {
        if self.collected {
            return;
        }
        self.pos.y = self.base_y + (time_secs * 2.0).sin() as f32 * FLOAT_AMPLITUDE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_once() {
        let mut r = Reward::new(1, &RewardConfig::default(), Vec2::new(10.0, 50.0));
        assert_eq!(r.collect().value, 20);
        assert_eq!(r.collect().value, 0);
        assert!(r.collected);
    }

    #[test]
    fn test_bob_stays_near_base() {
        let mut r = Reward::new(1, &RewardConfig::default(), Vec2::new(10.0, 50.0));
        for i in 0..100 {
            r.update(i as f64 * 0.05);
            assert!((r.pos.y - 50.0).abs() <= FLOAT_AMPLITUDE + 1e-4);
        }
        r.collect();
        let y = r.pos.y;
        r.update(123.0);
        assert_eq!(r.pos.y, y);
    }
}
