//! Spawn director
//!
//! Keeps the zombie population between a floor and a ceiling. A kill may
//! schedule a replacement after a random delay; dropping below the floor
//! always schedules one quickly.

use serde::{Deserialize, Serialize};

use super::entity::MonsterConfig;
use crate::consts::*;
use crate::rng::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectorConfig {
    pub min_population: usize,
    pub max_population: usize,
    /// Chance that a kill earns a bonus replacement
    pub spawn_chance: f64,
    /// Bonus replacement delay is uniform in [min, min + spread)
    pub respawn_delay_min_ms: f64,
    pub respawn_delay_spread_ms: f64,
    /// Delay before refilling an empty field
    pub refill_delay_ms: f64,
    pub template: MonsterConfig,
}

impl Default for DirectorConfig {
    fn default() -> Self {
        Self {
            min_population: MIN_ZOMBIES,
            max_population: MAX_ZOMBIES,
            spawn_chance: ZOMBIE_SPAWN_CHANCE,
            respawn_delay_min_ms: 1000.0,
            respawn_delay_spread_ms: 2000.0,
            refill_delay_ms: 500.0,
            template: MonsterConfig::default(),
        }
    }
}

/// Where and how fast a new zombie starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPlan {
    pub x: f32,
    pub y: f32,
    pub config: MonsterConfig,
}

#[derive(Debug, Clone)]
pub struct SpawnDirector {
    config: DirectorConfig,
}

impl SpawnDirector {
    pub fn new(config: DirectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DirectorConfig {
        &self.config
    }

    /// Whether another monster fits on the field
    pub fn has_room(&self, population: usize) -> bool {
        population < self.config.max_population
    }

    /// Delays (ms) of the spawns to schedule after a kill left
    /// `population` monsters alive
    pub fn on_kill<R: RandomSource + ?Sized>(&self, population: usize, rng: &mut R) -> Vec<f64> {
        let mut delays = Vec::new();

        if population + 1 < self.config.max_population && rng.chance(self.config.spawn_chance) {
            delays.push(rng.range(
                self.config.respawn_delay_min_ms,
                self.config.respawn_delay_min_ms + self.config.respawn_delay_spread_ms,
            ));
        }

        if population < self.config.min_population {
            delays.push(self.config.refill_delay_ms);
        }

        delays
    }

    /// Spawns needed right now to reach the floor (used at start and refill)
    pub fn shortfall(&self, population: usize) -> usize {
        self.config.min_population.saturating_sub(population)
    }

    /// Randomized start just off the left edge, in the lower half of the field
    pub fn plan_spawn<R: RandomSource + ?Sized>(&self, screen_height: f32, rng: &mut R) -> SpawnPlan {
        let x = WRAP_X - rng.range(0.0, 100.0) as f32;
        let y = rng.range(0.5, 0.8) as f32 * screen_height;
        let speed = self.config.template.speed * rng.range(1.0, 1.3) as f32;
        SpawnPlan {
            x,
            y,
            config: MonsterConfig {
                speed,
                ..self.config.template
            },
        }
    }

    /// Re-entry x after a monster walked off the right edge
    pub fn reentry_x<R: RandomSource + ?Sized>(&self, rng: &mut R) -> f32 {
        WRAP_X - rng.range(0.0, 100.0) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{FixedRandom, ScriptedRandom};

    #[test]
    fn test_empty_field_always_refills() {
        let director = SpawnDirector::new(DirectorConfig::default());
        // Chance roll fails (0.9 >= 0.2), floor refill still happens
        let delays = director.on_kill(0, &mut FixedRandom(0.9));
        assert_eq!(delays, vec![500.0]);
    }

    #[test]
    fn test_lucky_roll_adds_delayed_spawn() {
        let director = SpawnDirector::new(DirectorConfig::default());
        // roll 0.1 < 0.2 passes, delay = 1000 + 0.5 * 2000
        let delays = director.on_kill(1, &mut ScriptedRandom::new(vec![0.1, 0.5]));
        assert_eq!(delays, vec![2000.0]);
    }

    #[test]
    fn test_no_bonus_near_ceiling() {
        let director = SpawnDirector::new(DirectorConfig::default());
        // population 2 with max 3: 2 < 2 is false
        assert!(director.on_kill(2, &mut FixedRandom(0.0)).is_empty());
    }

    #[test]
    fn test_plan_spawn_ranges() {
        let director = SpawnDirector::new(DirectorConfig::default());
        let plan = director.plan_spawn(300.0, &mut FixedRandom(0.5));
        assert_eq!(plan.x, -100.0);
        assert!((plan.y - 195.0).abs() < 1e-3);
        assert!((plan.config.speed - 1.15).abs() < 1e-6);
        assert_eq!(plan.config.hp, 10);
    }

    #[test]
    fn test_shortfall_and_room() {
        let director = SpawnDirector::new(DirectorConfig::default());
        assert_eq!(director.shortfall(0), 1);
        assert_eq!(director.shortfall(2), 0);
        assert!(director.has_room(2));
        assert!(!director.has_room(3));
    }
}
