//! Mini Arcade - prize wheel and zombie defense mini-games
//!
//! Core modules:
//! - `wheel`: Weighted prize selection, wheel layout and spin lifecycle
//! - `defense`: Zombie defense entities, points economy, quiz and session
//! - `rng`: Injectable random sources (system, seeded, scripted)
//! - `schedule`: Deferred actions advanced by elapsed time
//! - `settings`: Data-driven configuration for both games
//!
//! Nothing here draws. Renderers read plain data (ids, angles, positions,
//! snapshots) and send commands back.

pub mod defense;
pub mod error;
pub mod rng;
pub mod schedule;
pub mod settings;
pub mod wheel;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::{ConfigError, WheelError};
pub use rng::{RandomSource, SeededRandom, SystemRandom};
pub use settings::{DefenseSettings, Settings, WheelSettings};

/// Game configuration constants
pub mod consts {
    /// Degrees in a full turn
    pub const FULL_TURN: f64 = 360.0;

    /// Wheel layout starts at the top of the circle (canvas angles grow clockwise)
    pub const WHEEL_START_ANGLE: f64 = 270.0;
    /// Where the physical pointer sits
    pub const POINTER_ANGLE: f64 = 270.0;
    /// Full turns added to every spin
    pub const SPIN_TURNS: u32 = 5;
    /// Time from trigger to outcome report
    pub const SPIN_DURATION_MS: f64 = 7000.0;
    /// Length of the visible rotation transition
    pub const SPIN_TRANSITION_MS: f64 = 5000.0;

    /// Nominal frame length the defense tick delta is expressed in (60 Hz)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Defense playfield defaults
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 300.0;
    /// Monsters re-enter from here after crossing the right edge
    pub const WRAP_X: f32 = -50.0;

    /// Attack economy
    pub const STARTING_POINTS: u32 = 10;
    pub const REFILL_POINTS: u32 = 100;
    pub const ATTACK_COST: u32 = 10;
    pub const ATTACK_DAMAGE: u32 = 10;
    pub const ATTACK_THROTTLE_MS: f64 = 300.0;

    /// Population control
    pub const MAX_ZOMBIES: usize = 3;
    pub const MIN_ZOMBIES: usize = 1;
    pub const ZOMBIE_SPAWN_CHANCE: f64 = 0.2;

    /// Quiz rewards (attack points)
    pub const MEMORIZE_REWARD: u32 = 2;
    pub const CHOICE_REWARD: u32 = 5;
    pub const SPELLING_REWARD: u32 = 10;
    pub const QUIZ_ADVANCE_MS: f64 = 1500.0;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f64) -> f64 {
    let a = angle.rem_euclid(consts::FULL_TURN);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if a >= consts::FULL_TURN { 0.0 } else { a }
}

/// Clockwise angular distance from `from` to `to`, in [0, 360)
#[inline]
pub fn clockwise_delta(from: f64, to: f64) -> f64 {
    normalize_degrees(to - from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(630.0), 270.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(-1e-18), 0.0);
    }

    #[test]
    fn test_clockwise_delta() {
        assert_eq!(clockwise_delta(270.0, 90.0), 180.0);
        assert_eq!(clockwise_delta(350.0, 10.0), 20.0);
        assert_eq!(clockwise_delta(10.0, 350.0), 340.0);
    }
}
