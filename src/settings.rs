//! Game settings
//!
//! Both games are data-driven. Every field has a default, so a config file
//! only needs to name what it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::defense::director::DirectorConfig;
use crate::defense::manager::BoundaryConfig;
use crate::defense::quiz::{QuizRewards, VocabularyEntry, default_vocabulary};
use crate::defense::reward::RewardConfig;
use crate::error::ConfigError;
use crate::wheel::item::{WeightedItem, default_prizes, validated_by_id};
use crate::wheel::spin::SpinSettings;

/// Prize wheel settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelSettings {
    pub prizes: Vec<WeightedItem>,
    pub turns: u32,
    pub pointer_angle: f64,
    pub start_angle: f64,
    pub duration_ms: f64,
    pub transition_ms: f64,
}

impl Default for WheelSettings {
    fn default() -> Self {
        let spin = SpinSettings::default();
        Self {
            prizes: default_prizes(),
            turns: spin.turns,
            pointer_angle: spin.pointer_angle,
            start_angle: spin.start_angle,
            duration_ms: spin.duration_ms,
            transition_ms: spin.transition_ms,
        }
    }
}

impl WheelSettings {
    pub fn spin_settings(&self) -> SpinSettings {
        SpinSettings {
            turns: self.turns,
            pointer_angle: self.pointer_angle,
            start_angle: self.start_angle,
            duration_ms: self.duration_ms,
            transition_ms: self.transition_ms,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        validated_by_id(&self.prizes)?;
        if !(self.duration_ms.is_finite() && self.duration_ms > 0.0) {
            return Err(ConfigError::InvalidValue("wheel.duration_ms must be positive"));
        }
        if !(self.transition_ms.is_finite() && self.transition_ms >= 0.0) {
            return Err(ConfigError::InvalidValue("wheel.transition_ms must not be negative"));
        }
        if self.transition_ms > self.duration_ms {
            return Err(ConfigError::InvalidValue(
                "wheel.transition_ms must not exceed duration_ms",
            ));
        }
        if self.turns == 0 {
            return Err(ConfigError::InvalidValue("wheel.turns must be at least 1"));
        }
        if !(self.pointer_angle.is_finite() && self.start_angle.is_finite()) {
            return Err(ConfigError::InvalidValue("wheel angles must be finite"));
        }
        Ok(())
    }
}

/// Zombie defense settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefenseSettings {
    pub screen_width: f32,
    pub screen_height: f32,
    pub starting_points: u32,
    pub refill_points: u32,
    pub attack_cost: u32,
    pub attack_damage: u32,
    /// Minimum gap between two attacks on the same monster
    pub attack_throttle_ms: f64,
    pub initial_zombies: usize,
    pub director: DirectorConfig,
    pub quiz_rewards: QuizRewards,
    /// Pause between an answered question and the next one
    pub quiz_advance_ms: f64,
    pub vocabulary: Vec<VocabularyEntry>,
    /// Seconds between reward drops; 0 disables them
    pub reward_interval_secs: f64,
    pub reward: RewardConfig,
}

impl Default for DefenseSettings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            starting_points: STARTING_POINTS,
            refill_points: REFILL_POINTS,
            attack_cost: ATTACK_COST,
            attack_damage: ATTACK_DAMAGE,
            attack_throttle_ms: ATTACK_THROTTLE_MS,
            initial_zombies: 1,
            director: DirectorConfig::default(),
            quiz_rewards: QuizRewards::default(),
            quiz_advance_ms: QUIZ_ADVANCE_MS,
            vocabulary: default_vocabulary(),
            reward_interval_secs: 10.0,
            reward: RewardConfig::default(),
        }
    }
}

impl DefenseSettings {
    pub fn boundary(&self) -> BoundaryConfig {
        BoundaryConfig {
            boundary_x: self.screen_width,
            wrap_x: Some(WRAP_X),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.screen_width > 0.0 && self.screen_height > 0.0) {
            return Err(ConfigError::InvalidValue("defense screen size must be positive"));
        }
        let d = &self.director;
        if d.min_population > d.max_population {
            return Err(ConfigError::InvalidValue(
                "director.min_population must not exceed max_population",
            ));
        }
        if !(0.0..=1.0).contains(&d.spawn_chance) {
            return Err(ConfigError::InvalidValue("director.spawn_chance must be in [0, 1]"));
        }
        if d.respawn_delay_min_ms < 0.0 || d.respawn_delay_spread_ms < 0.0 || d.refill_delay_ms < 0.0 {
            return Err(ConfigError::InvalidValue("director delays must not be negative"));
        }
        if d.template.hp == 0 {
            return Err(ConfigError::InvalidValue("director.template.hp must be positive"));
        }
        if !(d.template.speed.is_finite() && d.template.speed >= 0.0) {
            return Err(ConfigError::InvalidValue(
                "director.template.speed must be finite and not negative",
            ));
        }
        if self.initial_zombies > d.max_population {
            return Err(ConfigError::InvalidValue(
                "initial_zombies must not exceed director.max_population",
            ));
        }
        if self.quiz_advance_ms < 0.0 || self.attack_throttle_ms < 0.0 || self.reward_interval_secs < 0.0 {
            return Err(ConfigError::InvalidValue("defense timings must not be negative"));
        }
        if self
            .vocabulary
            .iter()
            .any(|e| e.word.trim().is_empty() || !e.options.contains(&e.meaning))
        {
            return Err(ConfigError::InvalidValue(
                "every vocabulary entry needs a word and its meaning among the options",
            ));
        }
        Ok(())
    }
}

/// All settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub wheel: WheelSettings,
    pub defense: DefenseSettings,
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("Using default settings: {}", err);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.wheel.validate()?;
        self.defense.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WheelError;

    #[test]
    fn test_defaults_are_valid() {
        Settings::default().validate().unwrap();
    }

    #[test]
    fn test_empty_json_gives_defaults() {
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_override() {
        let json = r##"{
            "wheel": {
                "turns": 3,
                "prizes": [
                    { "id": 2, "weight": 1.5, "label": "Mug" },
                    { "id": 1, "weight": 0.5, "label": "Pen", "color": "#fff" }
                ]
            },
            "defense": { "starting_points": 40, "director": { "max_population": 5 } }
        }"##;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.wheel.turns, 3);
        assert_eq!(settings.wheel.prizes.len(), 2);
        assert_eq!(settings.wheel.duration_ms, SPIN_DURATION_MS);
        assert_eq!(settings.defense.starting_points, 40);
        assert_eq!(settings.defense.director.max_population, 5);
        assert_eq!(settings.defense.director.min_population, MIN_ZOMBIES);
    }

    #[test]
    fn test_rejects_bad_prize_table() {
        let err = Settings::from_json(r#"{ "wheel": { "prizes": [] } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Wheel(WheelError::EmptyItems)));

        let err = Settings::from_json(
            r#"{ "wheel": { "prizes": [ { "id": 1, "weight": 0, "label": "x" } ] } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Wheel(WheelError::InvalidWeight { id: 1, .. })));
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let err = Settings::from_json(r#"{ "defense": { "director": { "spawn_chance": 1.5 } } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));

        let err = Settings::from_json(r#"{ "wheel": { "duration_ms": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }

    #[test]
    fn test_rejects_unplayable_templates_and_zero_turns() {
        let err = Settings::from_json(r#"{ "defense": { "director": { "template": { "hp": 0 } } } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));

        let mut settings = Settings::default();
        settings.defense.director.template.speed = f32::NAN;
        assert!(matches!(settings.validate(), Err(ConfigError::InvalidValue(_))));
        settings.defense.director.template.speed = f32::INFINITY;
        assert!(matches!(settings.validate(), Err(ConfigError::InvalidValue(_))));

        let err = Settings::from_json(r#"{ "wheel": { "turns": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));

        // Other template fields still merge over defaults
        let settings =
            Settings::from_json(r#"{ "defense": { "director": { "template": { "hp": 30 } } } }"#).unwrap();
        assert_eq!(settings.defense.director.template.hp, 30);
        assert_eq!(settings.defense.director.template.damage, 10);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Settings::from_json("{ nope").unwrap_err(),
            ConfigError::Parse(_)
        ));
    }

    #[test]
    fn test_json_roundtrip_preserves_settings() {
        let mut settings = Settings::default();
        settings.defense.attack_cost = 7;
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Settings::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert_eq!(
            Settings::load_or_default("/definitely/not/here.json"),
            Settings::default()
        );
    }
}
