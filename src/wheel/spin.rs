//! Spin lifecycle
//!
//! Idle --trigger--> Spinning --duration--> Settled --report--> Idle
//!
//! The controller never draws. It exposes the target rotation (and an eased
//! in-between value) for a renderer and reports the winning id through a
//! callback once the spin has run its full duration.

use serde::{Deserialize, Serialize};

use super::easing::SPIN_EASE;
use super::item::WeightedItem;
use super::segment::{AngleSegment, partition, segment_under_pointer};
use super::select::select;
use crate::clockwise_delta;
use crate::consts::*;
use crate::error::WheelError;
use crate::rng::RandomSource;

/// Current phase of the wheel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpinState {
    #[default]
    Idle,
    Spinning,
    /// Outcome decided and being reported; returns to Idle right after
    Settled,
}

/// Timing and geometry of a spin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpinSettings {
    /// Full turns before landing
    pub turns: u32,
    /// Angle of the physical pointer (degrees)
    pub pointer_angle: f64,
    /// Where the first segment starts (degrees)
    pub start_angle: f64,
    /// Trigger-to-report time
    pub duration_ms: f64,
    /// Length of the visible rotation
    pub transition_ms: f64,
}

impl Default for SpinSettings {
    fn default() -> Self {
        Self {
            turns: SPIN_TURNS,
            pointer_angle: POINTER_ANGLE,
            start_angle: WHEEL_START_ANGLE,
            duration_ms: SPIN_DURATION_MS,
            transition_ms: SPIN_TRANSITION_MS,
        }
    }
}

/// Result of a finished spin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpinOutcome {
    pub id: u32,
    /// Total clockwise rotation the wheel turned through
    pub rotation: f64,
}

/// Completion callback, receives the winning id
pub type SpinCallback = Box<dyn FnMut(u32)>;

/// Drives one wheel from trigger to reported outcome
pub struct SpinController {
    settings: SpinSettings,
    items: Vec<WeightedItem>,
    segments: Vec<AngleSegment>,
    state: SpinState,
    /// Target rotation of the current spin (0 when idle)
    rotation: f64,
    elapsed_ms: f64,
    selected: Option<u32>,
    last_outcome: Option<SpinOutcome>,
    spins_completed: u32,
    on_complete: Option<SpinCallback>,
}

impl std::fmt::Debug for SpinController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpinController")
            .field("state", &self.state)
            .field("rotation", &self.rotation)
            .field("elapsed_ms", &self.elapsed_ms)
            .field("selected", &self.selected)
            .field("segments", &self.segments.len())
            .finish()
    }
}

impl SpinController {
    /// Build a wheel; fails fast on an invalid prize table
    pub fn new(items: Vec<WeightedItem>, settings: SpinSettings) -> Result<Self, WheelError> {
        let segments = partition(&items, settings.start_angle)?;
        Ok(Self {
            settings,
            items,
            segments,
            state: SpinState::Idle,
            rotation: 0.0,
            elapsed_ms: 0.0,
            selected: None,
            last_outcome: None,
            spins_completed: 0,
            on_complete: None,
        })
    }

    /// Attach the completion callback
    pub fn with_on_complete(mut self, callback: impl FnMut(u32) + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    pub fn set_on_complete(&mut self, callback: impl FnMut(u32) + 'static) {
        self.on_complete = Some(Box::new(callback));
    }

    /// Replace the prize table. Rejected while a spin is running.
    pub fn set_items(&mut self, items: Vec<WeightedItem>) -> Result<(), WheelError> {
        if self.state != SpinState::Idle {
            return Err(WheelError::Busy);
        }
        self.segments = partition(&items, self.settings.start_angle)?;
        self.items = items;
        Ok(())
    }

    /// Start a spin. Returns `Ok(false)` without doing anything if a spin
    /// is already running.
    pub fn trigger<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Result<bool, WheelError> {
        if self.state != SpinState::Idle {
            log::debug!("Spin ignored, wheel already {:?}", self.state);
            return Ok(false);
        }

        let id = select(&self.items, rng)?;
        let Some(segment) = self.segments.iter().find(|s| s.id == id) else {
            log::warn!("Selected prize {} has no segment", id);
            return Ok(false);
        };

        self.rotation = self.settings.turns as f64 * FULL_TURN
            + clockwise_delta(segment.mid_angle, self.settings.pointer_angle);
        self.selected = Some(id);
        self.elapsed_ms = 0.0;
        self.state = SpinState::Spinning;

        log::info!(
            "Spin started: prize {} (mid {:.1}°), rotating {:.1}°",
            id,
            segment.mid_angle,
            self.rotation
        );
        Ok(true)
    }

    /// Advance the spin clock. Returns the outcome on the call that
    /// completes the spin, `None` otherwise.
    pub fn advance(&mut self, dt_ms: f64) -> Option<SpinOutcome> {
        if self.state != SpinState::Spinning {
            return None;
        }

        self.elapsed_ms += dt_ms.max(0.0);
        if self.elapsed_ms < self.settings.duration_ms {
            return None;
        }

        let id = self.selected?;
        self.state = SpinState::Settled;
        let outcome = SpinOutcome {
            id,
            rotation: self.rotation,
        };
        log::info!("Spin settled on prize {} after {:.0} ms", id, self.elapsed_ms);

        if let Some(callback) = self.on_complete.as_mut() {
            callback(id);
        }
        self.last_outcome = Some(outcome);
        self.spins_completed += 1;
        self.reset();

        Some(outcome)
    }

    fn reset(&mut self) {
        self.state = SpinState::Idle;
        self.rotation = 0.0;
        self.elapsed_ms = 0.0;
        self.selected = None;
    }

    pub fn state(&self) -> SpinState {
        self.state
    }

    pub fn is_spinning(&self) -> bool {
        self.state == SpinState::Spinning
    }

    /// Target rotation of the running spin (degrees, 0 when idle)
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Rotation a renderer should show right now
    pub fn animated_rotation(&self) -> f64 {
        if self.state != SpinState::Spinning {
            return 0.0;
        }
        let t = if self.settings.transition_ms > 0.0 {
            self.elapsed_ms / self.settings.transition_ms
        } else {
            1.0
        };
        self.rotation * SPIN_EASE.ease(t)
    }

    /// Linear progress toward the report, in [0, 1]
    pub fn progress(&self) -> f64 {
        match self.state {
            SpinState::Spinning => (self.elapsed_ms / self.settings.duration_ms).min(1.0),
            _ => 0.0,
        }
    }

    /// Prize chosen for the running spin
    pub fn selected(&self) -> Option<u32> {
        self.selected
    }

    pub fn last_outcome(&self) -> Option<SpinOutcome> {
        self.last_outcome
    }

    pub fn spins_completed(&self) -> u32 {
        self.spins_completed
    }

    pub fn segments(&self) -> &[AngleSegment] {
        &self.segments
    }

    pub fn items(&self) -> &[WeightedItem] {
        &self.items
    }

    pub fn settings(&self) -> &SpinSettings {
        &self.settings
    }

    /// Item by id (for showing the prize label)
    pub fn item(&self, id: u32) -> Option<&WeightedItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Prize under the pointer for a given wheel rotation
    pub fn prize_at_rotation(&self, rotation: f64) -> Option<u32> {
        segment_under_pointer(&self.segments, self.settings.pointer_angle, rotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{FixedRandom, SeededRandom};
    use crate::wheel::default_prizes;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn two_items() -> Vec<WeightedItem> {
        vec![WeightedItem::new(1, 3.0, "one"), WeightedItem::new(2, 7.0, "two")]
    }

    #[test]
    fn test_full_lifecycle_reports_once() {
        let reported = Rc::new(RefCell::new(Vec::new()));
        let sink = reported.clone();
        let mut wheel = SpinController::new(two_items(), SpinSettings::default())
            .unwrap()
            .with_on_complete(move |id| sink.borrow_mut().push(id));

        assert_eq!(wheel.state(), SpinState::Idle);
        assert!(wheel.trigger(&mut FixedRandom(0.2)).unwrap());
        assert_eq!(wheel.state(), SpinState::Spinning);
        assert_eq!(wheel.selected(), Some(1));
        assert!(wheel.last_outcome().is_none());

        assert!(wheel.advance(SPIN_DURATION_MS / 2.0).is_none());
        assert!((wheel.progress() - 0.5).abs() < 1e-9);

        // Step at ~60 fps well past the duration
        let mut outcomes = Vec::new();
        for _ in 0..600 {
            if let Some(outcome) = wheel.advance(16.0) {
                outcomes.push(outcome);
            }
        }

        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].id, 1);
        assert_eq!(*reported.borrow(), vec![1]);
        assert_eq!(wheel.state(), SpinState::Idle);
        assert_eq!(wheel.rotation(), 0.0);
        assert_eq!(wheel.spins_completed(), 1);
        assert_eq!(wheel.last_outcome(), Some(outcomes[0]));
        assert_eq!(wheel.progress(), 0.0);
    }

    #[test]
    fn test_completes_within_one_frame_of_duration() {
        let mut wheel = SpinController::new(two_items(), SpinSettings::default()).unwrap();
        wheel.trigger(&mut FixedRandom(0.5)).unwrap();

        let mut elapsed = 0.0;
        let frame = 16.0;
        let outcome = loop {
            elapsed += frame;
            if let Some(o) = wheel.advance(frame) {
                break o;
            }
            assert!(elapsed < 10_000.0, "spin never finished");
        };
        assert_eq!(outcome.id, 2);
        assert!(elapsed >= SPIN_DURATION_MS && elapsed < SPIN_DURATION_MS + frame);
    }

    #[test]
    fn test_retrigger_while_spinning_is_ignored() {
        let mut wheel = SpinController::new(two_items(), SpinSettings::default()).unwrap();
        assert!(wheel.trigger(&mut FixedRandom(0.2)).unwrap());
        let rotation = wheel.rotation();

        assert!(!wheel.trigger(&mut FixedRandom(0.9)).unwrap());
        assert_eq!(wheel.selected(), Some(1));
        assert_eq!(wheel.rotation(), rotation);
    }

    #[test]
    fn test_rotation_lands_selection_under_pointer() {
        let settings = SpinSettings::default();
        let mut wheel = SpinController::new(default_prizes(), settings).unwrap();
        let mut rng = SeededRandom::new(7);

        for _ in 0..50 {
            wheel.trigger(&mut rng).unwrap();
            let id = wheel.selected().unwrap();
            let rotation = wheel.rotation();

            assert!(rotation >= settings.turns as f64 * 360.0);
            assert!(rotation < (settings.turns + 1) as f64 * 360.0);
            assert_eq!(wheel.prize_at_rotation(rotation), Some(id));

            wheel.advance(settings.duration_ms);
        }
        assert_eq!(wheel.spins_completed(), 50);
    }

    #[test]
    fn test_rotation_formula() {
        // id 1 spans 270..18, mid 324; pointer 270 -> offset (270 - 324) mod 360 = 306
        let mut wheel = SpinController::new(two_items(), SpinSettings::default()).unwrap();
        wheel.trigger(&mut FixedRandom(0.2)).unwrap();
        assert!((wheel.rotation() - (1800.0 + 306.0)).abs() < 1e-9);
    }

    #[test]
    fn test_animated_rotation_reaches_target_at_transition_end() {
        let mut wheel = SpinController::new(two_items(), SpinSettings::default()).unwrap();
        wheel.trigger(&mut FixedRandom(0.5)).unwrap();
        assert_eq!(wheel.animated_rotation(), 0.0);

        wheel.advance(2500.0);
        let mid = wheel.animated_rotation();
        assert!(mid > 0.0 && mid < wheel.rotation());

        wheel.advance(2500.0);
        assert!((wheel.animated_rotation() - wheel.rotation()).abs() < 1e-9);
        assert!(wheel.is_spinning());
    }

    #[test]
    fn test_invalid_table_fails_fast() {
        assert_eq!(
            SpinController::new(Vec::new(), SpinSettings::default()).unwrap_err(),
            WheelError::EmptyItems
        );
    }

    #[test]
    fn test_set_items_rejected_while_spinning() {
        let mut wheel = SpinController::new(two_items(), SpinSettings::default()).unwrap();
        wheel.trigger(&mut FixedRandom(0.2)).unwrap();
        assert_eq!(wheel.set_items(default_prizes()).unwrap_err(), WheelError::Busy);

        wheel.advance(SPIN_DURATION_MS);
        wheel.set_items(default_prizes()).unwrap();
        assert_eq!(wheel.segments().len(), 8);
    }
}
