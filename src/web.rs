//! Browser bindings
//!
//! Thin wasm-bindgen wrappers around the two games. The page drives them
//! from `requestAnimationFrame`, passes clicks in, and reads state back as
//! JSON.

use std::cell::Cell;

use js_sys::Function;
use wasm_bindgen::prelude::*;

use crate::consts::FRAME_MS;
use crate::defense::{DefenseObserver, DefenseSession};
use crate::rng::{RandomSource, SeededRandom, SystemRandom};
use crate::settings::Settings;
use crate::wheel::SpinController;

thread_local! {
    static INITIALIZED: Cell<bool> = const { Cell::new(false) };
}

#[wasm_bindgen(start)]
pub fn init() {
    if INITIALIZED.with(|flag| flag.replace(true)) {
        return;
    }
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        return;
    }
    log::info!("Mini arcade ready");
}

fn random_source(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(SystemRandom),
    }
}

fn parse_settings(json: Option<String>) -> Result<Settings, JsError> {
    match json {
        Some(json) => Settings::from_json(&json).map_err(|e| JsError::new(&e.to_string())),
        None => Ok(Settings::default()),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsError> {
    serde_json::to_string(value).map_err(|e| JsError::new(&e.to_string()))
}

fn call(callback: &Function, args: &[JsValue]) {
    let result = match args {
        [] => callback.call0(&JsValue::NULL),
        [a] => callback.call1(&JsValue::NULL, a),
        [a, b, ..] => callback.call2(&JsValue::NULL, a, b),
    };
    if let Err(err) = result {
        log::warn!("Callback threw: {:?}", err);
    }
}

/// Prize wheel handle
#[wasm_bindgen]
pub struct WheelHandle {
    controller: SpinController,
    rng: Box<dyn RandomSource>,
}

#[wasm_bindgen]
impl WheelHandle {
    /// `settings_json` may be omitted for the default prize table
    #[wasm_bindgen(constructor)]
    pub fn new(settings_json: Option<String>, seed: Option<u64>) -> Result<WheelHandle, JsError> {
        let settings = parse_settings(settings_json)?;
        let controller = SpinController::new(settings.wheel.prizes.clone(), settings.wheel.spin_settings())
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(Self {
            controller,
            rng: random_source(seed),
        })
    }

    /// Called once per settled spin with the prize id
    #[wasm_bindgen(js_name = onSpinComplete)]
    pub fn on_spin_complete(&mut self, callback: Function) {
        self.controller
            .set_on_complete(move |id| call(&callback, &[JsValue::from(id)]));
    }

    /// Start a spin; false if one is already running
    pub fn spin(&mut self) -> Result<bool, JsError> {
        self.controller
            .trigger(&mut self.rng)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Advance by `dt_ms`; returns the prize id on the settling frame
    pub fn advance(&mut self, dt_ms: f64) -> Option<u32> {
        self.controller.advance(dt_ms).map(|o| o.id)
    }

    /// Rotation to apply to the wheel graphic right now, in degrees
    #[wasm_bindgen(js_name = animatedRotation)]
    pub fn animated_rotation(&self) -> f64 {
        self.controller.animated_rotation()
    }

    /// Linear progress of the running spin toward its report, 0..1
    pub fn progress(&self) -> f64 {
        self.controller.progress()
    }

    /// Prize id of the most recent settled spin
    #[wasm_bindgen(js_name = lastPrize)]
    pub fn last_prize(&self) -> Option<u32> {
        self.controller.last_outcome().map(|o| o.id)
    }

    #[wasm_bindgen(js_name = isSpinning)]
    pub fn is_spinning(&self) -> bool {
        self.controller.is_spinning()
    }

    /// Segment layout as JSON
    pub fn segments(&self) -> Result<String, JsError> {
        to_json(&self.controller.segments())
    }

    /// Prize table as JSON
    pub fn prizes(&self) -> Result<String, JsError> {
        to_json(&self.controller.items())
    }
}

/// Forwards defense events to optional JS callbacks
#[derive(Default)]
struct JsObserver {
    score: Option<Function>,
    killed: Option<Function>,
    crossed: Option<Function>,
}

impl DefenseObserver for JsObserver {
    fn on_score_change(&mut self, score: u64) {
        if let Some(f) = &self.score {
            call(f, &[JsValue::from(score as f64)]);
        }
    }

    fn on_entity_killed(&mut self, id: u32) {
        if let Some(f) = &self.killed {
            call(f, &[JsValue::from(id)]);
        }
    }

    fn on_boundary_crossed(&mut self, id: u32, damage: u32) {
        if let Some(f) = &self.crossed {
            call(f, &[JsValue::from(id), JsValue::from(damage)]);
        }
    }
}

/// Zombie defense handle
#[wasm_bindgen]
pub struct DefenseHandle {
    session: DefenseSession<Box<dyn RandomSource>, JsObserver>,
}

#[wasm_bindgen]
impl DefenseHandle {
    #[wasm_bindgen(constructor)]
    pub fn new(
        settings_json: Option<String>,
        seed: Option<u64>,
        on_score_change: Option<Function>,
        on_entity_killed: Option<Function>,
        on_boundary_crossed: Option<Function>,
    ) -> Result<DefenseHandle, JsError> {
        let settings = parse_settings(settings_json)?;
        let observer = JsObserver {
            score: on_score_change,
            killed: on_entity_killed,
            crossed: on_boundary_crossed,
        };
        let mut session = DefenseSession::new(settings.defense, random_source(seed), observer);
        session.start();
        Ok(Self { session })
    }

    /// Advance by `dt_ms` of wall time
    pub fn tick(&mut self, dt_ms: f64) {
        self.session.tick((dt_ms / FRAME_MS) as f32, dt_ms);
    }

    /// Click a monster; returns the outcome as JSON
    pub fn attack(&mut self, id: u32) -> Result<String, JsError> {
        to_json(&self.session.attack(id))
    }

    #[wasm_bindgen(js_name = answerChoice)]
    pub fn answer_choice(&mut self, option: &str) -> Result<String, JsError> {
        to_json(&self.session.answer_choice(option))
    }

    #[wasm_bindgen(js_name = answerSpelling)]
    pub fn answer_spelling(&mut self, input: &str) -> Result<String, JsError> {
        to_json(&self.session.answer_spelling(input))
    }

    #[wasm_bindgen(js_name = acknowledgeWord)]
    pub fn acknowledge_word(&mut self) -> Result<String, JsError> {
        to_json(&self.session.acknowledge_word())
    }

    #[wasm_bindgen(js_name = collectReward)]
    pub fn collect_reward(&mut self, id: u32) -> Result<String, JsError> {
        to_json(&self.session.collect_reward(id))
    }

    pub fn refill(&mut self) {
        self.session.refill();
    }

    /// Full frame state as JSON
    pub fn snapshot(&self) -> Result<String, JsError> {
        to_json(&self.session.snapshot())
    }
}
