//! Browser bindings
//!
//! The JS side owns the scene, input and timers; it calls `update` once per
//! animation frame and drains the event queue as JSON.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::consts::MAX_FRAME_DT;
use crate::sim::{GatePair, GameState, Lane, TickInput, tick};
use crate::tuning::Tuning;
use crate::ui::format_number_short;

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    // A second init (hot reload) only fails to replace the logger
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Gate Runner starting...");
}

#[derive(Serialize)]
struct FieldView<'a> {
    visible: bool,
    player_x: f32,
    player_z: f32,
    pairs: &'a [GatePair],
}

/// One game session exposed to JS
#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
    input: TickInput,
}

#[wasm_bindgen]
impl WebGame {
    /// JS numbers are f64; seeds are truncated to whole values
    #[wasm_bindgen(constructor)]
    pub fn new(seed: f64) -> WebGame {
        WebGame {
            state: GameState::new(seed as u64),
            input: TickInput::default(),
        }
    }

    /// Start a session with a JSON tuning document
    pub fn with_tuning(seed: f64, tuning_json: &str) -> Result<WebGame, JsError> {
        let tuning = Tuning::from_json(tuning_json)?;
        Ok(WebGame {
            state: GameState::with_tuning(seed as u64, tuning)?,
            input: TickInput::default(),
        })
    }

    pub fn update(&mut self, dt: f32) {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        tick(&mut self.state, &self.input, dt);
        // Lane changes are one-shot commands
        self.input.steer = None;
    }

    pub fn move_left(&mut self) {
        self.input.steer = Some(Lane::Left);
    }

    pub fn move_right(&mut self) {
        self.input.steer = Some(Lane::Right);
    }

    pub fn set_idle_mode(&mut self, on: bool) {
        self.input.idle_mode = on;
    }

    /// Events since the last call, as a JSON array
    pub fn drain_events(&mut self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.state.drain_events())?)
    }

    /// Gate and player positions for the scene, as JSON
    pub fn field_json(&self) -> Result<String, JsError> {
        let view = FieldView {
            visible: self.state.field.is_visible(),
            player_x: self.state.player.pos.x,
            player_z: self.state.player.pos.y,
            pairs: self.state.field.pairs(),
        };
        Ok(serde_json::to_string(&view)?)
    }

    pub fn power_label(&self) -> String {
        format_number_short(self.state.power())
    }

    pub fn score(&self) -> f64 {
        self.state.score as f64
    }

    pub fn reset(&mut self, seed: f64) {
        self.state.reset(seed as u64);
        self.input = TickInput::default();
    }

    pub fn dispose(&mut self) {
        self.state.dispose();
    }
}
