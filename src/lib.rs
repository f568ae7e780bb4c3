//! Gate Runner - a lane runner where gate choices build power for boss fights
//!
//! Core modules:
//! - `sim`: Deterministic simulation (gates, power, boss, encounter flow)
//! - `tuning`: Data-driven game balance
//! - `ui`: Presentation helpers (number formatting)
//! - `web`: wasm bindings for a browser presentation layer

pub mod sim;
pub mod tuning;
pub mod ui;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Nominal frame step for headless runs (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Host frames longer than this are clamped before simulating
    pub const MAX_FRAME_DT: f32 = 0.1;
}
