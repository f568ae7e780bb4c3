//! Data-driven game balance
//!
//! Every number that shapes a run lives here so balance passes never touch
//! simulation code. Documents are JSON; missing fields fall back to defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating a tuning document
#[derive(Debug, Error)]
pub enum TuningError {
    /// The document is not valid JSON for [`Tuning`]
    #[error("tuning JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A field holds a value the simulation cannot run with
    #[error("invalid tuning field `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Balance constants for one game session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Power ===
    /// Power never drops below this after a modifier
    pub power_floor: f64,
    /// Power at the start of a run
    pub starting_power: f64,
    /// Power strictly below this ends the run
    pub min_viable_power: f64,

    // === Gate field ===
    /// Distance ahead of the player where new pairs appear
    pub spawn_lookahead: f32,
    /// Lateral offset of each lane slot from the track centre
    pub lane_offset: f32,
    /// Longitudinal window in which a pair counts as crossed
    pub cross_distance: f32,
    /// Lateral window around a slot in which the player counts as inside it
    pub lane_threshold: f32,
    /// Retired pairs further than this behind the player are recycled
    pub recycle_distance: f32,
    /// Pairs preallocated in the field's pool
    pub pool_size: usize,
    /// Player lateral easing factor (per second)
    pub player_follow_speed: f32,

    // === Track speed ramp ===
    pub base_track_speed: f32,
    pub max_track_speed: f32,
    /// Gates passed per +1 track speed
    pub gates_per_speed_step: u32,

    // === Boss ===
    /// Fight length for a flawless gauntlet (seconds)
    pub boss_base_duration: f64,
    /// Extra fight length per bad choice (seconds)
    pub boss_mistake_penalty: f64,
    /// Damage per second the HP formula assumes per point of power
    pub boss_assumed_dps: f64,
    /// Minimum boss time between two damage applications (seconds)
    pub damage_interval: f32,
    /// Score for defeating a boss
    pub boss_bonus_base: u64,
    /// Extra score per level for defeating a boss
    pub boss_bonus_per_level: u64,
    /// Cosmetic delay between the fatal boss attack and game over (seconds)
    pub game_over_delay: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            power_floor: 1.0,
            starting_power: 5.0,
            min_viable_power: 1.0,

            spawn_lookahead: 30.0,
            lane_offset: 2.0,
            cross_distance: 0.7,
            lane_threshold: 2.1,
            recycle_distance: 20.0,
            pool_size: 10,
            player_follow_speed: 15.0,

            base_track_speed: 5.0,
            max_track_speed: 20.0,
            gates_per_speed_step: 10,

            boss_base_duration: 4.0,
            boss_mistake_penalty: 4.0,
            boss_assumed_dps: 5.0,
            damage_interval: 0.2,
            boss_bonus_base: 100,
            boss_bonus_per_level: 50,
            game_over_delay: 0.7,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Serialize to pretty JSON (for dumping the active balance)
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would break simulation invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        if !(self.power_floor > 0.0) {
            return invalid("power_floor", "must be positive");
        }
        if self.starting_power < self.power_floor {
            return invalid("starting_power", "must not be below power_floor");
        }
        if !(self.spawn_lookahead > 0.0) {
            return invalid("spawn_lookahead", "must be positive");
        }
        if !(self.cross_distance > 0.0) {
            return invalid("cross_distance", "must be positive");
        }
        if !(self.lane_threshold > 0.0) {
            return invalid("lane_threshold", "must be positive");
        }
        if self.recycle_distance < 0.0 {
            return invalid("recycle_distance", "must not be negative");
        }
        if self.player_follow_speed < 0.0 {
            return invalid("player_follow_speed", "must not be negative");
        }
        if self.base_track_speed < 0.0 {
            return invalid("base_track_speed", "must not be negative");
        }
        if self.max_track_speed < self.base_track_speed {
            return invalid("max_track_speed", "must not be below base_track_speed");
        }
        if self.gates_per_speed_step == 0 {
            return invalid("gates_per_speed_step", "must be at least 1");
        }
        if !(self.boss_base_duration > 0.0) {
            return invalid("boss_base_duration", "must be positive");
        }
        if self.boss_mistake_penalty < 0.0 {
            return invalid("boss_mistake_penalty", "must not be negative");
        }
        if !(self.boss_assumed_dps > 0.0) {
            return invalid("boss_assumed_dps", "must be positive");
        }
        if !(self.damage_interval > 0.0) {
            return invalid("damage_interval", "must be positive");
        }
        if self.game_over_delay < 0.0 {
            return invalid("game_over_delay", "must not be negative");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "boss_base_duration": 6.0 }"#).unwrap();
        assert_eq!(tuning.boss_base_duration, 6.0);
        assert_eq!(tuning.boss_mistake_penalty, 4.0);
        assert_eq!(tuning.power_floor, 1.0);
    }

    #[test]
    fn test_invalid_floor_rejected() {
        let err = Tuning::from_json(r#"{ "power_floor": 0.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "power_floor",
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Json(_)));
    }

    #[test]
    fn test_speed_ramp_order_checked() {
        let tuning = Tuning {
            base_track_speed: 10.0,
            max_track_speed: 5.0,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_json_roundtrip_preserves_values() {
        let tuning = Tuning {
            damage_interval: 0.5,
            ..Default::default()
        };
        let back = Tuning::from_json(&tuning.to_json().unwrap()).unwrap();
        assert_eq!(back, tuning);
    }
}
