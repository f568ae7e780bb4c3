//! Player power, lane position and choice bookkeeping

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::modifier::{self, Modifier};

/// Fixed longitudinal position of the player; the track moves, not the player
pub const PLAYER_Z: f32 = -14.0;

/// One of the two lanes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Lane {
    Left,
    #[default]
    Right,
}

impl Lane {
    /// Lateral slot centre for this lane
    pub fn x(self, lane_offset: f32) -> f32 {
        match self {
            Lane::Left => -lane_offset,
            Lane::Right => lane_offset,
        }
    }
}

/// The running character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub lane: Lane,
    /// x = lateral, y = longitudinal
    pub pos: Vec2,
}

impl Player {
    pub fn new(lane_offset: f32) -> Self {
        let lane = Lane::default();
        Self {
            lane,
            pos: Vec2::new(lane.x(lane_offset), PLAYER_Z),
        }
    }

    pub fn move_left(&mut self) {
        self.lane = Lane::Left;
    }

    pub fn move_right(&mut self) {
        self.lane = Lane::Right;
    }

    /// Ease lateral position toward the current lane slot
    pub fn update(&mut self, dt: f32, lane_offset: f32, follow_speed: f32) {
        let target = self.lane.x(lane_offset);
        // Large frames land on the slot instead of overshooting it
        let t = (follow_speed * dt).min(1.0);
        self.pos.x += (target - self.pos.x) * t;
    }
}

/// Quality of a gate choice, judged against the side not taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChoiceQuality {
    Good,
    Bad,
}

impl ChoiceQuality {
    /// Bad only when the chosen outcome is strictly worse than the other one,
    /// both evaluated from the same starting power
    pub fn judge(power: f64, chosen: &Modifier, other: &Modifier, floor: f64) -> Self {
        let chosen_out = modifier::apply(power, chosen, floor);
        let other_out = modifier::apply(power, other, floor);
        if chosen_out < other_out {
            ChoiceQuality::Bad
        } else {
            ChoiceQuality::Good
        }
    }
}

/// Owns the power scalar and keeps it above the floor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerTrack {
    power: f64,
    floor: f64,
}

impl PowerTrack {
    pub fn new(starting_power: f64, floor: f64) -> Self {
        Self {
            power: starting_power.max(floor),
            floor,
        }
    }

    pub fn power(&self) -> f64 {
        self.power
    }

    pub fn floor(&self) -> f64 {
        self.floor
    }

    /// Apply a gate modifier and return the new power
    pub fn apply_modifier(&mut self, m: &Modifier) -> f64 {
        self.power = modifier::apply(self.power, m, self.floor);
        self.power
    }
}
