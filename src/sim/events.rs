//! Events the simulation reports to the presentation layer
//!
//! The simulation never calls out; it queues events during a tick and the
//! host drains them once per frame, in order.

use serde::{Deserialize, Serialize};

use super::state::EncounterState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    ScoreChanged {
        score: u64,
    },
    /// Raw power; formatting is the presentation's job
    PowerChanged {
        power: f64,
    },
    GatePassed {
        chosen_label: String,
        other_label: String,
        was_good: bool,
    },
    EncounterStateChanged {
        state: EncounterState,
    },
    BossHpChanged {
        hp: f64,
        max_hp: f64,
        time_left: f32,
    },
    /// A damage tick landed on the boss (projectile hook, cosmetic)
    ShotFired {
        damage: f64,
    },
    /// The countdown ran out and the boss strikes (cosmetic, game over follows)
    BossAttack,
    GameOver {
        final_score: u64,
    },
}
