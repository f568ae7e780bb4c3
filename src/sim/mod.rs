//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Host-supplied delta time only
//! - Seeded RNG only
//! - Stable iteration order (by spawn id)
//! - No rendering or platform dependencies

pub mod balance;
pub mod boss;
pub mod events;
pub mod gate_field;
pub mod gauntlet;
pub mod modifier;
pub mod power;
pub mod schedule;
pub mod state;
pub mod tick;

pub use balance::{BossStats, boss_stats, count_mistakes};
pub use boss::{Boss, BossOutcome, BossPhase};
pub use events::GameEvent;
pub use gate_field::{Gate, GateCrossing, GateField, GatePair};
pub use gauntlet::{GAUNTLET_LEN, GateBlueprint, Gauntlet, generate};
pub use modifier::{Modifier, ModifierKind, apply};
pub use power::{ChoiceQuality, Lane, PLAYER_Z, Player, PowerTrack};
pub use schedule::{DeferredAction, Scheduler, TaskHandle};
pub use state::{EncounterRecord, EncounterState, GameState};
pub use tick::{TickInput, end_game, tick};
