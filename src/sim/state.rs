//! Game state for one session
//!
//! Everything a run mutates lives in [`GameState`]; sub-systems get the
//! pieces they need passed in by [`super::tick`], never a global handle.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::boss::{Boss, BossOutcome};
use super::events::GameEvent;
use super::gate_field::GateField;
use super::gauntlet;
use super::power::{ChoiceQuality, Player, PowerTrack};
use super::schedule::{Scheduler, TaskHandle};
use crate::tuning::{Tuning, TuningError};

/// Which systems receive per-frame updates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncounterState {
    /// Gates are spawning and being crossed
    Running,
    /// Gates hidden, boss countdown running
    BossFight,
    /// Run ended
    GameOver,
}

/// One boss fight, kept for post-mortem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterRecord {
    pub level: u32,
    pub mistakes: u32,
    pub hp: f64,
    pub duration: f64,
    /// Power when the fight began
    pub power: f64,
    /// `None` while the fight is still on
    pub outcome: Option<BossOutcome>,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    pub encounter: EncounterState,
    /// Difficulty level (0 = easy gauntlet)
    pub level: u32,
    pub score: u64,
    /// Pairs crossed in the current gauntlet
    pub gates_crossed: usize,
    /// Pairs crossed over the whole run (drives the speed ramp)
    pub total_gates: u32,
    pub track_speed: f32,
    pub player: Player,
    pub power: PowerTrack,
    /// Quality of each choice in the current gauntlet
    pub choice_history: Vec<ChoiceQuality>,
    pub field: GateField,
    pub boss: Boss,
    /// Boss time since the last damage application
    pub damage_timer: f32,
    pub scheduler: Scheduler,
    pub(crate) pending_game_over: Option<TaskHandle>,
    pub encounter_log: Vec<EncounterRecord>,
    /// Simulation tick counter
    pub time_ticks: u64,
    disposed: bool,
    events: Vec<GameEvent>,
}

impl GameState {
    /// New session with default balance
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// New session with custom balance
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let first = gauntlet::generate(0, &mut rng);
        let mut state = Self {
            seed,
            rng,
            encounter: EncounterState::Running,
            level: 0,
            score: 0,
            gates_crossed: 0,
            total_gates: 0,
            track_speed: tuning.base_track_speed,
            player: Player::new(tuning.lane_offset),
            power: PowerTrack::new(tuning.starting_power, tuning.power_floor),
            choice_history: Vec::new(),
            field: GateField::new(first, &tuning),
            boss: Boss::new(),
            damage_timer: 0.0,
            scheduler: Scheduler::new(),
            pending_game_over: None,
            encounter_log: Vec::new(),
            time_ticks: 0,
            disposed: false,
            events: Vec::new(),
            tuning,
        };

        // Let the presentation sync its counters
        state.emit(GameEvent::ScoreChanged { score: 0 });
        state.emit(GameEvent::PowerChanged {
            power: state.power.power(),
        });
        log::info!("Game initialized with seed: {}", seed);
        state
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn power(&self) -> f64 {
        self.power.power()
    }

    pub fn is_over(&self) -> bool {
        self.encounter == EncounterState::GameOver
    }

    /// A boss attack has landed and game over is waiting on its delay
    pub fn game_over_pending(&self) -> bool {
        self.pending_game_over.is_some()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn move_left(&mut self) {
        self.player.move_left();
    }

    pub fn move_right(&mut self) {
        self.player.move_right();
    }

    /// Stop the session; pending deferred work is dropped and ticks become no-ops
    pub fn dispose(&mut self) {
        self.scheduler.cancel_all();
        self.pending_game_over = None;
        self.disposed = true;
        log::info!("Game disposed (score {})", self.score);
    }

    /// Start over with a new seed, keeping the balance
    pub fn reset(&mut self, seed: u64) {
        self.scheduler.cancel_all();
        let tuning = self.tuning.clone();
        *self = Self::build(seed, tuning);
        log::info!("Game restarted with seed: {}", seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::gauntlet::GAUNTLET_LEN;

    #[test]
    fn test_new_state() {
        let mut state = GameState::new(12345);
        assert_eq!(state.encounter, EncounterState::Running);
        assert_eq!(state.power(), 5.0);
        assert_eq!(state.track_speed, 5.0);
        assert_eq!(state.field.gauntlet().len(), GAUNTLET_LEN);
        assert_eq!(
            state.drain_events(),
            vec![
                GameEvent::ScoreChanged { score: 0 },
                GameEvent::PowerChanged { power: 5.0 },
            ]
        );
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_with_tuning_validates() {
        let bad = Tuning {
            damage_interval: 0.0,
            ..Default::default()
        };
        assert!(GameState::with_tuning(1, bad).is_err());
        assert!(GameState::with_tuning(1, Tuning::default()).is_ok());
    }

    #[test]
    fn test_same_seed_same_first_gauntlet() {
        let a = GameState::new(99);
        let b = GameState::new(99);
        assert_eq!(a.field.gauntlet(), b.field.gauntlet());
    }

    #[test]
    fn test_reset_keeps_tuning() {
        let tuning = Tuning {
            starting_power: 9.0,
            ..Default::default()
        };
        let mut state = GameState::with_tuning(1, tuning).unwrap();
        state.score = 40;
        state.reset(2);
        assert_eq!(state.seed, 2);
        assert_eq!(state.score, 0);
        assert_eq!(state.power(), 9.0);
    }
}
