//! Per-frame simulation step and encounter transitions
//!
//! Order within a tick is fixed: input, deferred tasks, then the systems of
//! the current encounter state. A transition to game over ends the tick.

use super::balance::{boss_stats, count_mistakes};
use super::boss::BossOutcome;
use super::events::GameEvent;
use super::gauntlet;
use super::modifier;
use super::power::{ChoiceQuality, Lane};
use super::schedule::DeferredAction;
use super::state::{EncounterRecord, EncounterState, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Already-resolved lane change from the input layer
    pub steer: Option<Lane>,
    /// Idle/demo mode - AI picks the better gate
    pub idle_mode: bool,
}

/// Advance the game by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.is_disposed() || state.is_over() {
        return;
    }

    match input.steer {
        Some(Lane::Left) => state.move_left(),
        Some(Lane::Right) => state.move_right(),
        None => {}
    }
    if input.idle_mode {
        autopilot(state);
    }

    state.time_ticks += 1;

    for action in state.scheduler.advance(dt) {
        match action {
            DeferredAction::EndGame => {
                state.pending_game_over = None;
                end_game(state);
            }
        }
    }

    match state.encounter {
        EncounterState::Running => run_gates(state, dt),
        EncounterState::BossFight => run_boss(state, dt),
        EncounterState::GameOver => {}
    }
}

/// Track speed after `total_gates` crossings
pub fn track_speed_for(state: &GameState) -> f32 {
    let t = &state.tuning;
    let steps = (state.total_gates / t.gates_per_speed_step) as f32;
    (t.base_track_speed + steps).min(t.max_track_speed)
}

/// End the run; a second call is a no-op and returns false
pub fn end_game(state: &mut GameState) -> bool {
    if state.is_over() {
        return false;
    }
    state.scheduler.cancel_all();
    state.pending_game_over = None;
    state.field.hide_all();
    set_encounter(state, EncounterState::GameOver);
    state.emit(GameEvent::GameOver {
        final_score: state.score,
    });
    log::info!("Game over - score {}, level {}", state.score, state.level + 1);
    true
}

fn set_encounter(state: &mut GameState, next: EncounterState) {
    if state.encounter == next {
        return;
    }
    log::info!("Encounter {:?} -> {:?}", state.encounter, next);
    state.encounter = next;
    state.emit(GameEvent::EncounterStateChanged { state: next });
}

/// Steer toward the better side of the nearest pair not yet crossed
fn autopilot(state: &mut GameState) {
    if state.encounter != EncounterState::Running {
        return;
    }
    let player_z = state.player.pos.y;
    let floor = state.power.floor();
    let power = state.power();
    let next = state
        .field
        .pairs()
        .iter()
        .filter(|p| !p.triggered && p.z > player_z - state.tuning.cross_distance)
        .min_by(|a, b| a.z.total_cmp(&b.z));

    if let Some(pair) = next {
        let left = modifier::apply(power, &pair.left.modifier, floor);
        let right = modifier::apply(power, &pair.right.modifier, floor);
        if left > right {
            state.move_left();
        } else if right > left {
            state.move_right();
        }
    }
}

fn run_gates(state: &mut GameState, dt: f32) {
    let (lane_offset, follow) = (state.tuning.lane_offset, state.tuning.player_follow_speed);
    state.player.update(dt, lane_offset, follow);

    let crossings = state.field.update(dt, state.track_speed, &state.player);
    for crossing in crossings {
        let quality = ChoiceQuality::judge(
            state.power(),
            &crossing.chosen,
            &crossing.other,
            state.power.floor(),
        );
        let power = state.power.apply_modifier(&crossing.chosen);
        state.choice_history.push(quality);
        state.gates_crossed += 1;
        state.total_gates += 1;
        state.score += 1;
        state.track_speed = track_speed_for(state);

        state.emit(GameEvent::PowerChanged { power });
        state.emit(GameEvent::GatePassed {
            chosen_label: crossing.chosen.label,
            other_label: crossing.other.label,
            was_good: quality == ChoiceQuality::Good,
        });
        state.emit(GameEvent::ScoreChanged { score: state.score });

        if power < state.tuning.min_viable_power {
            log::info!("Power {power} below viable minimum");
            end_game(state);
            return;
        }
        if state.gates_crossed >= state.field.gauntlet().len() {
            enter_boss_fight(state);
            return;
        }
    }
}

fn enter_boss_fight(state: &mut GameState) {
    let mistakes = count_mistakes(&state.choice_history);
    let power = state.power();
    let stats = boss_stats(power, mistakes, &state.tuning);
    log::info!(
        "Boss for level {}: hp={} duration={}s ({} mistakes, power {})",
        state.level + 1,
        stats.hp,
        stats.duration,
        mistakes,
        power
    );

    state.boss.start(stats.hp, stats.duration as f32);
    state.gates_crossed = 0;
    // First shot lands on the first boss tick
    state.damage_timer = state.tuning.damage_interval;
    state.field.hide_all();
    state.encounter_log.push(EncounterRecord {
        level: state.level,
        mistakes,
        hp: stats.hp,
        duration: stats.duration,
        power,
        outcome: None,
    });

    set_encounter(state, EncounterState::BossFight);
    emit_boss_hp(state);
}

fn run_boss(state: &mut GameState, dt: f32) {
    let shown_seconds = state.boss.time_left();
    if state.boss.tick(dt) == Some(BossOutcome::Lost) {
        on_boss_lost(state);
        return;
    }

    let interval = state.tuning.damage_interval;
    state.damage_timer += dt;
    if state.boss.is_active() && state.damage_timer >= interval {
        // Carry the remainder so frame timing does not stretch the cadence
        state.damage_timer = (state.damage_timer - interval).min(interval);
        let damage = state.power();
        state.emit(GameEvent::ShotFired { damage });
        let outcome = state.boss.hit(damage);
        emit_boss_hp(state);
        if outcome == Some(BossOutcome::Won) {
            on_boss_defeated(state);
        }
    } else if state.boss.time_left() != shown_seconds {
        emit_boss_hp(state);
    }
}

fn emit_boss_hp(state: &mut GameState) {
    let event = GameEvent::BossHpChanged {
        hp: state.boss.display_hp(),
        max_hp: state.boss.max_hp,
        time_left: state.boss.time_left(),
    };
    state.emit(event);
}

fn close_record(state: &mut GameState, outcome: BossOutcome) {
    if let Some(record) = state.encounter_log.last_mut() {
        record.outcome = Some(outcome);
    }
}

fn on_boss_lost(state: &mut GameState) {
    log::info!("Boss countdown expired at level {}", state.level + 1);
    close_record(state, BossOutcome::Lost);
    emit_boss_hp(state);
    state.emit(GameEvent::BossAttack);
    let handle = state
        .scheduler
        .schedule(state.tuning.game_over_delay, DeferredAction::EndGame);
    state.pending_game_over = Some(handle);
}

fn on_boss_defeated(state: &mut GameState) {
    let bonus = state.tuning.boss_bonus_base + state.level as u64 * state.tuning.boss_bonus_per_level;
    state.score += bonus;
    state.emit(GameEvent::ScoreChanged { score: state.score });
    close_record(state, BossOutcome::Won);
    log::info!("Boss defeated at level {} (+{bonus})", state.level + 1);

    state.level += 1;
    state.choice_history.clear();
    let next = gauntlet::generate(state.level, &mut state.rng);
    state.field.load(next);
    state.field.show_all();
    set_encounter(state, EncounterState::Running);
}
