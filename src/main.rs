//! Gate Runner entry point
//!
//! Native builds run a headless, autopiloted session and log the event
//! stream. The browser build is driven through `gate_runner::web` instead.

#[cfg(not(target_arch = "wasm32"))]
use gate_runner::{
    Tuning,
    consts::FRAME_DT,
    sim::{EncounterState, GameEvent, GameState, TickInput, tick},
    ui::format_number_short,
};

/// Simulated seconds before the demo gives up
#[cfg(not(target_arch = "wasm32"))]
const DEMO_SECONDS: f32 = 600.0;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Gate Runner (native) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(clock_seed);

    let tuning = match args.next() {
        Some(path) => match load_tuning(&path) {
            Ok(t) => t,
            Err(e) => {
                log::error!("Failed to load tuning from {path}: {e}");
                std::process::exit(2);
            }
        },
        None => Tuning::default(),
    };

    let mut state = match GameState::with_tuning(seed, tuning) {
        Ok(s) => s,
        Err(e) => {
            log::error!("Invalid tuning: {e}");
            std::process::exit(2);
        }
    };

    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let frames = (DEMO_SECONDS / FRAME_DT) as u32;
    for _ in 0..frames {
        tick(&mut state, &input, FRAME_DT);
        for event in state.drain_events() {
            report(&event);
        }
        if state.encounter == EncounterState::GameOver {
            break;
        }
    }

    println!(
        "seed {seed}: level {}, score {}, power {}, bosses {}",
        state.level + 1,
        state.score,
        format_number_short(state.power()),
        state.encounter_log.len()
    );
    state.dispose();
}

#[cfg(not(target_arch = "wasm32"))]
fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: &str) -> Result<Tuning, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(Tuning::from_json(&json)?)
}

#[cfg(not(target_arch = "wasm32"))]
fn report(event: &GameEvent) {
    match event {
        GameEvent::GatePassed {
            chosen_label,
            other_label,
            was_good,
        } => log::info!(
            "Gate: took {chosen_label} over {other_label} ({})",
            if *was_good { "good" } else { "bad" }
        ),
        GameEvent::PowerChanged { power } => {
            log::debug!("Power: {}", format_number_short(*power))
        }
        GameEvent::EncounterStateChanged { state } => log::info!("State: {state:?}"),
        GameEvent::BossHpChanged {
            hp,
            max_hp,
            time_left,
        } => log::debug!(
            "Boss HP {}/{} ({time_left}s left)",
            format_number_short(*hp),
            format_number_short(*max_hp)
        ),
        GameEvent::GameOver { final_score } => log::info!("Game over, final score {final_score}"),
        other => log::trace!("{other:?}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is gate_runner::web::wasm_main, this is just to satisfy the compiler
}
