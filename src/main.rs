//! Battle Run entry point
//!
//! Headless demo shell. The 3D front-end (rendering, window events) is a
//! separate collaborator; this binary drives the simulation with a small
//! autopilot so a full run can be watched through the log. By default the
//! clock is stepped at 60 Hz as fast as the machine allows; `--realtime`
//! paces it against the wall clock instead.

use std::time::Duration;

use battle_run::Tuning;
use battle_run::clock::{Clock, ManualClock, SystemClock};
use battle_run::sim::{
    InputEvent, Lane, Phase, RaceState, Steer, apply_input, lane_center, tick,
};

const TICK_SECS: f64 = 1.0 / 60.0;
/// Forward range the autopilot scans for threats
const LOOKAHEAD: f32 = 120.0;
/// Lateral half-width the autopilot treats as "in the way"
const CLEARANCE: f32 = 25.0;

struct Args {
    seed: u64,
    tuning: Tuning,
    max_ticks: u64,
    realtime: bool,
}

fn parse_args() -> Args {
    let mut args = Args {
        seed: std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0),
        tuning: Tuning::default(),
        max_ticks: u64::MAX,
        realtime: false,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(flag) = iter.next() {
        match flag.as_str() {
            "--seed" => {
                if let Some(seed) = iter.next().and_then(|v| v.parse().ok()) {
                    args.seed = seed;
                }
            }
            "--ticks" => {
                if let Some(ticks) = iter.next().and_then(|v| v.parse().ok()) {
                    args.max_ticks = ticks;
                }
            }
            "--tuning" => {
                if let Some(path) = iter.next() {
                    match std::fs::read_to_string(&path) {
                        Ok(json) => match Tuning::from_json(&json) {
                            Ok(tuning) => args.tuning = tuning,
                            Err(err) => log::warn!("ignoring tuning overrides in {path}: {err}"),
                        },
                        Err(err) => log::warn!("cannot read tuning file {path}: {err}"),
                    }
                }
            }
            "--realtime" => args.realtime = true,
            other => log::warn!("unknown argument {other}"),
        }
    }
    args
}

/// Nearest forward distance to anything blocking the given lane
fn lane_clearance(state: &RaceState, lane: Lane) -> f32 {
    let player_y = state.player.pos.y;
    let center = lane_center(lane);
    let mut clearance = f32::INFINITY;
    for obstacle in &state.obstacles {
        let dy = obstacle.pos.y - player_y;
        if obstacle.active && dy > 0.0 && (obstacle.pos.x - center).abs() < CLEARANCE {
            clearance = clearance.min(dy);
        }
    }
    for opponent in &state.opponents {
        let dy = opponent.pos.y - player_y;
        if dy > 0.0 && opponent.lane == lane {
            clearance = clearance.min(dy);
        }
    }
    clearance
}

/// Demo driver: when something is close ahead, steer into the adjacent
/// lane with the most clearance.
fn autopilot(state: &RaceState) -> Option<InputEvent> {
    if !state.phase.is_running() {
        return None;
    }
    let lane = state.player.lane;
    let current = lane_clearance(state, lane);
    if current > LOOKAHEAD {
        return None;
    }
    let mut best = lane;
    let mut best_clearance = current;
    for candidate in [lane.shifted(-1), lane.shifted(1)] {
        if candidate != lane {
            let clearance = lane_clearance(state, candidate);
            if clearance > best_clearance {
                best = candidate;
                best_clearance = clearance;
            }
        }
    }
    if best == lane {
        None
    } else if best.index() < lane.index() {
        Some(InputEvent::ShiftLane(Steer::Left))
    } else {
        Some(InputEvent::ShiftLane(Steer::Right))
    }
}

fn main() {
    env_logger::init();
    let args = parse_args();
    log::info!("battle run demo starting: seed {}", args.seed);

    let manual = ManualClock::new(0.0);
    let system = SystemClock::new();
    let clock: &dyn Clock = if args.realtime { &system } else { &manual };

    let mut state = RaceState::with_tuning(args.seed, args.tuning, clock.now());
    let mut ticks: u64 = 0;
    loop {
        if args.realtime {
            std::thread::sleep(Duration::from_secs_f64(TICK_SECS));
        } else {
            manual.advance(TICK_SECS);
        }
        let now = clock.now();

        if let Some(event) = autopilot(&state) {
            apply_input(&mut state, event, now);
        }
        tick(&mut state, now);
        ticks += 1;

        match state.phase {
            Phase::LevelComplete { level } => {
                log::info!("level {level} cleared, continuing");
                apply_input(&mut state, InputEvent::ContinueToNextLevel, now);
            }
            Phase::Won | Phase::GameOver { .. } => {
                if let Some(message) = state.terminal_message() {
                    log::info!("{message}");
                }
                break;
            }
            Phase::Running { .. } => {}
        }

        if ticks % 300 == 0 {
            match serde_json::to_string(&state.hud(now)) {
                Ok(json) => log::info!("hud {json}"),
                Err(err) => log::warn!("hud serialization failed: {err}"),
            }
        }
        if state.quit_requested || ticks >= args.max_ticks {
            break;
        }
    }

    log::info!(
        "demo finished after {ticks} ticks: score {}, crashes {}",
        state.score,
        state.crashes
    );
}
