//! Frame driver and input handling
//!
//! One `tick` advances the whole session: player motion, opponent and
//! obstacle recycling, collision scans, crash handling and level
//! progression, in that fixed order. The host calls it from its idle or
//! timer callback and requests a redraw afterward; input events arrive
//! through `apply_input` from the host's event callback. Both entry
//! points assume the non-reentrant single-callback discipline of an
//! event loop, so no locking is involved.

use glam::Vec3;
use rand::Rng;

use crate::consts::{MAX_LEVEL, PLAYER_START_FORWARD, SCORE_PER_TICK, VIEW_DISTANCE};

use super::collision::within_radius;
use super::state::{Lane, Phase, RaceState, random_obstacle_lateral};
use super::track;

/// Opponents falling this far behind the player are recycled ahead
const OPPONENT_BEHIND_MARGIN: f32 = 100.0;
/// Forward jitter band for recycled opponents, past the visibility window
const OPPONENT_JITTER_MIN: f32 = 50.0;
const OPPONENT_JITTER_MAX: f32 = 300.0;
/// Obstacles falling this far behind are recycled ahead
const OBSTACLE_BEHIND_MARGIN: f32 = 50.0;
/// Forward jitter band for recycled obstacles; wider and sparser than the
/// opponent band so hazards stay infrequent
const OBSTACLE_JITTER_MIN: f32 = 220.0;
const OBSTACLE_JITTER_MAX: f32 = 520.0;
/// Band ahead of the reset position where opponents land after a crash,
/// so the player is not instantly surrounded again
const CRASH_CLEARANCE_MIN: f32 = 140.0;
const CRASH_CLEARANCE_MAX: f32 = 460.0;

/// Lane-change direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steer {
    Left,
    Right,
}

impl Steer {
    fn delta(self) -> i8 {
        match self {
            Steer::Left => -1,
            Steer::Right => 1,
        }
    }
}

/// Discrete events delivered by the host's input source.
///
/// There is no queue or debouncing: each event mutates the session
/// immediately and the latest one wins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    ShiftLane(Steer),
    ResetSession,
    ContinueToNextLevel,
    Quit,
    SetRain(bool),
    AdjustCamera(f32),
    AdjustSpeed(f32),
}

/// Apply one input event to the session.
///
/// Gating by phase: terminal and between-level states only accept the
/// inputs that leave them. Camera and speed adjustments are ungated
/// render/balance hints that clamp instead of erroring, in any phase.
pub fn apply_input(state: &mut RaceState, event: InputEvent, now: f64) {
    match event {
        InputEvent::Quit => {
            state.quit_requested = true;
            return;
        }
        InputEvent::AdjustCamera(delta) => {
            state.camera_angle += delta;
            return;
        }
        InputEvent::AdjustSpeed(delta) => {
            state.player.speed = (state.player.speed + delta)
                .clamp(state.tuning.manual_speed_min, state.tuning.manual_speed_max);
            return;
        }
        _ => {}
    }

    match state.phase {
        Phase::GameOver { .. } => {
            if event == InputEvent::ResetSession {
                state.reset(now);
            }
        }
        Phase::LevelComplete { .. } | Phase::Won => match event {
            InputEvent::ContinueToNextLevel => advance_level(state, now),
            InputEvent::ResetSession => state.reset(now),
            _ => {}
        },
        Phase::Running { .. } => match event {
            InputEvent::ShiftLane(steer) => {
                state.player.lane = state.player.lane.shifted(steer.delta());
                log::debug!("lane change to {:?}", state.player.lane);
            }
            InputEvent::ResetSession => state.reset(now),
            // Mid-level skip; still a no-op on the last level
            InputEvent::ContinueToNextLevel => advance_level(state, now),
            InputEvent::SetRain(enabled) => state.rain.enabled = enabled,
            _ => {}
        },
    }
}

/// Advance the session by one tick.
///
/// `now` is the host clock in seconds; the core reads time from nowhere
/// else. While not `Running` only the rain overlay animates.
pub fn tick(state: &mut RaceState, now: f64) {
    let RaceState { rain, rng, .. } = state;
    rain.advance(now, rng);

    if !state.phase.is_running() {
        return;
    }

    update_player(state);
    update_opponents(state);
    update_obstacles(state);
    check_collisions(state);
    progress_level(state, now);
}

fn update_player(state: &mut RaceState) {
    let player = &mut state.player;
    player.pos.y += player.speed;
    player.pos.x = track::lateral_position(player.lane, player.pos.y);
    state.score += SCORE_PER_TICK;
}

/// Move opponents and keep them inside the recycling window: entities
/// that fall behind the margin, or drift past the window plus jitter,
/// respawn ahead of the player in a fresh random lane.
fn update_opponents(state: &mut RaceState) {
    let player_y = state.player.pos.y;
    let RaceState {
        opponents, rng, ..
    } = state;
    for opponent in opponents.iter_mut() {
        opponent.pos.y += opponent.speed;
        if opponent.pos.y < player_y - OPPONENT_BEHIND_MARGIN
            || opponent.pos.y > player_y + VIEW_DISTANCE + OPPONENT_JITTER_MAX
        {
            opponent.pos.y =
                player_y + VIEW_DISTANCE + rng.random_range(OPPONENT_JITTER_MIN..OPPONENT_JITTER_MAX);
            opponent.lane = Lane::random(rng);
        }
        opponent.pos.x = track::lateral_position(opponent.lane, opponent.pos.y);
    }
}

/// Obstacles are static; recycling alone carries them forward.
fn update_obstacles(state: &mut RaceState) {
    let player_y = state.player.pos.y;
    let RaceState {
        obstacles, rng, ..
    } = state;
    for obstacle in obstacles.iter_mut() {
        if obstacle.pos.y < player_y - OBSTACLE_BEHIND_MARGIN {
            obstacle.pos.x = random_obstacle_lateral(rng);
            obstacle.pos.y =
                player_y + VIEW_DISTANCE + rng.random_range(OBSTACLE_JITTER_MIN..OBSTACLE_JITTER_MAX);
            obstacle.active = true;
        }
    }
}

/// Full pairwise scan, obstacles then opponents. The crash handler may
/// hard-reset the player mid-scan; later checks deliberately run against
/// the reset position, and each hit counts separately.
fn check_collisions(state: &mut RaceState) {
    let obstacle_radius = state.tuning.obstacle_hit_radius;
    let opponent_radius = state.tuning.opponent_hit_radius;
    for i in 0..state.obstacles.len() {
        if state.obstacles[i].active
            && within_radius(state.player.pos, state.obstacles[i].pos, obstacle_radius)
        {
            handle_crash(state);
        }
    }
    for i in 0..state.opponents.len() {
        if within_radius(state.player.pos, state.opponents[i].pos, opponent_radius) {
            handle_crash(state);
        }
    }
}

/// Count the crash, hard-reset the player to the track origin, spread the
/// opponents back out ahead, and end the session at the crash limit.
fn handle_crash(state: &mut RaceState) {
    // Hits past the limit are scanned but no longer counted
    let Phase::Running { level } = state.phase else {
        return;
    };

    state.crashes += 1;
    log::info!(
        "crash #{} at forward {:.1}",
        state.crashes,
        state.player.pos.y
    );

    // Back to the track origin; lane and position only, speed is kept
    state.player.pos = Vec3::new(0.0, PLAYER_START_FORWARD, 0.0);
    state.player.lane = Lane::Center;

    let base = state.player.pos.y;
    let RaceState {
        opponents, rng, ..
    } = state;
    for opponent in opponents.iter_mut() {
        opponent.lane = Lane::random(rng);
        opponent.pos.y = base + rng.random_range(CRASH_CLEARANCE_MIN..CRASH_CLEARANCE_MAX);
        opponent.pos.x = track::lateral_position(opponent.lane, opponent.pos.y);
    }

    if state.crashes >= state.tuning.crash_limit {
        state.phase = Phase::GameOver { level };
        log::warn!("game over: crash limit reached at level {level}");
    }
}

/// Timed difficulty within a level, then the level-exit transitions.
fn progress_level(state: &mut RaceState, now: f64) {
    // A crash this tick may already have ended the session
    let Phase::Running { level } = state.phase else {
        return;
    };

    let elapsed = now - state.level_started_at;

    if elapsed > state.tuning.boost_after && !state.boost_applied {
        apply_boost(state);
    }

    if elapsed >= state.tuning.level_duration(level) {
        if level < MAX_LEVEL {
            state.phase = Phase::LevelComplete { level };
            log::info!("level {level} complete after {elapsed:.1}s");
        } else {
            state.phase = Phase::Won;
            log::info!("run won after level {level}");
        }
    }
}

/// One-time mid-level difficulty bump: more of everything, re-seeded.
fn apply_boost(state: &mut RaceState) {
    state.player.speed =
        (state.player.speed + state.tuning.boost_speed_bonus).min(state.tuning.boost_speed_cap);
    state.obstacle_count = (state.obstacle_count + 1).min(state.tuning.boost_obstacle_cap);
    state.opponent_count = (state.opponent_count + 1).min(state.tuning.boost_opponent_cap);
    state.boost_applied = true;
    state.respawn_obstacles();
    state.respawn_opponents();
    log::debug!(
        "mid-level boost: {} obstacles, {} opponents, speed {:.2}",
        state.obstacle_count,
        state.opponent_count,
        state.player.speed
    );
}

/// Move to the next level: raise difficulty under the caps, restart the
/// timer and banner, re-seed both pools. No-op on the last level.
fn advance_level(state: &mut RaceState, now: f64) {
    let level = state.phase.level();
    if level >= MAX_LEVEL {
        return;
    }
    let next = level + 1;

    state.obstacle_count = (state.obstacle_count + 1).min(state.tuning.max_obstacles);
    state.opponent_count = (state.opponent_count + 1).min(state.tuning.max_opponents);
    state.player.speed =
        (state.player.speed + state.tuning.speed_per_level).min(state.tuning.level_speed_cap);
    state.boost_applied = false;
    state.level_started_at = now;
    state.banner_until = now + state.tuning.banner_secs;
    state.phase = Phase::Running { level: next };
    state.respawn_obstacles();
    state.respawn_opponents();
    log::info!(
        "advanced to level {next}: {} obstacles, {} opponents, speed {:.2}",
        state.obstacle_count,
        state.opponent_count,
        state.player.speed
    );
}
