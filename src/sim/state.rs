//! Session state and entity records
//!
//! Everything mutable about a run lives in one owned [`RaceState`]
//! aggregate: the frame driver and the input handler borrow it, nothing
//! is global. Entity collections are bounded and recycled in place, so
//! the working set stays constant no matter how far the player travels.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::consts::{MAX_LEVEL, PLAYER_START_FORWARD, TRACK_WIDTH, VIEW_DISTANCE};
use crate::tuning::Tuning;

use super::rain::Rain;
use super::track;

/// Shown once the last level's timer runs out
pub const WIN_MESSAGE: &str = "WINNER! You finished the battle run.";
/// Shown once the crash limit is reached
pub const GAME_OVER_MESSAGE: &str = "GAME OVER - Too many crashes!";

/// Obstacles keep this margin from the road edges when seeded
const EDGE_MARGIN: f32 = 40.0;
/// Forward band (ahead of the player) where obstacles are seeded
const OBSTACLE_SEED_NEAR: f32 = 220.0;
/// Forward band around the player where opponents are seeded
const OPPONENT_SEED_BACK: f32 = 100.0;
const OPPONENT_SEED_AHEAD: f32 = 500.0;
/// Spread of the randomized factor applied to the player's speed when an
/// opponent spawns
const OPPONENT_SPEED_FACTOR_MIN: f32 = 0.85;
const OPPONENT_SPEED_FACTOR_MAX: f32 = 1.15;

/// One of the three discrete road slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lane {
    Left,
    Center,
    Right,
}

impl Lane {
    /// Signed slot index: -1, 0 or 1
    pub fn index(self) -> i8 {
        match self {
            Lane::Left => -1,
            Lane::Center => 0,
            Lane::Right => 1,
        }
    }

    fn from_index(index: i8) -> Self {
        match index.clamp(-1, 1) {
            -1 => Lane::Left,
            0 => Lane::Center,
            _ => Lane::Right,
        }
    }

    /// Move at most one slot in the sign of `delta`, clamped at the edges
    pub fn shifted(self, delta: i8) -> Self {
        Self::from_index(self.index() + delta.signum())
    }

    pub fn random(rng: &mut Pcg32) -> Self {
        Self::from_index(rng.random_range(-1..=1))
    }
}

/// Current phase of a session. Exactly one holds at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Physics and the level timer advance
    Running { level: u8 },
    /// Frozen between levels, waiting for an external continue
    LevelComplete { level: u8 },
    /// Terminal: the last level's timer ran out
    Won,
    /// Terminal: crash limit reached; only a full reset leaves this state
    GameOver { level: u8 },
}

impl Phase {
    pub fn is_running(self) -> bool {
        matches!(self, Phase::Running { .. })
    }

    /// Level the session is (or ended) at
    pub fn level(self) -> u8 {
        match self {
            Phase::Running { level } | Phase::LevelComplete { level } | Phase::GameOver { level } => {
                level
            }
            Phase::Won => MAX_LEVEL,
        }
    }
}

/// The player's car. Never destroyed, only reset.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerCar {
    /// x lateral, y forward, z up (always 0 on the road surface)
    pub pos: Vec3,
    pub lane: Lane,
    /// Forward units per tick
    pub speed: f32,
}

/// An AI car. Entries are recycled in place, never removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Opponent {
    pub pos: Vec3,
    pub lane: Lane,
    pub speed: f32,
}

/// A static hazard on the road
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub pos: Vec3,
    pub active: bool,
}

/// Read-only per-frame summary for overlay collaborators
#[derive(Debug, Clone, Serialize)]
pub struct Hud {
    pub level: u8,
    pub score: u64,
    pub crashes: u8,
    pub speed: f32,
    /// Seconds left in the current level; absent unless running
    pub time_left: Option<f64>,
}

/// Lateral draw for a seeded or recycled obstacle, kept off the road edges
pub(crate) fn random_obstacle_lateral(rng: &mut Pcg32) -> f32 {
    rng.random_range(-TRACK_WIDTH + EDGE_MARGIN..TRACK_WIDTH - EDGE_MARGIN)
}

/// Complete state of one game session
#[derive(Debug, Clone, PartialEq)]
pub struct RaceState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    pub phase: Phase,
    pub player: PlayerCar,
    pub opponents: Vec<Opponent>,
    pub obstacles: Vec<Obstacle>,
    pub score: u64,
    pub crashes: u8,
    /// Live entity counts for the current level (grow with boosts/levels)
    pub obstacle_count: usize,
    pub opponent_count: usize,
    /// Timestamp the current level started, from the host clock
    pub level_started_at: f64,
    /// Whether the one-time mid-level boost has fired this level
    pub boost_applied: bool,
    /// Level banner stays visible until this timestamp
    pub banner_until: f64,
    /// Render hint only; unbounded and inert
    pub camera_angle: f32,
    pub rain: Rain,
    /// Set by the quit input; the shell owns process lifetime
    pub quit_requested: bool,
}

impl RaceState {
    pub fn new(seed: u64, now: f64) -> Self {
        Self::with_tuning(seed, Tuning::default(), now)
    }

    pub fn with_tuning(seed: u64, tuning: Tuning, now: f64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let rain = Rain::new(&mut rng);
        let mut state = Self {
            seed,
            rng,
            tuning,
            phase: Phase::Running { level: 1 },
            player: PlayerCar {
                pos: Vec3::new(0.0, PLAYER_START_FORWARD, 0.0),
                lane: Lane::Center,
                speed: 0.0,
            },
            opponents: Vec::new(),
            obstacles: Vec::new(),
            score: 0,
            crashes: 0,
            obstacle_count: 0,
            opponent_count: 0,
            level_started_at: now,
            boost_applied: false,
            banner_until: now,
            camera_angle: 0.0,
            rain,
            quit_requested: false,
        };
        state.reset(now);
        state
    }

    /// Full session reset back to level-1 defaults.
    ///
    /// Valid from any phase; this is the only way out of `Won` and
    /// `GameOver`. Camera and rain preferences survive.
    pub fn reset(&mut self, now: f64) {
        self.phase = Phase::Running { level: 1 };
        self.score = 0;
        self.crashes = 0;
        self.player.pos = Vec3::new(0.0, PLAYER_START_FORWARD, 0.0);
        self.player.lane = Lane::Center;
        self.player.speed = self.tuning.base_speed;
        self.obstacle_count = self.tuning.base_obstacles;
        self.opponent_count = self.tuning.base_opponents;
        self.boost_applied = false;
        self.level_started_at = now;
        self.banner_until = now + self.tuning.banner_secs;
        self.respawn_obstacles();
        self.respawn_opponents();
        log::info!(
            "session reset: level 1, {} obstacles, {} opponents, speed {:.2}",
            self.obstacle_count,
            self.opponent_count,
            self.player.speed
        );
    }

    /// Re-seed the obstacle pool at the current count, ahead of the player
    pub(crate) fn respawn_obstacles(&mut self) {
        let base = self.player.pos.y;
        self.obstacles.clear();
        for _ in 0..self.obstacle_count {
            let x = random_obstacle_lateral(&mut self.rng);
            let y = base + self.rng.random_range(OBSTACLE_SEED_NEAR..VIEW_DISTANCE);
            self.obstacles.push(Obstacle {
                pos: Vec3::new(x, y, 0.0),
                active: true,
            });
        }
    }

    /// Re-seed the opponent pool at the current count, spread around the
    /// player. Spawn speed derives from the player's, clamped to the band.
    pub(crate) fn respawn_opponents(&mut self) {
        let base = self.player.pos.y;
        let player_speed = self.player.speed;
        self.opponents.clear();
        for _ in 0..self.opponent_count {
            let lane = Lane::random(&mut self.rng);
            let y = base
                + self
                    .rng
                    .random_range(-OPPONENT_SEED_BACK..OPPONENT_SEED_AHEAD);
            let speed = (player_speed
                * self
                    .rng
                    .random_range(OPPONENT_SPEED_FACTOR_MIN..OPPONENT_SPEED_FACTOR_MAX))
            .clamp(self.tuning.opponent_speed_min, self.tuning.opponent_speed_max);
            self.opponents.push(Opponent {
                pos: Vec3::new(track::lateral_position(lane, y), y, 0.0),
                lane,
                speed,
            });
        }
    }

    pub fn level(&self) -> u8 {
        self.phase.level()
    }

    /// Seconds left in the current level, while running
    pub fn time_remaining(&self, now: f64) -> Option<f64> {
        match self.phase {
            Phase::Running { level } => {
                let left = self.tuning.level_duration(level) - (now - self.level_started_at);
                Some(left.max(0.0))
            }
            _ => None,
        }
    }

    /// Fixed message for the terminal phases
    pub fn terminal_message(&self) -> Option<&'static str> {
        match self.phase {
            Phase::Won => Some(WIN_MESSAGE),
            Phase::GameOver { .. } => Some(GAME_OVER_MESSAGE),
            _ => None,
        }
    }

    /// Whether the level banner should still be drawn
    pub fn banner_visible(&self, now: f64) -> bool {
        now < self.banner_until
    }

    pub fn hud(&self, now: f64) -> Hud {
        Hud {
            level: self.level(),
            score: self.score,
            crashes: self.crashes,
            speed: self.player.speed,
            time_left: self.time_remaining(now),
        }
    }
}
