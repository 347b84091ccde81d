//! Battle Run - an endless three-lane arcade driving game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, level progression)
//! - `clock`: Wall-clock abstraction so elapsed-time logic is testable
//! - `tuning`: Data-driven difficulty balance
//!
//! Rendering and windowing are external collaborators: the simulation
//! exposes read-only getters for everything a renderer needs and consumes
//! discrete input events, but draws nothing itself.

pub mod clock;
pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

/// Track and session constants
pub mod consts {
    /// Half-width of the road in world units
    pub const TRACK_WIDTH: f32 = 150.0;
    /// Sinusoidal curve frequency along the forward axis
    pub const TRACK_CURVATURE: f32 = 0.015;
    /// Lateral amplitude of the curve
    pub const CURVE_AMPLITUDE: f32 = 30.0;
    /// Forward range around the player inside which entities are relevant
    pub const VIEW_DISTANCE: f32 = 600.0;
    /// Length of one road segment (renderer windowing granularity)
    pub const LANE_SEGMENT: f32 = 40.0;

    /// Player origin on the forward axis; crashes hard-reset to here
    pub const PLAYER_START_FORWARD: f32 = -200.0;
    /// Score awarded per simulation tick while running
    pub const SCORE_PER_TICK: u64 = 1;
    /// Last level; finishing it wins the run
    pub const MAX_LEVEL: u8 = 5;

    /// Screen-space overlay dimensions (rain)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
}
