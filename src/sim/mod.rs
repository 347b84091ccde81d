//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only, owned by the session state
//! - Time arrives as a value from the host clock, never read directly
//! - Bounded entity collections, recycled in place
//! - No rendering or platform dependencies

pub mod collision;
pub mod rain;
pub mod state;
pub mod tick;
pub mod track;

pub use collision::{distance, within_radius};
pub use rain::{Rain, RainDrop};
pub use state::{
    GAME_OVER_MESSAGE, Hud, Lane, Obstacle, Opponent, Phase, PlayerCar, RaceState, WIN_MESSAGE,
};
pub use tick::{InputEvent, Steer, apply_input, tick};
pub use track::{curve_offset, lane_center, lateral_position, visible_window};
