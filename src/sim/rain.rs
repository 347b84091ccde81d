//! Screen-space rain overlay
//!
//! A fixed pool of drops falls across an 800x600 overlay; drops that
//! leave the screen are recycled to the top row. Same bounded recycling
//! discipline as the track entities, but keyed to wall-clock time so the
//! fall rate is independent of the tick rate.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Number of drops in the pool
pub const RAIN_DROPS: usize = 300;
/// Minimum seconds between overlay steps
pub const RAIN_STEP_SECS: f64 = 0.03;

/// Per-step drop displacement in overlay pixels
const DRIFT_X: f32 = 0.0;
const FALL_Y: f32 = -6.0;
/// Drops may respawn slightly past the side edges
const EDGE_SLACK: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RainDrop {
    pub x: f32,
    pub y: f32,
}

/// Rain overlay state
#[derive(Debug, Clone, PartialEq)]
pub struct Rain {
    pub enabled: bool,
    drops: Vec<RainDrop>,
    last_step: f64,
}

impl Rain {
    /// Seed the pool across the whole screen so toggling rain on does not
    /// start from an empty sky.
    pub fn new(rng: &mut Pcg32) -> Self {
        let drops = (0..RAIN_DROPS)
            .map(|_| RainDrop {
                x: rng.random_range(0.0..=SCREEN_WIDTH),
                y: rng.random_range(0.0..=SCREEN_HEIGHT),
            })
            .collect();
        Self {
            enabled: false,
            drops,
            last_step: 0.0,
        }
    }

    pub fn drops(&self) -> &[RainDrop] {
        &self.drops
    }

    /// Advance the overlay by at most one step per `RAIN_STEP_SECS`.
    ///
    /// No-op while disabled. Off-screen drops respawn at the top with a
    /// fresh lateral draw.
    pub fn advance(&mut self, now: f64, rng: &mut Pcg32) {
        if !self.enabled || now - self.last_step <= RAIN_STEP_SECS {
            return;
        }
        for drop in &mut self.drops {
            drop.x += DRIFT_X;
            drop.y += FALL_Y;
            if drop.y < 0.0 || drop.x < -EDGE_SLACK || drop.x > SCREEN_WIDTH + EDGE_SLACK {
                drop.x = rng.random_range(-EDGE_SLACK..=SCREEN_WIDTH + EDGE_SLACK);
                drop.y = SCREEN_HEIGHT;
            }
        }
        self.last_step = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_disabled_rain_does_not_move() {
        let mut rng = rng();
        let mut rain = Rain::new(&mut rng);
        let before = rain.drops().to_vec();
        rain.advance(10.0, &mut rng);
        assert_eq!(rain.drops(), &before[..]);
    }

    #[test]
    fn test_step_is_rate_limited() {
        let mut rng = rng();
        let mut rain = Rain::new(&mut rng);
        rain.enabled = true;
        rain.advance(0.1, &mut rng);
        let after_first = rain.drops().to_vec();
        // Within the same interval nothing moves again
        rain.advance(0.11, &mut rng);
        assert_eq!(rain.drops(), &after_first[..]);
        rain.advance(0.2, &mut rng);
        assert_ne!(rain.drops(), &after_first[..]);
    }

    #[test]
    fn test_drops_fall_and_recycle_to_top() {
        let mut rng = rng();
        let mut rain = Rain::new(&mut rng);
        rain.enabled = true;
        let mut now = 0.0;
        for _ in 0..200 {
            now += RAIN_STEP_SECS * 2.0;
            rain.advance(now, &mut rng);
            for drop in rain.drops() {
                assert!(drop.y >= FALL_Y && drop.y <= SCREEN_HEIGHT);
                assert!(drop.x >= -EDGE_SLACK && drop.x <= SCREEN_WIDTH + EDGE_SLACK);
            }
        }
    }
}
