//! Data-driven game balance
//!
//! Every difficulty knob lives here with defaults matching the shipped
//! balance. A partial JSON object can override individual fields, which
//! keeps playtesting tweaks out of the code.

use serde::{Deserialize, Serialize};

/// Level duration when a level has no entry in the table
pub const FALLBACK_LEVEL_DURATION: f64 = 30.0;

/// Difficulty and balance knobs for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Player speed at level 1
    pub base_speed: f32,
    /// Speed gained on each level advance
    pub speed_per_level: f32,
    /// Speed ceiling applied on level advance
    pub level_speed_cap: f32,
    /// Manual speed adjustment floor / ceiling
    pub manual_speed_min: f32,
    pub manual_speed_max: f32,

    /// Seconds into a level after which the one-time boost fires
    pub boost_after: f64,
    /// Speed gained by the boost
    pub boost_speed_bonus: f32,
    /// Speed ceiling applied by the boost
    pub boost_speed_cap: f32,

    /// Entity counts at level 1
    pub base_obstacles: usize,
    pub base_opponents: usize,
    /// Count ceilings applied by the mid-level boost
    pub boost_obstacle_cap: usize,
    pub boost_opponent_cap: usize,
    /// Count ceilings applied on level advance
    pub max_obstacles: usize,
    pub max_opponents: usize,

    /// Opponent speed band; spawn speed derives from the player's and is
    /// clamped into this band
    pub opponent_speed_min: f32,
    pub opponent_speed_max: f32,

    /// Collision radii. Opponents get the wider tolerance because they
    /// are larger and faster-moving; the asymmetry is deliberate.
    pub obstacle_hit_radius: f32,
    pub opponent_hit_radius: f32,

    /// Crashes before the session is over
    pub crash_limit: u8,
    /// Seconds each level lasts, indexed by level - 1
    pub level_durations: Vec<f64>,
    /// Seconds the level banner stays up after a reset or advance
    pub banner_secs: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_speed: 0.45,
            speed_per_level: 0.05,
            level_speed_cap: 1.3,
            manual_speed_min: 0.1,
            manual_speed_max: 1.5,

            boost_after: 15.0,
            boost_speed_bonus: 0.1,
            boost_speed_cap: 1.2,

            base_obstacles: 3,
            base_opponents: 2,
            boost_obstacle_cap: 7,
            boost_opponent_cap: 6,
            max_obstacles: 9,
            max_opponents: 7,

            opponent_speed_min: 0.35,
            opponent_speed_max: 0.6,

            obstacle_hit_radius: 15.0,
            opponent_hit_radius: 18.0,

            crash_limit: 5,
            level_durations: vec![45.0, 60.0, 75.0, 90.0, 120.0],
            banner_secs: 2.0,
        }
    }
}

impl Tuning {
    /// Duration of `level` in seconds, falling back when unmapped
    pub fn level_duration(&self, level: u8) -> f64 {
        self.level_durations
            .get(level.saturating_sub(1) as usize)
            .copied()
            .unwrap_or(FALLBACK_LEVEL_DURATION)
    }

    /// Parse a (possibly partial) JSON override object
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_duration_table() {
        let tuning = Tuning::default();
        assert_eq!(tuning.level_duration(1), 45.0);
        assert_eq!(tuning.level_duration(5), 120.0);
        assert_eq!(tuning.level_duration(6), FALLBACK_LEVEL_DURATION);
        assert_eq!(tuning.level_duration(0), FALLBACK_LEVEL_DURATION);
    }

    #[test]
    fn test_partial_json_override() {
        let tuning = Tuning::from_json(r#"{"base_speed": 0.6, "crash_limit": 3}"#).unwrap();
        assert_eq!(tuning.base_speed, 0.6);
        assert_eq!(tuning.crash_limit, 3);
        // Untouched knobs keep their defaults
        assert_eq!(tuning.max_obstacles, 9);
        assert_eq!(tuning.level_duration(2), 60.0);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Tuning::from_json("{not json").is_err());
    }
}
