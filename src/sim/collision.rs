//! Collision detection
//!
//! Binary proximity checks between the player and track entities. Entity
//! counts are small and bounded, so a full pairwise scan per tick is
//! correct and sufficient; there is no spatial index. The z axis is
//! always 0 for cars and obstacles in practice but participates in the
//! distance so the check stays general.

use glam::Vec3;

/// True when the two positions are strictly closer than `radius`.
///
/// The threshold is strict: touching at exactly `radius` is a miss.
#[inline]
pub fn within_radius(a: Vec3, b: Vec3, radius: f32) -> bool {
    a.distance_squared(b) < radius * radius
}

/// Euclidean distance between two track positions
#[inline]
pub fn distance(a: Vec3, b: Vec3) -> f32 {
    a.distance(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;

    #[test]
    fn test_within_radius_hit_and_miss() {
        let a = Vec3::new(0.0, -200.0, 0.0);
        assert!(within_radius(a, Vec3::new(0.0, -190.0, 0.0), 15.0));
        assert!(!within_radius(a, Vec3::new(0.0, -170.0, 0.0), 15.0));
    }

    #[test]
    fn test_threshold_is_strict() {
        let a = Vec3::ZERO;
        let b = Vec3::new(15.0, 0.0, 0.0);
        assert!(!within_radius(a, b, 15.0));
        assert!(within_radius(a, b, 15.001));
    }

    #[test]
    fn test_z_axis_participates() {
        let a = Vec3::ZERO;
        let b = Vec3::new(10.0, 10.0, 10.0);
        assert!((distance(a, b) - 300.0_f32.sqrt()).abs() < 1e-4);
        assert!(!within_radius(a, b, 17.0));
        assert!(within_radius(a, b, 17.5));
    }

    #[test]
    fn test_configured_radii_are_asymmetric() {
        // A gap of 16 hits an opponent (18) but misses an obstacle (15).
        let tuning = Tuning::default();
        let a = Vec3::ZERO;
        let b = Vec3::new(0.0, 16.0, 0.0);
        assert!(within_radius(a, b, tuning.opponent_hit_radius));
        assert!(!within_radius(a, b, tuning.obstacle_hit_radius));
    }
}
