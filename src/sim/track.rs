//! Implicit track geometry
//!
//! The road has no mutable state: it is fully described by a constant
//! width, a sinusoidal curve as a function of the forward coordinate, and
//! a segment length used to window rendering. Every entity re-derives its
//! lateral position from these functions each tick, so the curve never
//! has to be stored.

use crate::consts::{CURVE_AMPLITUDE, LANE_SEGMENT, TRACK_CURVATURE, TRACK_WIDTH, VIEW_DISTANCE};

use super::state::Lane;

/// Lateral displacement of the road centerline at a forward coordinate
#[inline]
pub fn curve_offset(forward: f32) -> f32 {
    (forward * TRACK_CURVATURE).sin() * CURVE_AMPLITUDE
}

/// Lateral center of a lane on a straight road
#[inline]
pub fn lane_center(lane: Lane) -> f32 {
    lane.index() as f32 * TRACK_WIDTH / 3.0
}

/// Lateral position of a lane slot at a forward coordinate, curve applied
#[inline]
pub fn lateral_position(lane: Lane, forward: f32) -> f32 {
    lane_center(lane) + curve_offset(forward)
}

/// Segment-aligned forward bounds of the visible road around a position.
///
/// Renderers draw whole segments; both bounds snap down to a segment
/// boundary the way the visible window is computed for the road strips.
pub fn visible_window(forward: f32) -> (f32, f32) {
    let snap = |y: f32| (y / LANE_SEGMENT).floor() * LANE_SEGMENT;
    (snap(forward - VIEW_DISTANCE), snap(forward + VIEW_DISTANCE))
}
