//! Angle math and the bounded-turn steering primitive.
//!
//! Headings are degrees in `[0, 360)`, measured counter-clockwise from +x,
//! matching `atan2`.

use glam::Vec2;

/// Wrap an angle into `[0, 360)`.
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Euclidean distance between two points.
pub fn distance_between(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Bearing from `from` to `to`, in degrees.
pub fn direction_between(from: Vec2, to: Vec2) -> f32 {
    let delta = to - from;
    wrap_degrees(delta.y.atan2(delta.x).to_degrees())
}

/// Unit vector pointing along `heading`.
pub fn heading_vector(heading: f32) -> Vec2 {
    Vec2::from_angle(heading.to_radians())
}

/// Smallest unsigned angle between two headings, in `[0, 180]`.
pub fn angular_difference(a: f32, b: f32) -> f32 {
    let delta = wrap_degrees(a - b);
    delta.min(360.0 - delta)
}

/// Turn `current` toward `desired` by at most `max_turn` degrees.
///
/// Steps the shorter way round, then snaps exactly onto `desired` if less
/// than one step remains, so callers may compare headings with `==`.
pub fn turn_towards(current: f32, desired: f32, max_turn: f32) -> f32 {
    let desired = wrap_degrees(desired);
    if current == desired {
        return desired;
    }

    let left = wrap_degrees(current - desired);
    let right = wrap_degrees(desired - current);
    let stepped = if left < right {
        wrap_degrees(current - max_turn)
    } else {
        wrap_degrees(current + max_turn)
    };

    if angular_difference(stepped, desired) < max_turn {
        desired
    } else {
        stepped
    }
}

/// Position after one step of straight-line travel.
pub fn advance(position: Vec2, heading: f32, speed: f32) -> Vec2 {
    position + heading_vector(heading) * speed
}
