//! Collision predicates
//!
//! Two tests cover the whole game: a missile tip inside a house's box, and a
//! missile tip inside an explosion's circle.

use glam::Vec2;

/// Check whether `point` lies inside an axis-aligned box
///
/// The box spans `origin` to `origin + (width, height)`. Every edge counts as
/// inside, so a missile grazing a corner still flattens the house.
#[inline]
pub fn point_in_rect(point: Vec2, origin: Vec2, width: f32, height: f32) -> bool {
    origin.x <= point.x
        && point.x <= origin.x + width
        && origin.y <= point.y
        && point.y <= origin.y + height
}

/// Check whether `point` lies strictly inside a circle
///
/// Compares squared distances; a point exactly on the rim is a miss.
#[inline]
pub fn point_in_circle(point: Vec2, center: Vec2, radius: f32) -> bool {
    debug_assert!(radius >= 0.0, "negative radius {radius}");
    point.distance_squared(center) < radius * radius
}
