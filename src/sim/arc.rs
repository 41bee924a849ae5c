//! Arc geometry for the shield
//!
//! A shield arc is a circular sector around the dog:
//! - center: the dog's body centre
//! - radius: reach of the sector
//! - facing: direction the sector points (radians, normalized to [-π, π))
//! - arc_width: total angular width, split evenly either side of `facing`
//!
//! Both bounds are inclusive: a point exactly at `radius`, or exactly
//! `arc_width / 2` away from `facing`, is inside.

use glam::Vec2;

use crate::{angle_distance, cartesian_to_polar, normalize_angle};

/// A circular sector in canvas space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSegment {
    pub center: Vec2,
    pub radius: f32,
    pub facing: f32,
    pub arc_width: f32,
}

/// Sector membership on raw polar values, inclusive on both bounds
#[inline]
pub fn within_sector(distance: f32, angular_offset: f32, radius: f32, half_width: f32) -> bool {
    distance <= radius && angular_offset.abs() <= half_width
}

impl ArcSegment {
    pub fn new(center: Vec2, radius: f32, facing: f32, arc_width: f32) -> Self {
        Self {
            center,
            radius,
            facing: normalize_angle(facing),
            arc_width,
        }
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.arc_width / 2.0
    }

    /// Start angle of the sector (for drawing)
    pub fn theta_start(&self) -> f32 {
        self.facing - self.half_width()
    }

    /// End angle of the sector (for drawing)
    pub fn theta_end(&self) -> f32 {
        self.facing + self.half_width()
    }

    /// Check if an angle is within the sector's angular extent
    pub fn contains_angle(&self, theta: f32) -> bool {
        angle_distance(theta, self.facing) <= self.half_width()
    }

    /// Check if a point (canvas space) is inside the sector
    pub fn contains_point(&self, point: Vec2) -> bool {
        let (r, theta) = cartesian_to_polar(point - self.center);
        within_sector(r, angle_distance(theta, self.facing), self.radius, self.half_width())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::PI;

    fn bump(x: f32) -> f32 {
        f32::from_bits(x.to_bits() + 1)
    }

    #[test]
    fn test_contains_angle_across_seam() {
        let arc = ArcSegment::new(Vec2::ZERO, 50.0, PI, PI / 2.0);
        assert!(arc.contains_angle(PI - 0.5));
        assert!(arc.contains_angle(-PI + 0.5));
        assert!(!arc.contains_angle(0.0));
    }

    #[test]
    fn test_contains_point_radius_boundary_is_inclusive() {
        let arc = ArcSegment::new(Vec2::new(100.0, 300.0), 70.0, 0.0, PI / 2.0);
        assert!(arc.contains_point(Vec2::new(170.0, 300.0)));
        assert!(!arc.contains_point(Vec2::new(bump(170.0), 300.0)));
    }

    #[test]
    fn test_contains_point_behind_shield() {
        let arc = ArcSegment::new(Vec2::new(100.0, 300.0), 70.0, 0.0, PI / 2.0);
        assert!(!arc.contains_point(Vec2::new(60.0, 300.0)));
        assert!(arc.contains_point(Vec2::new(140.0, 290.0)));
    }

    #[test]
    fn test_start_end_span() {
        let arc = ArcSegment::new(Vec2::ZERO, 10.0, 1.0, 0.5);
        assert!((arc.theta_end() - arc.theta_start() - 0.5).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_sector_boundaries_inclusive(radius in 1.0f32..500.0, half in 0.01f32..3.0) {
            prop_assert!(within_sector(radius, half, radius, half));
            prop_assert!(within_sector(radius, -half, radius, half));
            prop_assert!(!within_sector(bump(radius), 0.0, radius, half));
            prop_assert!(!within_sector(0.0, bump(half), radius, half));
        }
    }
}
