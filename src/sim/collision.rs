//! Collision detection
//!
//! Two independent tests run against every arrow: the shield sector (arrow
//! blocked) and the dog's body box (arrow lands). The shield is tested first.

use glam::Vec2;

use super::arc::ArcSegment;

/// Axis-aligned bounding box in canvas space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn from_center(center: Vec2, width: f32, height: f32) -> Self {
        Self {
            x: center.x - width / 2.0,
            y: center.y - height / 2.0,
            width,
            height,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.x, self.y),
            Vec2::new(self.x + self.width, self.y),
            Vec2::new(self.x, self.y + self.height),
            Vec2::new(self.x + self.width, self.y + self.height),
        ]
    }

    /// Strict overlap: boxes that only share an edge do not overlap
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

/// Where an arrow touched the shield
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShieldContact {
    pub point: Vec2,
}

/// Test an arrow's box against the shield sector.
///
/// The four corners and the centre are sampled; the first one inside the
/// sector is reported as the contact point.
pub fn shield_contact(shield: &ArcSegment, arrow: &Bounds) -> Option<ShieldContact> {
    let corners = arrow.corners();
    std::iter::once(arrow.center())
        .chain(corners)
        .find(|p| shield.contains_point(*p))
        .map(|point| ShieldContact { point })
}

/// Test an arrow's box against the dog's body box
pub fn body_hit(dog: &Bounds, arrow: &Bounds) -> bool {
    dog.overlaps(arrow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_overlap_touching_edges_is_miss() {
        let a = Bounds {
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
        };
        let b = Bounds {
            x: 10.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
        };
        assert!(!a.overlaps(&b));
        let c = Bounds {
            x: 9.0,
            y: 9.0,
            width: 10.0,
            height: 10.0,
        };
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&a));
    }

    #[test]
    fn test_from_center_round_trips_center() {
        let b = Bounds::from_center(Vec2::new(50.0, 20.0), 10.0, 4.0);
        assert_eq!(b.center(), Vec2::new(50.0, 20.0));
        assert_eq!(b.x, 45.0);
        assert_eq!(b.y, 18.0);
    }

    #[test]
    fn test_shield_contact_uses_any_corner() {
        // Shield facing right; arrow box straddles the rim so only its left
        // corners are inside the sector
        let shield = ArcSegment::new(Vec2::ZERO, 70.0, 0.0, 2.0 * PI / 3.0);
        let arrow = Bounds {
            x: 65.0,
            y: -2.0,
            width: 20.0,
            height: 4.0,
        };
        let contact = shield_contact(&shield, &arrow).expect("corner inside shield");
        assert_eq!(contact.point.x, 65.0);
    }

    #[test]
    fn test_shield_misses_arrow_from_behind() {
        let shield = ArcSegment::new(Vec2::ZERO, 70.0, 0.0, 2.0 * PI / 3.0);
        let arrow = Bounds::from_center(Vec2::new(-40.0, 0.0), 20.0, 4.0);
        assert!(shield_contact(&shield, &arrow).is_none());
    }

    #[test]
    fn test_body_hit() {
        let dog = Bounds::from_center(Vec2::new(100.0, 300.0), 90.0, 60.0);
        let arrow = Bounds::from_center(Vec2::new(140.0, 300.0), 25.0, 3.0);
        assert!(body_hit(&dog, &arrow));
        let far = Bounds::from_center(Vec2::new(400.0, 100.0), 25.0, 3.0);
        assert!(!body_hit(&dog, &far));
    }
}
