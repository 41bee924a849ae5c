//! Arrow kinematics
//!
//! Trajectory is fixed at construction. Direct shots fly in a straight line
//! at constant velocity. Arced shots are evaluated in closed form from the
//! launch point every tick (p = p0 + v·t + ½·g·t²), so the path never drifts
//! with frame timing.

use glam::Vec2;

use super::collision::Bounds;
use crate::consts::*;

#[derive(Debug, Clone)]
pub struct Arrow {
    pub id: u32,
    pos: Vec2,
    origin: Vec2,
    target: Vec2,
    speed: f32,
    vel: Vec2,
    angle: f32,
    ticks: u32,
    direct_shot: bool,
}

impl Arrow {
    pub fn new(id: u32, origin: Vec2, target: Vec2, speed: f32, direct_shot: bool) -> Self {
        let delta = target - origin;
        let angle = delta.y.atan2(delta.x);

        let vel = if direct_shot {
            delta.normalize_or_zero() * speed
        } else {
            // Stretch horizontally and trim the vertical launch to flatten the arc
            Vec2::new(
                angle.cos() * speed * ARROW_ARC_STRETCH,
                angle.sin() * speed - ARROW_GRAVITY * 5.0,
            )
        };

        Self {
            id,
            pos: origin,
            origin,
            target,
            speed,
            vel,
            angle,
            ticks: 0,
            direct_shot,
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Launch velocity
    pub fn velocity(&self) -> Vec2 {
        self.vel
    }

    /// Current heading (radians)
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn is_direct_shot(&self) -> bool {
        self.direct_shot
    }

    /// Position `t` ticks after launch
    pub fn position_at(&self, t: u32) -> Vec2 {
        let t = t as f32;
        if self.direct_shot {
            self.origin + self.vel * t
        } else {
            self.origin + self.vel * t + Vec2::new(0.0, 0.5 * ARROW_GRAVITY * t * t)
        }
    }

    /// Advance one tick
    pub fn update(&mut self) {
        self.ticks += 1;
        self.pos = self.position_at(self.ticks);

        if !self.direct_shot {
            // Point along the instantaneous velocity
            let t = self.ticks as f32;
            self.angle = (self.vel.y + ARROW_GRAVITY * t).atan2(self.vel.x);
        }
    }

    pub fn is_expired(&self) -> bool {
        self.ticks >= ARROW_MAX_TICKS
    }

    /// Left the play area (with some slack for arrows entering from the right)
    pub fn is_out_of_bounds(&self) -> bool {
        self.pos.x < -ARROW_LENGTH * 2.0
            || self.pos.x > CANVAS_WIDTH + ARROW_LENGTH * 4.0
            || self.pos.y > CANVAS_HEIGHT + ARROW_LENGTH * 2.0
    }

    /// Axis-aligned box around the arrow rotated to its current heading
    pub fn bounds(&self) -> Bounds {
        let (sin, cos) = self.angle.sin_cos();
        let width = (ARROW_LENGTH * cos).abs() + (ARROW_WIDTH * sin).abs();
        let height = (ARROW_LENGTH * sin).abs() + (ARROW_WIDTH * cos).abs();
        Bounds::from_center(self.pos, width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_shot_is_straight_and_constant() {
        let mut arrow = Arrow::new(1, Vec2::new(800.0, 100.0), Vec2::new(100.0, 300.0), 5.0, true);
        let heading = arrow.angle();
        let step = arrow.velocity();
        assert!((step.length() - 5.0).abs() < 1e-4);

        let mut prev = arrow.pos();
        for _ in 0..20 {
            arrow.update();
            assert!(((arrow.pos() - prev) - step).length() < 1e-3);
            assert_eq!(arrow.angle(), heading);
            prev = arrow.pos();
        }
    }

    #[test]
    fn test_arced_shot_matches_closed_form() {
        let mut arrow = Arrow::new(1, Vec2::new(820.0, 80.0), Vec2::new(100.0, 300.0), 6.0, false);
        for _ in 0..37 {
            arrow.update();
        }
        let t = 37.0;
        let v = arrow.velocity();
        let expected = Vec2::new(820.0 + v.x * t, 80.0 + v.y * t + 0.5 * ARROW_GRAVITY * t * t);
        assert!((arrow.pos() - expected).length() < 1e-3);
    }

    #[test]
    fn test_arced_shot_tilts_downward_over_time() {
        let mut arrow = Arrow::new(1, Vec2::new(820.0, 80.0), Vec2::new(100.0, 80.0), 6.0, false);
        arrow.update();
        let early = arrow.angle();
        for _ in 0..60 {
            arrow.update();
        }
        // Heading left: angle near ±π, and the downward component grows
        let early_dy = early.sin();
        let late_dy = arrow.angle().sin();
        assert!(late_dy > early_dy);
    }

    #[test]
    fn test_expiry() {
        let mut arrow = Arrow::new(1, Vec2::ZERO, Vec2::new(1.0, 0.0), 0.0, true);
        for _ in 0..ARROW_MAX_TICKS - 1 {
            arrow.update();
        }
        assert!(!arrow.is_expired());
        arrow.update();
        assert!(arrow.is_expired());
    }

    #[test]
    fn test_bounds_horizontal_and_vertical() {
        let flat = Arrow::new(1, Vec2::new(10.0, 10.0), Vec2::new(100.0, 10.0), 1.0, true);
        let b = flat.bounds();
        assert!((b.width - ARROW_LENGTH).abs() < 1e-4);
        assert!((b.height - ARROW_WIDTH).abs() < 1e-4);

        let down = Arrow::new(2, Vec2::new(10.0, 10.0), Vec2::new(10.0, 100.0), 1.0, true);
        let b = down.bounds();
        assert!((b.width - ARROW_WIDTH).abs() < 1e-4);
        assert!((b.height - ARROW_LENGTH).abs() < 1e-4);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut arrow = Arrow::new(
            1,
            Vec2::new(100.0, 100.0),
            Vec2::new(-100.0, 100.0),
            10.0,
            true,
        );
        assert!(!arrow.is_out_of_bounds());
        for _ in 0..20 {
            arrow.update();
        }
        assert!(arrow.is_out_of_bounds());
    }
}
