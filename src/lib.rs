//! Pawlympics - a dog-athlete hurdle game
//!
//! Core modules:
//! - `sim`: Simulation core (dog physics, signal, hurdle, arrows, shield, rounds)
//! - `game`: Frame driver wiring the simulation to its collaborators
//! - `render`: Pure draw calls against a 2D surface
//! - `platform`: Host environment abstraction (clock, input, HUD panel)
//! - `highscores`: Per-round-count leaderboards
//! - `settings`: Persisted player preferences
//! - `audio`: Sound cues

pub mod audio;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod render;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use highscores::HighScores;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use std::f32::consts::{FRAC_PI_2, PI};

    /// Fixed simulation timestep (one tick per 60 Hz animation frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Canvas dimensions
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 400.0;
    /// Top of the running path
    pub const PATH_Y: f32 = CANVAS_HEIGHT - 90.0;

    /// Dog defaults
    pub const DOG_START_X: f32 = 100.0;
    pub const DOG_GROUND_Y: f32 = CANVAS_HEIGHT - 100.0;
    pub const DOG_BODY_WIDTH: f32 = 30.0;
    pub const DOG_BODY_HEIGHT: f32 = 20.0;

    /// Jump arc
    pub const JUMP_DURATION_TICKS: u32 = 40;
    pub const JUMP_MAX_HEIGHT: f32 = 75.0;
    pub const PERFECT_JUMP_VELOCITY: f32 = -15.0;
    pub const NORMAL_JUMP_VELOCITY: f32 = -12.0;
    pub const FAIL_JUMP_VELOCITY: f32 = -5.0;
    /// Extra distance a failed jump carries the dog past its target
    pub const FAIL_JUMP_OVERSHOOT: f32 = 100.0;
    /// Landing point relative to the hurdle when the jump starts
    pub const JUMP_LANDING_OFFSET: f32 = 40.0;

    /// Stumble / recovery
    pub const STUMBLE_ROTATION_RATE: f32 = 0.2; // radians per tick
    pub const STUMBLE_MAX_ANGLE: f32 = FRAC_PI_2;
    pub const RECOVERY_DELAY_TICKS: u32 = 30;
    pub const RECOVERY_DURATION_TICKS: u32 = 45;

    /// Walk back to the start line
    pub const RETURN_SPEED: f32 = 2.0;
    pub const MAX_RETURN_SPEED: f32 = 4.0;

    /// Hurdle
    pub const HURDLE_SPAWN_X: f32 = CANVAS_WIDTH + 50.0;
    pub const HURDLE_Y: f32 = CANVAS_HEIGHT - 95.0;
    pub const HURDLE_HEIGHT: f32 = 40.0;
    /// Hurdle-to-dog distance that triggers the jump
    pub const JUMP_DETECTION_DISTANCE: f32 = 60.0;

    /// Terrain (and hurdle) scroll speeds, pixels per tick
    pub const BASE_TERRAIN_SPEED: f32 = 2.0;
    pub const COMMITTED_TERRAIN_SPEED: f32 = 5.0;
    pub const RETURN_TERRAIN_SPEED: f32 = 8.0;

    /// Traffic light
    pub const SIGNAL_INTERVAL_MS: f64 = 1000.0;

    /// Arrows
    pub const ARROW_LENGTH: f32 = 25.0;
    pub const ARROW_WIDTH: f32 = 3.0;
    pub const ARROW_GRAVITY: f32 = 0.15;
    pub const ARROW_MAX_TICKS: u32 = 150;
    pub const ARROW_ARC_STRETCH: f32 = 1.2;
    pub const ARROW_MIN_SPEED: f32 = 4.0;
    pub const ARROW_MAX_SPEED: f32 = 7.0;
    pub const ARROW_SPAWN_INTERVAL_TICKS: u32 = 90;
    pub const ARROW_SPAWN_CHANCE: f64 = 0.6;
    pub const ARROW_DIRECT_SHOT_CHANCE: f64 = 0.3;
    pub const ARROW_AIM_JITTER: f32 = 20.0;
    pub const ARROW_HIT_PENALTY: u32 = 5;

    /// Shield (the hit zone is deliberately larger than what is drawn)
    pub const SHIELD_RADIUS: f32 = 50.0;
    pub const SHIELD_ARC_WIDTH: f32 = FRAC_PI_2;
    pub const SHIELD_HIT_RADIUS: f32 = 70.0;
    pub const SHIELD_HIT_ARC_WIDTH: f32 = 2.0 * PI / 3.0;

    /// Rounds
    pub const DEFAULT_TOTAL_ROUNDS: u32 = 5;
    pub const MAX_TOTAL_ROUNDS: u32 = 20;

    /// Demo mode restarts this long after game over
    pub const DEMO_RESTART_TICKS: u32 = 180;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Absolute angular distance between two angles, in [0, π]
#[inline]
pub fn angle_distance(a: f32, b: f32) -> f32 {
    normalize_angle(a - b).abs()
}

/// Convert cartesian offset (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(offset: Vec2) -> (f32, f32) {
    (offset.length(), offset.y.atan2(offset.x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle_wraps() {
        assert!((normalize_angle(3.0 * PI).abs() - PI).abs() < 1e-5);
        assert!((normalize_angle(2.5 * PI) - PI / 2.0).abs() < 1e-5);
        assert!((normalize_angle(-PI / 2.0) + PI / 2.0).abs() < 1e-6);
        assert!(normalize_angle(PI) < PI);
    }

    #[test]
    fn test_angle_distance_across_seam() {
        let d = angle_distance(PI - 0.1, -PI + 0.1);
        assert!((d - 0.2).abs() < 1e-4);
    }
}
