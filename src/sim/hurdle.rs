//! The hurdle
//!
//! No physics of its own: the round orchestrator scrolls it toward the dog
//! and repositions it off-screen right when a new round starts.

use crate::consts::{HURDLE_HEIGHT, HURDLE_SPAWN_X, HURDLE_Y};

#[derive(Debug, Clone)]
pub struct Hurdle {
    x: f32,
    y: f32,
    height: f32,
}

impl Default for Hurdle {
    fn default() -> Self {
        Self::new(HURDLE_SPAWN_X, HURDLE_Y)
    }
}

impl Hurdle {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            height: HURDLE_HEIGHT,
        }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn set_x(&mut self, x: f32) {
        self.x = x;
    }

    /// Ground line the posts stand on
    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Scroll left by `speed` pixels; negative speeds are ignored
    pub fn advance(&mut self, speed: f32) {
        self.x -= speed.max(0.0);
    }

    /// Place the hurdle back off-screen right for a new round
    pub fn respawn(&mut self) {
        self.x = HURDLE_SPAWN_X;
    }
}
