//! Dog physics
//!
//! Jumping, stumbling/recovering and returning are separate flags rather than
//! one enum. They chain one after another (a failed jump stumbles, recovery
//! ends in a return, a clean landing returns) and the orchestrator polls the
//! completion predicates to decide when a round has settled.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Bounds;
use crate::consts::*;

/// Which jump animation was started
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JumpKind {
    Perfect,
    Normal,
    Fail,
}

/// Vertical offset of a jump at `progress` ticks into a `duration`-tick arc.
///
/// Symmetric parabola: zero at both ends, `-JUMP_MAX_HEIGHT` at the midpoint
/// (negative is up on the canvas).
#[inline]
pub fn jump_offset(progress: u32, duration: u32) -> f32 {
    if duration == 0 {
        return 0.0;
    }
    let t = progress.min(duration) as f32 / duration as f32;
    let v = t * 2.0 - 1.0;
    -JUMP_MAX_HEIGHT * (1.0 - v * v)
}

/// The dog athlete
#[derive(Debug, Clone)]
pub struct Dog {
    x: f32,
    y: f32,
    /// Spawn x the dog walks back to
    home_x: f32,

    jump_height: f32,
    jump_velocity: f32,
    jump_kind: Option<JumpKind>,
    jumping: bool,
    jump_start_x: f32,
    jump_target_x: f32,
    jump_progress: u32,
    jump_duration: u32,

    stumbling: bool,
    recovering: bool,
    rotation: f32,
    recovery_timer: u32,

    returning: bool,
    return_target_x: f32,
    return_speed: f32,
}

impl Dog {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            home_x: x,
            jump_height: 0.0,
            jump_velocity: 0.0,
            jump_kind: None,
            jumping: false,
            jump_start_x: x,
            jump_target_x: x,
            jump_progress: 0,
            jump_duration: JUMP_DURATION_TICKS,
            stumbling: false,
            recovering: false,
            rotation: 0.0,
            recovery_timer: 0,
            returning: false,
            return_target_x: x,
            return_speed: RETURN_SPEED,
        }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn set_x(&mut self, x: f32) {
        self.x = x;
    }

    /// Ground y plus the current jump offset
    pub fn y(&self) -> f32 {
        self.y + self.jump_height
    }

    pub fn home_x(&self) -> f32 {
        self.home_x
    }

    /// Body centre, including the jump offset
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y())
    }

    pub fn jump_height(&self) -> f32 {
        self.jump_height
    }

    pub fn jump_velocity(&self) -> f32 {
        self.jump_velocity
    }

    pub fn jump_kind(&self) -> Option<JumpKind> {
        self.jump_kind
    }

    /// Tip angle while stumbling (0 upright, π/2 on its side)
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn is_jumping(&self) -> bool {
        self.jumping
    }

    pub fn is_stumbling(&self) -> bool {
        self.stumbling
    }

    pub fn is_recovering(&self) -> bool {
        self.recovering
    }

    pub fn is_in_recovery(&self) -> bool {
        self.stumbling || self.recovering
    }

    pub fn is_in_return_state(&self) -> bool {
        self.returning
    }

    pub fn has_returned_to_start(&self) -> bool {
        !self.returning && self.x == self.home_x
    }

    /// No transition in progress
    pub fn is_idle(&self) -> bool {
        !self.jumping && !self.is_in_recovery() && !self.returning
    }

    pub fn return_speed(&self) -> f32 {
        self.return_speed
    }

    pub fn set_return_speed(&mut self, speed: f32) {
        self.return_speed = speed.min(MAX_RETURN_SPEED);
    }

    fn start_jump(&mut self, vertical_velocity: f32, target_x: f32) {
        self.jump_velocity = vertical_velocity;
        self.jump_height = 0.0;
        self.jumping = true;
        self.jump_start_x = self.x;
        self.jump_target_x = target_x;
        self.jump_progress = 0;
    }

    pub fn perfect_jump(&mut self, target_x: f32) {
        self.start_jump(PERFECT_JUMP_VELOCITY, target_x);
        self.jump_kind = Some(JumpKind::Perfect);
        self.stumbling = false;
    }

    pub fn normal_jump(&mut self, target_x: f32) {
        self.start_jump(NORMAL_JUMP_VELOCITY, target_x);
        self.jump_kind = Some(JumpKind::Normal);
        self.stumbling = false;
    }

    /// Low jump that overshoots the target and ends in a stumble
    pub fn fail_jump(&mut self, target_x: f32) {
        self.start_jump(FAIL_JUMP_VELOCITY, target_x + FAIL_JUMP_OVERSHOOT);
        self.jump_kind = Some(JumpKind::Fail);
        self.stumbling = true;
        self.rotation = 0.0;
        self.recovery_timer = 0;
        self.recovering = false;
        self.returning = false;
    }

    /// Back to idle at `x`, which also becomes the new start line
    pub fn reset(&mut self, x: f32) {
        *self = Self::new(x, self.y);
    }

    fn start_return(&mut self) {
        self.returning = true;
        self.return_target_x = self.home_x;
        self.return_speed = MAX_RETURN_SPEED;
    }

    /// Advance one tick
    pub fn update(&mut self) {
        if self.jumping {
            self.jump_progress += 1;

            let progress = self.jump_progress as f32 / self.jump_duration as f32;
            let distance = self.jump_target_x - self.jump_start_x;
            self.x = self.jump_start_x + distance * progress;
            self.jump_height = jump_offset(self.jump_progress, self.jump_duration);

            if self.jump_progress >= self.jump_duration {
                self.jumping = false;
                self.jump_height = 0.0;
                self.jump_velocity = 0.0;
                self.x = self.jump_target_x;

                // Clean landings walk straight back; stumbles return after recovery
                if !self.stumbling {
                    self.start_return();
                }
            }
        }

        if self.returning && !self.jumping {
            let to_target = self.return_target_x - self.x;
            if to_target.abs() > self.return_speed {
                self.x += to_target.signum() * self.return_speed;
            } else {
                self.x = self.return_target_x;
                self.returning = false;
            }
        }

        if self.stumbling {
            if !self.recovering {
                self.rotation += STUMBLE_ROTATION_RATE;
                if self.rotation >= STUMBLE_MAX_ANGLE {
                    self.rotation = STUMBLE_MAX_ANGLE;
                    self.recovery_timer += 1;

                    if self.recovery_timer >= RECOVERY_DELAY_TICKS {
                        self.recovering = true;
                        self.recovery_timer = 0;
                    }
                }
            } else {
                self.recovery_timer += 1;
                let t = self.recovery_timer as f32 / RECOVERY_DURATION_TICKS as f32;
                self.rotation = STUMBLE_MAX_ANGLE * (1.0 - t);

                if self.recovery_timer >= RECOVERY_DURATION_TICKS {
                    self.stumbling = false;
                    self.recovering = false;
                    self.rotation = 0.0;
                    self.start_return();
                }
            }
        }
    }

    /// Collision box, three times the body size, centred on the dog
    pub fn bounds(&self) -> Bounds {
        Bounds {
            x: self.x - DOG_BODY_WIDTH * 1.5,
            y: self.y() - DOG_BODY_HEIGHT * 1.5,
            width: DOG_BODY_WIDTH * 3.0,
            height: DOG_BODY_HEIGHT * 3.0,
        }
    }
}
