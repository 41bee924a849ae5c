//! Cosmetic dog animation (tail, ears, legs, blinking, tongue)
//!
//! Driven from the dog's discrete state once per tick. Never read by the
//! simulation.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4, FRAC_PI_6, PI};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::{Dog, JumpKind};

const BLINK_MIN_GAP_TICKS: u32 = 100;
const BLINK_CHANCE: f64 = 0.02;
const TONGUE_FADE: f32 = 0.01;

#[derive(Debug, Clone)]
pub struct DogAnimation {
    rng: Pcg32,
    tail_wag: f32,
    ear_wiggle: f32,
    leg_phase: f32,
    eye_blink: f32,
    blinking: bool,
    blink_timer: u32,
    /// 1.0 right after a perfect jump, fading to 0
    tongue_out: f32,
    was_jumping: bool,
}

impl DogAnimation {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            tail_wag: 0.0,
            ear_wiggle: 0.0,
            leg_phase: 0.0,
            eye_blink: 0.0,
            blinking: false,
            blink_timer: 0,
            tongue_out: 0.0,
            was_jumping: false,
        }
    }

    /// Advance one tick
    pub fn update(&mut self, dog: &Dog) {
        let jumping = dog.is_jumping();
        if jumping && !self.was_jumping && dog.jump_kind() == Some(JumpKind::Perfect) {
            self.tongue_out = 1.0;
        }
        self.was_jumping = jumping;

        let returning = dog.is_in_return_state();
        if returning {
            self.leg_phase += 0.4;
        }

        if !dog.is_stumbling() {
            self.tail_wag += 0.2;
            self.ear_wiggle += 0.1;
            if !returning {
                self.leg_phase += 0.3;
            }
        }

        self.blink_timer += 1;
        if self.blink_timer > BLINK_MIN_GAP_TICKS && self.rng.random_bool(BLINK_CHANCE) {
            self.blinking = true;
            self.blink_timer = 0;
        }
        if self.blinking {
            self.eye_blink += 0.5;
            if self.eye_blink >= PI {
                self.eye_blink = 0.0;
                self.blinking = false;
            }
        }

        self.tongue_out = (self.tongue_out - TONGUE_FADE).max(0.0);
    }

    /// Tail rotation; happier wag with the tongue out
    pub fn tail_angle(&self, stumbling: bool) -> f32 {
        let amount = if stumbling {
            0.2
        } else if self.tongue_out > 0.0 {
            0.8
        } else {
            0.5
        };
        self.tail_wag.sin() * amount
    }

    /// Front-left, front-right, back-left, back-right
    pub fn leg_angles(&self, dog: &Dog) -> [f32; 4] {
        if dog.is_stumbling() && !dog.is_recovering() {
            // Legs splay as the dog tips over
            let fall = dog.rotation() / FRAC_PI_2;
            return [
                -FRAC_PI_4 * fall,
                FRAC_PI_4 * fall,
                -FRAC_PI_3 * fall,
                FRAC_PI_3 * fall,
            ];
        }
        if dog.is_jumping() {
            return [FRAC_PI_6, -FRAC_PI_6, -FRAC_PI_6, FRAC_PI_6];
        }

        let amplitude = if dog.is_recovering() { 0.2 } else { 0.3 };
        let swing = self.leg_phase.sin() * amplitude;
        [swing, -swing, -swing, swing]
    }

    pub fn head_bob(&self, dog: &Dog) -> f32 {
        if dog.is_stumbling() || !dog.is_jumping() {
            0.0
        } else {
            (self.leg_phase * 0.5).sin() * 2.0
        }
    }

    pub fn head_tilt(&self, stumbling: bool) -> f32 {
        if stumbling {
            -0.2
        } else if self.tongue_out > 0.0 {
            0.1
        } else {
            0.0
        }
    }

    pub fn ear_wiggle(&self, stumbling: bool) -> f32 {
        if stumbling { 0.0 } else { self.ear_wiggle.sin() * 0.1 }
    }

    /// 1.0 open, 0.0 shut
    pub fn eye_openness(&self) -> f32 {
        if self.blinking {
            // Closes then reopens over half a sine period
            1.0 - self.eye_blink.sin()
        } else {
            1.0
        }
    }

    pub fn tongue_length(&self) -> f32 {
        10.0 * self.tongue_out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{DOG_GROUND_Y, DOG_START_X};

    #[test]
    fn test_tongue_after_perfect_jump_fades() {
        let mut dog = Dog::new(DOG_START_X, DOG_GROUND_Y);
        let mut anim = DogAnimation::new(1);
        anim.update(&dog);
        assert_eq!(anim.tongue_length(), 0.0);

        dog.perfect_jump(300.0);
        dog.update();
        anim.update(&dog);
        assert!(anim.tongue_length() > 9.0);

        for _ in 0..100 {
            dog.update();
            anim.update(&dog);
        }
        assert_eq!(anim.tongue_length(), 0.0);
    }

    #[test]
    fn test_normal_jump_keeps_tongue_in() {
        let mut dog = Dog::new(DOG_START_X, DOG_GROUND_Y);
        let mut anim = DogAnimation::new(1);
        dog.normal_jump(300.0);
        dog.update();
        anim.update(&dog);
        assert_eq!(anim.tongue_length(), 0.0);
    }

    #[test]
    fn test_stumble_freezes_tail() {
        let mut dog = Dog::new(DOG_START_X, DOG_GROUND_Y);
        let mut anim = DogAnimation::new(1);
        dog.fail_jump(300.0);
        let before = anim.tail_wag;
        for _ in 0..10 {
            dog.update();
            anim.update(&dog);
        }
        assert_eq!(anim.tail_wag, before);
        assert_eq!(anim.ear_wiggle(true), 0.0);
    }

    #[test]
    fn test_legs_splay_while_falling() {
        let mut dog = Dog::new(DOG_START_X, DOG_GROUND_Y);
        let anim = DogAnimation::new(1);
        dog.fail_jump(300.0);
        for _ in 0..8 {
            dog.update();
        }
        let legs = anim.leg_angles(&dog);
        assert!(legs[0] < 0.0 && legs[1] > 0.0);
        assert!(legs[3].abs() > legs[1].abs());
    }

    #[test]
    fn test_blink_eventually_happens_and_ends() {
        let dog = Dog::new(DOG_START_X, DOG_GROUND_Y);
        let mut anim = DogAnimation::new(9);
        let mut saw_closed = false;
        for _ in 0..2000 {
            anim.update(&dog);
            if anim.eye_openness() < 0.5 {
                saw_closed = true;
            }
        }
        assert!(saw_closed);
        // A blink lasts well under ten ticks
        if anim.blinking {
            for _ in 0..8 {
                anim.update(&dog);
            }
            assert!(!anim.blinking);
        }
    }
}
