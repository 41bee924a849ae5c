//! Cosmetic particles (sparkles, dust, game-over confetti)
//!
//! Not gameplay-affecting. Uses its own RNG so cosmetic randomness never
//! shifts the gameplay stream.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::CANVAS_WIDTH;

/// Maximum live particles
pub const MAX_PARTICLES: usize = 400;
/// Maximum confetti pieces resting on the floor
pub const MAX_LANDED: usize = 600;

const GRAVITY: f32 = 0.15;
const CONFETTI_PER_TICK: usize = 3;
const CONFETTI_FLOOR_MARGIN: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    Sparkle,
    Dust,
    Confetti,
}

#[derive(Debug, Clone)]
pub struct Particle {
    pub kind: ParticleKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub alpha: f32,
    pub size: f32,
    /// Palette index, resolved by the renderer
    pub color: u8,
    pub rotation: f32,
    pub rotation_speed: f32,
    /// Ticks left; confetti lives until it lands
    pub life: Option<u32>,
    pub max_life: u32,
}

#[derive(Debug, Clone)]
pub struct Effects {
    rng: Pcg32,
    pub particles: Vec<Particle>,
    /// Confetti that has settled on the floor
    pub landed: Vec<Particle>,
    floor_y: f32,
    celebrating: bool,
}

impl Effects {
    pub fn new(seed: u64, floor_y: f32) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed ^ 0x9E37_79B9_7F4A_7C15),
            particles: Vec::new(),
            landed: Vec::new(),
            floor_y,
            celebrating: false,
        }
    }

    /// Golden burst for a clean jump
    pub fn success_burst(&mut self, at: Vec2) {
        let count = 15;
        for i in 0..count {
            let angle = std::f32::consts::TAU * i as f32 / count as f32;
            let speed = self.rng.random_range(2.0..4.0);
            let particle = Particle {
                kind: ParticleKind::Sparkle,
                pos: at,
                vel: Vec2::new(angle.cos() * speed, angle.sin() * speed - 2.0),
                alpha: 1.0,
                size: self.rng.random_range(3.0..6.0),
                color: self.rng.random_range(0..4),
                rotation: self.rng.random_range(0.0..std::f32::consts::TAU),
                rotation_speed: self.rng.random_range(-0.1..0.1),
                life: Some(60),
                max_life: 60,
            };
            self.push(particle);
        }
    }

    /// Dust cloud kicked up by a stumble
    pub fn fail_burst(&mut self, at: Vec2) {
        for _ in 0..20 {
            // Upper half-plane only (canvas y points down)
            let angle = std::f32::consts::PI + self.rng.random_range(0.0..std::f32::consts::PI);
            let speed = self.rng.random_range(1.0..3.0);
            let particle = Particle {
                kind: ParticleKind::Dust,
                pos: at,
                vel: Vec2::new(angle.cos() * speed, angle.sin() * speed - 1.0),
                alpha: 0.8,
                size: self.rng.random_range(2.0..6.0),
                color: self.rng.random_range(0..4),
                rotation: self.rng.random_range(0.0..std::f32::consts::TAU),
                rotation_speed: self.rng.random_range(-0.05..0.05),
                life: Some(45),
                max_life: 45,
            };
            self.push(particle);
        }
    }

    /// Start or stop the game-over confetti rain. Stopping clears the floor.
    pub fn set_celebrating(&mut self, celebrating: bool) {
        self.celebrating = celebrating;
        if !celebrating {
            self.landed.clear();
        }
    }

    pub fn is_celebrating(&self) -> bool {
        self.celebrating
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.landed.clear();
        self.celebrating = false;
    }

    fn push(&mut self, particle: Particle) {
        if self.particles.len() < MAX_PARTICLES {
            self.particles.push(particle);
        }
    }

    fn spawn_confetti(&mut self) {
        for _ in 0..CONFETTI_PER_TICK {
            let particle = Particle {
                kind: ParticleKind::Confetti,
                pos: Vec2::new(self.rng.random_range(0.0..CANVAS_WIDTH), -80.0),
                vel: Vec2::new(self.rng.random_range(-0.25..0.25), 1.0),
                alpha: 1.0,
                size: self.rng.random_range(8.0..12.0),
                color: self.rng.random_range(0..8),
                rotation: self.rng.random_range(0.0..std::f32::consts::TAU),
                rotation_speed: self.rng.random_range(-0.05..0.05),
                life: None,
                max_life: 0,
            };
            self.push(particle);
        }
    }

    /// Advance one tick
    pub fn update(&mut self) {
        if self.celebrating {
            self.spawn_confetti();
        }

        let floor = self.floor_y - CONFETTI_FLOOR_MARGIN;
        let mut settled = Vec::new();

        self.particles.retain_mut(|p| {
            p.rotation += p.rotation_speed;
            match p.kind {
                ParticleKind::Confetti => {
                    // Slow, fluttering fall
                    p.vel.y = (p.vel.y + GRAVITY * 0.2).min(2.5);
                    p.pos += p.vel;
                    if p.pos.y >= floor {
                        p.pos.y = floor;
                        p.vel = Vec2::ZERO;
                        p.rotation_speed = 0.0;
                        settled.push(p.clone());
                        return false;
                    }
                    true
                }
                ParticleKind::Sparkle | ParticleKind::Dust => {
                    p.vel.y += GRAVITY;
                    p.pos += p.vel;
                    let life = p.life.unwrap_or(0).saturating_sub(1);
                    p.life = Some(life);
                    p.alpha = life as f32 / p.max_life.max(1) as f32;
                    life > 0
                }
            }
        });

        self.landed.extend(settled);
        if self.landed.len() > MAX_LANDED {
            let excess = self.landed.len() - MAX_LANDED;
            self.landed.drain(..excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bursts_fade_out() {
        let mut fx = Effects::new(1, 300.0);
        fx.success_burst(Vec2::new(100.0, 200.0));
        fx.fail_burst(Vec2::new(100.0, 200.0));
        assert_eq!(fx.particles.len(), 35);
        for _ in 0..60 {
            fx.update();
        }
        assert!(fx.particles.is_empty());
    }

    #[test]
    fn test_confetti_lands_and_clears_on_stop() {
        let mut fx = Effects::new(7, 300.0);
        fx.set_celebrating(true);
        for _ in 0..400 {
            fx.update();
        }
        assert!(!fx.landed.is_empty());
        assert!(fx.landed.iter().all(|p| p.pos.y == 280.0));

        fx.set_celebrating(false);
        assert!(fx.landed.is_empty());
    }

    #[test]
    fn test_particle_cap() {
        let mut fx = Effects::new(2, 300.0);
        for _ in 0..50 {
            fx.success_burst(Vec2::ZERO);
        }
        assert_eq!(fx.particles.len(), MAX_PARTICLES);
    }
}
