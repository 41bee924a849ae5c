//! Per-entity draw calls

use std::f32::consts::{FRAC_PI_4, TAU};

use glam::Vec2;

use super::animation::DogAnimation;
use super::{Draw, Surface, colors, signal_color};
use crate::consts::*;
use crate::sim::{Arrow, Dog, Effects, Hurdle, Particle, ParticleKind, Shield, TrafficLight};

/// Clouds as (x, y, width); they scroll at a third of the ground speed
const CLOUDS: [(f32, f32, f32); 5] = [
    (60.0, 50.0, 90.0),
    (230.0, 90.0, 120.0),
    (410.0, 35.0, 70.0),
    (560.0, 100.0, 140.0),
    (720.0, 60.0, 100.0),
];
const CLOUD_PARALLAX: f32 = 0.3;
const GRASS_BLADES: usize = 80;
const DASH_LENGTH: f32 = 30.0;
const DASH_GAP: f32 = 40.0;

/// Sky, clouds, grass and the running path
pub struct Scenery {
    /// World scroll so far
    pub offset: f32,
}

impl Draw for Scenery {
    fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.fill_rect_gradient(
            Vec2::ZERO,
            Vec2::new(CANVAS_WIDTH, PATH_Y),
            colors::SKY_TOP,
            colors::SKY_BOTTOM,
        );

        // Clouds wrap around a strip a little wider than the canvas
        let strip = CANVAS_WIDTH + 200.0;
        surface.set_fill(colors::CLOUD);
        for (x, y, width) in CLOUDS {
            let x = (x - self.offset * CLOUD_PARALLAX).rem_euclid(strip) - 100.0;
            surface.fill_circle(Vec2::new(x, y), width * 0.3);
            surface.fill_circle(Vec2::new(x + width * 0.2, y - 10.0), width * 0.25);
            surface.fill_circle(Vec2::new(x + width * 0.4, y), width * 0.3);
            surface.fill_circle(Vec2::new(x + width * 0.2, y + 10.0), width * 0.25);
        }

        let grass_top = CANVAS_HEIGHT - 150.0;
        surface.fill_rect_gradient(
            Vec2::new(0.0, grass_top),
            Vec2::new(CANVAS_WIDTH, 150.0),
            colors::GRASS,
            colors::GRASS_BLADE,
        );

        surface.set_stroke(colors::GRASS_BLADE, 1.0);
        let spacing = CANVAS_WIDTH / GRASS_BLADES as f32;
        for i in 0..GRASS_BLADES {
            let x = (i as f32 * spacing - self.offset).rem_euclid(CANVAS_WIDTH);
            // Fixed per-blade variation
            let height = 6.0 + ((i * 7) % 9) as f32;
            let base = grass_top + 10.0 + ((i * 13) % 40) as f32;
            let sway = ((i as f32 * spacing) * 0.05).sin() * 3.0;
            surface.stroke_line(Vec2::new(x, base), Vec2::new(x + sway, base - height));
        }

        surface.set_fill(colors::PATH);
        surface.fill_rect(Vec2::new(0.0, PATH_Y), Vec2::new(CANVAS_WIDTH, 40.0));

        surface.set_stroke(colors::PATH_LINE, 3.0);
        let period = DASH_LENGTH + DASH_GAP;
        let mut x = -self.offset.rem_euclid(period);
        while x < CANVAS_WIDTH {
            surface.stroke_line(
                Vec2::new(x, PATH_Y + 20.0),
                Vec2::new(x + DASH_LENGTH, PATH_Y + 20.0),
            );
            x += period;
        }
    }
}

impl Draw for TrafficLight {
    fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let top = CANVAS_HEIGHT - 300.0;
        surface.set_fill(colors::LIGHT_POLE);
        surface.fill_rect(Vec2::new(100.0, top), Vec2::new(10.0, 200.0));

        surface.set_fill(colors::LIGHT_HOUSING);
        surface.fill_rect(Vec2::new(85.0, top), Vec2::new(40.0, 80.0));

        surface.set_fill(signal_color(self.current()));
        surface.fill_circle(Vec2::new(105.0, top + 40.0), 15.0);

        // Frozen lights get a ring so the player sees the commit registered
        if self.is_stopped() {
            surface.set_stroke(colors::OVERLAY_TEXT, 3.0);
            surface.stroke_arc(Vec2::new(105.0, top + 40.0), 18.0, 0.0, TAU);
        }
    }
}

impl Draw for Hurdle {
    fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let (x, y, h) = (self.x(), self.y(), self.height());

        // Back post sits a little higher for perspective
        for (post_x, lift) in [(x - 15.0, 12.0), (x + 15.0, 0.0)] {
            surface.set_fill(colors::HURDLE_POST);
            surface.fill_polygon(&[
                Vec2::new(post_x - 5.0, y),
                Vec2::new(post_x + 5.0, y),
                Vec2::new(post_x + 4.0, y - 6.0),
                Vec2::new(post_x - 4.0, y - 6.0),
            ]);
            surface.fill_polygon(&[
                Vec2::new(post_x - 4.0, y - 6.0),
                Vec2::new(post_x + 4.0, y - 6.0),
                Vec2::new(post_x + 2.0, y - h - lift),
                Vec2::new(post_x - 2.0, y - h - lift),
            ]);
            surface.set_fill(colors::HURDLE_METAL);
            surface.fill_rect(Vec2::new(post_x - 4.0, y - h + 4.0 - lift), Vec2::new(8.0, 2.0));
        }

        surface.set_fill(colors::HURDLE_BAR);
        surface.fill_polygon(&[
            Vec2::new(x - 15.0, y - h - 10.0),
            Vec2::new(x + 15.0, y - h),
            Vec2::new(x + 15.0, y - h + 8.0),
            Vec2::new(x - 15.0, y - h),
        ]);
    }
}

impl Draw for Arrow {
    fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.save();
        surface.translate(self.pos());
        surface.rotate(self.angle());

        surface.set_fill(colors::ARROW_HEAD);
        surface.fill_polygon(&[
            Vec2::new(ARROW_LENGTH, 0.0),
            Vec2::new(ARROW_LENGTH - 10.0, -ARROW_WIDTH),
            Vec2::new(ARROW_LENGTH - 10.0, ARROW_WIDTH),
        ]);

        surface.set_fill(colors::ARROW_SHAFT);
        surface.fill_rect(
            Vec2::new(-ARROW_LENGTH + 10.0, -1.0),
            Vec2::new(ARROW_LENGTH * 2.0 - 20.0, 2.0),
        );

        surface.set_fill(colors::ARROW_FLETCH);
        surface.fill_polygon(&[
            Vec2::new(-ARROW_LENGTH + 10.0, 0.0),
            Vec2::new(-ARROW_LENGTH, -ARROW_WIDTH * 2.0),
            Vec2::new(-ARROW_LENGTH + 4.0, 0.0),
            Vec2::new(-ARROW_LENGTH, ARROW_WIDTH * 2.0),
        ]);

        surface.restore();
    }
}

/// The shield arc around the dog
pub struct ShieldSprite<'a> {
    pub shield: &'a Shield,
    pub center: Vec2,
}

impl Draw for ShieldSprite<'_> {
    fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let arc = self.shield.visual_arc(self.center);
        surface.set_stroke(colors::SHIELD, 8.0);
        surface.stroke_arc(arc.center, arc.radius, arc.theta_start(), arc.theta_end());
        surface.set_stroke(colors::SHIELD_RIM, 2.0);
        surface.stroke_arc(arc.center, arc.radius + 4.0, arc.theta_start(), arc.theta_end());
    }
}

impl Draw for Effects {
    fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        for particle in self.landed.iter().chain(&self.particles) {
            draw_particle(surface, particle);
        }
    }
}

fn draw_particle<S: Surface + ?Sized>(surface: &mut S, p: &Particle) {
    surface.save();
    surface.set_alpha(p.alpha.clamp(0.0, 1.0));
    surface.translate(p.pos);
    surface.rotate(p.rotation);

    let idx = p.color as usize;
    match p.kind {
        ParticleKind::Sparkle => {
            surface.set_fill(colors::SPARKLE[idx % colors::SPARKLE.len()]);
            surface.fill_polygon(&star(p.size));
        }
        ParticleKind::Dust => {
            surface.set_fill(colors::DUST[idx % colors::DUST.len()]);
            surface.fill_circle(Vec2::ZERO, p.size);
        }
        ParticleKind::Confetti => {
            let size = Vec2::new(p.size, p.size * 0.6);
            surface.set_fill(colors::CONFETTI[idx % colors::CONFETTI.len()]);
            surface.fill_rect(-size / 2.0, size);
            // Sheen
            surface.set_fill([1.0, 1.0, 1.0, 0.3]);
            surface.fill_rect(-size / 2.0, Vec2::new(size.x / 4.0, size.y));
        }
    }

    surface.restore();
}

/// Four-point star outline
fn star(size: f32) -> [Vec2; 8] {
    let mut points = [Vec2::ZERO; 8];
    for (i, point) in points.iter_mut().enumerate() {
        let angle = i as f32 * FRAC_PI_4;
        let r = if i % 2 == 0 { size } else { size * 0.4 };
        *point = Vec2::new(angle.cos() * r, angle.sin() * r);
    }
    points
}

/// The dog, posed by its animation
pub struct DogSprite<'a> {
    pub dog: &'a Dog,
    pub anim: &'a DogAnimation,
}

impl Draw for DogSprite<'_> {
    fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let dog = self.dog;
        let anim = self.anim;
        let stumbling = dog.is_stumbling();

        surface.save();
        surface.translate(dog.center());
        if stumbling {
            surface.rotate(dog.rotation());
        }

        // Tail
        surface.save();
        surface.translate(Vec2::new(-25.0, 0.0));
        surface.rotate(anim.tail_angle(stumbling));
        surface.set_fill(colors::DOG_FUR);
        surface.fill_ellipse(Vec2::new(-10.0, 0.0), Vec2::new(10.0, 4.0), -0.3);
        surface.restore();

        // Legs
        let legs = anim.leg_angles(dog);
        for (x, angle) in [(-15.0, legs[0]), (15.0, legs[1]), (-5.0, legs[2]), (20.0, legs[3])] {
            draw_leg(surface, Vec2::new(x, 15.0), angle);
        }

        // Body
        surface.set_fill(colors::DOG_FUR);
        surface.fill_ellipse(Vec2::ZERO, Vec2::new(DOG_BODY_WIDTH, DOG_BODY_HEIGHT), 0.0);
        surface.fill_ellipse(Vec2::new(0.0, 15.0), Vec2::new(25.0, 5.0), 0.0);
        surface.set_fill(colors::DOG_SPOT);
        surface.fill_ellipse(Vec2::new(10.0, -5.0), Vec2::new(8.0, 6.0), FRAC_PI_4);

        // Head
        surface.save();
        surface.translate(Vec2::new(20.0, -15.0 + anim.head_bob(dog)));
        surface.rotate(anim.head_tilt(stumbling));

        surface.save();
        surface.rotate(-0.2 + anim.ear_wiggle(stumbling));
        surface.set_fill(colors::DOG_FUR);
        surface.fill_ellipse(Vec2::new(-8.0, -8.0), Vec2::new(6.0, 12.0), -0.2);
        surface.rotate(0.4);
        surface.fill_ellipse(Vec2::new(8.0, -8.0), Vec2::new(6.0, 12.0), 0.2);
        surface.restore();

        surface.set_fill(colors::DOG_FUR);
        surface.fill_circle(Vec2::ZERO, 15.0);
        surface.set_fill(colors::DOG_SPOT);
        surface.fill_ellipse(Vec2::new(8.0, 2.0), Vec2::new(8.0, 6.0), 0.0);
        surface.set_fill(colors::DOG_NOSE);
        surface.fill_ellipse(Vec2::new(15.0, 0.0), Vec2::new(4.0, 3.0), 0.0);

        let eye = if stumbling { 2.0 } else { 3.0 };
        let open = anim.eye_openness();
        surface.fill_ellipse(Vec2::new(-5.0, -5.0), Vec2::new(eye, eye * open), 0.0);
        surface.fill_ellipse(Vec2::new(5.0, -5.0), Vec2::new(eye, eye * open), 0.0);

        let tongue = anim.tongue_length();
        if tongue > 0.0 {
            surface.set_fill(colors::DOG_TONGUE);
            surface.fill_polygon(&[
                Vec2::new(12.0, 5.0),
                Vec2::new(12.0 + tongue / 2.0, 9.0),
                Vec2::new(12.0 + tongue, 5.0),
            ]);
        }

        surface.restore();
        surface.restore();
    }
}

fn draw_leg<S: Surface + ?Sized>(surface: &mut S, at: Vec2, angle: f32) {
    surface.save();
    surface.translate(at);
    surface.rotate(angle);

    surface.set_fill(colors::DOG_FUR);
    surface.fill_rect(Vec2::new(-3.0, 0.0), Vec2::new(6.0, 15.0));
    surface.translate(Vec2::new(0.0, 15.0));
    surface.rotate(std::f32::consts::PI / 8.0);
    surface.fill_rect(Vec2::new(-3.0, 0.0), Vec2::new(6.0, 10.0));

    // Paw
    surface.translate(Vec2::new(0.0, 10.0));
    surface.set_fill(colors::DOG_SPOT);
    surface.fill_ellipse(Vec2::ZERO, Vec2::new(5.0, 3.0), 0.0);

    surface.restore();
}
