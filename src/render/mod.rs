//! Drawing
//!
//! Everything here is a pure function of the game state (plus the cosmetic
//! dog animation) issuing calls against a [`Surface`]. Nothing is read back,
//! so drawing can never influence the simulation.

mod animation;
#[cfg(target_arch = "wasm32")]
mod canvas;
mod sprites;

use glam::Vec2;

pub use animation::DogAnimation;
pub use sprites::{DogSprite, Scenery, ShieldSprite};

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::sim::{GameState, SignalColor};

/// RGBA, 0.0 - 1.0
pub type Color = [f32; 4];

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const SKY_TOP: Color = [0.53, 0.81, 0.92, 1.0];
    pub const SKY_BOTTOM: Color = [0.88, 0.96, 1.0, 1.0];
    pub const CLOUD: Color = [1.0, 1.0, 1.0, 0.9];
    pub const GRASS: Color = [0.49, 0.78, 0.31, 1.0];
    pub const GRASS_BLADE: Color = [0.13, 0.55, 0.13, 1.0];
    pub const PATH: Color = [0.25, 0.25, 0.25, 1.0];
    pub const PATH_LINE: Color = [1.0, 1.0, 1.0, 1.0];

    pub const DOG_FUR: Color = [0.55, 0.27, 0.07, 1.0];
    pub const DOG_SPOT: Color = [0.40, 0.26, 0.13, 1.0];
    pub const DOG_NOSE: Color = [0.0, 0.0, 0.0, 1.0];
    pub const DOG_TONGUE: Color = [1.0, 0.41, 0.71, 1.0];

    pub const HURDLE_POST: Color = [0.55, 0.27, 0.07, 1.0];
    pub const HURDLE_BAR: Color = [0.96, 0.87, 0.70, 1.0];
    pub const HURDLE_METAL: Color = [0.75, 0.75, 0.75, 1.0];

    pub const ARROW_HEAD: Color = [0.29, 0.16, 0.06, 1.0];
    pub const ARROW_SHAFT: Color = [0.55, 0.27, 0.07, 1.0];
    pub const ARROW_FLETCH: Color = [0.85, 0.2, 0.2, 1.0];

    pub const SHIELD: Color = [0.3, 0.6, 1.0, 0.85];
    pub const SHIELD_RIM: Color = [0.85, 0.93, 1.0, 1.0];

    pub const LIGHT_HOUSING: Color = [0.0, 0.0, 0.0, 1.0];
    pub const LIGHT_POLE: Color = [0.2, 0.2, 0.2, 1.0];
    pub const LIGHT_OFF: Color = [0.27, 0.27, 0.27, 1.0];

    pub const PANEL: Color = [1.0, 1.0, 1.0, 0.8];
    pub const TEXT: Color = [0.0, 0.0, 0.0, 1.0];
    pub const OVERLAY: Color = [0.0, 0.0, 0.0, 0.7];
    pub const OVERLAY_TEXT: Color = [1.0, 1.0, 1.0, 1.0];

    /// Sparkle palette (golds)
    pub const SPARKLE: [Color; 4] = [
        [1.0, 0.84, 0.0, 1.0],
        [1.0, 0.65, 0.0, 1.0],
        [1.0, 1.0, 0.6, 1.0],
        [1.0, 1.0, 1.0, 1.0],
    ];
    /// Dust palette (browns)
    pub const DUST: [Color; 4] = [
        [0.55, 0.45, 0.33, 1.0],
        [0.63, 0.32, 0.18, 1.0],
        [0.71, 0.6, 0.45, 1.0],
        [0.5, 0.5, 0.5, 1.0],
    ];
    pub const CONFETTI: [Color; 8] = [
        [1.0, 0.0, 0.0, 1.0],
        [0.0, 1.0, 0.0, 1.0],
        [0.0, 0.0, 1.0, 1.0],
        [1.0, 1.0, 0.0, 1.0],
        [1.0, 0.0, 1.0, 1.0],
        [0.0, 1.0, 1.0, 1.0],
        [1.0, 0.65, 0.0, 1.0],
        [0.5, 0.0, 0.5, 1.0],
    ];
}

/// Lamp color for a signal state
pub fn signal_color(color: SignalColor) -> Color {
    match color {
        SignalColor::Red => [1.0, 0.0, 0.0, 1.0],
        SignalColor::Orange => [1.0, 0.65, 0.0, 1.0],
        SignalColor::Yellow => [1.0, 1.0, 0.0, 1.0],
        SignalColor::Green => [0.0, 0.8, 0.0, 1.0],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// 2D immediate-mode drawing target (the Canvas 2D subset the game uses)
pub trait Surface {
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2);
    fn rotate(&mut self, angle: f32);
    /// Multiplies every following draw until `restore`
    fn set_alpha(&mut self, alpha: f32);

    fn set_fill(&mut self, color: Color);
    fn set_stroke(&mut self, color: Color, width: f32);

    fn fill_rect(&mut self, pos: Vec2, size: Vec2);
    /// Vertical gradient between two colors
    fn fill_rect_gradient(&mut self, pos: Vec2, size: Vec2, top: Color, bottom: Color);
    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, rotation: f32);
    fn fill_polygon(&mut self, points: &[Vec2]);
    fn stroke_line(&mut self, from: Vec2, to: Vec2);
    /// Arc from `start` to `end` (radians, clockwise on screen)
    fn stroke_arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32);
    fn fill_text(&mut self, text: &str, pos: Vec2, size_px: f32, align: TextAlign);

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        self.fill_ellipse(center, Vec2::splat(radius), 0.0);
    }
}

/// Something that can put itself on a surface
pub trait Draw {
    fn draw<S: Surface + ?Sized>(&self, surface: &mut S);
}

/// Compose one frame, back to front
pub fn draw_frame<S: Surface + ?Sized>(
    surface: &mut S,
    state: &GameState,
    dog_anim: &DogAnimation,
) {
    Scenery {
        offset: state.terrain_offset,
    }
    .draw(surface);

    state.signal.draw(surface);
    DogSprite {
        dog: &state.dog,
        anim: dog_anim,
    }
    .draw(surface);
    state.hurdle.draw(surface);

    if !state.is_game_over() {
        ShieldSprite {
            shield: &state.shield,
            center: state.dog.center(),
        }
        .draw(surface);
    }
    for arrow in &state.arrows {
        arrow.draw(surface);
    }
    state.effects.draw(surface);

    draw_points_legend(surface);
    if state.is_game_over() {
        draw_game_over(surface, state);
    }
}

/// Points-per-colour legend, top right
fn draw_points_legend<S: Surface + ?Sized>(surface: &mut S) {
    let origin = Vec2::new(CANVAS_WIDTH - 190.0, 10.0);
    surface.set_fill(colors::PANEL);
    surface.fill_rect(origin, Vec2::new(180.0, 130.0));

    surface.set_fill(colors::TEXT);
    surface.fill_text("Points", origin + Vec2::new(10.0, 22.0), 16.0, TextAlign::Left);

    let rows = [
        SignalColor::Green,
        SignalColor::Yellow,
        SignalColor::Orange,
        SignalColor::Red,
    ];
    for (i, color) in rows.into_iter().enumerate() {
        let y = origin.y + 45.0 + i as f32 * 24.0;
        surface.set_fill(signal_color(color));
        surface.fill_circle(Vec2::new(origin.x + 20.0, y), 8.0);
        surface.set_fill(colors::TEXT);
        surface.fill_text(
            &format!("{}: {} pts", color.as_str(), color.points()),
            Vec2::new(origin.x + 36.0, y + 5.0),
            14.0,
            TextAlign::Left,
        );
    }
}

fn draw_game_over<S: Surface + ?Sized>(surface: &mut S, state: &GameState) {
    let center = Vec2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0);
    surface.set_fill(colors::OVERLAY);
    surface.fill_rect(Vec2::ZERO, Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT));

    surface.set_fill(colors::OVERLAY_TEXT);
    surface.fill_text("Game Over!", center - Vec2::new(0.0, 60.0), 48.0, TextAlign::Center);
    surface.fill_text(
        &format!(
            "Hurdles cleared: {}/{}",
            state.successful_rounds, state.config.total_rounds
        ),
        center,
        28.0,
        TextAlign::Center,
    );
    surface.fill_text(
        &format!("Score: {}", state.score),
        center + Vec2::new(0.0, 40.0),
        28.0,
        TextAlign::Center,
    );
    surface.fill_text(
        "Press SPACE or click to play again",
        center + Vec2::new(0.0, 90.0),
        20.0,
        TextAlign::Center,
    );
}

#[cfg(test)]
pub(crate) mod recording {
    use super::*;

    /// One recorded call
    #[derive(Debug, Clone, PartialEq)]
    pub enum Op {
        Save,
        Restore,
        Translate(Vec2),
        Rotate(f32),
        Alpha(f32),
        Fill(Color),
        Stroke(Color, f32),
        Rect(Vec2, Vec2),
        Gradient(Vec2, Vec2),
        Ellipse(Vec2, Vec2),
        Polygon(usize),
        Line(Vec2, Vec2),
        Arc { center: Vec2, radius: f32, start: f32, end: f32 },
        Text(String),
    }

    /// Surface that records the calls it receives
    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub ops: Vec<Op>,
    }

    impl RecordingSurface {
        pub fn texts(&self) -> Vec<&str> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Text(t) => Some(t.as_str()),
                    _ => None,
                })
                .collect()
        }

        /// Save/restore nesting never goes negative and ends at zero
        pub fn is_balanced(&self) -> bool {
            let mut depth = 0i32;
            for op in &self.ops {
                match op {
                    Op::Save => depth += 1,
                    Op::Restore => {
                        depth -= 1;
                        if depth < 0 {
                            return false;
                        }
                    }
                    _ => {}
                }
            }
            depth == 0
        }
    }

    impl Surface for RecordingSurface {
        fn save(&mut self) {
            self.ops.push(Op::Save);
        }
        fn restore(&mut self) {
            self.ops.push(Op::Restore);
        }
        fn translate(&mut self, offset: Vec2) {
            self.ops.push(Op::Translate(offset));
        }
        fn rotate(&mut self, angle: f32) {
            self.ops.push(Op::Rotate(angle));
        }
        fn set_alpha(&mut self, alpha: f32) {
            self.ops.push(Op::Alpha(alpha));
        }
        fn set_fill(&mut self, color: Color) {
            self.ops.push(Op::Fill(color));
        }
        fn set_stroke(&mut self, color: Color, width: f32) {
            self.ops.push(Op::Stroke(color, width));
        }
        fn fill_rect(&mut self, pos: Vec2, size: Vec2) {
            self.ops.push(Op::Rect(pos, size));
        }
        fn fill_rect_gradient(&mut self, pos: Vec2, size: Vec2, _top: Color, _bottom: Color) {
            self.ops.push(Op::Gradient(pos, size));
        }
        fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, _rotation: f32) {
            self.ops.push(Op::Ellipse(center, radii));
        }
        fn fill_polygon(&mut self, points: &[Vec2]) {
            self.ops.push(Op::Polygon(points.len()));
        }
        fn stroke_line(&mut self, from: Vec2, to: Vec2) {
            self.ops.push(Op::Line(from, to));
        }
        fn stroke_arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32) {
            self.ops.push(Op::Arc { center, radius, start, end });
        }
        fn fill_text(&mut self, text: &str, _pos: Vec2, _size_px: f32, _align: TextAlign) {
            self.ops.push(Op::Text(text.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::recording::{Op, RecordingSurface};
    use super::*;
    use crate::sim::{Arrow, GamePhase, SimConfig};

    fn state() -> GameState {
        GameState::new(
            5,
            SimConfig {
                total_rounds: 3,
                arrows_enabled: false,
            },
        )
    }

    #[test]
    fn test_frame_starts_with_sky_and_balances() {
        let state = state();
        let mut surface = RecordingSurface::default();
        draw_frame(&mut surface, &state, &DogAnimation::new(1));

        assert_eq!(
            surface.ops.first(),
            Some(&Op::Gradient(Vec2::ZERO, Vec2::new(CANVAS_WIDTH, crate::consts::PATH_Y)))
        );
        assert!(surface.is_balanced());
        assert!(!surface.texts().contains(&"Game Over!"));
    }

    #[test]
    fn test_game_over_overlay_drawn_last() {
        let mut state = state();
        state.phase = GamePhase::GameOver;
        state.score = 25;
        let mut surface = RecordingSurface::default();
        draw_frame(&mut surface, &state, &DogAnimation::new(1));

        let texts = surface.texts();
        assert!(texts.contains(&"Game Over!"));
        assert!(texts.contains(&"Score: 25"));
        assert_eq!(texts.last(), Some(&"Press SPACE or click to play again"));
        // No shield once the game is over
        assert!(!surface.ops.iter().any(
            |op| matches!(op, Op::Arc { radius, .. } if *radius == crate::consts::SHIELD_RADIUS)
        ));
    }

    #[test]
    fn test_each_arrow_is_drawn() {
        let mut state = state();
        let plain = {
            let mut surface = RecordingSurface::default();
            draw_frame(&mut surface, &state, &DogAnimation::new(1));
            surface.ops.len()
        };

        state.arrows.push(Arrow::new(
            1,
            Vec2::new(700.0, 100.0),
            Vec2::new(100.0, 300.0),
            5.0,
            true,
        ));
        state.arrows.push(Arrow::new(
            2,
            Vec2::new(500.0, -25.0),
            Vec2::new(100.0, 300.0),
            5.0,
            false,
        ));
        let mut surface = RecordingSurface::default();
        draw_frame(&mut surface, &state, &DogAnimation::new(1));

        let per_arrow = (surface.ops.len() - plain) / 2;
        assert!(per_arrow > 0);
        assert_eq!(surface.ops.len() - plain, per_arrow * 2);
        assert!(surface.is_balanced());
    }

    #[test]
    fn test_legend_lists_every_colour() {
        let mut surface = RecordingSurface::default();
        draw_points_legend(&mut surface);
        let texts = surface.texts();
        assert!(texts.contains(&"green: 15 pts"));
        assert!(texts.contains(&"red: 0 pts"));
    }
}
