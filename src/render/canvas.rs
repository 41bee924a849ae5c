//! Canvas 2D backend

use glam::Vec2;
use web_sys::CanvasRenderingContext2d;

use super::{Color, Surface, TextAlign};

fn css(color: Color) -> String {
    let [r, g, b, a] = color;
    format!(
        "rgba({}, {}, {}, {})",
        (r.clamp(0.0, 1.0) * 255.0).round() as u8,
        (g.clamp(0.0, 1.0) * 255.0).round() as u8,
        (b.clamp(0.0, 1.0) * 255.0).round() as u8,
        a.clamp(0.0, 1.0)
    )
}

impl Surface for CanvasRenderingContext2d {
    fn save(&mut self) {
        CanvasRenderingContext2d::save(self);
    }

    fn restore(&mut self) {
        CanvasRenderingContext2d::restore(self);
    }

    fn translate(&mut self, offset: Vec2) {
        CanvasRenderingContext2d::translate(self, offset.x as f64, offset.y as f64).ok();
    }

    fn rotate(&mut self, angle: f32) {
        CanvasRenderingContext2d::rotate(self, angle as f64).ok();
    }

    fn set_alpha(&mut self, alpha: f32) {
        let current = self.global_alpha();
        self.set_global_alpha(current * alpha as f64);
    }

    fn set_fill(&mut self, color: Color) {
        self.set_fill_style_str(&css(color));
    }

    fn set_stroke(&mut self, color: Color, width: f32) {
        self.set_stroke_style_str(&css(color));
        self.set_line_width(width as f64);
    }

    fn fill_rect(&mut self, pos: Vec2, size: Vec2) {
        CanvasRenderingContext2d::fill_rect(
            self,
            pos.x as f64,
            pos.y as f64,
            size.x as f64,
            size.y as f64,
        );
    }

    fn fill_rect_gradient(&mut self, pos: Vec2, size: Vec2, top: Color, bottom: Color) {
        let gradient = self.create_linear_gradient(
            0.0,
            pos.y as f64,
            0.0,
            (pos.y + size.y) as f64,
        );
        gradient.add_color_stop(0.0, &css(top)).ok();
        gradient.add_color_stop(1.0, &css(bottom)).ok();
        self.set_fill_style_canvas_gradient(&gradient);
        CanvasRenderingContext2d::fill_rect(
            self,
            pos.x as f64,
            pos.y as f64,
            size.x as f64,
            size.y as f64,
        );
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, rotation: f32) {
        self.begin_path();
        if self
            .ellipse(
                center.x as f64,
                center.y as f64,
                radii.x.max(0.0) as f64,
                radii.y.max(0.0) as f64,
                rotation as f64,
                0.0,
                std::f64::consts::TAU,
            )
            .is_ok()
        {
            self.fill();
        }
    }

    fn fill_polygon(&mut self, points: &[Vec2]) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.begin_path();
        self.move_to(first.x as f64, first.y as f64);
        for p in rest {
            self.line_to(p.x as f64, p.y as f64);
        }
        self.close_path();
        self.fill();
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2) {
        self.begin_path();
        self.move_to(from.x as f64, from.y as f64);
        self.line_to(to.x as f64, to.y as f64);
        self.stroke();
    }

    fn stroke_arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32) {
        self.begin_path();
        if self
            .arc(
                center.x as f64,
                center.y as f64,
                radius as f64,
                start as f64,
                end as f64,
            )
            .is_ok()
        {
            self.stroke();
        }
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, size_px: f32, align: TextAlign) {
        self.set_font(&format!("bold {}px Arial", size_px.round()));
        self.set_text_align(match align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        });
        CanvasRenderingContext2d::fill_text(self, text, pos.x as f64, pos.y as f64).ok();
    }
}
