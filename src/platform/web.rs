//! Browser host: DOM listeners feed an input queue, the HUD is plain DOM

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, PointerEvent, TouchEvent};

use super::{Host, InputEvent, Panel};
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};

type InputQueue = Rc<RefCell<VecDeque<InputEvent>>>;

pub struct BrowserHost {
    document: Document,
    performance: Option<web_sys::Performance>,
    queue: InputQueue,
    last_panel: Option<Panel>,
}

impl BrowserHost {
    /// Attach input listeners to the canvas, the window and the restart button
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let queue: InputQueue = Rc::new(RefCell::new(VecDeque::new()));

        setup_pointer(canvas, &queue)?;
        setup_touch(canvas, &queue)?;
        setup_keyboard(&window, &queue)?;
        setup_buttons(&document, &queue)?;

        Ok(Self {
            document,
            performance: window.performance(),
            queue,
            last_panel: None,
        })
    }

    fn set_text(&self, selector: &str, text: &str) {
        if let Some(el) = self.document.query_selector(selector).ok().flatten() {
            el.set_text_content(Some(text));
        }
    }

    fn set_class(&self, id: &str, class: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            let _ = el.set_attribute("class", class);
        }
    }

    fn render_leaderboard(&self, panel: &Panel) {
        let Some(list) = self.document.get_element_by_id("leaderboard") else {
            return;
        };
        list.set_inner_html("");
        for (rank, entry) in panel.leaderboard.iter().enumerate() {
            if let Ok(item) = self.document.create_element("li") {
                item.set_text_content(Some(&format!(
                    "{}. {} - {}",
                    rank + 1,
                    entry.player_name,
                    entry.score
                )));
                let _ = list.append_child(&item);
            }
        }
    }
}

impl Host for BrowserHost {
    fn now(&self) -> f64 {
        self.performance
            .as_ref()
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn drain_input(&mut self) -> Vec<InputEvent> {
        self.queue.borrow_mut().drain(..).collect()
    }

    fn update_panel(&mut self, panel: &Panel) {
        if self.last_panel.as_ref() == Some(panel) {
            return;
        }

        self.set_text("#hud-score .hud-value", &panel.score.to_string());
        self.set_text(
            "#hud-round .hud-value",
            &format!("{}/{}", panel.round, panel.total_rounds),
        );
        self.set_text("#hud-status", &panel.status());
        self.set_class("hud-signal", &format!("signal {}", panel.signal.as_str()));
        self.set_class("demo-badge", if panel.demo { "" } else { "hidden" });

        if panel.game_over {
            self.set_class("game-over", "");
            self.set_text("#final-score", &panel.score.to_string());
            self.set_text(
                "#final-rounds",
                &format!("{}/{}", panel.successful_rounds, panel.total_rounds),
            );
            if self.last_panel.as_ref().map(|p| &p.leaderboard) != Some(&panel.leaderboard) {
                self.render_leaderboard(panel);
            }
        } else {
            self.set_class("game-over", "hidden");
        }

        self.last_panel = Some(panel.clone());
    }
}

/// Map client pixels to canvas coordinates
fn to_canvas(canvas: &HtmlCanvasElement, x: f32, y: f32) -> Vec2 {
    let w = canvas.client_width().max(1) as f32;
    let h = canvas.client_height().max(1) as f32;
    Vec2::new(x * CANVAS_WIDTH / w, y * CANVAS_HEIGHT / h)
}

fn setup_pointer(canvas: &HtmlCanvasElement, queue: &InputQueue) -> Result<(), JsValue> {
    // Pointer move aims the shield
    {
        let queue = queue.clone();
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
            let pos = to_canvas(&canvas_clone, event.offset_x() as f32, event.offset_y() as f32);
            queue.borrow_mut().push_back(InputEvent::Aim(pos));
        });
        canvas.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Pointer down commits
    {
        let queue = queue.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
            queue.borrow_mut().push_back(InputEvent::Commit);
        });
        canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}

fn setup_touch(canvas: &HtmlCanvasElement, queue: &InputQueue) -> Result<(), JsValue> {
    // Keep the page from scrolling while aiming
    let queue = queue.clone();
    let canvas_clone = canvas.clone();
    let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
        event.prevent_default();
        if let Some(touch) = event.touches().get(0) {
            let rect = canvas_clone.get_bounding_client_rect();
            let x = touch.client_x() as f32 - rect.left() as f32;
            let y = touch.client_y() as f32 - rect.top() as f32;
            queue
                .borrow_mut()
                .push_back(InputEvent::Aim(to_canvas(&canvas_clone, x, y)));
        }
    });
    canvas.add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn setup_keyboard(window: &web_sys::Window, queue: &InputQueue) -> Result<(), JsValue> {
    let queue = queue.clone();
    let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
        let input = match event.key().as_str() {
            " " => Some(InputEvent::Commit),
            "Enter" | "r" | "R" => Some(InputEvent::Restart),
            "d" | "D" => Some(InputEvent::ToggleDemo),
            _ => None,
        };
        if let Some(input) = input {
            event.prevent_default();
            queue.borrow_mut().push_back(input);
        }
    });
    window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn setup_buttons(document: &Document, queue: &InputQueue) -> Result<(), JsValue> {
    for (id, input) in [
        ("restart-btn", InputEvent::Restart),
        ("demo-btn", InputEvent::ToggleDemo),
    ] {
        if let Some(btn) = document.get_element_by_id(id) {
            let queue = queue.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                queue.borrow_mut().push_back(input);
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
    }
    Ok(())
}
