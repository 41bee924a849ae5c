//! Pawlympics entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlInputElement, HtmlSelectElement};

    use pawlympics::audio::AudioManager;
    use pawlympics::consts::*;
    use pawlympics::platform::BrowserHost;
    use pawlympics::{Game, HighScores, Settings};

    type WebGame = Game<BrowserHost, AudioManager, HighScores>;

    struct App {
        game: WebGame,
        ctx: CanvasRenderingContext2d,
        /// Backing-store pixels per canvas unit
        scale: f64,
    }

    impl App {
        fn render(&mut self) {
            self.ctx
                .set_transform(self.scale, 0.0, 0.0, self.scale, 0.0, 0.0)
                .ok();
            self.game.draw(&mut self.ctx);
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Pawlympics starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()?;

        // Backing store at device resolution, drawing in game units
        let dpr = window.device_pixel_ratio();
        canvas.set_width((CANVAS_WIDTH as f64 * dpr) as u32);
        canvas.set_height((CANVAS_HEIGHT as f64 * dpr) as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .expect("no 2d context")
            .dyn_into()?;

        let settings = Settings::load();
        let scores = HighScores::load();
        let audio = AudioManager::new(settings.effective_volume());
        let host = BrowserHost::new(&canvas)?;

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App {
            game: Game::new(seed, settings, host, audio, scores),
            ctx,
            scale: dpr,
        }));

        setup_settings_controls(&document, app.clone())?;

        // Show HUD
        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        // Start game loop
        request_animation_frame(app);

        log::info!("Pawlympics running!");
        Ok(())
    }

    fn setup_settings_controls(
        document: &web_sys::Document,
        app: Rc<RefCell<App>>,
    ) -> Result<(), JsValue> {
        // Round count
        if let Some(el) = document.get_element_by_id("rounds-select") {
            let select: HtmlSelectElement = el.dyn_into()?;
            select.set_value(&app.borrow().game.settings().total_rounds.to_string());
            let app = app.clone();
            let select_clone = select.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if let Ok(rounds) = select_clone.value().parse::<u32>() {
                    app.borrow_mut().game.set_total_rounds(rounds);
                }
            });
            select.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Player name
        if let Some(el) = document.get_element_by_id("player-name") {
            let input: HtmlInputElement = el.dyn_into()?;
            input.set_value(&app.borrow().game.settings().player_name);
            let app_name = app.clone();
            let input_clone = input.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app_name.borrow_mut().game.set_player_name(&input_clone.value());
            });
            input.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())?;
            closure.forget();

            // Suggest known players while typing
            if let Some(list) = document.get_element_by_id("player-suggestions") {
                let app = app.clone();
                let document = document.clone();
                let input_clone = input.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                    list.set_inner_html("");
                    let app = app.borrow();
                    let query = input_clone.value();
                    for name in app.game.scores().matching_players(&query).into_iter().take(5) {
                        if let Ok(option) = document.create_element("option") {
                            option.set_attribute("value", name).ok();
                            list.append_child(&option).ok();
                        }
                    }
                });
                input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())?;
                closure.forget();
            }
        }

        // Mute
        if let Some(btn) = document.get_element_by_id("mute-btn") {
            let btn_clone = btn.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut app = app.borrow_mut();
                app.game.audio_mut().resume();
                let muted = app.game.toggle_mute();
                btn_clone.set_text_content(Some(if muted { "Unmute" } else { "Mute" }));
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>) {
        {
            let mut app = app.borrow_mut();
            app.game.frame();
            app.render();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

/// Headless run: plays demo games on a manual clock and logs the results
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use pawlympics::audio::SilentAudio;
    use pawlympics::consts::{MAX_TOTAL_ROUNDS, SIM_DT};
    use pawlympics::platform::{InputEvent, ManualHost};
    use pawlympics::{Game, HighScores, Settings};

    env_logger::init();
    log::info!("Pawlympics (native) starting...");
    log::info!("Native mode runs headless demo games - use the web build to play");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let games: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(3);

    let mut settings = Settings::load();
    settings.set_player_name("Demo");
    let rounds = settings.total_rounds.min(MAX_TOTAL_ROUNDS);

    let mut game = Game::new(seed, settings, ManualHost::new(), SilentAudio, HighScores::new());
    game.host_mut().push(InputEvent::ToggleDemo);

    let frame_ms = SIM_DT as f64 * 1000.0;
    let mut finished = 0;
    let mut was_over = false;
    // Generous cap: a round never takes more than a few thousand ticks
    let max_frames = 5000 * rounds as u64 * games as u64;

    for _ in 0..max_frames {
        game.host_mut().advance(frame_ms);
        game.frame();

        let over = game.state().is_game_over();
        if over && !was_over {
            finished += 1;
            let state = game.state();
            println!(
                "game {finished}: {} points, {}/{} hurdles",
                state.score, state.successful_rounds, state.config.total_rounds
            );
            if finished >= games {
                break;
            }
        }
        was_over = over;
    }

    log::info!("Played {finished} demo game(s) with seed {seed}");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
