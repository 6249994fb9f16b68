//! Jump & Survive entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use jump_survive::Settings;
    use jump_survive::input::{Command, KeyTracker, suppress_default};
    use jump_survive::renderer::CanvasRenderer;
    use jump_survive::sim::{Action, FrameScheduler, GamePhase, GameState, TickInput};

    const CANVAS_ID: &str = "game-canvas";
    const ORDER_URL: &str = "tel:+7-800-PAMYATNIK";

    /// Game instance holding all state
    struct Game {
        state: GameState,
        scheduler: FrameScheduler,
        settings: Settings,
        renderer: CanvasRenderer,
        input: TickInput,
        keys: KeyTracker,
        /// An animation frame is currently scheduled
        loop_running: bool,
        /// Phase the DOM overlays currently reflect
        shown_phase: Option<GamePhase>,
    }

    impl Game {
        fn new(seed: u64, settings: Settings, renderer: CanvasRenderer) -> Self {
            let input = TickInput {
                autopilot: settings.autopilot,
                ..Default::default()
            };
            Self {
                state: GameState::new(seed),
                scheduler: FrameScheduler::default(),
                settings,
                renderer,
                input,
                keys: KeyTracker::new(),
                loop_running: false,
                shown_phase: None,
            }
        }

        /// Run one scheduled frame
        fn update(&mut self, time: f64) {
            let input = self.input.clone();
            self.scheduler.on_frame(&mut self.state, &input, time);

            // Clear one-shot inputs after processing
            self.input.jump = false;
        }

        fn render(&self) {
            if let Err(e) = self.renderer.render(&self.state, &self.settings) {
                log::warn!("Render error: {:?}", e);
            }
        }

        /// Show/hide DOM overlays for the current phase
        fn update_hud(&mut self) {
            let phase = self.state.phase;
            if self.shown_phase == Some(phase) {
                return;
            }
            self.shown_phase = Some(phase);

            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            set_visible(&document, "menu-overlay", phase == GamePhase::Menu);
            set_visible(&document, "game-over-overlay", phase == GamePhase::GameOver);
            set_visible(&document, "discount-overlay", phase == GamePhase::Discount);
            set_visible(&document, "pause-btn", phase == GamePhase::Playing);

            if matches!(phase, GamePhase::GameOver | GamePhase::Discount) {
                if let Some(el) = document.get_element_by_id("final-score") {
                    el.set_text_content(Some(&self.state.display_score().to_string()));
                }
            }
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", !visible);
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Jump & Survive starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;
        let renderer = CanvasRenderer::new(&canvas)?;

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let game = Rc::new(RefCell::new(Game::new(seed, settings, renderer)));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&window, game.clone())?;
        setup_buttons(&document, game.clone())?;

        // Menu frame
        {
            let mut g = game.borrow_mut();
            g.render();
            g.update_hud();
        }

        log::info!("Jump & Survive ready");
        Ok(())
    }

    /// Apply a UI action and wake the loop if it changed anything
    fn dispatch(game: &Rc<RefCell<Game>>, action: Action) {
        let changed = game.borrow_mut().state.apply(action);
        if changed {
            {
                let mut g = game.borrow_mut();
                g.input.jump = false;
                g.update_hud();
                g.render();
            }
            ensure_loop(game);
        }
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                let command = {
                    let mut g = game.borrow_mut();
                    let phase = g.state.phase;
                    if suppress_default(&code, phase) {
                        event.prevent_default();
                    }
                    g.keys.key_down(&code, phase)
                };
                match command {
                    Some(Command::Jump) => game.borrow_mut().input.jump = true,
                    Some(Command::Action(action)) => dispatch(&game, action),
                    Some(Command::ToggleAutopilot) => {
                        let mut g = game.borrow_mut();
                        g.input.autopilot = !g.input.autopilot;
                        log::info!("Autopilot: {}", g.input.autopilot);
                    }
                    None => {}
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().keys.key_up(&event.code());
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Window blur drops held keys
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().keys.clear();
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let buttons = [
            ("start-btn", Action::StartGame),
            ("restart-btn", Action::Restart),
            ("close-discount-btn", Action::CloseDiscount),
            ("pause-btn", Action::Pause),
        ];

        for (id, action) in buttons {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Missing button #{}", id);
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                dispatch(&game, action);
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("order-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                if let Some(window) = web_sys::window() {
                    if let Err(e) = window.open_with_url_and_target(ORDER_URL, "_blank") {
                        log::warn!("Could not open order link: {:?}", e);
                    }
                }
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    /// Start requesting animation frames if the loop is stopped
    fn ensure_loop(game: &Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if g.loop_running || !g.scheduler.wants_frame(&g.state) {
                return;
            }
            g.loop_running = true;
            g.scheduler.resume();
        }
        request_animation_frame(game.clone());
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_running = {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
            g.update_hud();

            let keep = g.scheduler.wants_frame(&g.state);
            if !keep {
                g.loop_running = false;
                log::debug!("Frame loop stopped in {:?}", g.state.phase);
            }
            keep
        };

        if keep_running {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use jump_survive::sim::{FrameScheduler, GamePhase, GameState, TickInput};

    env_logger::init();
    log::info!("Jump & Survive (native) starting...");
    log::info!("Native mode runs a headless autopilot session - run with `trunk serve` for the web version");

    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let max_frames: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60 * 60);

    let mut state = GameState::new(seed);
    let mut scheduler = FrameScheduler::default();
    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };
    state.start_game();

    // Synthetic 60 Hz clock
    let frame_ms = 1000.0 / 60.0;
    let mut frames = 0u32;
    while frames < max_frames && scheduler.wants_frame(&state) {
        scheduler.on_frame(&mut state, &input, frames as f64 * frame_ms);
        frames += 1;
        if state.phase == GamePhase::Discount && !state.effects_active() {
            break;
        }
    }

    println!(
        "seed {}: {:?} after {} frames, score {}",
        seed,
        state.phase,
        frames,
        state.display_score()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
