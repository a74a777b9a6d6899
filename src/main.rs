//! Maze Raider entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent};

    use maze_raider::audio::WebAudio;
    use maze_raider::renderer::hud::{HEALTH_ELEMENT, LEVEL_ELEMENT, SCORE_ELEMENT};
    use maze_raider::renderer::{HudText, RenderState};
    use maze_raider::{FrameOutcome, GameConfig, GameError, GameLoop, GameResult};

    const CANVAS_ID: &str = "gameCanvas";
    const START_BUTTON_ID: &str = "start-btn";
    const BANNER_ID: &str = "banner";

    /// Game instance holding all state
    struct Game {
        game: GameLoop,
        render_state: Option<RenderState>,
        audio: WebAudio,
        /// Set once a terminal frame has been shown
        finished: bool,
    }

    impl Game {
        fn new(config: GameConfig, seed: u64) -> Self {
            let audio = WebAudio::new(config.effective_volume());
            Self {
                game: GameLoop::new(config, seed),
                render_state: None,
                audio,
                finished: false,
            }
        }

        fn render(&mut self) {
            if let Some(render_state) = self.render_state.as_mut() {
                if let Err(e) = render_state.render(&self.game.snapshot()) {
                    log::warn!("Render error: {}", e);
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            let hud = HudText::from_snapshot(&self.game.snapshot());

            if let Some(el) = document.get_element_by_id(HEALTH_ELEMENT) {
                el.set_text_content(Some(&hud.health));
            }
            if let Some(el) = document.get_element_by_id(SCORE_ELEMENT) {
                el.set_text_content(Some(&hud.score));
            }
            if let Some(el) = document.get_element_by_id(LEVEL_ELEMENT) {
                el.set_text_content(Some(&hud.level));
            }
            if let Some(el) = document.get_element_by_id(BANNER_ID) {
                match hud.banner {
                    Some(text) => {
                        el.set_text_content(Some(text));
                        let _ = el.set_attribute("class", "");
                    }
                    None => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }
        }

        /// In-place restart
        fn restart(&mut self, seed: u64) {
            self.game.restart(seed);
            self.finished = false;
        }
    }

    fn page_document() -> GameResult<Document> {
        web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| GameError::Render("no document".into()))
    }

    fn set_display(document: &Document, id: &str, value: &str) {
        let Some(el) = document.get_element_by_id(id) else {
            log::warn!("Element #{} missing", id);
            return;
        };
        if let Ok(el) = el.dyn_into::<HtmlElement>() {
            let _ = el.style().set_property("display", value);
        }
    }

    pub async fn run() -> GameResult<()> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {e}").into());
        }

        log::info!("Maze Raider starting...");

        let document = page_document()?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| GameError::Render(format!("no #{CANVAS_ID} element")))?
            .dyn_into()
            .map_err(|_| GameError::Render(format!("#{CANVAS_ID} is not a canvas")))?;

        let config = GameConfig::default();
        canvas.set_width(config.viewport_width as u32);
        canvas.set_height(config.viewport_height as u32);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| GameError::Render(format!("surface: {e}")))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| GameError::Render(format!("adapter: {e}")))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(
            surface,
            &adapter,
            config.viewport_width as u32,
            config.viewport_height as u32,
        )
        .await?;

        setup_start_button(&document, &canvas, config, render_state);

        log::info!("Maze Raider ready, waiting for start");
        Ok(())
    }

    /// Clicking start hides the button, shows the canvas and begins the loop.
    /// A later click restarts in place.
    fn setup_start_button(
        document: &Document,
        canvas: &HtmlCanvasElement,
        config: GameConfig,
        render_state: RenderState,
    ) {
        let Some(btn) = document.get_element_by_id(START_BUTTON_ID) else {
            log::error!("No #{} button, cannot start", START_BUTTON_ID);
            return;
        };

        let canvas = canvas.clone();
        let mut pending = Some((config, render_state));
        let mut running: Option<Rc<RefCell<Game>>> = None;

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let Ok(document) = page_document() else { return };
            set_display(&document, START_BUTTON_ID, "none");
            set_display(&document, CANVAS_ID, "block");

            let seed = js_sys::Date::now() as u64;
            if let Some(game) = &running {
                let mut g = game.borrow_mut();
                let was_finished = g.finished;
                g.restart(seed);
                drop(g);
                if was_finished {
                    request_animation_frame(game.clone());
                }
                return;
            }

            let Some((config, render_state)) = pending.take() else {
                return;
            };
            let mut g = Game::new(config, seed);
            g.render_state = Some(render_state);
            g.audio.resume();
            let game = Rc::new(RefCell::new(g));

            setup_input_handlers(&canvas, game.clone());
            request_animation_frame(game.clone());
            running = Some(game);
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Keyboard down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().game.input.key_down(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().game.input.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer, in canvas coordinates scaled to the logical view
        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                if rect.width() <= 0.0 || rect.height() <= 0.0 {
                    return;
                }
                let mut g = game.borrow_mut();
                let view = g.game.world.camera.size;
                let x = (event.client_x() as f64 - rect.left()) / rect.width() * view.x as f64;
                let y = (event.client_y() as f64 - rect.top()) / rect.height() * view.y as f64;
                g.game.input.pointer_moved(x as f32, y as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// One tick and one render per callback; stops rescheduling at the end
    fn game_loop(game: Rc<RefCell<Game>>) {
        let outcome = {
            let mut g = game.borrow_mut();
            let Game {
                game: inner, audio, ..
            } = &mut *g;
            let outcome = inner.frame(audio);

            g.render();
            if let Ok(document) = page_document() {
                g.update_hud(&document);
            }
            if matches!(outcome, FrameOutcome::Finished { .. }) {
                g.finished = true;
            }
            outcome
        };

        match outcome {
            FrameOutcome::Continue => request_animation_frame(game),
            FrameOutcome::Finished { banner } => {
                log::info!("{}", banner);
                if let Ok(document) = page_document() {
                    set_display(&document, START_BUTTON_ID, "block");
                }
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use maze_raider::audio::SilentAudio;
    use maze_raider::{FrameOutcome, GameConfig, GameLoop};

    env_logger::init();
    log::info!("Maze Raider (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    let seed = std::env::var("MAZE_RAIDER_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);

    let mut game = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| GameLoop::from_config_json(&json, seed).map_err(|e| e.to_string()))
        {
            Ok(game) => game,
            Err(e) => {
                log::error!("Could not load config {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => GameLoop::new(GameConfig::default(), seed),
    };
    let mut audio = SilentAudio::default();

    // Scripted wander: sweep right and down, swinging every half second
    const DEMO_FRAMES: u64 = 60 * 60;
    let mut outcome = FrameOutcome::Continue;
    for frame in 0..DEMO_FRAMES {
        let phase = (frame / 120) % 4;
        let input = &mut game.input;
        input.key_up("ArrowRight");
        input.key_up("ArrowDown");
        input.key_up("ArrowLeft");
        input.key_up("ArrowUp");
        input.key_down(match phase {
            0 => "ArrowRight",
            1 => "ArrowDown",
            2 => "ArrowLeft",
            _ => "ArrowUp",
        });
        if frame % 30 == 0 {
            input.key_down(" ");
        }
        outcome = game.frame(&mut audio);
        if outcome != FrameOutcome::Continue {
            break;
        }
    }

    let snapshot = game.snapshot();
    println!(
        "level {} | health {} | score {} | {} frames | {:?}",
        snapshot.level, snapshot.player.health, snapshot.player.score, game.frames, outcome
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
