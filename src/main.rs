//! Memory Match entry point
//!
//! Handles platform-specific initialization and wires the game and backdrop
//! loops to the page.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent, PageTransitionEvent};

    use memory_match::Settings;
    use memory_match::backdrop::{Bounds, ParticleField};
    use memory_match::consts::*;
    use memory_match::platform::{FrameLoop, classify, input::describe};
    use memory_match::renderer::{BackdropRenderer, BoardView};
    use memory_match::sim::{ClickTarget, GameState, SYMBOLS, TickInput, tick};

    /// Game instance: state plus the DOM it drives
    struct Game {
        state: GameState,
        view: BoardView,
        /// `Date.now()` at load; game time is measured from here
        origin: f64,
    }

    impl Game {
        fn now_ms(&self) -> u64 {
            (js_sys::Date::now() - self.origin).max(0.0) as u64
        }

        /// Apply input, fire due timers and render what changed
        fn pump(&mut self, input: &TickInput) {
            let now = self.now_ms();
            tick(&mut self.state, input, now);
            let events = self.state.drain_events();
            self.view.apply_all(&events);
        }
    }

    /// Backdrop instance: particle field plus its canvas
    struct Backdrop {
        field: ParticleField,
        renderer: BackdropRenderer,
    }

    impl Backdrop {
        fn frame(&mut self) {
            self.field.step();
            if let Err(e) = self.renderer.draw(&self.field) {
                log::warn!("Backdrop draw failed: {:?}", e);
            }
        }
    }

    fn viewport() -> (u32, u32) {
        let window = web_sys::window().unwrap();
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        (w as u32, h as u32)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Memory Match starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let settings = match Settings::load(&document) {
            Ok(settings) => Some(settings),
            Err(e) => {
                log::error!("{}", e);
                None
            }
        };
        let seed = settings
            .as_ref()
            .and_then(|s| s.seed)
            .unwrap_or_else(|| js_sys::Date::now() as u64);

        // Backdrop runs regardless of whether the board could be dealt
        let particle_count = settings
            .as_ref()
            .map(|s| s.particle_count())
            .unwrap_or(PARTICLE_COUNT);
        let frame_loop = match start_backdrop(&document, particle_count, seed) {
            Ok(frame_loop) => frame_loop,
            Err(e) => {
                log::warn!("Backdrop disabled: {:?}", e);
                None
            }
        };

        let pump_id = match settings.map(|s| start_game(&document, s.dimension, seed)) {
            Some(Ok(pump_id)) => Some(pump_id),
            Some(Err(e)) => {
                log::error!("Board setup failed: {:?}", e);
                None
            }
            None => None,
        };

        setup_teardown(frame_loop, pump_id);

        log::info!("Memory Match running!");
    }

    /// Deal the board, mount it and wire clicks and the timer pump.
    /// Returns the pump interval id.
    fn start_game(document: &web_sys::Document, dimension: u32, seed: u64) -> Result<i32, JsValue> {
        let state = GameState::with_seed(dimension, &SYMBOLS, seed)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let view = BoardView::mount(document, &state.board)?;
        log::info!("Dealt {}x{} board with seed: {}", dimension, dimension, seed);

        let game = Rc::new(RefCell::new(Game {
            state,
            view,
            origin: js_sys::Date::now(),
        }));

        setup_click_handler(document, game.clone())?;
        setup_timer_pump(game)
    }

    fn setup_click_handler(document: &web_sys::Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let Some(element) = event
                .target()
                .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            else {
                return;
            };

            let target = classify(&describe(&element));
            if target != ClickTarget::Other {
                game.borrow_mut().pump(&TickInput::click(target));
            }
        });
        document.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    /// Fire due game timers from a short host interval
    fn setup_timer_pump(game: Rc<RefCell<Game>>) -> Result<i32, JsValue> {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut()>::new(move || {
            game.borrow_mut().pump(&TickInput::default());
        });
        let id = window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            TIMER_PUMP_MS,
        )?;
        closure.forget();
        Ok(id)
    }

    /// Spawn the particle field, follow viewport resizes and start the frame
    /// loop. Returns `None` when the backdrop is disabled.
    fn start_backdrop(
        document: &web_sys::Document,
        count: usize,
        seed: u64,
    ) -> Result<Option<FrameLoop>, JsValue> {
        if count == 0 {
            log::info!("Backdrop disabled by settings");
            return Ok(None);
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;

        let renderer = BackdropRenderer::new(canvas)?;
        let (width, height) = viewport();
        renderer.resize(width, height)?;
        renderer.paint_background()?;

        let bounds = Bounds {
            width: width as f32,
            height: height as f32,
        };
        let backdrop = Rc::new(RefCell::new(Backdrop {
            field: ParticleField::new(count, bounds, seed.rotate_left(17)),
            renderer,
        }));
        log::info!("Backdrop initialized with {} particles", count);

        setup_resize_handler(backdrop.clone())?;

        let frame_loop = FrameLoop::start(move |_time: f64| {
            backdrop.borrow_mut().frame();
        })?;
        Ok(Some(frame_loop))
    }

    fn setup_resize_handler(backdrop: Rc<RefCell<Backdrop>>) -> Result<(), JsValue> {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (width, height) = viewport();
            let mut b = backdrop.borrow_mut();
            if let Err(e) = b.renderer.resize(width, height) {
                log::warn!("Canvas resize failed: {:?}", e);
            }
            b.field.resize(width as f32, height as f32);
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    /// Stop the frame loop and timer pump when the page is unloaded for good
    fn setup_teardown(frame_loop: Option<FrameLoop>, pump_id: Option<i32>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: PageTransitionEvent| {
            // Pages entering the back/forward cache may come back
            if event.persisted() {
                return;
            }
            if let Some(frame_loop) = &frame_loop {
                frame_loop.stop();
            }
            if let Some(id) = pump_id {
                if let Some(window) = web_sys::window() {
                    window.clear_interval_with_handle(id);
                }
            }
            log::info!("Memory Match torn down");
        });
        if let Err(e) = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref()) {
            log::warn!("Teardown handler not registered: {:?}", e);
            return;
        }
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Memory Match (native) starting...");
    log::info!("Native mode has no display - run with `trunk serve` for the web version");

    let settings = memory_match::Settings {
        seed: Some(12345),
        ..Default::default()
    };
    if let Err(e) = play_headless(&settings) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
    run_backdrop_frames(&settings, 600);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play a perfect-memory game against virtual time and print the summary
#[cfg(not(target_arch = "wasm32"))]
fn play_headless(settings: &memory_match::Settings) -> Result<(), memory_match::sim::BoardError> {
    use memory_match::consts::REVEAL_DELAY_MS;
    use memory_match::sim::{CardFace, ClickTarget, GameState, SYMBOLS, TickInput, tick};

    let seed = settings.seed.unwrap_or(0);
    let mut state = GameState::with_seed(settings.dimension, &SYMBOLS, seed)?;
    let mut now = 0;

    while let Some(first) = state.board.cards.iter().position(|c| c.face == CardFace::Down) {
        let symbol = state.board.cards[first].symbol;
        let Some(second) = (first + 1..state.board.len()).find(|&i| state.board.cards[i].symbol == symbol)
        else {
            break;
        };

        tick(&mut state, &TickInput::click(ClickTarget::Card(first)), now);
        now += 400;
        tick(&mut state, &TickInput::click(ClickTarget::Card(second)), now);
        now += REVEAL_DELAY_MS;
        tick(&mut state, &TickInput::default(), now);
    }

    match state.summary {
        Some(summary) => {
            log::info!("Headless game finished at {} ms", now);
            println!(
                "{}",
                serde_json::to_string(&summary).unwrap_or_else(|_| format!("{:?}", summary))
            );
        }
        None => log::warn!("Headless game ended without a win"),
    }
    Ok(())
}

/// Step a backdrop at 720p and report how many particles ended on screen
#[cfg(not(target_arch = "wasm32"))]
fn run_backdrop_frames(settings: &memory_match::Settings, frames: u32) {
    use memory_match::backdrop::{Bounds, ParticleField};

    let bounds = Bounds {
        width: 1280.0,
        height: 720.0,
    };
    let mut field = ParticleField::new(settings.particle_count(), bounds, settings.seed.unwrap_or(0));
    for _ in 0..frames {
        field.step();
    }

    let on_screen = field
        .particles
        .iter()
        .filter(|p| p.pos.x >= 0.0 && p.pos.x <= bounds.width && p.pos.y >= 0.0 && p.pos.y <= bounds.height)
        .count();
    log::info!(
        "Backdrop: {}/{} particles on screen after {} frames",
        on_screen,
        field.len(),
        field.frames()
    );
}
