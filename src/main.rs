//! Star Dodger entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, Window};

    use star_dodger::audio::AudioManager;
    use star_dodger::consts::*;
    use star_dodger::renderer::{CanvasSurface, build_frame, present};
    use star_dodger::sim::{FrameClock, GameEvent, GameState};
    use star_dodger::{KeyState, Tuning};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        clock: FrameClock,
        keys: KeyState,
        surface: CanvasSurface,
        audio: AudioManager,
        last_time: f64,
    }

    impl Game {
        /// Run simulation ticks for the time since the last frame
        fn update(&mut self, elapsed_ms: f64) {
            let input = self.keys.snapshot();
            let events = self.clock.advance(&mut self.state, &input, elapsed_ms);
            for event in &events {
                self.audio.play_event(event);
                if let GameEvent::GameOver { score } = event {
                    log::info!("Final score: {}", score);
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let frame = build_frame(&self.state);
            present(&frame, &mut self.surface);
        }
    }

    /// Optional `<script type="application/json" id="tuning">` override
    fn load_tuning(document: &Document) -> Tuning {
        let Some(json) = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        else {
            return Tuning::default();
        };

        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning override");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning override: {}", e);
                Tuning::default()
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Star Dodger starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or_else(|| JsValue::from_str("no #gameCanvas element"))?
            .dyn_into()?;
        let surface =
            CanvasSurface::new(&canvas, PLAYFIELD_WIDTH as u32, PLAYFIELD_HEIGHT as u32)?;

        let seed = js_sys::Date::now() as u64;
        let tuning = load_tuning(&document);
        let game = Rc::new(RefCell::new(Game {
            state: GameState::with_tuning(seed, tuning),
            clock: FrameClock::default(),
            keys: KeyState::new(),
            surface,
            audio: AudioManager::new(),
            last_time: 0.0,
        }));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&window, game.clone())?;

        // Start game loop
        request_animation_frame(game);

        log::info!("Star Dodger running!");
        Ok(())
    }

    fn setup_input_handlers(window: &Window, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if KeyState::is_bound(&key) {
                    // Keep arrows and space from scrolling the page
                    event.prevent_default();
                }
                let mut g = game.borrow_mut();
                if !event.repeat() && (key == "m" || key == "M") {
                    let muted = g.audio.toggle_muted();
                    log::info!("Audio muted: {}", muted);
                }
                g.keys.press(&key);
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().keys.release(&event.key());
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Window blur: key-up events go elsewhere, so drop everything held
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().keys.release_all();
                log::debug!("Window blurred, released all keys");
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let elapsed_ms = if g.last_time > 0.0 {
                time - g.last_time
            } else {
                f64::from(TICK_MS)
            };
            g.last_time = time;

            g.update(elapsed_ms);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        web_sys::console::error_1(&e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Star Dodger (native) starting...");
    log::info!("Native mode runs a headless session - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);
    headless::run(seed, 120_000);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Autopilot session with no browser, useful for smoke-testing balance changes
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use star_dodger::consts::TICK_MS;
    use star_dodger::sim::{FrameClock, GameEvent, GameState, TickInput};

    /// Chase the nearest orb horizontally, shield when a rock is about to land
    fn autopilot(state: &GameState) -> TickInput {
        let player = &state.player.rect;
        let center = player.pos.x + player.size.x / 2.0;

        let target = state
            .orbs
            .iter()
            .max_by(|a, b| a.rect.pos.y.total_cmp(&b.rect.pos.y))
            .map(|orb| orb.rect.pos.x + orb.rect.size.x / 2.0);

        let threat = state.asteroids.iter().any(|rock| {
            let above = player.pos.y - rock.rect.max().y;
            let lined_up = rock.rect.pos.x < player.max().x && rock.rect.max().x > player.pos.x;
            lined_up && (0.0..60.0).contains(&above)
        });

        TickInput {
            left: target.is_some_and(|x| x < center - 5.0),
            right: target.is_some_and(|x| x > center + 5.0),
            shield: threat,
            ..Default::default()
        }
    }

    pub fn run(seed: u64, duration_ms: u64) {
        let mut state = GameState::new(seed);
        let mut clock = FrameClock::default();
        let (mut hits, mut orbs, mut shields) = (0u32, 0u32, 0u32);

        while state.now_ms < duration_ms && !state.game_over {
            let input = autopilot(&state);
            for event in clock.advance(&mut state, &input, f64::from(TICK_MS)) {
                match event {
                    GameEvent::ShieldRaised => shields += 1,
                    GameEvent::AsteroidHit { .. } => hits += 1,
                    GameEvent::OrbCollected { .. } => orbs += 1,
                    GameEvent::GameOver { .. } => {}
                }
            }
            if state.now_ms % 10_000 == 0 {
                log::info!(
                    "t={}s score={} lives={} asteroids={}",
                    state.now_ms / 1000,
                    state.score,
                    state.player.lives,
                    state.asteroids.len()
                );
            }
        }

        println!(
            "seed {}: {} after {:.1}s - score {}, {} orbs, {} hits, {} shields",
            seed,
            if state.game_over { "game over" } else { "survived" },
            state.now_ms as f64 / 1000.0,
            state.score,
            orbs,
            hits,
            shields
        );
    }
}
