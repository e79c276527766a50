//! Nian Blast entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlInputElement};

    use nian_blast::consts::*;
    use nian_blast::render::CanvasRenderer;
    use nian_blast::sim::{Direction, GameEvent, GamePhase, GameState, TickInput, tick};
    use nian_blast::{HighScores, Settings, canvas_size};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: CanvasRenderer,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        settings: Settings,
        highscores: HighScores,
        /// Set once the run's final score has been recorded
        score_recorded: bool,
    }

    impl Game {
        fn new(seed: u64, renderer: CanvasRenderer) -> Self {
            Self {
                state: GameState::new(seed),
                renderer,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                settings: Settings::load(),
                highscores: HighScores::load(),
                score_recorded: false,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input;
                let events = tick(&mut self.state, &input);
                self.accumulator -= SIM_DT;
                substeps += 1;

                self.renderer.handle_events(&events, &self.settings);
                for event in &events {
                    match event {
                        GameEvent::Won => log::info!("Maze cleared, score {}", self.state.score),
                        GameEvent::PlayerDied => log::info!("Run over, score {}", self.state.score),
                        GameEvent::EnemyDefeated { row, col } => {
                            log::debug!("Nian defeated at ({row}, {col})")
                        }
                        _ => {}
                    }
                }

                // Clear one-shot inputs after processing
                self.input.step = None;
                self.input.place_bomb = false;
                self.input.pause = false;
            }

            // Record the final score once the run ends
            if !self.score_recorded
                && matches!(self.state.phase, GamePhase::Won | GamePhase::Lost)
            {
                let won = self.state.phase == GamePhase::Won;
                let now = js_sys::Date::now();
                if let Some(rank) = self.highscores.add_score(self.state.score, won, now) {
                    log::info!("New high score rank {rank}");
                    self.highscores.save();
                }
                self.score_recorded = true;
            }
        }

        /// Render the current frame
        fn render(&mut self, time: f64) {
            self.renderer.render(&self.state, time, &self.settings);
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            if let Some(el) = document.get_element_by_id("hud-score") {
                el.set_text_content(Some(&self.state.score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("hud-enemies") {
                el.set_text_content(Some(&self.state.enemies.len().to_string()));
            }
            if let Some(el) = document.get_element_by_id("hud-best") {
                let best = self.highscores.top_score().unwrap_or(0);
                el.set_text_content(Some(&best.to_string()));
            }

            // Pause overlay
            if let Some(el) = document.get_element_by_id("pause-overlay") {
                let class = if self.state.phase == GamePhase::Paused {
                    ""
                } else {
                    "hidden"
                };
                let _ = el.set_attribute("class", class);
            }

            // End-of-run overlay
            if let Some(el) = document.get_element_by_id("game-over") {
                match self.state.phase {
                    GamePhase::Won | GamePhase::Lost => {
                        let _ = el.set_attribute("class", "");
                        if let Some(title) = document.get_element_by_id("game-over-title") {
                            let text = if self.state.phase == GamePhase::Won {
                                "🎉 年兽已除，新春快乐！"
                            } else {
                                "💥 被年兽抓住了！"
                            };
                            title.set_text_content(Some(text));
                        }
                        if let Some(score_el) = document.get_element_by_id("final-score") {
                            score_el.set_text_content(Some(&self.state.score.to_string()));
                        }
                    }
                    _ => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }
        }

        /// Reset game state for restart
        fn restart(&mut self, seed: u64) {
            self.state = GameState::new(seed);
            self.accumulator = 0.0;
            self.input = TickInput::default();
            self.score_recorded = false;
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Nian Blast starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Fixed board size, scaled for high-DPI displays
        let dpr = window.device_pixel_ratio();
        let (css_w, css_h) = canvas_size();
        canvas.set_width((css_w as f64 * dpr) as u32);
        canvas.set_height((css_h as f64 * dpr) as u32);
        let _ = canvas
            .style()
            .set_property("width", &format!("{css_w}px"));
        let _ = canvas
            .style()
            .set_property("height", &format!("{css_h}px"));

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("get_context failed")
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let renderer = CanvasRenderer::new(ctx, dpr);
        let game = Rc::new(RefCell::new(Game::new(seed, renderer)));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        setup_restart_button(game.clone());
        setup_settings_controls(game.clone());
        setup_auto_pause(game.clone());

        request_animation_frame(game);

        log::info!("Nian Blast running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let mut g = game.borrow_mut();
            let key = event.key();
            let step = match key.as_str() {
                "ArrowUp" | "w" | "W" => Some(Direction::Up),
                "ArrowDown" | "s" | "S" => Some(Direction::Down),
                "ArrowLeft" | "a" | "A" => Some(Direction::Left),
                "ArrowRight" | "d" | "D" => Some(Direction::Right),
                _ => None,
            };
            if let Some(dir) = step {
                event.prevent_default();
                g.input.step = Some(dir);
                return;
            }
            match key.as_str() {
                " " => {
                    event.prevent_default();
                    g.input.place_bomb = true;
                }
                "Escape" | "p" | "P" => g.input.pause = true,
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render(time);
            g.update_hud();
        }

        request_animation_frame(game);
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                game.borrow_mut().restart(seed);
                log::info!("Game restarted with seed: {}", seed);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_settings_controls(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        type Getter = fn(&Settings) -> bool;
        type Setter = fn(&mut Settings, bool);
        let bindings: [(&str, Getter, Setter); 5] = [
            (
                "setting-floating-text",
                |s| s.floating_text,
                |s, v| s.floating_text = v,
            ),
            (
                "setting-win-particles",
                |s| s.win_particles,
                |s, v| s.win_particles = v,
            ),
            (
                "setting-grid-lines",
                |s| s.grid_lines,
                |s, v| s.grid_lines = v,
            ),
            (
                "setting-auto-pause",
                |s| s.auto_pause,
                |s, v| s.auto_pause = v,
            ),
            (
                "setting-reduced-motion",
                |s| s.reduced_motion,
                |s, v| s.reduced_motion = v,
            ),
        ];

        for (id, get, set) in bindings {
            let Some(input) = document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            else {
                continue;
            };
            input.set_checked(get(&game.borrow().settings));

            let game = game.clone();
            let input_clone = input.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                set(&mut g.settings, input_clone.checked());
                g.settings.save();
                log::info!("Setting {id} changed");
            });
            let _ =
                input.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.settings.auto_pause && g.state.phase == GamePhase::Playing {
                        g.input.pause = true;
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.settings.auto_pause && g.state.phase == GamePhase::Playing {
                    g.input.pause = true;
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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
    log::info!("Nian Blast (native) starting...");
    log::info!("Rendering requires a browser - run with `trunk serve` for the web version");

    // Headless smoke run: tick a fresh game for a few seconds of sim time
    use nian_blast::consts::SIM_DT;
    use nian_blast::sim::{GamePhase, GameState, TickInput, tick};

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut state = GameState::new(seed);
    log::info!("Headless run with seed {seed}");

    let input = TickInput::default();
    let mut ticks = 0u32;
    while state.phase == GamePhase::Playing && ticks < 600 {
        tick(&mut state, &input);
        ticks += 1;
    }
    log::info!(
        "Simulated {:.1}s: phase {:?}, {} enemies, score {}",
        ticks as f32 * SIM_DT,
        state.phase,
        state.enemies.len(),
        state.score
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
