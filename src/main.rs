//! Gap Runner entry point
//!
//! On the web this wires the game to the page and runs the frame loop.
//! Natively it plays a headless autopilot session through the same driver.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use gap_runner::audio::AudioManager;
    use gap_runner::consts::*;
    use gap_runner::driver::{LoopTicket, StepControl};
    use gap_runner::platform::web::{DomPresentation, LocalStorageStore};
    use gap_runner::renderer::CanvasSurface;
    use gap_runner::sim::{GamePhase, SeededGaps};
    use gap_runner::{Game, Settings, Tuning};

    type WebGame = Game<LocalStorageStore, AudioManager, DomPresentation>;

    /// Game plus the surface it draws to
    struct App {
        game: WebGame,
        surface: CanvasSurface,
    }

    impl App {
        fn render(&mut self) {
            self.game.render(&mut self.surface);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Gap Runner starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Device profile is decided once, here
        let viewport_width = window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(f64::from(FIELD_WIDTH) + 1.0);
        let tuning = Tuning::for_viewport(viewport_width);
        let settings = Settings::load();

        let Some(surface) =
            CanvasSurface::new(&canvas, &document, FIELD_WIDTH as u32, FIELD_HEIGHT as u32)
        else {
            log::error!("Canvas 2D context unavailable");
            return;
        };

        let seed = js_sys::Date::now() as u64;
        let audio = AudioManager::new(&settings);
        let game = Game::new(
            tuning,
            settings,
            Box::new(SeededGaps::new(seed)),
            LocalStorageStore::new(),
            audio,
            DomPresentation::new(&document),
        );
        log::info!("Game initialized with seed: {}", seed);

        let app = Rc::new(RefCell::new(App { game, surface }));
        app.borrow_mut().render();

        setup_image_reload(&document, app.clone());
        setup_input_handlers(&canvas, app.clone());
        setup_buttons(app);

        log::info!("Gap Runner ready");
    }

    fn request_animation_frame(app: Rc<RefCell<App>>, ticket: LoopTicket) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(app, ticket, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, ticket: LoopTicket, time: f64) {
        let control = {
            let mut a = app.borrow_mut();
            let App { game, surface } = &mut *a;
            game.frame(ticket, time, surface)
        };

        if control == StepControl::Continue {
            request_animation_frame(app, ticket);
        }
    }

    /// Start a new loop if the input began a session
    fn start_loop(app: &Rc<RefCell<App>>, ticket: Option<LoopTicket>) {
        if let Some(ticket) = ticket {
            request_animation_frame(app.clone(), ticket);
        }
    }

    /// Redraw the idle frame once art finishes loading
    fn setup_image_reload(document: &web_sys::Document, app: Rc<RefCell<App>>) {
        for id in ["bird-img", "bg-img", "pipe-img"] {
            let Some(img) = document.get_element_by_id(id) else {
                continue;
            };
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut a = app.borrow_mut();
                if a.game.phase() != GamePhase::Active {
                    a.render();
                }
            });
            let _ = img.add_event_listener_with_callback("load", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();

        // Space / ArrowUp: jump, or start from the start/game-over screens
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                if code == "Space" || code == "ArrowUp" {
                    event.prevent_default();
                    let ticket = app.borrow_mut().game.trigger();
                    start_loop(&app, ticket);
                }
            });
            let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch behaves like the key
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let ticket = app.borrow_mut().game.trigger();
                start_loop(&app, ticket);
            });
            let _ = canvas.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse only jumps
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().game.jump();
            });
            let _ = canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(app: Rc<RefCell<App>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        for id in ["start-button", "restart-button"] {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("#{} missing", id);
                continue;
            };
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let ticket = app.borrow_mut().game.start();
                start_loop(&app, ticket);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use gap_runner::audio::SilentAudio;
    use gap_runner::driver::{FrameClock, drive};
    use gap_runner::persistence::FileStore;
    use gap_runner::platform::HeadlessPresentation;
    use gap_runner::renderer::DrawList;
    use gap_runner::sim::SeededGaps;
    use gap_runner::{Game, Settings, Tuning};

    env_logger::init();
    log::info!("Gap Runner (native) starting...");
    log::info!("Native mode runs a headless autopilot - serve the web build to play");

    // gap-runner [seed] [tuning.json]
    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(12345);
    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path).map(|json| Tuning::from_json(&json)) {
            Ok(Ok(tuning)) => tuning,
            Ok(Err(e)) => {
                log::warn!("Bad tuning file {}: {} - using defaults", path, e);
                Tuning::default()
            }
            Err(e) => {
                log::warn!("Can't read {}: {} - using defaults", path, e);
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };

    let store = FileStore::new(std::env::temp_dir().join("gap_runner_best_score.json"));
    let mut game = Game::new(
        tuning,
        Settings::default(),
        Box::new(SeededGaps::new(seed)),
        store,
        SilentAudio::default(),
        HeadlessPresentation::default(),
    );
    let mut surface = DrawList::default();
    let mut clock = FrameClock::default();

    let Some(ticket) = game.start() else {
        return;
    };
    // Five minutes at 60 Hz
    let frames = drive(&mut clock, 60 * 60 * 5, |now| {
        autopilot(&mut game);
        game.frame(ticket, now, &mut surface)
    });

    println!(
        "seed {}: {} frames, score {}, best {} ({})",
        seed,
        frames,
        game.state.score,
        game.best_score(),
        game.store.path().display()
    );
}

/// Jump whenever the avatar sinks below the middle of the next opening
#[cfg(not(target_arch = "wasm32"))]
fn autopilot<S, A, P>(game: &mut gap_runner::Game<S, A, P>)
where
    S: gap_runner::platform::ScoreStore,
    A: gap_runner::audio::AudioCues,
    P: gap_runner::platform::Presentation,
{
    let state = &game.state;
    let gap = state.tuning.gap_size as f32;
    let avatar = &state.avatar;
    let target = state
        .field
        .obstacles
        .iter()
        .find(|o| !o.passed)
        .map(|o| o.gap_top + gap / 2.0)
        .unwrap_or(state.tuning.field_height / 2.0);

    if avatar.center().y > target && avatar.velocity >= 0.0 {
        game.jump();
    }
}
