//! Honey Hunt entry point
//!
//! On the web this wires the page (canvas, keyboard, pointer, HUD controls)
//! to the game and runs it off requestAnimationFrame. Natively it plays one
//! headless session on autopilot and prints the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::str::FromStr;

    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement, HtmlInputElement,
        HtmlSelectElement, KeyboardEvent, MouseEvent,
    };

    use honey_hunt::audio::AudioManager;
    use honey_hunt::driver::{Game, Ports, Scheduler};
    use honey_hunt::input::{Button, Command};
    use honey_hunt::persistence::LocalStorageStore;
    use honey_hunt::renderer::canvas::CanvasPainter;
    use honey_hunt::sim::Difficulty;
    use honey_hunt::ui::DomPresenter;
    use honey_hunt::{ConfigError, GameConfig, Settings};

    type FrameCallback = Closure<dyn FnMut(f64)>;

    /// requestAnimationFrame-backed scheduler
    struct RafScheduler {
        callback: Rc<RefCell<Option<FrameCallback>>>,
        handle: Option<i32>,
    }

    impl Scheduler for RafScheduler {
        fn schedule_next(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            if let Some(cb) = self.callback.borrow().as_ref() {
                self.handle = window
                    .request_animation_frame(cb.as_ref().unchecked_ref())
                    .ok();
            }
        }

        fn cancel(&mut self) {
            if let (Some(handle), Some(window)) = (self.handle.take(), web_sys::window()) {
                let _ = window.cancel_animation_frame(handle);
            }
        }

        fn is_pending(&self) -> bool {
            self.handle.is_some()
        }

        fn acknowledge(&mut self) {
            self.handle = None;
        }
    }

    /// Game plus the canvas it paints on
    struct App {
        game: Game<RafScheduler>,
        painter: CanvasPainter,
        canvas: HtmlCanvasElement,
    }

    impl App {
        fn apply(&mut self, command: Command) {
            self.game.command(command);
            self.paint();
        }

        fn paint(&self) {
            self.painter.paint(self.game.last_frame());
        }

        /// Match the backing store to the element size and device pixel ratio
        fn fit_canvas(&mut self) {
            let dpr = web_sys::window()
                .map(|w| w.device_pixel_ratio())
                .unwrap_or(1.0);
            let w = self.canvas.client_width().max(1);
            let h = self.canvas.client_height().max(1);
            self.canvas.set_width((w as f64 * dpr) as u32);
            self.canvas.set_height((h as f64 * dpr) as u32);
            self.painter.set_scale(dpr);
            self.game.resize(w as f32, h as f32);
            self.paint();
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Honey Hunt starting...");
        // Missing page pieces disable the game, nothing else on the page
        if let Err(e) = init() {
            log::warn!("Honey Hunt not started: {}", e);
        }
    }

    fn init() -> Result<(), ConfigError> {
        let window = web_sys::window().ok_or(ConfigError::MissingElement("window"))?;
        let document = window
            .document()
            .ok_or(ConfigError::MissingElement("document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("hh-canvas")
            .and_then(|el| el.dyn_into().ok())
            .ok_or(ConfigError::MissingElement("hh-canvas"))?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into().ok())
            .ok_or(ConfigError::NoRenderContext)?;

        let config = match canvas.get_attribute("data-variant").as_deref() {
            Some("catch") => GameConfig::honey_catch(),
            _ => GameConfig::honey_hunt(),
        };
        let settings = Settings::load();

        let ports = Ports {
            presenter: Box::new(DomPresenter::new()),
            sound: Box::new(AudioManager::new()),
            store: Box::new(LocalStorageStore),
        };

        let callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
        let scheduler = RafScheduler {
            callback: callback.clone(),
            handle: None,
        };

        let seed = js_sys::Date::now() as u64;
        log::info!("Seed: {}", seed);
        let game = Game::new(config, settings.clone(), scheduler, ports, seed);
        let app = Rc::new(RefCell::new(App {
            game,
            painter: CanvasPainter::new(ctx, 1.0),
            canvas: canvas.clone(),
        }));

        {
            let app = app.clone();
            *callback.borrow_mut() = Some(Closure::new(move |time: f64| {
                let mut app = app.borrow_mut();
                app.game.frame(time / 1000.0);
                app.paint();
            }));
        }

        app.borrow_mut().fit_canvas();
        sync_controls(&document, &settings);

        setup_keyboard(&window, app.clone());
        setup_pointer(&canvas, app.clone());
        setup_buttons(&document, app.clone());
        setup_options(&document, app.clone());
        setup_auto_pause(&window, &document, app.clone());

        {
            let app = app.clone();
            listen(&window, "resize", move |_| app.borrow_mut().fit_canvas());
        }

        log::info!("Honey Hunt ready");
        Ok(())
    }

    fn listen(target: &EventTarget, name: &str, handler: impl FnMut(Event) + 'static) {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        let _ = target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Show stored preferences in the option controls
    fn sync_controls(document: &web_sys::Document, settings: &Settings) {
        if let Some(select) = document
            .get_element_by_id("hh-difficulty")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        {
            select.set_value(settings.difficulty.as_str());
        }
        if let Some(input) = document
            .get_element_by_id("hh-arcade")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            input.set_checked(settings.arcade_mode);
        }
        let toggles = [
            ("hh-sound", settings.sound_enabled),
            ("hh-shake", settings.screen_shake),
            ("hh-particles", settings.particles),
            ("hh-reduced-motion", settings.reduced_motion),
        ];
        for (id, checked) in toggles {
            if let Some(input) = input_by_id(document, id) {
                input.set_checked(checked);
            }
        }
        if let Some(input) = input_by_id(document, "hh-volume") {
            input.set_value(&((settings.master_volume * 100.0).round() as u8).to_string());
        }
    }

    fn input_by_id(document: &web_sys::Document, id: &str) -> Option<HtmlInputElement> {
        document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    }

    fn setup_keyboard(window: &web_sys::Window, app: Rc<RefCell<App>>) {
        {
            let app = app.clone();
            listen(window, "keydown", move |event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let key = event.key();
                // Keep Space and the arrows from scrolling the page
                if matches!(key.as_str(), " " | "ArrowLeft" | "ArrowRight") {
                    event.prevent_default();
                }
                let mut app = app.borrow_mut();
                let command = app
                    .game
                    .input_mut()
                    .key_down(&key, event.shift_key(), event.repeat());
                if let Some(command) = command {
                    app.apply(command);
                }
            });
        }

        listen(window, "keyup", move |event| {
            if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                app.borrow_mut().game.input_mut().key_up(&event.key());
            }
        });
    }

    fn setup_pointer(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let canvas_clone = canvas.clone();
        listen(canvas, "pointerdown", move |event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            event.prevent_default();
            let width = canvas_clone.client_width() as f32;
            let mut app = app.borrow_mut();
            let command = app.game.input_mut().tap(event.offset_x() as f32, width);
            if let Some(command) = command {
                app.apply(command);
            }
        });
    }

    fn setup_buttons(document: &web_sys::Document, app: Rc<RefCell<App>>) {
        for (id, button) in [
            ("hh-left", Button::Left),
            ("hh-right", Button::Right),
            ("hh-action", Button::Action),
        ] {
            let Some(el) = document.get_element_by_id(id) else {
                continue;
            };
            {
                let app = app.clone();
                listen(&el, "pointerdown", move |event| {
                    event.prevent_default();
                    let mut app = app.borrow_mut();
                    if let Some(command) = app.game.input_mut().button(button, true) {
                        app.apply(command);
                    }
                });
            }
            for release in ["pointerup", "pointerleave", "pointercancel"] {
                let app = app.clone();
                listen(&el, release, move |_| {
                    app.borrow_mut().game.input_mut().button(button, false);
                });
            }
        }

        for (id, command) in [
            ("hh-start", Command::Start),
            ("hh-pause", Command::TogglePause),
            ("hh-reset", Command::Reset),
        ] {
            if let Some(el) = document.get_element_by_id(id) {
                let app = app.clone();
                listen(&el, "click", move |_| app.borrow_mut().apply(command));
            }
        }
    }

    fn setup_options(document: &web_sys::Document, app: Rc<RefCell<App>>) {
        if let Some(select) = document
            .get_element_by_id("hh-difficulty")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        {
            let app = app.clone();
            let select_clone = select.clone();
            listen(&select, "change", move |_| {
                match Difficulty::from_str(&select_clone.value()) {
                    Ok(difficulty) => app.borrow_mut().apply(Command::SetDifficulty(difficulty)),
                    Err(e) => log::error!("{}", e),
                }
            });
        }

        if let Some(el) = document.get_element_by_id("hh-arcade") {
            let app = app.clone();
            listen(&el, "change", move |_| {
                app.borrow_mut().apply(Command::ToggleArcade)
            });
        }

        let toggles: [(&str, fn(bool) -> Command); 4] = [
            ("hh-sound", Command::SetSound),
            ("hh-shake", Command::SetScreenShake),
            ("hh-particles", Command::SetParticles),
            ("hh-reduced-motion", Command::SetReducedMotion),
        ];
        for (id, command) in toggles {
            if let Some(input) = input_by_id(document, id) {
                let app = app.clone();
                let input_clone = input.clone();
                listen(&input, "change", move |_| {
                    app.borrow_mut().apply(command(input_clone.checked()))
                });
            }
        }

        // Range input, 0-100
        if let Some(input) = input_by_id(document, "hh-volume") {
            let input_clone = input.clone();
            listen(&input, "input", move |_| match input_clone.value().parse::<u8>() {
                Ok(percent) => app.borrow_mut().apply(Command::SetVolume(percent)),
                Err(e) => log::warn!("Bad volume value: {}", e),
            });
        }
    }

    fn setup_auto_pause(
        window: &web_sys::Window,
        document: &web_sys::Document,
        app: Rc<RefCell<App>>,
    ) {
        // Visibility change (tab switch, minimize)
        {
            let app = app.clone();
            let document_clone = document.clone();
            listen(document, "visibilitychange", move |_| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut app = app.borrow_mut();
                    app.game.auto_pause("tab hidden");
                    app.paint();
                }
            });
        }

        // Window blur (click outside)
        listen(window, "blur", move |_| {
            let mut app = app.borrow_mut();
            app.game.auto_pause("window blur");
            app.paint();
        });
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

    let difficulty = match std::env::args()
        .nth(1)
        .map(|s| s.parse::<honey_hunt::sim::Difficulty>())
        .transpose()
    {
        Ok(d) => d.unwrap_or_default(),
        Err(e) => {
            log::error!("{}", e);
            eprintln!("usage: honey-hunt [easy|normal|hard]");
            std::process::exit(2);
        }
    };
    autopilot::run(difficulty);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless demo: the real driver with in-memory ports and a simple bot
#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use honey_hunt::driver::{Game, ManualScheduler, Ports, Scheduler};
    use honey_hunt::input::Command;
    use honey_hunt::sim::{Difficulty, EntityKind, Session};
    use honey_hunt::{GameConfig, Settings};

    const FRAME_SECS: f64 = 1.0 / 60.0;
    /// Ten minutes of frames is enough for any timed or arcade run
    const MAX_FRAMES: usize = 60 * 600;

    pub fn run(difficulty: Difficulty) {
        log::info!("Honey Hunt (native) autopilot on {:?}", difficulty);

        let settings = Settings {
            difficulty,
            sound_enabled: false,
            ..Default::default()
        };
        let mut game = Game::new(
            GameConfig::honey_hunt(),
            settings,
            ManualScheduler::default(),
            Ports::headless(),
            0x4849_4e59,
        );
        game.command(Command::Start);

        let mut now = 0.0;
        let mut frames = 0;
        while game.scheduler().is_pending() && frames < MAX_FRAMES {
            let direction = steer(game.session());
            let input = game.input_mut();
            input.key_up("ArrowLeft");
            input.key_up("ArrowRight");
            if direction < 0.0 {
                input.key_down("ArrowLeft", false, false);
            } else if direction > 0.0 {
                input.key_down("ArrowRight", false, false);
            }

            now += FRAME_SECS;
            game.frame(now);
            frames += 1;
        }

        let session = game.session();
        println!(
            "{:?} after {} frames: score {} (best {}), level {}, lives {}",
            session.status, frames, session.score, session.best_score, session.level, session.lives
        );
        if let Some(message) = &session.end_message {
            println!("{}", message);
        }
    }

    /// Dodge the nearest low bee, otherwise chase the lowest honey drop
    fn steer(session: &Session) -> f32 {
        let player = &session.player;
        let danger_line = player.pos.y - player.height * 2.5;

        if let Some(bee) = session
            .entities
            .iter()
            .filter(|e| e.kind == EntityKind::Hazard && e.pos.y > danger_line)
            .find(|e| (e.pos.x - player.pos.x).abs() < player.width)
        {
            return if bee.pos.x > player.pos.x { -1.0 } else { 1.0 };
        }

        let target = session
            .entities
            .iter()
            .filter(|e| e.kind == EntityKind::Collectible && e.pos.y < player.pos.y)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));
        match target {
            Some(drop) if (drop.pos.x - player.pos.x).abs() > 8.0 => {
                (drop.pos.x - player.pos.x).signum()
            }
            _ => 0.0,
        }
    }
}
