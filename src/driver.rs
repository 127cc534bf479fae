//! Per-frame loop driver
//!
//! `Game` owns the session, the renderer and every outward port. The host
//! calls `frame(now)` from whatever callback the `Scheduler` arranged and
//! `command(..)` from its input handlers; both run to completion on one
//! thread, so a command is always fully applied before the next step.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::audio::{NullSound, SoundSink, sound_for};
use crate::consts::MAX_FRAME_DT;
use crate::input::{Command, InputRouter};
use crate::persistence::{MemoryStore, ScoreStore};
use crate::renderer::{Frame, Renderer};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameStatus, Session, tick};
use crate::tuning::GameConfig;
use crate::ui::{HudSnapshot, NullPresenter, Presenter};

/// Arranges the next frame callback
pub trait Scheduler {
    /// Request one more `frame` call
    fn schedule_next(&mut self);
    /// Drop a pending request; a no-op when nothing is pending
    fn cancel(&mut self);
    fn is_pending(&self) -> bool;
    /// The pending request has fired
    fn acknowledge(&mut self);
}

/// Scheduler driven by hand (native demo and tests)
#[derive(Debug, Default)]
pub struct ManualScheduler {
    pending: bool,
    /// Requests made while one was already pending
    pub duplicates: u32,
}

impl Scheduler for ManualScheduler {
    fn schedule_next(&mut self) {
        if self.pending {
            self.duplicates += 1;
        }
        self.pending = true;
    }

    fn cancel(&mut self) {
        self.pending = false;
    }

    fn is_pending(&self) -> bool {
        self.pending
    }

    fn acknowledge(&mut self) {
        self.pending = false;
    }
}

/// Outward-facing collaborators
pub struct Ports {
    pub presenter: Box<dyn Presenter>,
    pub sound: Box<dyn SoundSink>,
    pub store: Box<dyn ScoreStore>,
}

impl Ports {
    /// No page, no speakers, scores kept in memory
    pub fn headless() -> Self {
        Self {
            presenter: Box::new(NullPresenter),
            sound: Box::new(NullSound),
            store: Box::new(MemoryStore::new()),
        }
    }
}

/// Game instance holding all state
pub struct Game<S: Scheduler> {
    session: Session,
    renderer: Renderer,
    input: InputRouter,
    ports: Ports,
    scheduler: S,
    settings: Settings,
    /// Seeds each new session
    seeds: Pcg32,
    /// Timestamp of the previous frame (seconds); None when the loop is stopped
    last_time: Option<f64>,
    last_frame: Frame,
}

impl<S: Scheduler> Game<S> {
    pub fn new(config: GameConfig, settings: Settings, scheduler: S, ports: Ports, seed: u64) -> Self {
        let mut session = Session::new(config, seed);
        session.difficulty = settings.difficulty;
        session.arcade_mode = settings.arcade_mode;
        session.reset_values();
        session.best_score = ports.store.load_best(&session.config.storage_key);

        let mut game = Self {
            session,
            renderer: Renderer::new(&settings),
            input: InputRouter::new(),
            ports,
            scheduler,
            settings,
            seeds: Pcg32::seed_from_u64(seed),
            last_time: None,
            last_frame: Frame::default(),
        };
        game.ports.sound.set_enabled(game.settings.sound_enabled);
        game.ports.sound.set_volume(game.settings.master_volume);
        log::info!(
            "{} ready: {:?}, best {}",
            game.session.config.name,
            game.session.difficulty,
            game.session.best_score
        );
        game.present(0.0);
        game
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn input_mut(&mut self) -> &mut InputRouter {
        &mut self.input
    }

    /// Display list from the most recent render
    pub fn last_frame(&self) -> &Frame {
        &self.last_frame
    }

    /// One animation callback. `now` is a monotonic timestamp in seconds.
    pub fn frame(&mut self, now: f64) {
        self.scheduler.acknowledge();

        let dt = match self.last_time {
            Some(last) => ((now - last) as f32).clamp(0.0, MAX_FRAME_DT),
            None => 0.0,
        };
        self.last_time = Some(now);

        if self.session.status == GameStatus::Running {
            let input = self.input.sample();
            self.input.advance(dt);
            if let Err(e) = tick(&mut self.session, &input, dt) {
                log::error!("Simulation step failed: {}", e);
                self.session.abort(&e.to_string());
            }
        }

        self.present(dt);

        match self.session.status {
            GameStatus::Running | GameStatus::Paused => {
                if !self.scheduler.is_pending() {
                    self.scheduler.schedule_next();
                }
            }
            GameStatus::Idle | GameStatus::Ended => self.last_time = None,
        }
    }

    /// Apply a discrete command between frames
    pub fn command(&mut self, command: Command) {
        match command {
            Command::Action => match self.session.status {
                GameStatus::Idle | GameStatus::Ended => self.start(),
                GameStatus::Running | GameStatus::Paused => {
                    self.session.toggle_pause();
                }
            },
            Command::Start => self.start(),
            Command::TogglePause => {
                self.session.toggle_pause();
            }
            Command::Pause => {
                self.session.pause();
            }
            Command::Reset => {
                self.session.reset();
                self.input.release_all();
            }
            Command::SetDifficulty(difficulty) => {
                self.session.set_difficulty(difficulty);
                self.settings.difficulty = difficulty;
                self.settings.save();
            }
            Command::ToggleArcade => {
                self.session.toggle_arcade_mode();
                self.settings.arcade_mode = self.session.arcade_mode;
                self.settings.save();
            }
            Command::SetSound(enabled) => {
                self.ports.sound.set_enabled(enabled);
                self.settings.sound_enabled = enabled;
                self.settings.save();
            }
            Command::SetVolume(percent) => {
                let volume = f32::from(percent.min(100)) / 100.0;
                self.ports.sound.set_volume(volume);
                self.settings.master_volume = volume;
                self.settings.save();
            }
            Command::SetScreenShake(on) => self.change_visuals(|s| s.screen_shake = on),
            Command::SetParticles(on) => self.change_visuals(|s| s.particles = on),
            Command::SetReducedMotion(on) => self.change_visuals(|s| s.reduced_motion = on),
        }

        // A stopped loop still has to show the result of the command
        if !self.scheduler.is_pending() {
            self.present(0.0);
        }
    }

    /// Pause because the page lost focus
    pub fn auto_pause(&mut self, reason: &str) {
        self.input.release_all();
        if self.session.pause() {
            log::info!("Auto-paused ({})", reason);
            if !self.scheduler.is_pending() {
                self.present(0.0);
            }
        }
    }

    /// Play-field size changed
    pub fn resize(&mut self, width: f32, height: f32) {
        self.session.resize(width, height);
        if !self.scheduler.is_pending() {
            self.present(0.0);
        }
    }

    fn change_visuals(&mut self, change: impl FnOnce(&mut Settings)) {
        change(&mut self.settings);
        self.renderer.apply_settings(&self.settings);
        self.settings.save();
    }

    fn start(&mut self) {
        // Never two loops at once
        self.scheduler.cancel();
        self.last_time = None;
        self.input.release_all();
        let seed = self.seeds.random::<u64>();
        self.session.start(seed);
        self.present(0.0);
        self.scheduler.schedule_next();
    }

    /// Drain feedback, render and refresh the HUD
    fn present(&mut self, frame_dt: f32) {
        self.dispatch_events();
        self.last_frame = self.renderer.render(&self.session, frame_dt);
        self.ports
            .presenter
            .show(&HudSnapshot::from_session(&self.session));
    }

    fn dispatch_events(&mut self) {
        for event in self.session.take_events() {
            if let Some(effect) = sound_for(&event) {
                self.ports.sound.play(effect);
            }
            self.renderer.on_event(&event);

            match event {
                GameEvent::ComboMilestone { streak } => {
                    self.ports.presenter.notify(&format!("{} in a row!", streak));
                }
                GameEvent::LevelUp { level } => {
                    log::info!("Level up: {}", level);
                    self.ports.presenter.notify(&format!("Level {}!", level));
                }
                GameEvent::Ended {
                    score,
                    new_best: true,
                    ..
                } => {
                    self.ports
                        .store
                        .save_best(&self.session.config.storage_key, score);
                    self.ports.presenter.notify("New best score!");
                }
                _ => {}
            }
        }
    }
}
