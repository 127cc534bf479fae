//! Render pipeline
//!
//! Turns the session into a layered display list. Gameplay state is only
//! read; the one thing that changes here is the cosmetic shake/glow state,
//! which decays per rendered frame regardless of whether the simulation
//! advanced.

pub mod frame;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use frame::{DrawCommand, Frame, Layer};

use glam::Vec2;

use crate::settings::Settings;
use crate::sim::{GameEvent, GameStatus, Session};
use crate::ui;
use shapes::colors;

/// Transient visual-only state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cosmetics {
    /// Screen shake magnitude in pixels
    pub shake: f32,
    /// Background glow 0-1
    pub glow: f32,
    /// Red flash on the player 0-1
    pub hurt_flash: f32,
    /// Seconds of rendered time, drives shake noise
    pub clock: f32,
}

impl Cosmetics {
    /// Exponential decay per rendered frame; tiny values snap to zero
    pub fn decay(&mut self, frame_dt: f32) {
        self.clock += frame_dt;
        self.shake *= (-frame_dt * 12.0).exp();
        if self.shake < 0.01 {
            self.shake = 0.0;
        }
        self.glow *= (-frame_dt * 3.0).exp();
        if self.glow < 0.01 {
            self.glow = 0.0;
        }
        self.hurt_flash = (self.hurt_flash - frame_dt * 2.5).max(0.0);
    }

    /// Pseudo-random offset for the current shake
    pub fn shake_offset(&self) -> Vec2 {
        if self.shake == 0.0 {
            return Vec2::ZERO;
        }
        let t = self.clock;
        Vec2::new((t * 53.0).sin(), (t * 47.0).cos()) * self.shake
    }
}

/// Owns cosmetic state and builds frames
#[derive(Debug, Clone)]
pub struct Renderer {
    pub fx: Cosmetics,
    shake_enabled: bool,
    glow_enabled: bool,
    particles_enabled: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl Renderer {
    pub fn new(settings: &Settings) -> Self {
        let mut renderer = Self {
            fx: Cosmetics::default(),
            shake_enabled: true,
            glow_enabled: true,
            particles_enabled: true,
        };
        renderer.apply_settings(settings);
        renderer
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.shake_enabled = settings.effective_screen_shake();
        self.glow_enabled = settings.effective_glow();
        self.particles_enabled = settings.particles;
        if !self.shake_enabled {
            self.fx.shake = 0.0;
        }
    }

    /// Kick cosmetic effects in response to simulation feedback
    pub fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Collected { .. } if self.glow_enabled => {
                self.fx.glow = (self.fx.glow + 0.35).min(1.0);
            }
            GameEvent::ComboMilestone { .. } | GameEvent::LevelUp { .. } if self.glow_enabled => {
                self.fx.glow = 1.0;
            }
            GameEvent::Hurt { .. } => {
                self.fx.hurt_flash = 1.0;
                if self.shake_enabled {
                    self.fx.shake = self.fx.shake.max(8.0);
                }
            }
            GameEvent::Died if self.shake_enabled => {
                self.fx.shake = 16.0;
            }
            GameEvent::Started | GameEvent::Reset => {
                self.fx = Cosmetics::default();
            }
            _ => {}
        }
    }

    /// Build the frame for the current session
    pub fn render(&mut self, session: &Session, frame_dt: f32) -> Frame {
        self.fx.decay(frame_dt.max(0.0));
        let fx = &self.fx;

        let mut commands = Vec::with_capacity(
            4 + session.particles.len() + session.entities.len() + session.popups.len(),
        );

        commands.push(DrawCommand::Background {
            size: session.field,
            glow: fx.glow,
        });

        if self.particles_enabled {
            for p in &session.particles {
                commands.push(DrawCommand::Particle {
                    pos: p.pos,
                    size: p.size,
                    color: shapes::particle_color(p.kind, p.life),
                });
            }
        }

        for e in &session.entities {
            commands.push(match e.kind {
                crate::sim::EntityKind::Collectible => DrawCommand::Collectible {
                    pos: e.pos,
                    radius: e.radius(),
                    wobble: e.spin.sin() * 0.15,
                },
                crate::sim::EntityKind::Hazard => DrawCommand::Hazard {
                    pos: e.pos,
                    half_size: e.radius(),
                    angle: e.spin.sin() * 0.4,
                },
            });
        }

        let player = &session.player;
        if player.trail.len() >= 2 {
            let n = player.trail.len() as f32;
            let points = player
                .trail
                .iter()
                .enumerate()
                .map(|(i, tp)| (tp.pos, shapes::trail_color(tp.speed, (1.0 - i as f32 / n) * 0.4)))
                .collect();
            commands.push(DrawCommand::Trail {
                points,
                width: player.width * 0.3,
            });
        }

        let bob = if session.status == GameStatus::Running {
            player.bob_phase.sin() * 2.0
        } else {
            0.0
        };
        commands.push(DrawCommand::Player {
            pos: player.pos + Vec2::new(0.0, bob),
            size: Vec2::new(player.width, player.height),
            tilt: player.tilt,
            color: shapes::mix(colors::BEAR, colors::BEAR_HURT, fx.hurt_flash),
        });

        for popup in &session.popups {
            commands.push(DrawCommand::Popup {
                pos: popup.pos,
                text: popup.text.clone(),
                color: shapes::with_alpha(colors::POPUP_TEXT, popup.life.clamp(0.0, 1.0)),
            });
        }

        let banner = match session.status {
            GameStatus::Running if !session.is_dying() => None,
            _ => Some(ui::status_line(session)),
        };
        commands.push(DrawCommand::Hud {
            score: session.score,
            lives: session.lives,
            time: ui::format_time(session.time_remaining, session.arcade_mode),
            multiplier: session.multiplier(),
            banner,
        });

        Frame {
            shake: fx.shake_offset(),
            commands,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{EntityKind, TickInput, tick};
    use crate::tuning::GameConfig;

    fn busy_session() -> Session {
        let mut session = Session::new(GameConfig::honey_hunt(), 21);
        session.start(21);
        for i in 0..240 {
            let input = TickInput {
                direction: if (i / 40) % 2 == 0 { 1.0 } else { -1.0 },
            };
            tick(&mut session, &input, 1.0 / 60.0).unwrap();
        }
        session
    }

    #[test]
    fn test_frame_is_layered() {
        let session = busy_session();
        let mut renderer = Renderer::default();
        let frame = renderer.render(&session, 1.0 / 60.0);
        assert!(frame.is_layered());
        assert_eq!(frame.commands.first().map(|c| c.layer()), Some(Layer::Background));
        assert_eq!(frame.commands.last().map(|c| c.layer()), Some(Layer::Hud));
        let entity_draws = frame
            .commands
            .iter()
            .filter(|c| c.layer() == Layer::Entities)
            .count();
        assert_eq!(entity_draws, session.entities.len());
    }

    #[test]
    fn test_render_does_not_touch_gameplay() {
        let session = busy_session();
        let before = (
            session.score,
            session.lives,
            session.player.pos,
            session.entities.len(),
            session.time_remaining,
        );
        let mut renderer = Renderer::default();
        for _ in 0..10 {
            renderer.render(&session, 1.0 / 60.0);
        }
        let after = (
            session.score,
            session.lives,
            session.player.pos,
            session.entities.len(),
            session.time_remaining,
        );
        assert_eq!(before, after);
    }

    #[test]
    fn test_shake_decays_per_frame() {
        let session = Session::new(GameConfig::honey_hunt(), 1);
        let mut renderer = Renderer::default();
        renderer.on_event(&GameEvent::Hurt { lives: 2 });
        assert_eq!(renderer.fx.shake, 8.0);

        let first = renderer.render(&session, 1.0 / 60.0);
        assert_ne!(first.shake, Vec2::ZERO);
        for _ in 0..120 {
            renderer.render(&session, 1.0 / 60.0);
        }
        assert_eq!(renderer.fx.shake, 0.0);
        assert_eq!(renderer.fx.hurt_flash, 0.0);
        assert_eq!(renderer.render(&session, 1.0 / 60.0).shake, Vec2::ZERO);
    }

    #[test]
    fn test_reduced_motion_suppresses_shake() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        let mut renderer = Renderer::new(&settings);
        renderer.on_event(&GameEvent::Died);
        renderer.on_event(&GameEvent::Hurt { lives: 0 });
        assert_eq!(renderer.fx.shake, 0.0);
        assert_eq!(renderer.fx.hurt_flash, 1.0);
    }

    #[test]
    fn test_banner_only_when_not_playing() {
        let mut session = Session::new(GameConfig::honey_hunt(), 1);
        let mut renderer = Renderer::default();
        let hud_banner = |frame: &Frame| match frame.commands.last() {
            Some(DrawCommand::Hud { banner, .. }) => banner.clone(),
            _ => None,
        };
        assert!(hud_banner(&renderer.render(&session, 0.0)).is_some());
        session.start(1);
        assert!(hud_banner(&renderer.render(&session, 0.0)).is_none());
        session.pause();
        assert!(hud_banner(&renderer.render(&session, 0.0)).is_some());
    }

    #[test]
    fn test_hazard_and_collectible_draws() {
        let mut session = Session::new(GameConfig::honey_hunt(), 1);
        crate::sim::spawner::spawn_entity(&mut session, EntityKind::Collectible);
        crate::sim::spawner::spawn_entity(&mut session, EntityKind::Hazard);
        let frame = Renderer::default().render(&session, 0.0);
        assert!(
            frame
                .commands
                .iter()
                .any(|c| matches!(c, DrawCommand::Collectible { radius, .. } if *radius == 15.0))
        );
        assert!(
            frame
                .commands
                .iter()
                .any(|c| matches!(c, DrawCommand::Hazard { half_size, .. } if *half_size == 18.0))
        );
    }
}
