//! Display list produced by the render pipeline

use glam::Vec2;

use super::shapes::Rgba;

/// Paint order. HUD is last so nothing can cover it; particles sit under
/// the entities and the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Layer {
    Background,
    Particles,
    Entities,
    Player,
    Popups,
    Hud,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Background {
        size: Vec2,
        /// 0-1 warm pulse after catches
        glow: f32,
    },
    Particle {
        pos: Vec2,
        size: f32,
        color: Rgba,
    },
    Collectible {
        pos: Vec2,
        radius: f32,
        wobble: f32,
    },
    Hazard {
        pos: Vec2,
        half_size: f32,
        angle: f32,
    },
    Trail {
        points: Vec<(Vec2, Rgba)>,
        width: f32,
    },
    Player {
        pos: Vec2,
        size: Vec2,
        tilt: f32,
        color: Rgba,
    },
    Popup {
        pos: Vec2,
        text: String,
        color: Rgba,
    },
    Hud {
        score: u64,
        lives: u32,
        time: String,
        multiplier: u32,
        /// Centered overlay text when not actively playing
        banner: Option<String>,
    },
}

impl DrawCommand {
    pub fn layer(&self) -> Layer {
        match self {
            DrawCommand::Background { .. } => Layer::Background,
            DrawCommand::Particle { .. } => Layer::Particles,
            DrawCommand::Collectible { .. } | DrawCommand::Hazard { .. } => Layer::Entities,
            DrawCommand::Trail { .. } | DrawCommand::Player { .. } => Layer::Player,
            DrawCommand::Popup { .. } => Layer::Popups,
            DrawCommand::Hud { .. } => Layer::Hud,
        }
    }
}

/// One rendered frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    /// Offset applied to everything except the HUD
    pub shake: Vec2,
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    /// Commands are in non-decreasing layer order
    pub fn is_layered(&self) -> bool {
        self.commands
            .windows(2)
            .all(|w| w[0].layer() <= w[1].layer())
    }
}
