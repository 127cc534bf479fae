//! Palette and colour helpers for 2D primitives

use crate::consts::PLAYER_SPEED;
use crate::sim::ParticleKind;

/// RGBA, each channel 0-1
pub type Rgba = [f32; 4];

/// Colors for game elements
pub mod colors {
    use super::Rgba;

    pub const SKY_TOP: Rgba = [0.99, 0.95, 0.80, 1.0];
    pub const SKY_BOTTOM: Rgba = [0.98, 0.83, 0.55, 1.0];
    pub const HONEY: Rgba = [1.0, 0.72, 0.1, 1.0];
    pub const HONEY_HIGHLIGHT: Rgba = [1.0, 0.93, 0.6, 1.0];
    pub const BEE_BODY: Rgba = [0.98, 0.82, 0.1, 1.0];
    pub const BEE_STRIPE: Rgba = [0.12, 0.1, 0.08, 1.0];
    pub const BEAR: Rgba = [0.55, 0.35, 0.18, 1.0];
    pub const BEAR_HURT: Rgba = [0.9, 0.25, 0.2, 1.0];
    pub const SPARKLE: Rgba = [1.0, 1.0, 0.85, 1.0];
    pub const STING: Rgba = [0.9, 0.2, 0.15, 1.0];
    pub const HUD_TEXT: Rgba = [0.25, 0.15, 0.05, 1.0];
    pub const POPUP_TEXT: Rgba = [0.85, 0.45, 0.0, 1.0];
}

pub fn particle_color(kind: ParticleKind, life: f32) -> Rgba {
    let base = match kind {
        ParticleKind::Honey => colors::HONEY,
        ParticleKind::Sparkle => colors::SPARKLE,
        ParticleKind::Sting => colors::STING,
    };
    with_alpha(base, life.clamp(0.0, 1.0))
}

pub fn with_alpha(color: Rgba, alpha: f32) -> Rgba {
    [color[0], color[1], color[2], color[3] * alpha]
}

/// Trail colour by speed: slow = warm amber, fast = pale gold
pub fn trail_color(speed: f32, alpha: f32) -> Rgba {
    let t = (speed / PLAYER_SPEED).clamp(0.0, 1.0);
    let (r, g, b) = if t < 0.5 {
        let u = t / 0.5;
        (0.85, 0.5 + 0.2 * u, 0.1)
    } else {
        let u = (t - 0.5) / 0.5;
        (0.85 + 0.15 * u, 0.7 + 0.25 * u, 0.1 + 0.5 * u)
    };
    [r, g, b, alpha]
}

/// Linear blend between two colours
pub fn mix(a: Rgba, b: Rgba, t: f32) -> Rgba {
    let t = t.clamp(0.0, 1.0);
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
        a[3] + (b[3] - a[3]) * t,
    ]
}

/// CSS `rgba(...)` string for canvas fill/stroke styles
pub fn css(color: Rgba) -> String {
    format!(
        "rgba({},{},{},{:.3})",
        (color[0].clamp(0.0, 1.0) * 255.0).round() as u8,
        (color[1].clamp(0.0, 1.0) * 255.0).round() as u8,
        (color[2].clamp(0.0, 1.0) * 255.0).round() as u8,
        color[3].clamp(0.0, 1.0)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_format() {
        assert_eq!(css([1.0, 0.0, 0.5, 1.0]), "rgba(255,0,128,1.000)");
        assert_eq!(css([2.0, -1.0, 0.0, 0.25]), "rgba(255,0,0,0.250)");
    }

    #[test]
    fn test_particle_fades_with_life() {
        assert_eq!(particle_color(ParticleKind::Honey, 0.5)[3], 0.5);
        assert_eq!(particle_color(ParticleKind::Sting, 2.0)[3], 1.0);
    }

    #[test]
    fn test_mix_endpoints() {
        assert_eq!(mix(colors::BEAR, colors::BEAR_HURT, 0.0), colors::BEAR);
        let end = mix(colors::BEAR, colors::BEAR_HURT, 1.0);
        for (got, want) in end.iter().zip(colors::BEAR_HURT.iter()) {
            assert!((got - want).abs() < 1e-6);
        }
    }
}
