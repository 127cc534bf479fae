//! Canvas 2D painter for display lists

use std::f64::consts::{PI, TAU};

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::frame::{DrawCommand, Frame, Layer};
use super::shapes::{self, Rgba, colors};

/// Paints frames onto a 2D context. Canvas calls that fail are dropped;
/// a broken frame is better than a stopped loop.
pub struct CanvasPainter {
    ctx: CanvasRenderingContext2d,
    /// Device pixel ratio applied as a base transform
    scale: f64,
}

impl CanvasPainter {
    pub fn new(ctx: CanvasRenderingContext2d, scale: f64) -> Self {
        Self { ctx, scale }
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    pub fn paint(&self, frame: &Frame) {
        let ctx = &self.ctx;
        let _ = ctx.set_transform(self.scale, 0.0, 0.0, self.scale, 0.0, 0.0);

        let mut shaken = false;
        for cmd in &frame.commands {
            // Shake applies to everything under the HUD
            let wants_shake = cmd.layer() < Layer::Hud && cmd.layer() > Layer::Background;
            if wants_shake != shaken {
                if wants_shake {
                    ctx.save();
                    let _ = ctx.translate(frame.shake.x as f64, frame.shake.y as f64);
                } else {
                    ctx.restore();
                }
                shaken = wants_shake;
            }
            if let Err(e) = self.draw(cmd) {
                log::debug!("Canvas draw failed: {:?}", e);
            }
        }
        if shaken {
            ctx.restore();
        }
    }

    fn draw(&self, cmd: &DrawCommand) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        match cmd {
            DrawCommand::Background { size, glow } => {
                let (w, h) = (size.x as f64, size.y as f64);
                let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
                gradient.add_color_stop(0.0, &shapes::css(colors::SKY_TOP))?;
                gradient.add_color_stop(
                    1.0,
                    &shapes::css(shapes::mix(colors::SKY_BOTTOM, colors::HONEY, glow * 0.3)),
                )?;
                ctx.set_fill_style_canvas_gradient(&gradient);
                ctx.fill_rect(0.0, 0.0, w, h);
            }
            DrawCommand::Particle { pos, size, color } => {
                fill_circle(ctx, pos.x as f64, pos.y as f64, *size as f64, *color)?;
            }
            DrawCommand::Collectible { pos, radius, wobble } => {
                let r = *radius as f64;
                ctx.save();
                ctx.translate(pos.x as f64, pos.y as f64)?;
                ctx.rotate(*wobble as f64)?;
                // Drop: circle body with a pointed top
                ctx.begin_path();
                ctx.arc(0.0, 0.0, r, 0.0, PI)?;
                ctx.quadratic_curve_to(-r, -r * 0.6, 0.0, -r * 1.6);
                ctx.quadratic_curve_to(r, -r * 0.6, r, 0.0);
                ctx.set_fill_style_str(&shapes::css(colors::HONEY));
                ctx.fill();
                fill_circle(ctx, -r * 0.35, -r * 0.2, r * 0.25, colors::HONEY_HIGHLIGHT)?;
                ctx.restore();
            }
            DrawCommand::Hazard { pos, half_size, angle } => {
                let s = *half_size as f64;
                ctx.save();
                ctx.translate(pos.x as f64, pos.y as f64)?;
                ctx.rotate(*angle as f64)?;
                // Wings
                fill_circle(ctx, -s * 0.3, -s * 0.7, s * 0.4, [1.0, 1.0, 1.0, 0.7])?;
                fill_circle(ctx, s * 0.3, -s * 0.7, s * 0.4, [1.0, 1.0, 1.0, 0.7])?;
                ctx.begin_path();
                ctx.ellipse(0.0, 0.0, s, s * 0.7, 0.0, 0.0, TAU)?;
                ctx.set_fill_style_str(&shapes::css(colors::BEE_BODY));
                ctx.fill();
                ctx.set_fill_style_str(&shapes::css(colors::BEE_STRIPE));
                for x in [-0.35, 0.2] {
                    ctx.fill_rect(s * x, -s * 0.65, s * 0.2, s * 1.3);
                }
                ctx.restore();
            }
            DrawCommand::Trail { points, width } => {
                ctx.set_line_width(*width as f64);
                ctx.set_line_cap("round");
                for pair in points.windows(2) {
                    let ((a, color), (b, _)) = (pair[0], pair[1]);
                    ctx.begin_path();
                    ctx.move_to(a.x as f64, a.y as f64);
                    ctx.line_to(b.x as f64, b.y as f64);
                    ctx.set_stroke_style_str(&shapes::css(color));
                    ctx.stroke();
                }
            }
            DrawCommand::Player { pos, size, tilt, color } => {
                let (w, h) = (size.x as f64, size.y as f64);
                ctx.save();
                ctx.translate(pos.x as f64, pos.y as f64)?;
                ctx.rotate(*tilt as f64)?;
                // Ears, then body, then muzzle
                fill_circle(ctx, -w * 0.3, -h * 0.45, w * 0.13, *color)?;
                fill_circle(ctx, w * 0.3, -h * 0.45, w * 0.13, *color)?;
                ctx.begin_path();
                ctx.ellipse(0.0, 0.0, w / 2.0, h / 2.0, 0.0, 0.0, TAU)?;
                ctx.set_fill_style_str(&shapes::css(*color));
                ctx.fill();
                fill_circle(ctx, 0.0, h * 0.1, w * 0.18, [0.85, 0.7, 0.5, 1.0])?;
                fill_circle(ctx, -w * 0.15, -h * 0.12, w * 0.05, colors::BEE_STRIPE)?;
                fill_circle(ctx, w * 0.15, -h * 0.12, w * 0.05, colors::BEE_STRIPE)?;
                ctx.restore();
            }
            DrawCommand::Popup { pos, text, color } => {
                ctx.set_font("bold 18px sans-serif");
                ctx.set_text_align("center");
                ctx.set_fill_style_str(&shapes::css(*color));
                ctx.fill_text(text, pos.x as f64, pos.y as f64)?;
            }
            DrawCommand::Hud {
                score,
                lives,
                time,
                multiplier,
                banner,
            } => {
                let width = self.logical_width();
                ctx.set_fill_style_str(&shapes::css(colors::HUD_TEXT));
                ctx.set_font("bold 20px sans-serif");
                ctx.set_text_align("left");
                ctx.fill_text(&format!("Score {}", score), 16.0, 30.0)?;
                ctx.fill_text(&"\u{2665}".repeat(*lives as usize), 16.0, 56.0)?;
                ctx.set_text_align("right");
                ctx.fill_text(time, width - 16.0, 30.0)?;
                if *multiplier > 1 {
                    ctx.set_fill_style_str(&shapes::css(colors::POPUP_TEXT));
                    ctx.fill_text(&format!("x{}", multiplier), width - 16.0, 56.0)?;
                }
                if let Some(text) = banner.as_deref().filter(|t| !t.is_empty()) {
                    let height = self.logical_height();
                    ctx.set_fill_style_str("rgba(255,255,255,0.75)");
                    ctx.fill_rect(0.0, height / 2.0 - 36.0, width, 56.0);
                    ctx.set_fill_style_str(&shapes::css(colors::HUD_TEXT));
                    ctx.set_font("bold 24px sans-serif");
                    ctx.set_text_align("center");
                    ctx.fill_text(text, width / 2.0, height / 2.0)?;
                }
            }
        }
        Ok(())
    }

    fn logical_width(&self) -> f64 {
        self.ctx
            .canvas()
            .map(|c| c.width() as f64 / self.scale)
            .unwrap_or(0.0)
    }

    fn logical_height(&self) -> f64 {
        self.ctx
            .canvas()
            .map(|c| c.height() as f64 / self.scale)
            .unwrap_or(0.0)
    }
}

fn fill_circle(
    ctx: &CanvasRenderingContext2d,
    x: f64,
    y: f64,
    r: f64,
    color: Rgba,
) -> Result<(), JsValue> {
    ctx.begin_path();
    ctx.arc(x, y, r.max(0.0), 0.0, TAU)?;
    ctx.set_fill_style_str(&shapes::css(color));
    ctx.fill();
    Ok(())
}
