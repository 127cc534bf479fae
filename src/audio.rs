//! Sound effects
//!
//! The game only ever asks for a named effect. On the web the effects are
//! synthesized with the Web Audio API - no external files needed. If the
//! audio context cannot be created, every call is a no-op.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Honey drop caught
    Collect,
    /// Stung by a bee
    Hurt,
    /// Combo milestone or level up
    PowerUp,
    /// Streak ran out
    ComboBreak,
    /// Menu/toggle click
    Button,
    /// Session start
    Start,
    /// Session over
    GameOver,
}

impl SoundEffect {
    pub fn name(&self) -> &'static str {
        match self {
            SoundEffect::Collect => "collect",
            SoundEffect::Hurt => "hurt",
            SoundEffect::PowerUp => "powerup",
            SoundEffect::ComboBreak => "combobreak",
            SoundEffect::Button => "button",
            SoundEffect::Start => "start",
            SoundEffect::GameOver => "gameover",
        }
    }
}

/// Which effect (if any) a simulation event should sound
pub fn sound_for(event: &GameEvent) -> Option<SoundEffect> {
    match event {
        GameEvent::Collected { .. } => Some(SoundEffect::Collect),
        GameEvent::Hurt { .. } => Some(SoundEffect::Hurt),
        GameEvent::ComboMilestone { .. } | GameEvent::LevelUp { .. } => {
            Some(SoundEffect::PowerUp)
        }
        GameEvent::ComboBreak => Some(SoundEffect::ComboBreak),
        GameEvent::Paused | GameEvent::Resumed | GameEvent::Reset => Some(SoundEffect::Button),
        GameEvent::Started => Some(SoundEffect::Start),
        GameEvent::Ended { .. } | GameEvent::Aborted => Some(SoundEffect::GameOver),
        GameEvent::Died => None,
    }
}

/// Anything that can play a named effect. Failing to play must never
/// affect gameplay, so nothing here returns an error.
pub trait SoundSink {
    fn play(&mut self, effect: SoundEffect);
    fn set_enabled(&mut self, enabled: bool);
    /// Master volume, 0.0 - 1.0
    fn set_volume(&mut self, volume: f32);
}

/// Silent sink for native builds and tests
#[derive(Debug, Default)]
pub struct NullSound;

impl SoundSink for NullSound {
    fn play(&mut self, _effect: SoundEffect) {}
    fn set_enabled(&mut self, _enabled: bool) {}
    fn set_volume(&mut self, _volume: f32) {}
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{SoundEffect, SoundSink};

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        master_volume: f32,
        enabled: bool,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                master_volume: 0.8,
                enabled: true,
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        fn effective_volume(&self) -> f32 {
            if self.enabled { self.master_volume } else { 0.0 }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Single tone with a pitch glide and exponential fade
        #[allow(clippy::too_many_arguments)]
        fn blip(
            &self,
            ctx: &AudioContext,
            vol: f32,
            osc_type: OscillatorType,
            from_hz: f32,
            to_hz: f32,
            delay: f64,
            length: f64,
        ) {
            let Some((osc, gain)) = self.create_osc(ctx, from_hz, osc_type) else {
                return;
            };
            let t = ctx.current_time() + delay;

            gain.gain().set_value_at_time(vol, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + length)
                .ok();
            osc.frequency().set_value_at_time(from_hz, t).ok();
            if to_hz != from_hz {
                osc.frequency()
                    .exponential_ramp_to_value_at_time(to_hz, t + length)
                    .ok();
            }

            osc.start_with_when(t).ok();
            osc.stop_with_when(t + length + 0.05).ok();
        }

        /// Arpeggio of short notes
        fn arpeggio(
            &self,
            ctx: &AudioContext,
            vol: f32,
            osc_type: OscillatorType,
            notes: &[f32],
            spacing: f64,
            length: f64,
        ) {
            for (i, freq) in notes.iter().enumerate() {
                self.blip(ctx, vol, osc_type, *freq, *freq, i as f64 * spacing, length);
            }
        }
    }

    impl SoundSink for AudioManager {
        fn play(&mut self, effect: SoundEffect) {
            let vol = self.effective_volume();
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                // Bright rising ding
                SoundEffect::Collect => {
                    self.blip(ctx, vol * 0.3, OscillatorType::Sine, 660.0, 990.0, 0.0, 0.12)
                }
                // Buzzy drop
                SoundEffect::Hurt => {
                    self.blip(ctx, vol * 0.35, OscillatorType::Sawtooth, 220.0, 80.0, 0.0, 0.25)
                }
                SoundEffect::PowerUp => self.arpeggio(
                    ctx,
                    vol * 0.25,
                    OscillatorType::Triangle,
                    &[500.0, 600.0, 800.0, 1000.0],
                    0.07,
                    0.2,
                ),
                SoundEffect::ComboBreak => {
                    self.blip(ctx, vol * 0.25, OscillatorType::Triangle, 400.0, 200.0, 0.0, 0.2)
                }
                SoundEffect::Button => {
                    self.blip(ctx, vol * 0.2, OscillatorType::Square, 300.0, 300.0, 0.0, 0.05)
                }
                SoundEffect::Start => {
                    self.blip(ctx, vol * 0.3, OscillatorType::Triangle, 200.0, 600.0, 0.0, 0.2)
                }
                SoundEffect::GameOver => self.arpeggio(
                    ctx,
                    vol * 0.3,
                    OscillatorType::Sine,
                    &[400.0, 350.0, 300.0, 200.0],
                    0.2,
                    0.3,
                ),
            }
        }

        fn set_enabled(&mut self, enabled: bool) {
            self.enabled = enabled;
            if enabled {
                self.resume();
            }
        }

        fn set_volume(&mut self, volume: f32) {
            self.master_volume = volume.clamp(0.0, 1.0);
        }
    }
}
