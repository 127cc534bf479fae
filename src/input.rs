//! Input routing
//!
//! Raw device events come in as key names, field taps and on-screen button
//! presses. Continuous movement is kept as held flags plus short tap
//! impulses and sampled once per step; everything discrete comes back out
//! as a `Command` for the driver to apply.

use crate::consts::TAP_IMPULSE_SECS;
use crate::sim::{Difficulty, TickInput};

/// Discrete control commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start when idle or ended, toggle pause otherwise
    Action,
    Start,
    TogglePause,
    Pause,
    Reset,
    SetDifficulty(Difficulty),
    ToggleArcade,
    SetSound(bool),
    /// Master volume in percent
    SetVolume(u8),
    SetScreenShake(bool),
    SetParticles(bool),
    SetReducedMotion(bool),
}

/// On-screen buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Left,
    Right,
    Action,
}

/// Collects device state between frames
#[derive(Debug, Clone, Default)]
pub struct InputRouter {
    left_key: bool,
    right_key: bool,
    left_button: bool,
    right_button: bool,
    /// Remaining tap impulse (seconds)
    left_impulse: f32,
    right_impulse: f32,
}

impl InputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key press. `key` is the DOM `KeyboardEvent.key` value.
    pub fn key_down(&mut self, key: &str, shift: bool, repeat: bool) -> Option<Command> {
        match key {
            "ArrowLeft" | "a" | "A" => {
                self.left_key = true;
                None
            }
            "ArrowRight" | "d" | "D" => {
                self.right_key = true;
                None
            }
            _ if repeat => None,
            " " | "Spacebar" => Some(Command::Action),
            "Escape" => Some(Command::Pause),
            // Reset needs the modifier so a stray R does not wipe a run
            "r" | "R" if shift => Some(Command::Reset),
            _ => None,
        }
    }

    pub fn key_up(&mut self, key: &str) {
        match key {
            "ArrowLeft" | "a" | "A" => self.left_key = false,
            "ArrowRight" | "d" | "D" => self.right_key = false,
            _ => {}
        }
    }

    /// Pointer or touch on the play field, zoned in thirds
    pub fn tap(&mut self, x: f32, field_width: f32) -> Option<Command> {
        if field_width <= 0.0 || !x.is_finite() {
            return None;
        }
        let third = field_width / 3.0;
        if x < third {
            self.left_impulse = TAP_IMPULSE_SECS;
            self.right_impulse = 0.0;
            None
        } else if x >= third * 2.0 {
            self.right_impulse = TAP_IMPULSE_SECS;
            self.left_impulse = 0.0;
            None
        } else {
            Some(Command::TogglePause)
        }
    }

    /// On-screen button pressed or released
    pub fn button(&mut self, button: Button, pressed: bool) -> Option<Command> {
        match button {
            Button::Left => self.left_button = pressed,
            Button::Right => self.right_button = pressed,
            Button::Action => return pressed.then_some(Command::Action),
        }
        None
    }

    /// Drop every held flag and impulse (focus lost)
    pub fn release_all(&mut self) {
        *self = Self::default();
    }

    /// Net horizontal intent in [-1, 1]
    pub fn direction(&self) -> f32 {
        let left = self.left_key || self.left_button || self.left_impulse > 0.0;
        let right = self.right_key || self.right_button || self.right_impulse > 0.0;
        (right as i32 - left as i32) as f32
    }

    /// Snapshot for one simulation step
    pub fn sample(&self) -> TickInput {
        TickInput {
            direction: self.direction(),
        }
    }

    /// Run down tap impulses
    pub fn advance(&mut self, dt: f32) {
        self.left_impulse = (self.left_impulse - dt).max(0.0);
        self.right_impulse = (self.right_impulse - dt).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_keys() {
        let mut input = InputRouter::new();
        assert_eq!(input.direction(), 0.0);
        input.key_down("ArrowLeft", false, false);
        assert_eq!(input.direction(), -1.0);
        input.key_down("d", false, false);
        assert_eq!(input.direction(), 0.0, "opposite keys cancel");
        input.key_up("ArrowLeft");
        assert_eq!(input.direction(), 1.0);
        input.key_up("d");
        assert_eq!(input.direction(), 0.0);
    }

    #[test]
    fn test_discrete_keys() {
        let mut input = InputRouter::new();
        assert_eq!(input.key_down(" ", false, false), Some(Command::Action));
        assert_eq!(input.key_down("Escape", false, false), Some(Command::Pause));
        assert_eq!(input.key_down("R", true, false), Some(Command::Reset));
        assert_eq!(input.key_down("r", false, false), None);
        assert_eq!(input.key_down(" ", false, true), None, "auto-repeat ignored");
    }

    #[test]
    fn test_tap_zones() {
        let mut input = InputRouter::new();
        assert_eq!(input.tap(50.0, 900.0), None);
        assert_eq!(input.direction(), -1.0);
        assert_eq!(input.tap(450.0, 900.0), Some(Command::TogglePause));
        assert_eq!(input.tap(850.0, 900.0), None);
        assert_eq!(input.direction(), 1.0, "new tap replaces the old impulse");
    }

    #[test]
    fn test_tap_impulse_expires() {
        let mut input = InputRouter::new();
        input.tap(10.0, 900.0);
        for _ in 0..11 {
            assert_eq!(input.sample().direction, -1.0);
            input.advance(1.0 / 60.0);
        }
        assert_eq!(input.direction(), -1.0);
        input.advance(0.05);
        assert_eq!(input.direction(), 0.0);
    }

    #[test]
    fn test_buttons() {
        let mut input = InputRouter::new();
        assert_eq!(input.button(Button::Right, true), None);
        assert_eq!(input.direction(), 1.0);
        input.advance(5.0);
        assert_eq!(input.direction(), 1.0, "held buttons do not time out");
        input.button(Button::Right, false);
        assert_eq!(input.direction(), 0.0);
        assert_eq!(input.button(Button::Action, true), Some(Command::Action));
        assert_eq!(input.button(Button::Action, false), None);
    }

    #[test]
    fn test_release_all() {
        let mut input = InputRouter::new();
        input.key_down("a", false, false);
        input.button(Button::Left, true);
        input.release_all();
        assert_eq!(input.direction(), 0.0);
    }
}
