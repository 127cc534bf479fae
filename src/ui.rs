//! HUD presentation ports
//!
//! The driver pushes display values through `Presenter` once per frame.
//! On the web a DOM presenter writes them into the page; elsewhere the
//! null presenter discards them.

use crate::sim::{GameStatus, Session};

/// Snapshot of what the page HUD shows
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HudSnapshot {
    pub score: u64,
    pub best: u64,
    pub lives: u32,
    /// Formatted timer ("42" counting down, "1:05" in arcade mode)
    pub time: String,
    pub multiplier: u32,
    pub streak: u32,
    pub level: u32,
    pub status: String,
}

impl HudSnapshot {
    pub fn from_session(session: &Session) -> Self {
        Self {
            score: session.score,
            best: session.best_score,
            lives: session.lives,
            time: format_time(session.time_remaining, session.arcade_mode),
            multiplier: session.multiplier(),
            streak: session.streak,
            level: session.level,
            status: status_line(session),
        }
    }
}

/// Seconds for timed mode, m:ss elapsed for arcade mode
pub fn format_time(secs: f32, arcade: bool) -> String {
    if arcade {
        let total = secs.max(0.0).floor() as u32;
        format!("{}:{:02}", total / 60, total % 60)
    } else {
        format!("{}", secs.max(0.0).ceil() as u32)
    }
}

/// One-line status text for the current state
pub fn status_line(session: &Session) -> String {
    match session.status {
        GameStatus::Idle => "Press Space or tap Start to play".to_string(),
        GameStatus::Running if session.is_dying() => "Ouch!".to_string(),
        GameStatus::Running => String::new(),
        GameStatus::Paused => "Paused - press Space to resume".to_string(),
        GameStatus::Ended => session
            .end_message
            .clone()
            .unwrap_or_else(|| "Game over".to_string()),
    }
}

/// Output side of the HUD
pub trait Presenter {
    /// Refresh the HUD values
    fn show(&mut self, hud: &HudSnapshot);
    /// Transient notification (combo milestone, level up, new best)
    fn notify(&mut self, message: &str);
}

/// Discards everything
#[derive(Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn show(&mut self, _hud: &HudSnapshot) {}
    fn notify(&mut self, _message: &str) {}
}

/// How long a toast stays up (milliseconds)
pub const TOAST_MS: i32 = 2000;

/// Tracks which toast is on screen so an old hide timer cannot take down a
/// newer toast
#[derive(Debug, Clone, Default)]
pub struct ToastTimer {
    shown: u32,
}

impl ToastTimer {
    /// A toast went up; returns its ticket
    pub fn raise(&mut self) -> u32 {
        self.shown = self.shown.wrapping_add(1);
        self.shown
    }

    /// Hide timer for `ticket` fired; true if the element should hide
    pub fn expire(&self, ticket: u32) -> bool {
        self.shown == ticket
    }
}

#[cfg(target_arch = "wasm32")]
pub use dom::DomPresenter;

#[cfg(target_arch = "wasm32")]
mod dom {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::Closure;
    use web_sys::Document;

    use super::{HudSnapshot, Presenter, TOAST_MS, ToastTimer};

    /// Writes HUD values into elements by id. Missing elements are skipped.
    pub struct DomPresenter {
        document: Option<Document>,
        last: Option<HudSnapshot>,
        toast: Rc<RefCell<ToastTimer>>,
    }

    impl Default for DomPresenter {
        fn default() -> Self {
            Self::new()
        }
    }

    impl DomPresenter {
        pub fn new() -> Self {
            Self {
                document: web_sys::window().and_then(|w| w.document()),
                last: None,
                toast: Rc::new(RefCell::new(ToastTimer::default())),
            }
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.as_ref().and_then(|d| d.get_element_by_id(id)) {
                el.set_text_content(Some(text));
            }
        }
    }

    impl Presenter for DomPresenter {
        fn show(&mut self, hud: &HudSnapshot) {
            if self.last.as_ref() == Some(hud) {
                return;
            }
            self.set_text("hh-score", &hud.score.to_string());
            self.set_text("hh-best", &hud.best.to_string());
            self.set_text("hh-lives", &hud.lives.to_string());
            self.set_text("hh-time", &hud.time);
            self.set_text("hh-level", &hud.level.to_string());
            self.set_text("hh-status", &hud.status);

            // Multiplier badge only when it matters
            if let Some(el) = self
                .document
                .as_ref()
                .and_then(|d| d.get_element_by_id("hh-multiplier"))
            {
                if hud.multiplier > 1 {
                    el.set_text_content(Some(&format!("x{}", hud.multiplier)));
                    let _ = el.set_attribute("class", "hud-item pop");
                } else {
                    el.set_text_content(Some(""));
                    let _ = el.set_attribute("class", "hud-item hidden");
                }
            }
            self.last = Some(hud.clone());
        }

        fn notify(&mut self, message: &str) {
            self.set_text("hh-toast", message);
            let Some(el) = self.document.as_ref().and_then(|d| d.get_element_by_id("hh-toast")) else {
                return;
            };
            let _ = el.set_attribute("class", "toast show");

            let ticket = self.toast.borrow_mut().raise();
            let toast = self.toast.clone();
            let hide = Closure::once_into_js(move || {
                if toast.borrow().expire(ticket) {
                    let _ = el.set_attribute("class", "toast");
                }
            });
            if let Some(window) = web_sys::window() {
                let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                    hide.unchecked_ref(),
                    TOAST_MS,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::GameConfig;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(59.2, false), "60");
        assert_eq!(format_time(0.0, false), "0");
        assert_eq!(format_time(65.9, true), "1:05");
        assert_eq!(format_time(-3.0, true), "0:00");
    }

    #[test]
    fn test_status_lines() {
        let mut session = Session::new(GameConfig::honey_hunt(), 1);
        assert!(status_line(&session).contains("Start"));
        session.start(1);
        assert_eq!(status_line(&session), "");
        session.pause();
        assert!(status_line(&session).starts_with("Paused"));
        session.resume();
        session.end();
        let msg = status_line(&session);
        assert!(crate::sim::END_MESSAGES.contains(&msg.as_str()));
    }

    #[test]
    fn test_snapshot_reflects_session() {
        let mut session = Session::new(GameConfig::honey_hunt(), 1);
        session.start(1);
        session.score = 90;
        session.streak = 12;
        let hud = HudSnapshot::from_session(&session);
        assert_eq!(hud.score, 90);
        assert_eq!(hud.multiplier, 2);
        assert_eq!(hud.lives, 3);
        assert_eq!(hud.time, "60");
    }

    #[test]
    fn test_toast_hides_only_for_latest() {
        let mut toast = ToastTimer::default();
        let first = toast.raise();
        assert!(toast.expire(first));

        let second = toast.raise();
        assert!(!toast.expire(first), "stale timer must leave the new toast up");
        assert!(toast.expire(second));
    }
}
