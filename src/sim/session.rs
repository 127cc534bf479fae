//! Session state machine
//!
//! Idle -> Running <-> Paused, Running -> Ended, Ended -> Running (restart),
//! anything -> Idle (reset). Nothing is terminal.

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::difficulty::Difficulty;
use super::state::{GameEvent, GameStatus, Session};

/// Lines picked at random when a timed session ends
pub const END_MESSAGES: [&str; 5] = [
    "Sweet work! The hive is proud of you.",
    "Un-bee-lievable catching!",
    "That was the bee's knees!",
    "Honey, you nailed it!",
    "Golden! Save some honey for the party.",
];

impl Session {
    /// Start (or restart) a session with a fresh RNG stream
    pub fn start(&mut self, seed: u64) {
        self.rng = Pcg32::seed_from_u64(seed);
        self.reset_values();
        self.end_message = None;
        self.status = GameStatus::Running;
        log::info!(
            "Session started: {:?}{} seed {}",
            self.difficulty,
            if self.arcade_mode { " arcade" } else { "" },
            seed
        );
        self.emit(GameEvent::Started);
    }

    pub fn pause(&mut self) -> bool {
        if self.status != GameStatus::Running {
            return false;
        }
        self.status = GameStatus::Paused;
        self.emit(GameEvent::Paused);
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.status != GameStatus::Paused {
            return false;
        }
        self.status = GameStatus::Running;
        self.emit(GameEvent::Resumed);
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.status {
            GameStatus::Running => self.pause(),
            GameStatus::Paused => self.resume(),
            _ => false,
        }
    }

    /// Back to Idle with default values
    pub fn reset(&mut self) {
        self.reset_values();
        self.end_message = None;
        self.status = GameStatus::Idle;
        self.emit(GameEvent::Reset);
    }

    /// Flip arcade mode; behaves as a soft reset
    pub fn toggle_arcade_mode(&mut self) {
        self.arcade_mode = !self.arcade_mode;
        log::info!("Arcade mode: {}", self.arcade_mode);
        self.soft_reset();
    }

    /// Select a difficulty. A live session restarts its values under the new
    /// profile; a finished one keeps its result until the next Start.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        if self.difficulty == difficulty {
            return;
        }
        self.difficulty = difficulty;
        log::info!("Difficulty: {:?}", difficulty);
        match self.status {
            GameStatus::Running | GameStatus::Paused | GameStatus::Idle => self.soft_reset(),
            GameStatus::Ended => {}
        }
    }

    /// Reset values, keeping a running/paused session alive
    fn soft_reset(&mut self) {
        match self.status {
            GameStatus::Running | GameStatus::Paused => self.reset_values(),
            GameStatus::Idle | GameStatus::Ended => self.reset(),
        }
    }

    /// Finish the session: record the best score and pick the closing line
    pub fn end(&mut self) {
        if !matches!(self.status, GameStatus::Running | GameStatus::Paused) {
            return;
        }
        self.dying = None;
        self.status = GameStatus::Ended;

        let new_best = self.score > self.best_score;
        if new_best {
            self.best_score = self.score;
        }

        let message = if self.arcade_mode {
            format!(
                "Arcade run over: {} points, level {}, {:.0}s survived",
                self.score, self.level, self.time_remaining
            )
        } else {
            let idx = self.rng.random_range(0..END_MESSAGES.len());
            END_MESSAGES[idx].to_string()
        };
        log::info!(
            "Session ended: score {} best {}{}",
            self.score,
            self.best_score,
            if new_best { " (new best)" } else { "" }
        );
        self.end_message = Some(message.clone());
        self.emit(GameEvent::Ended {
            score: self.score,
            best: self.best_score,
            new_best,
            message,
        });
    }

    /// Stop a session whose state can no longer be trusted. The best score
    /// is left untouched.
    pub fn abort(&mut self, reason: &str) {
        log::error!("Session aborted: {}", reason);
        self.dying = None;
        self.status = GameStatus::Ended;
        self.end_message = Some("Something went wrong - press Start to play again".to_string());
        self.emit(GameEvent::Aborted);
    }
}
