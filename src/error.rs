//! Error types
//!
//! Configuration errors are surfaced at selection/startup time. Simulation
//! errors are fatal to the current session only: the driver aborts the
//! session and stops scheduling frames.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown difficulty `{0}` (expected easy, normal or hard)")]
    UnknownDifficulty(String),
    #[error("required page element `#{0}` is missing")]
    MissingElement(&'static str),
    #[error("canvas has no 2d rendering context")]
    NoRenderContext,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("invalid frame delta {0}")]
    InvalidDelta(f32),
    #[error("non-finite value in {0}")]
    NonFinite(&'static str),
}
