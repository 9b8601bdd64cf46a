//! Error types for race operations.
//!
//! Only contract violations and configuration problems are errors. Gameplay
//! rejections (an over-limit acceleration, a command after the race ended)
//! are silent no-ops and never surface here.

use std::io;
use thiserror::Error;

/// Result type alias for race operations.
pub type Result<T> = std::result::Result<T, RaceError>;

/// Errors that can occur while configuring or driving a race.
#[derive(Debug, Error)]
pub enum RaceError {
    /// Velocity delta outside {-1, 0, +1}.
    #[error("invalid velocity delta {0}: expected -1, 0 or +1")]
    InvalidDelta(i32),

    /// Axis label that is neither X nor Y.
    #[error("invalid axis {0:?}: expected \"x\" or \"y\"")]
    InvalidAxis(String),

    /// Command text that does not name a player command.
    #[error("unknown command {0:?}")]
    UnknownCommand(String),

    /// Configuration that cannot describe a playable grid.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// I/O error while reading a config file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed JSON config.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
