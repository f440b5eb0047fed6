//! Error types for the kaizen_core library.

use crate::validate::ParseError;
use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for kaizen_core operations
///
/// Input errors leave the component's state untouched; the caller may retry.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed or out-of-domain measurement or text input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Calorie quantity did not parse as a non-negative number
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(ParseError),

    /// Sleep or water increment was not a positive number
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Game round count was not a positive integer
    #[error("Invalid count: {0}")]
    InvalidCount(String),

    /// Reminder interval was not a positive number of seconds
    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    /// Game answer did not parse as an integer
    #[error("Invalid answer: {0}")]
    InvalidAnswer(ParseError),

    /// Planner cell addressing outside the grid
    #[error("{what} index {index} out of range (0..={max})")]
    OutOfRange {
        what: &'static str,
        index: usize,
        max: usize,
    },

    /// Accumulator already reached its goal
    #[error("Goal already met")]
    GoalMet,

    /// Operation called in the wrong phase
    #[error("State error: {0}")]
    State(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
