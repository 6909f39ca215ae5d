//! Core error types for toast-core.
//!
//! All errors here are local, synchronous, and recoverable: the caller
//! (the presentation layer or the CLI) decides how to surface them.

use std::path::PathBuf;
use thiserror::Error;

use crate::timer::TimerState;

/// Core error type for toast-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Timer state machine errors
    #[error("Timer error: {0}")]
    Timer(#[from] TimerError),

    /// Record validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by the focus timer state machine.
///
/// Both variants are contract violations by the caller, never internal
/// failures. No operation leaves the machine in a partial state.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    /// The configured duration does not describe a runnable session.
    #[error("invalid config: duration must be positive, got {duration_secs}s")]
    InvalidConfig { duration_secs: u64 },

    /// The operation is not legal from the current state.
    #[error("invalid transition: cannot {op} while {from:?}")]
    InvalidTransition {
        op: &'static str,
        from: TimerState,
    },
}

/// Validation errors for collaborator records (tasks, courses, notes).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field was empty
    #[error("'{field}' must not be empty")]
    EmptyField { field: &'static str },

    /// Course creation needs a name, a color, and a toast icon
    #[error("a course requires a name, a color, and a toast icon")]
    IncompleteCourse,

    /// Lookup by id failed
    #[error("unknown {kind} id: {id}")]
    UnknownId { kind: &'static str, id: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to parse the config file
    #[error("Failed to parse configuration at {path}: {message}")]
    ParseFailed { path: PathBuf, message: String },

    /// Failed to save the config file
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
