//! BREWBOT - a virtual coffee machine for the terminal
//!
//! A TUI toy that greets the customer, takes a drink, size and
//! temperature, brews against a countdown and asks for a reward.
//! The interaction flow is a finite state machine with timed transitions.

use std::fmt;

pub mod app;
pub mod config;
pub mod effects;
pub mod machine;
pub mod models;
pub mod timing;
pub mod util;

// Common error types
#[derive(Debug)]
pub enum BrewError {
    /// I/O operation failed
    IoError(std::io::Error),
    /// Configuration validation or parsing error
    ConfigError(String),
    /// TUI rendering or interaction error
    TuiError(String),
    /// A cosmetic effect (audio, speech, particles) could not run
    EffectError(String),
    /// Timer scheduling error
    SchedulerError(String),
}

impl fmt::Display for BrewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrewError::IoError(err) => write!(f, "I/O error: {}", err),
            BrewError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            BrewError::TuiError(msg) => write!(f, "TUI error: {}", msg),
            BrewError::EffectError(msg) => write!(f, "Effect error: {}", msg),
            BrewError::SchedulerError(msg) => write!(f, "Scheduler error: {}", msg),
        }
    }
}

impl std::error::Error for BrewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BrewError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BrewError {
    fn from(err: std::io::Error) -> Self {
        BrewError::IoError(err)
    }
}

impl From<toml::de::Error> for BrewError {
    fn from(err: toml::de::Error) -> Self {
        BrewError::ConfigError(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for BrewError {
    fn from(err: toml::ser::Error) -> Self {
        BrewError::ConfigError(format!("TOML serialization error: {}", err))
    }
}

/// Result type alias for BREWBOT operations
pub type Result<T> = std::result::Result<T, BrewError>;

/// Error handling utilities
pub mod error {
    use super::{BrewError, Result};

    /// Effect failures never reach the customer
    pub fn is_cosmetic(error: &BrewError) -> bool {
        matches!(error, BrewError::EffectError(_))
    }

    /// Run a cosmetic effect, logging and discarding any failure
    pub fn swallow(effect: &str, outcome: Result<()>) {
        if let Err(err) = outcome {
            tracing::warn!(effect, error = %err, cosmetic = is_cosmetic(&err), "effect failed");
        }
    }

    /// Convert error to user-friendly message with suggestions
    pub fn user_friendly_message(error: &BrewError) -> String {
        match error {
            BrewError::ConfigError(msg) => {
                format!("Configuration error: {}. Check your brewbot.toml.", msg)
            }
            BrewError::TuiError(_) => {
                "The terminal could not be set up. Try a larger or different terminal."
                    .to_string()
            }
            BrewError::IoError(err) if err.kind() == std::io::ErrorKind::PermissionDenied => {
                "Permission denied. Check permissions on the config directory.".to_string()
            }
            _ => error.to_string(),
        }
    }
}

// Common types and constants
pub const APP_NAME: &str = "brewbot";
pub const CONFIG_FILE: &str = "brewbot.toml";
pub const LOG_FILE: &str = "brewbot.log";
