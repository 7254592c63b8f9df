//! Error types for the tabmode core.

use thiserror::Error;

use crate::mode::State;
use tabmode_keys::KeyParseError;

/// Errors raised while loading the command table or interpreting input.
///
/// Only the configuration variants are fatal; the runtime variants are
/// recovered inside the router and reported to the status bar.
#[derive(Error, Debug)]
pub enum TabmodeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Refusing to read {path}: file too large ({size} bytes, max {max})")]
    FileTooLarge { path: String, size: u64, max: u64 },

    #[error("Too many commands: {count} (max {max})")]
    TooManyCommands { count: usize, max: usize },

    #[error("Duplicate command key '{0}'")]
    DuplicateCommandKey(String),

    #[error("Duplicate command name '{0}'")]
    DuplicateCommandName(String),

    #[error("Invalid command name '{0}': must be non-empty without spaces")]
    InvalidCommandName(String),

    #[error("Command key '{0}' does not name a mode")]
    UnknownCommandKey(String),

    #[error("Invalid shortcut '{spec}' for command '{key}': {source}")]
    InvalidShortcut {
        key: String,
        spec: String,
        #[source]
        source: KeyParseError,
    },

    #[error("Cannot switch from {from} to {to}")]
    InvalidTransition { from: State, to: State },

    #[error("Unknown command '{0}'")]
    UnknownCommand(String),

    #[error("Expected a tab number, got '{0}'")]
    MalformedIndex(String),

    #[error("Not enough tabs open")]
    NoTabsOpen,

    #[error("No previous search")]
    NoPreviousFind,
}

impl TabmodeError {
    /// True for errors that must abort startup.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            TabmodeError::InvalidTransition { .. }
                | TabmodeError::UnknownCommand(_)
                | TabmodeError::MalformedIndex(_)
                | TabmodeError::NoTabsOpen
                | TabmodeError::NoPreviousFind
        )
    }
}

pub type Result<T> = std::result::Result<T, TabmodeError>;
