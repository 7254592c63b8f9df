//! Error types for the tabmode binary

use thiserror::Error;

use tabmode_core::TabmodeError;

/// Errors raised while setting up the terminal host.
#[derive(Error, Debug)]
pub enum HostError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{path}: {source}")]
    Config {
        path: String,
        #[source]
        source: TabmodeError,
    },

    #[error("Logging setup failed: {0}")]
    Log(String),
}

pub type Result<T> = std::result::Result<T, HostError>;
