//! Error types for key parsing.

use thiserror::Error;

/// Errors produced while building keys or key sequences.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyParseError {
    #[error("empty key")]
    EmptyKey,

    #[error("unknown key '{0}'")]
    UnknownKey(String),

    #[error("unknown modifier '{0}'")]
    UnknownModifier(String),

    #[error("duplicate modifier '{0}'")]
    DuplicateModifier(String),

    #[error("missing modifier before '-'")]
    MissingModifier,

    #[error("empty modifier segment")]
    EmptyModifier,

    #[error("empty key sequence")]
    EmptySequence,

    #[error("key sequence has {0} chords (max 4)")]
    TooLong(usize),

    #[error("invalid raw key code {0:#x}")]
    InvalidRaw(u32),

    #[error("unsupported key code {0}")]
    Unsupported(String),
}

pub type Result<T> = std::result::Result<T, KeyParseError>;
