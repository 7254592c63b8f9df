//! tabmode_keys - key chords and key sequences.
//!
//! A [`Key`] is one key press plus its modifier flags, stored as a single raw
//! integer code so that keys are cheap to copy, hash and order. A
//! [`KeySequence`] is a short run of chords (a multi-step shortcut such as
//! `g t`). Sequences order lexicographically, which lets a sorted table find
//! every sequence sharing a prefix with one binary search.

mod error;
mod key;
mod parse;
mod sequence;

pub use error::{KeyParseError, Result};
pub use key::{Key, KeyFormat};
pub use sequence::{KeySequence, MAX_CHORDS, SequenceMatch};
