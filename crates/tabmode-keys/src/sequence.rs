use std::fmt;
use std::str::FromStr;

use crate::error::{KeyParseError, Result};
use crate::key::{Key, KeyFormat};
use crate::parse::parse_key;

/// Longest supported shortcut, in chords.
pub const MAX_CHORDS: usize = 4;

/// Result of comparing a typed sequence against a bound one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequenceMatch {
    /// Same chords, same length.
    Exact,
    /// The typed sequence is a strict prefix of the bound one.
    Partial,
    No,
}

/// An ordered, non-empty run of 1 to [`MAX_CHORDS`] keys.
///
/// Ordering is lexicographic over the chords, so a sequence sorts directly
/// before every longer sequence it is a prefix of.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeySequence {
    keys: Vec<Key>,
}

impl KeySequence {
    pub fn new(keys: Vec<Key>) -> Result<Self> {
        if keys.is_empty() {
            return Err(KeyParseError::EmptySequence);
        }
        if keys.len() > MAX_CHORDS {
            return Err(KeyParseError::TooLong(keys.len()));
        }
        Ok(Self { keys })
    }

    pub fn single(key: Key) -> Self {
        Self { keys: vec![key] }
    }

    /// Parse whitespace-separated chords, e.g. `"g t"` or `"C-x C-f"`.
    pub fn parse(spec: &str) -> Result<Self> {
        let keys = spec
            .split_whitespace()
            .map(parse_key)
            .collect::<Result<Vec<_>>>()?;
        Self::new(keys)
    }

    pub fn from_raw(codes: &[u32]) -> Result<Self> {
        let keys = codes
            .iter()
            .map(|&code| Key::from_raw(code))
            .collect::<Result<Vec<_>>>()?;
        Self::new(keys)
    }

    pub fn to_raw(&self) -> Vec<u32> {
        self.keys.iter().map(|key| key.to_raw()).collect()
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn first(&self) -> Key {
        self.keys[0]
    }

    /// Compare `self` (what was typed) against `other` (what is bound).
    ///
    /// Asymmetric: when `a.matches(b)` is `Partial`, `b.matches(a)` is `No`.
    pub fn matches(&self, other: &KeySequence) -> SequenceMatch {
        let shared = self.len().min(other.len());
        if self.keys[..shared] != other.keys[..shared] {
            return SequenceMatch::No;
        }
        if self.len() == other.len() {
            SequenceMatch::Exact
        } else if self.len() < other.len() {
            SequenceMatch::Partial
        } else {
            SequenceMatch::No
        }
    }

    pub fn to_string_with(&self, format: KeyFormat) -> String {
        let separator = match format {
            KeyFormat::Short => " ",
            KeyFormat::Long => ", ",
        };
        self.keys
            .iter()
            .map(|key| key.display(format))
            .collect::<Vec<_>>()
            .join(separator)
    }
}

impl From<Key> for KeySequence {
    fn from(key: Key) -> Self {
        Self::single(key)
    }
}

impl FromStr for KeySequence {
    type Err = KeyParseError;

    fn from_str(spec: &str) -> Result<Self> {
        Self::parse(spec)
    }
}

impl fmt::Display for KeySequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(KeyFormat::Short))
    }
}

impl fmt::Debug for KeySequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeySequence({})", self)
    }
}
