use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::fmt;

use crate::error::{KeyParseError, Result};

/// Low bits: a Unicode scalar for characters, or a named key above `NAMED_BASE`.
const CODE_MASK: u32 = 0x001F_FFFF;
const NAMED_BASE: u32 = 0x0011_0000;
const FUNCTION_BASE: u32 = NAMED_BASE + 0x100;
const MAX_FUNCTION_KEY: u8 = 35;

const SHIFT: u32 = 1 << 24;
const CONTROL: u32 = 1 << 25;
const ALT: u32 = 1 << 26;
const META: u32 = 1 << 27;
const MODIFIER_MASK: u32 = SHIFT | CONTROL | ALT | META;

/// Named keys; the raw code of entry `i` is `NAMED_BASE + 1 + i`.
const NAMED_KEYS: &[(KeyCode, &str)] = &[
    (KeyCode::Enter, "Enter"),
    (KeyCode::Esc, "Esc"),
    (KeyCode::Backspace, "Backspace"),
    (KeyCode::Tab, "Tab"),
    (KeyCode::BackTab, "BackTab"),
    (KeyCode::Delete, "Delete"),
    (KeyCode::Insert, "Insert"),
    (KeyCode::Home, "Home"),
    (KeyCode::End, "End"),
    (KeyCode::PageUp, "PageUp"),
    (KeyCode::PageDown, "PageDown"),
    (KeyCode::Left, "Left"),
    (KeyCode::Right, "Right"),
    (KeyCode::Up, "Up"),
    (KeyCode::Down, "Down"),
];

/// Modifier flag, short prefix, long prefix. Order is the display order.
const MODIFIER_NAMES: &[(u32, &str, &str)] = &[
    (CONTROL, "C", "Ctrl"),
    (ALT, "M", "Alt"),
    (SHIFT, "S", "Shift"),
    (META, "Meta", "Meta"),
];

/// How a key or sequence is rendered as text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyFormat {
    /// Emacs-style chords separated by spaces (`C-x t`). Parses back to the same value.
    #[default]
    Short,
    /// Human-readable chords separated by commas (`Ctrl+x, t`).
    Long,
}

/// One key press with its modifiers (a chord).
///
/// Stored as a raw integer code. For character keys the Shift modifier is
/// folded into the character itself, so `S-a` and `A` are the same key.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key(u32);

impl Key {
    /// Build a key from a crossterm code and modifiers.
    ///
    /// Returns `None` for codes without a chord representation (media keys,
    /// lone modifier presses and the like).
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Option<Self> {
        let raw = code_to_raw(code)?;
        Some(Self::normalized(raw, modifiers_to_bits(modifiers)))
    }

    pub fn char(c: char) -> Self {
        Self(c as u32)
    }

    pub fn enter() -> Self {
        Self::named(KeyCode::Enter)
    }

    pub fn esc() -> Self {
        Self::named(KeyCode::Esc)
    }

    pub fn backspace() -> Self {
        Self::named(KeyCode::Backspace)
    }

    pub fn tab() -> Self {
        Self::named(KeyCode::Tab)
    }

    pub fn space() -> Self {
        Self::char(' ')
    }

    pub fn ctrl(self) -> Self {
        self.with_modifier(CONTROL)
    }

    pub fn alt(self) -> Self {
        self.with_modifier(ALT)
    }

    pub fn shift(self) -> Self {
        self.with_modifier(SHIFT)
    }

    pub fn meta(self) -> Self {
        self.with_modifier(META)
    }

    pub fn from_event(event: &KeyEvent) -> Option<Self> {
        Self::new(event.code, event.modifiers)
    }

    /// Decode a raw integer code produced by [`Key::to_raw`].
    ///
    /// Non-canonical codes (Shift on a character) are accepted and normalized.
    pub fn from_raw(raw: u32) -> Result<Self> {
        if raw & !(CODE_MASK | MODIFIER_MASK) != 0 {
            return Err(KeyParseError::InvalidRaw(raw));
        }
        let code = raw & CODE_MASK;
        if raw_to_code(code).is_none() {
            return Err(KeyParseError::InvalidRaw(raw));
        }
        Ok(Self::normalized(code, raw & MODIFIER_MASK))
    }

    pub fn to_raw(self) -> u32 {
        self.0
    }

    pub fn code(self) -> KeyCode {
        raw_to_code(self.0 & CODE_MASK).unwrap_or(KeyCode::Null)
    }

    pub fn modifiers(self) -> KeyModifiers {
        let bits = self.0 & MODIFIER_MASK;
        let mut modifiers = KeyModifiers::empty();
        if bits & SHIFT != 0 {
            modifiers.insert(KeyModifiers::SHIFT);
        }
        if bits & CONTROL != 0 {
            modifiers.insert(KeyModifiers::CONTROL);
        }
        if bits & ALT != 0 {
            modifiers.insert(KeyModifiers::ALT);
        }
        if bits & META != 0 {
            modifiers.insert(KeyModifiers::META);
        }
        modifiers
    }

    /// True when this is `code` pressed without modifiers.
    pub fn is(self, code: KeyCode) -> bool {
        self.0 & MODIFIER_MASK == 0 && self.code() == code
    }

    /// The character this key types, if it types one.
    ///
    /// Chords with Ctrl, Alt or Meta held are shortcuts, not text.
    pub fn printable(self) -> Option<char> {
        if self.0 & (CONTROL | ALT | META) != 0 {
            return None;
        }
        match self.code() {
            KeyCode::Char(c) if !c.is_control() => Some(c),
            _ => None,
        }
    }

    /// The decimal digit this key types, if any.
    pub fn digit(self) -> Option<u32> {
        self.printable().and_then(|c| c.to_digit(10))
    }

    pub fn display(self, format: KeyFormat) -> String {
        let (separator, long) = match format {
            KeyFormat::Short => ("-", false),
            KeyFormat::Long => ("+", true),
        };
        let mut parts: Vec<String> = MODIFIER_NAMES
            .iter()
            .filter(|(flag, _, _)| self.0 & flag != 0)
            .map(|(_, short, long_name)| {
                let name = if long { *long_name } else { *short };
                name.to_string()
            })
            .collect();
        parts.push(key_name(self.code()));
        parts.join(separator)
    }

    fn named(code: KeyCode) -> Self {
        Self(code_to_raw(code).unwrap_or(NAMED_BASE + 1))
    }

    fn with_modifier(self, flag: u32) -> Self {
        Self::normalized(self.0 & CODE_MASK, (self.0 & MODIFIER_MASK) | flag)
    }

    fn normalized(code: u32, modifiers: u32) -> Self {
        let mut code = code;
        let mut modifiers = modifiers & MODIFIER_MASK;
        if code < NAMED_BASE && modifiers & SHIFT != 0 {
            if let Some(c) = char::from_u32(code) {
                code = fold_shift(c) as u32;
            }
            modifiers &= !SHIFT;
        }
        Self(code | modifiers)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display(KeyFormat::Short))
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({})", self.display(KeyFormat::Short))
    }
}

/// Map a key code to its named entry, used by the parser.
pub(crate) fn named_code(name: &str) -> Option<KeyCode> {
    NAMED_KEYS
        .iter()
        .find(|(_, named)| named.eq_ignore_ascii_case(name))
        .map(|(code, _)| *code)
}

pub(crate) fn function_key_in_range(n: u8) -> bool {
    (1..=MAX_FUNCTION_KEY).contains(&n)
}

fn fold_shift(c: char) -> char {
    if !c.is_lowercase() {
        return c;
    }
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

fn code_to_raw(code: KeyCode) -> Option<u32> {
    match code {
        KeyCode::Char(c) => Some(c as u32),
        KeyCode::F(n) if function_key_in_range(n) => Some(FUNCTION_BASE + n as u32),
        other => NAMED_KEYS
            .iter()
            .position(|(named, _)| *named == other)
            .map(|index| NAMED_BASE + 1 + index as u32),
    }
}

fn raw_to_code(raw: u32) -> Option<KeyCode> {
    if raw < NAMED_BASE {
        return char::from_u32(raw).map(KeyCode::Char);
    }
    if raw > FUNCTION_BASE && raw <= FUNCTION_BASE + MAX_FUNCTION_KEY as u32 {
        return Some(KeyCode::F((raw - FUNCTION_BASE) as u8));
    }
    let index = raw.checked_sub(NAMED_BASE + 1)? as usize;
    NAMED_KEYS.get(index).map(|(code, _)| *code)
}

fn modifiers_to_bits(modifiers: KeyModifiers) -> u32 {
    let mut bits = 0;
    if modifiers.contains(KeyModifiers::SHIFT) {
        bits |= SHIFT;
    }
    if modifiers.contains(KeyModifiers::CONTROL) {
        bits |= CONTROL;
    }
    if modifiers.contains(KeyModifiers::ALT) {
        bits |= ALT;
    }
    if modifiers.contains(KeyModifiers::META) {
        bits |= META;
    }
    bits
}

fn key_name(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::F(n) => format!("F{}", n),
        other => NAMED_KEYS
            .iter()
            .find(|(named, _)| *named == other)
            .map(|(_, name)| name.to_string())
            .unwrap_or_else(|| "Unknown".to_string()),
    }
}
