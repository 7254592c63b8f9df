use crossterm::event::{KeyCode, KeyModifiers};
use std::str::FromStr;

use crate::error::{KeyParseError, Result};
use crate::key::{Key, function_key_in_range, named_code};

impl FromStr for Key {
    type Err = KeyParseError;

    fn from_str(input: &str) -> Result<Self> {
        parse_key(input)
    }
}

/// Parse one chord such as `t`, `C-t`, `M-S-Left`, `F5` or `C--`.
pub(crate) fn parse_key(input: &str) -> Result<Key> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(KeyParseError::EmptyKey);
    }
    if let Some(ch) = parse_single_char(trimmed) {
        return Ok(Key::char(ch));
    }

    let (mods, key_part) = if !trimmed.contains('-') {
        (KeyModifiers::empty(), trimmed)
    } else if let Some(mod_str) = trimmed.strip_suffix('-') {
        let mod_str = mod_str.trim_end_matches('-');
        if mod_str.is_empty() {
            return Err(KeyParseError::MissingModifier);
        }
        (parse_modifiers(mod_str)?, "-")
    } else {
        let mut split = trimmed.rsplitn(2, '-');
        let key_part = split.next().ok_or(KeyParseError::EmptyKey)?;
        let mod_str = split.next().unwrap_or_default();
        (parse_modifiers(mod_str)?, key_part)
    };

    let code = parse_key_code(key_part)?;
    Key::new(code, mods).ok_or_else(|| KeyParseError::Unsupported(key_part.to_string()))
}

fn parse_modifiers(input: &str) -> Result<KeyModifiers> {
    let mut modifiers = KeyModifiers::empty();
    for part in input.split('-') {
        let raw = part.trim();
        if raw.is_empty() {
            return Err(KeyParseError::EmptyModifier);
        }
        let flag = match raw.to_ascii_lowercase().as_str() {
            "c" | "ctrl" | "control" => KeyModifiers::CONTROL,
            "m" | "alt" => KeyModifiers::ALT,
            "s" | "shift" => KeyModifiers::SHIFT,
            "meta" | "cmd" | "super" => KeyModifiers::META,
            _ => return Err(KeyParseError::UnknownModifier(part.to_string())),
        };
        if modifiers.contains(flag) {
            return Err(KeyParseError::DuplicateModifier(raw.to_string()));
        }
        modifiers.insert(flag);
    }
    Ok(modifiers)
}

fn parse_key_code(input: &str) -> Result<KeyCode> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(KeyParseError::EmptyKey);
    }
    if let Some(ch) = parse_single_char(trimmed) {
        return Ok(KeyCode::Char(ch));
    }
    if let Some(code) = named_code(trimmed) {
        return Ok(code);
    }
    if let Some(n) = parse_function_key(trimmed) {
        return Ok(KeyCode::F(n));
    }
    let norm = trimmed.to_ascii_lowercase();
    match norm.as_str() {
        "return" => Ok(KeyCode::Enter),
        "escape" => Ok(KeyCode::Esc),
        "del" => Ok(KeyCode::Delete),
        "space" | "spc" => Ok(KeyCode::Char(' ')),
        "dash" | "minus" => Ok(KeyCode::Char('-')),
        "plus" => Ok(KeyCode::Char('+')),
        "greater" => Ok(KeyCode::Char('>')),
        "less" => Ok(KeyCode::Char('<')),
        "comma" => Ok(KeyCode::Char(',')),
        "period" | "dot" => Ok(KeyCode::Char('.')),
        "slash" => Ok(KeyCode::Char('/')),
        "backslash" => Ok(KeyCode::Char('\\')),
        "colon" => Ok(KeyCode::Char(':')),
        "semicolon" => Ok(KeyCode::Char(';')),
        "quote" | "apostrophe" => Ok(KeyCode::Char('\'')),
        "doublequote" => Ok(KeyCode::Char('"')),
        "backtick" | "grave" => Ok(KeyCode::Char('`')),
        "lbracket" | "leftbracket" => Ok(KeyCode::Char('[')),
        "rbracket" | "rightbracket" => Ok(KeyCode::Char(']')),
        "equal" => Ok(KeyCode::Char('=')),
        _ => Err(KeyParseError::UnknownKey(input.to_string())),
    }
}

fn parse_function_key(input: &str) -> Option<u8> {
    let digits = input.strip_prefix('F').or_else(|| input.strip_prefix('f'))?;
    let n: u8 = digits.parse().ok()?;
    function_key_in_range(n).then_some(n)
}

fn parse_single_char(input: &str) -> Option<char> {
    let mut chars = input.chars();
    let ch = chars.next()?;
    if chars.next().is_none() {
        Some(ch)
    } else {
        None
    }
}
