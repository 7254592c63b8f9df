use crossterm::event::KeyCode;
use tabmode_keys::Key;

/// What a keystroke does to a mode's input buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Edit {
    Insert(char),
    DeleteBack,
    Confirm,
    Cancel,
    Ignore,
}

pub(crate) fn classify(key: Key) -> Edit {
    if key == Key::char('h').ctrl() {
        return Edit::DeleteBack;
    }
    if let Some(c) = key.printable() {
        return Edit::Insert(c);
    }
    match key.code() {
        KeyCode::Backspace => Edit::DeleteBack,
        KeyCode::Enter if key.is(KeyCode::Enter) => Edit::Confirm,
        KeyCode::Esc if key.is(KeyCode::Esc) => Edit::Cancel,
        _ => Edit::Ignore,
    }
}

/// Remove the last character. Returns false when the buffer was empty.
pub(crate) fn delete_back(buffer: &mut String) -> bool {
    buffer.pop().is_some()
}
