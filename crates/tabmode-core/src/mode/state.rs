use std::fmt;

use crate::collab::TabCollaborator;

/// The mutually exclusive input modes.
///
/// Exactly one is current at any time. Every mode except `Idle` and
/// `Command` belongs to one command; `Command` is only reachable through the
/// leader chord.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum State {
    Idle,
    Command,
    OpenTab,
    CloseTab,
    RefreshTab,
    MoveLeft,
    MoveRight,
    MoveTab,
    NewSearch,
    EditSearch,
    Find,
    FindUp,
    FindDown,
    ScrollUp,
    ScrollDown,
    HistoryPrev,
    HistoryNext,
    OpenFile,
}

/// What a mode does with keystrokes while it is current.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    /// Shortcut lookup (`Idle`).
    Shortcuts,
    /// Typed command name (`Command`).
    CommandName,
    /// Free text until Enter.
    Text,
    /// Digits only until Enter.
    Digits,
    /// A direction or absolute position, then digits (`MoveTab`).
    Offset,
    /// Runs on entry and returns to `Idle`; never sees a keystroke.
    OneShot,
}

impl State {
    pub const ALL: [State; 18] = [
        State::Idle,
        State::Command,
        State::OpenTab,
        State::CloseTab,
        State::RefreshTab,
        State::MoveLeft,
        State::MoveRight,
        State::MoveTab,
        State::NewSearch,
        State::EditSearch,
        State::Find,
        State::FindUp,
        State::FindDown,
        State::ScrollUp,
        State::ScrollDown,
        State::HistoryPrev,
        State::HistoryNext,
        State::OpenFile,
    ];

    /// Identifier used for this mode in command configuration files.
    pub fn config_key(self) -> &'static str {
        match self {
            State::Idle => "idle",
            State::Command => "command",
            State::OpenTab => "open_tab",
            State::CloseTab => "close_tab",
            State::RefreshTab => "refresh_tab",
            State::MoveLeft => "move_left",
            State::MoveRight => "move_right",
            State::MoveTab => "move_tab",
            State::NewSearch => "new_search",
            State::EditSearch => "edit_search",
            State::Find => "find",
            State::FindUp => "find_up",
            State::FindDown => "find_down",
            State::ScrollUp => "scroll_up",
            State::ScrollDown => "scroll_down",
            State::HistoryPrev => "history_prev",
            State::HistoryNext => "history_next",
            State::OpenFile => "open_file",
        }
    }

    /// Parse a configuration key, case-insensitively.
    ///
    /// `idle` and `command` are not bindable and yield `None`.
    pub fn from_config_key(key: &str) -> Option<State> {
        let key = key.trim();
        State::ALL
            .into_iter()
            .filter(|state| !matches!(state, State::Idle | State::Command))
            .find(|state| state.config_key().eq_ignore_ascii_case(key))
    }

    pub fn input_kind(self) -> InputKind {
        match self {
            State::Idle => InputKind::Shortcuts,
            State::Command => InputKind::CommandName,
            State::OpenTab | State::NewSearch | State::EditSearch | State::Find => InputKind::Text,
            State::CloseTab | State::RefreshTab | State::MoveLeft | State::MoveRight => {
                InputKind::Digits
            }
            State::MoveTab => InputKind::Offset,
            State::FindUp
            | State::FindDown
            | State::ScrollUp
            | State::ScrollDown
            | State::HistoryPrev
            | State::HistoryNext
            | State::OpenFile => InputKind::OneShot,
        }
    }

    /// Short prompt shown in the status bar while the mode collects input.
    pub fn prompt(self) -> &'static str {
        match self {
            State::Command => ":",
            State::OpenTab => "open: ",
            State::NewSearch => "search: ",
            State::EditSearch => "edit search: ",
            State::Find => "find: ",
            State::CloseTab => "close tab: ",
            State::RefreshTab => "reload tab: ",
            State::MoveLeft => "left by: ",
            State::MoveRight => "right by: ",
            State::MoveTab => "move tab to: ",
            _ => "",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.config_key().to_ascii_uppercase())
    }
}

/// How the digits typed in `MoveTab` are read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OffsetMode {
    /// Nothing typed yet.
    #[default]
    Idle,
    Left,
    Right,
    Absolute,
}

/// Text typed in the current mode, plus the `MoveTab` offset mode.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PendingInput {
    pub text: String,
    pub offset_mode: OffsetMode,
}

impl PendingInput {
    pub fn clear(&mut self) {
        self.text.clear();
        self.offset_mode = OffsetMode::Idle;
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.offset_mode == OffsetMode::Idle
    }
}

/// Facts about the host that gate transitions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransitionContext {
    pub tab_count: usize,
}

impl TransitionContext {
    pub fn new(tab_count: usize) -> Self {
        Self { tab_count }
    }

    pub fn from_tabs(tabs: &dyn TabCollaborator) -> Self {
        Self::new(tabs.tab_count())
    }
}

/// Whether `requested` may follow `current`.
///
/// `Command` is never valid here; it is entered only through the leader chord.
pub fn is_valid(current: State, requested: State, context: TransitionContext) -> bool {
    match requested {
        State::Idle | State::OpenFile => true,
        State::OpenTab => current == State::Idle,
        State::NewSearch
        | State::EditSearch
        | State::CloseTab
        | State::RefreshTab
        | State::Find
        | State::FindUp
        | State::FindDown
        | State::ScrollUp
        | State::ScrollDown
        | State::HistoryPrev
        | State::HistoryNext => current == State::Idle && context.tab_count > 0,
        State::MoveLeft | State::MoveRight | State::MoveTab => {
            current == State::Idle && context.tab_count > 1
        }
        State::Command => false,
    }
}
