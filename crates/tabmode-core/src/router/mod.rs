//! Key event routing.
//!
//! In `Idle` chords are matched against the shortcut index; in every other
//! mode they edit the pending input until Enter confirms or Escape cancels.
//! Runtime errors are recovered here: they are logged and shown as warnings,
//! and never reach the caller.

mod text;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use tracing::{debug, warn};

use crate::collab::{Collaborators, InputAction};
use crate::command::{CommandTable, PrefixMatch};
use crate::error::{Result, TabmodeError};
use crate::mode::{InputKind, ModeMachine, OffsetMode, State};
use tabmode_keys::{Key, KeySequence};
use text::{Edit, classify, delete_back};

/// Result of matching the chords typed so far.
enum Lookup {
    Fire(State),
    Wait,
    Miss,
}

pub struct InputRouter {
    table: CommandTable,
    machine: ModeMachine,
    pending_chords: Vec<Key>,
}

impl InputRouter {
    pub fn new(table: CommandTable) -> Self {
        Self {
            table,
            machine: ModeMachine::new(),
            pending_chords: Vec::new(),
        }
    }

    pub fn state(&self) -> State {
        self.machine.state()
    }

    pub fn machine(&self) -> &ModeMachine {
        &self.machine
    }

    pub fn table(&self) -> &CommandTable {
        &self.table
    }

    /// Chords typed in `Idle` that prefix at least one shortcut.
    pub fn pending_chords(&self) -> &[Key] {
        &self.pending_chords
    }

    /// Route a terminal key event by kind.
    pub fn handle_event(&mut self, event: &KeyEvent, cx: &mut Collaborators<'_>) {
        let Some(key) = Key::from_event(event) else {
            return;
        };
        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self.on_key_press(key, cx),
            KeyEventKind::Release => self.on_key_release(key, cx),
        }
    }

    pub fn on_key_press(&mut self, key: Key, cx: &mut Collaborators<'_>) {
        let state = self.machine.state();
        let outcome = match state.input_kind() {
            InputKind::Shortcuts => self.press_idle(key, cx),
            InputKind::CommandName => self.press_command(key, cx),
            InputKind::Text => self.press_text(key, cx),
            InputKind::Digits => self.press_digits(key, cx),
            InputKind::Offset => self.press_offset(key, cx),
            // One-shot modes have already returned to Idle.
            InputKind::OneShot => Ok(()),
        };
        if let Err(err) = outcome {
            self.report(state, &err, cx);
        }
    }

    /// Releasing Escape in `MoveTab` drops the offset and digits but stays in
    /// the mode.
    pub fn on_key_release(&mut self, key: Key, cx: &mut Collaborators<'_>) {
        if self.machine.state() == State::MoveTab && key.is(KeyCode::Esc) {
            debug!("offset reset");
            self.machine.pending_mut().clear();
            self.echo(cx);
        }
    }

    fn report(&self, state: State, err: &TabmodeError, cx: &mut Collaborators<'_>) {
        warn!(%state, error = %err, "key not handled");
        cx.status.show_warning(&err.to_string());
    }

    fn echo(&self, cx: &mut Collaborators<'_>) {
        cx.status.print_user_input(InputAction::Set, &self.machine.echo());
    }

    fn press_idle(&mut self, key: Key, cx: &mut Collaborators<'_>) -> Result<()> {
        if key.is(KeyCode::Esc) {
            self.pending_chords.clear();
            return Ok(());
        }
        self.pending_chords.push(key);
        loop {
            match self.lookup_pending() {
                Lookup::Fire(state) => {
                    self.pending_chords.clear();
                    return self.fire(state, cx);
                }
                Lookup::Wait => {
                    debug!(chords = self.pending_chords.len(), "awaiting next chord");
                    return Ok(());
                }
                // The breaking chord may start a shortcut of its own.
                Lookup::Miss if self.pending_chords.len() > 1 => {
                    self.pending_chords = vec![key];
                }
                Lookup::Miss => {
                    self.pending_chords.clear();
                    if key == self.table.leader() {
                        return self.machine.enter_command(cx);
                    }
                    return Ok(());
                }
            }
        }
    }

    fn lookup_pending(&self) -> Lookup {
        let Ok(typed) = KeySequence::new(self.pending_chords.clone()) else {
            return Lookup::Miss;
        };
        match self.table.lookup_by_prefix(&typed) {
            PrefixMatch::ExactMatch(command) => {
                debug!(command = %command.name, sequence = %typed, "shortcut matched");
                Lookup::Fire(command.state)
            }
            PrefixMatch::PartialMatch(_) => Lookup::Wait,
            PrefixMatch::NoMatch => Lookup::Miss,
        }
    }

    /// Enter the mode bound to a command. Commands that take no argument act
    /// at once.
    fn fire(&mut self, state: State, cx: &mut Collaborators<'_>) -> Result<()> {
        self.machine.request_transition(state, cx)?;
        let immediate = self
            .table
            .command_for_state(state)
            .is_some_and(|command| !command.requires_confirmation());
        if immediate && self.machine.state() == state {
            self.confirm(cx)?;
        }
        Ok(())
    }

    fn press_command(&mut self, key: Key, cx: &mut Collaborators<'_>) -> Result<()> {
        match classify(key) {
            Edit::Cancel => self.machine.request_transition(State::Idle, cx),
            Edit::Confirm => {
                let typed = self.machine.pending().text.clone();
                let target = self.table.resolve_typed_name(&typed).map(|command| command.state);
                self.machine.request_transition(State::Idle, cx)?;
                self.fire(target?, cx)
            }
            Edit::Insert(' ') => {
                self.show_completions(cx);
                Ok(())
            }
            Edit::Insert(c) => {
                self.machine.pending_mut().text.push(c);
                self.echo(cx);
                Ok(())
            }
            Edit::DeleteBack => {
                if delete_back(&mut self.machine.pending_mut().text) {
                    self.echo(cx);
                }
                Ok(())
            }
            Edit::Ignore => Ok(()),
        }
    }

    fn show_completions(&self, cx: &mut Collaborators<'_>) {
        let typed = &self.machine.pending().text;
        let names: Vec<&str> = self
            .table
            .complete(typed)
            .into_iter()
            .map(|command| command.name.as_str())
            .collect();
        let message = match names.as_slice() {
            [] => format!("no command starts with '{typed}'"),
            [only] => format!("{only}: Enter to run"),
            many => many.join("  "),
        };
        cx.status.show_message(&message);
    }

    fn press_text(&mut self, key: Key, cx: &mut Collaborators<'_>) -> Result<()> {
        match classify(key) {
            Edit::Cancel => self.machine.request_transition(State::Idle, cx),
            Edit::Confirm => self.confirm(cx),
            Edit::Insert(c) => {
                self.machine.pending_mut().text.push(c);
                self.echo(cx);
                Ok(())
            }
            Edit::DeleteBack => {
                if delete_back(&mut self.machine.pending_mut().text) {
                    self.echo(cx);
                }
                Ok(())
            }
            Edit::Ignore => Ok(()),
        }
    }

    fn press_digits(&mut self, key: Key, cx: &mut Collaborators<'_>) -> Result<()> {
        match classify(key) {
            Edit::Cancel => self.machine.request_transition(State::Idle, cx),
            Edit::Confirm => self.confirm(cx),
            Edit::Insert(c) if c.is_ascii_digit() => {
                self.machine.pending_mut().text.push(c);
                self.echo(cx);
                Ok(())
            }
            Edit::Insert(c) => Err(TabmodeError::MalformedIndex(c.to_string())),
            Edit::DeleteBack => {
                if delete_back(&mut self.machine.pending_mut().text) {
                    self.echo(cx);
                }
                Ok(())
            }
            Edit::Ignore => Ok(()),
        }
    }

    fn press_offset(&mut self, key: Key, cx: &mut Collaborators<'_>) -> Result<()> {
        match classify(key) {
            Edit::Cancel => {
                // With an offset pending the release resets it instead.
                if self.machine.pending().is_empty() {
                    self.machine.request_transition(State::Idle, cx)
                } else {
                    Ok(())
                }
            }
            Edit::Confirm => self.confirm(cx),
            Edit::DeleteBack => {
                if delete_back(&mut self.machine.pending_mut().text) {
                    self.echo(cx);
                }
                Ok(())
            }
            Edit::Insert(c) => {
                let pending = self.machine.pending_mut();
                match (pending.offset_mode, c) {
                    (OffsetMode::Idle, '0'..='9') => {
                        pending.offset_mode = OffsetMode::Absolute;
                        pending.text.push(c);
                    }
                    (OffsetMode::Idle, '+' | 'l') => {
                        pending.offset_mode = OffsetMode::Right;
                        pending.text.clear();
                    }
                    (OffsetMode::Idle, '-' | 'h') => {
                        pending.offset_mode = OffsetMode::Left;
                        pending.text.clear();
                    }
                    (_, '0'..='9') => pending.text.push(c),
                    _ => return Err(TabmodeError::MalformedIndex(c.to_string())),
                }
                self.echo(cx);
                Ok(())
            }
            Edit::Ignore => Ok(()),
        }
    }

    /// Run the current mode's action with the buffered input, then return to
    /// `Idle`. A malformed number keeps the mode so it can be corrected.
    fn confirm(&mut self, cx: &mut Collaborators<'_>) -> Result<()> {
        let state = self.machine.state();
        if self.machine.pending().text.trim().is_empty() {
            let default = self
                .table
                .command_for_state(state)
                .map(|command| command.default_value.as_str())
                .unwrap_or_default();
            if !default.is_empty() {
                self.machine.pending_mut().text = default.to_string();
            }
        }
        match self.machine.execute_action(state, cx) {
            Err(err @ TabmodeError::MalformedIndex(_)) => Err(err),
            outcome => {
                let back = self.machine.request_transition(State::Idle, cx);
                outcome.and(back)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandConfig;
    use crate::test_support::{Call, Host};

    fn router() -> InputRouter {
        let table = CommandTable::from_config(&CommandConfig::default()).expect("table");
        InputRouter::new(table)
    }

    fn press_all(router: &mut InputRouter, host: &mut Host, keys: &[Key]) {
        for &key in keys {
            router.on_key_press(key, &mut host.collaborators());
        }
    }

    fn type_text(router: &mut InputRouter, host: &mut Host, text: &str) {
        for c in text.chars() {
            router.on_key_press(Key::char(c), &mut host.collaborators());
        }
    }

    #[test]
    fn single_chord_shortcut_enters_mode() {
        let mut router = router();
        let mut host = Host::with_tabs(1);
        press_all(&mut router, &mut host, &[Key::char('o')]);
        assert_eq!(router.state(), State::OpenTab);
        assert_eq!(host.status.last_input(), Some("open: "));
    }

    #[test]
    fn multi_chord_shortcut_waits_then_fires() {
        let mut router = router();
        let mut host = Host::with_tabs(3);
        router.on_key_press(Key::char('g'), &mut host.collaborators());
        assert_eq!(router.state(), State::Idle);
        assert_eq!(router.pending_chords(), &[Key::char('g')]);
        router.on_key_press(Key::char('t'), &mut host.collaborators());
        assert_eq!(router.state(), State::MoveRight);
        assert!(router.pending_chords().is_empty());
    }

    #[test]
    fn breaking_chord_is_retried_alone() {
        let mut router = router();
        let mut host = Host::with_tabs(1);
        press_all(&mut router, &mut host, &[Key::char('g'), Key::char('o')]);
        assert_eq!(router.state(), State::OpenTab);
    }

    #[test]
    fn escape_in_idle_drops_pending_chords() {
        let mut router = router();
        let mut host = Host::with_tabs(3);
        press_all(&mut router, &mut host, &[Key::char('g'), Key::esc(), Key::char('t')]);
        assert_eq!(router.state(), State::Idle);
        assert!(router.pending_chords().is_empty());
    }

    #[test]
    fn leader_opens_command_prompt() {
        let mut router = router();
        let mut host = Host::with_tabs(0);
        router.on_key_press(Key::char(':'), &mut host.collaborators());
        assert_eq!(router.state(), State::Command);
        assert_eq!(host.status.last_input(), Some(":"));
    }

    #[test]
    fn typed_command_name_enters_its_mode() {
        let mut router = router();
        let mut host = Host::with_tabs(0);
        router.on_key_press(Key::char(':'), &mut host.collaborators());
        type_text(&mut router, &mut host, "open-tab");
        assert_eq!(host.status.last_input(), Some(":open-tab"));
        router.on_key_press(Key::enter(), &mut host.collaborators());
        assert_eq!(router.state(), State::OpenTab);
    }

    #[test]
    fn unknown_command_warns_and_returns_to_idle() {
        let mut router = router();
        let mut host = Host::with_tabs(1);
        router.on_key_press(Key::char(':'), &mut host.collaborators());
        type_text(&mut router, &mut host, "nope");
        router.on_key_press(Key::enter(), &mut host.collaborators());
        assert_eq!(router.state(), State::Idle);
        assert_eq!(host.status.warnings, vec!["Unknown command 'nope'".to_string()]);
    }

    #[test]
    fn space_in_command_lists_completions_without_transition() {
        let mut router = router();
        let mut host = Host::with_tabs(1);
        router.on_key_press(Key::char(':'), &mut host.collaborators());
        type_text(&mut router, &mut host, "find");
        router.on_key_press(Key::space(), &mut host.collaborators());
        assert_eq!(router.state(), State::Command);
        assert_eq!(router.machine().pending().text, "find");
        assert_eq!(
            host.status.messages,
            vec!["find  find-prev  find-next".to_string()]
        );
    }

    #[test]
    fn open_tab_uses_typed_text_or_default() {
        let mut router = router();
        let mut host = Host::with_tabs(0);
        router.on_key_press(Key::char('o'), &mut host.collaborators());
        type_text(&mut router, &mut host, "example.org");
        router.on_key_press(Key::enter(), &mut host.collaborators());
        assert_eq!(router.state(), State::Idle);

        router.on_key_press(Key::char('o'), &mut host.collaborators());
        router.on_key_press(Key::enter(), &mut host.collaborators());
        assert_eq!(
            host.tabs.calls,
            vec![
                Call::Open("example.org".to_string()),
                Call::Open("about:blank".to_string())
            ]
        );
    }

    #[test]
    fn backspace_edits_buffer() {
        let mut router = router();
        let mut host = Host::with_tabs(1);
        router.on_key_press(Key::char('/'), &mut host.collaborators());
        type_text(&mut router, &mut host, "cart");
        router.on_key_press(Key::backspace(), &mut host.collaborators());
        router.on_key_press(Key::char('h').ctrl(), &mut host.collaborators());
        assert_eq!(router.machine().pending().text, "ca");
        assert_eq!(host.status.last_input(), Some("find: ca"));
    }

    #[test]
    fn escape_discards_buffer() {
        let mut router = router();
        let mut host = Host::with_tabs(1);
        router.on_key_press(Key::char('/'), &mut host.collaborators());
        type_text(&mut router, &mut host, "abc");
        router.on_key_press(Key::esc(), &mut host.collaborators());
        assert_eq!(router.state(), State::Idle);
        assert!(router.machine().pending().is_empty());
        assert!(host.tabs.calls.is_empty());
    }

    #[test]
    fn digit_modes_reject_letters_without_leaving() {
        let mut router = router();
        let mut host = Host::with_tabs(2);
        router.on_key_press(Key::char('x'), &mut host.collaborators());
        assert_eq!(router.state(), State::CloseTab);
        router.on_key_press(Key::char('q'), &mut host.collaborators());
        assert_eq!(router.state(), State::CloseTab);
        assert_eq!(host.status.warnings.len(), 1);
        router.on_key_press(Key::char('1'), &mut host.collaborators());
        router.on_key_press(Key::enter(), &mut host.collaborators());
        assert_eq!(host.tabs.calls, vec![Call::Close(1)]);
        assert_eq!(router.state(), State::Idle);
    }

    #[test]
    fn move_right_with_empty_buffer_moves_one() {
        let mut router = router();
        let mut host = Host::with_tabs(3);
        press_all(&mut router, &mut host, &[Key::char('g'), Key::char('t'), Key::enter()]);
        assert_eq!(host.tabs.calls, vec![Call::MoveCursor(1)]);
        assert_eq!(router.state(), State::Idle);
    }

    #[test]
    fn move_tab_direction_then_digits() {
        let mut router = router();
        let mut host = Host::with_tabs(4);
        host.tabs.current = 1;
        press_all(&mut router, &mut host, &[Key::char('g'), Key::char('m')]);
        assert_eq!(router.state(), State::MoveTab);
        router.on_key_press(Key::char('h'), &mut host.collaborators());
        let pending = router.machine().pending();
        assert_eq!(pending.offset_mode, OffsetMode::Left);
        assert!(pending.text.is_empty());
        assert_eq!(router.state(), State::MoveTab);
        press_all(&mut router, &mut host, &[Key::char('2'), Key::enter()]);
        assert_eq!(host.tabs.calls, vec![Call::MoveTab(1, 3)]);
    }

    #[test]
    fn move_tab_digit_first_is_absolute() {
        let mut router = router();
        let mut host = Host::with_tabs(4);
        press_all(&mut router, &mut host, &[Key::char('g'), Key::char('m'), Key::char('3')]);
        assert_eq!(router.machine().pending().offset_mode, OffsetMode::Absolute);
        assert_eq!(router.machine().pending().text, "3");
        router.on_key_press(Key::enter(), &mut host.collaborators());
        assert_eq!(host.tabs.calls, vec![Call::MoveTab(0, 3)]);
    }

    #[test]
    fn move_tab_escape_press_and_release_resets_offset() {
        let mut router = router();
        let mut host = Host::with_tabs(3);
        press_all(
            &mut router,
            &mut host,
            &[Key::char('g'), Key::char('m'), Key::char('+'), Key::char('1')],
        );
        router.on_key_press(Key::esc(), &mut host.collaborators());
        assert_eq!(router.state(), State::MoveTab);
        router.on_key_release(Key::esc(), &mut host.collaborators());
        assert_eq!(router.state(), State::MoveTab);
        assert!(router.machine().pending().is_empty());

        router.on_key_press(Key::esc(), &mut host.collaborators());
        assert_eq!(router.state(), State::Idle);
    }

    #[test]
    fn move_tab_backspace_keeps_direction() {
        let mut router = router();
        let mut host = Host::with_tabs(3);
        press_all(
            &mut router,
            &mut host,
            &[Key::char('g'), Key::char('m'), Key::char('-'), Key::char('2')],
        );
        router.on_key_press(Key::backspace(), &mut host.collaborators());
        let pending = router.machine().pending();
        assert!(pending.text.is_empty());
        assert_eq!(pending.offset_mode, OffsetMode::Left);
    }

    #[test]
    fn move_tab_rejects_keys_after_direction_is_fixed() {
        let mut router = router();
        let mut host = Host::with_tabs(4);
        press_all(
            &mut router,
            &mut host,
            &[Key::char('g'), Key::char('m'), Key::char('3'), Key::char('+')],
        );
        assert_eq!(host.status.warnings.len(), 1);
        assert_eq!(router.state(), State::MoveTab);
        let pending = router.machine().pending();
        assert_eq!(pending.offset_mode, OffsetMode::Absolute);
        assert_eq!(pending.text, "3");

        router.on_key_press(Key::esc(), &mut host.collaborators());
        router.on_key_release(Key::esc(), &mut host.collaborators());
        press_all(&mut router, &mut host, &[Key::char('h'), Key::char('x')]);
        assert_eq!(host.status.warnings.len(), 2);
        assert_eq!(router.state(), State::MoveTab);
        let pending = router.machine().pending();
        assert_eq!(pending.offset_mode, OffsetMode::Left);
        assert!(pending.text.is_empty());
        assert!(host.tabs.calls.is_empty());
    }

    #[test]
    fn new_search_opens_tab_then_searches_it() {
        let mut router = router();
        let mut host = Host::with_tabs(2);
        router.on_key_press(Key::char('s'), &mut host.collaborators());
        assert_eq!(router.state(), State::NewSearch);
        type_text(&mut router, &mut host, "ru");
        router.on_key_press(Key::enter(), &mut host.collaborators());
        assert_eq!(router.state(), State::Idle);
        assert_eq!(
            host.tabs.calls,
            vec![Call::Open(String::new()), Call::Search(2, "ru".to_string())]
        );
    }

    #[test]
    fn edit_search_extends_current_search() {
        let mut router = router();
        let mut host = Host::with_tabs(2);
        router.on_key_press(Key::char('s'), &mut host.collaborators());
        type_text(&mut router, &mut host, "ru");
        router.on_key_press(Key::enter(), &mut host.collaborators());
        host.tabs.calls.clear();

        router.on_key_press(Key::char('e'), &mut host.collaborators());
        assert_eq!(router.machine().pending().text, "ru");
        type_text(&mut router, &mut host, "x");
        router.on_key_press(Key::enter(), &mut host.collaborators());
        assert_eq!(host.tabs.calls, vec![Call::Search(2, "rux".to_string())]);
        assert_eq!(router.state(), State::Idle);
    }

    #[test]
    fn reload_uses_typed_or_current_tab() {
        let mut router = router();
        let mut host = Host::with_tabs(3);
        host.tabs.current = 2;
        press_all(&mut router, &mut host, &[Key::char('r'), Key::char('1'), Key::enter()]);
        assert_eq!(router.state(), State::Idle);
        press_all(&mut router, &mut host, &[Key::char('r'), Key::enter()]);
        assert_eq!(host.tabs.calls, vec![Call::Reload(1), Call::Reload(2)]);
        assert_eq!(router.state(), State::Idle);
    }

    #[test]
    fn shortcut_chords_are_plain_text_while_typing() {
        let mut router = router();
        let mut host = Host::with_tabs(3);
        router.on_key_press(Key::char('/'), &mut host.collaborators());
        type_text(&mut router, &mut host, "gtx");
        assert_eq!(router.state(), State::Find);
        assert_eq!(router.machine().pending().text, "gtx");
        assert!(router.pending_chords().is_empty());
        assert!(host.tabs.calls.is_empty());
    }

    #[test]
    fn shortcut_needing_tabs_warns_when_none_open() {
        let mut router = router();
        let mut host = Host::with_tabs(0);
        router.on_key_press(Key::char('x'), &mut host.collaborators());
        assert_eq!(router.state(), State::Idle);
        assert_eq!(
            host.status.warnings,
            vec!["Cannot switch from IDLE to CLOSE_TAB".to_string()]
        );
    }

    #[test]
    fn one_shot_shortcut_acts_immediately() {
        let mut router = router();
        let mut host = Host::with_tabs(2);
        host.tabs.current = 1;
        router.on_key_press(Key::char('H'), &mut host.collaborators());
        assert_eq!(router.state(), State::Idle);
        assert_eq!(
            host.tabs.calls,
            vec![Call::History(1, crate::collab::HistoryDirection::Back)]
        );
    }

    #[test]
    fn zero_arity_command_runs_without_enter() {
        let mut config = CommandConfig::default();
        for record in &mut config.commands {
            if record.key == "close_tab" {
                record.number_of_arguments = 0;
            }
        }
        let mut router = InputRouter::new(CommandTable::from_config(&config).expect("table"));
        let mut host = Host::with_tabs(2);
        host.tabs.current = 1;
        router.on_key_press(Key::char('x'), &mut host.collaborators());
        assert_eq!(router.state(), State::Idle);
        assert_eq!(host.tabs.calls, vec![Call::Close(1)]);
    }

    #[test]
    fn release_events_outside_move_tab_are_ignored() {
        let mut router = router();
        let mut host = Host::with_tabs(1);
        router.on_key_press(Key::char('/'), &mut host.collaborators());
        type_text(&mut router, &mut host, "x");
        router.on_key_release(Key::esc(), &mut host.collaborators());
        assert_eq!(router.state(), State::Find);
        assert_eq!(router.machine().pending().text, "x");
    }

    #[test]
    fn handle_event_dispatches_by_kind() {
        use crossterm::event::KeyModifiers;

        let mut router = router();
        let mut host = Host::with_tabs(1);
        let press = KeyEvent::new_with_kind(KeyCode::Char('/'), KeyModifiers::NONE, KeyEventKind::Press);
        let release =
            KeyEvent::new_with_kind(KeyCode::Char('/'), KeyModifiers::NONE, KeyEventKind::Release);
        router.handle_event(&release, &mut host.collaborators());
        assert_eq!(router.state(), State::Idle);
        router.handle_event(&press, &mut host.collaborators());
        assert_eq!(router.state(), State::Find);
    }
}
