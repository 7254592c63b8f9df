use tracing::debug;

use super::state::{InputKind, OffsetMode, PendingInput, State, TransitionContext, is_valid};
use crate::collab::{Collaborators, FindSettings, HistoryDirection, InputAction, ScrollDirection};
use crate::error::{Result, TabmodeError};
use crate::tab_index::resolve;

/// Current mode, the input typed in it, and the mode-specific setup that
/// runs on every transition.
#[derive(Debug)]
pub struct ModeMachine {
    state: State,
    pending: PendingInput,
    last_find: Option<String>,
}

impl Default for ModeMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeMachine {
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            pending: PendingInput::default(),
            last_find: None,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn pending(&self) -> &PendingInput {
        &self.pending
    }

    pub fn pending_mut(&mut self) -> &mut PendingInput {
        &mut self.pending
    }

    pub fn last_find(&self) -> Option<&str> {
        self.last_find.as_deref()
    }

    /// Switch to `target` if the transition table allows it.
    ///
    /// On success the new mode's setup has run; one-shot modes have already
    /// acted and returned to `Idle`. An error from a one-shot action is
    /// returned after the return to `Idle`.
    pub fn request_transition(&mut self, target: State, cx: &mut Collaborators<'_>) -> Result<()> {
        let context = TransitionContext::from_tabs(&*cx.tabs);
        if !is_valid(self.state, target, context) {
            return Err(TabmodeError::InvalidTransition {
                from: self.state,
                to: target,
            });
        }
        self.enter(target, cx)
    }

    /// Open the command prompt. Only the leader chord in `Idle` gets here.
    pub fn enter_command(&mut self, cx: &mut Collaborators<'_>) -> Result<()> {
        if self.state != State::Idle {
            return Err(TabmodeError::InvalidTransition {
                from: self.state,
                to: State::Command,
            });
        }
        self.enter(State::Command, cx)
    }

    fn enter(&mut self, target: State, cx: &mut Collaborators<'_>) -> Result<()> {
        let previous = self.state;
        self.state = target;
        if target == State::Idle {
            self.pending.clear();
        }
        debug!(from = %previous, to = %target, "mode transition");
        self.postprocess(previous, cx)
    }

    fn postprocess(&mut self, previous: State, cx: &mut Collaborators<'_>) -> Result<()> {
        match self.state.input_kind() {
            InputKind::Shortcuts => {
                self.pending.clear();
                cx.status.print_user_input(InputAction::Clear, "");
                if cx.tabs.tab_count() > 0 {
                    cx.status.update_info(cx.tabs.current_tab_index());
                }
                Ok(())
            }
            InputKind::OneShot => {
                debug!(state = %self.state, %previous, "running one-shot mode");
                let outcome = self.execute_action(self.state, cx);
                let back = self.request_transition(State::Idle, cx);
                outcome.and(back)
            }
            InputKind::CommandName | InputKind::Text | InputKind::Digits | InputKind::Offset => {
                self.pending.clear();
                if self.state == State::EditSearch && cx.tabs.tab_count() > 0 {
                    let current = cx.tabs.current_tab_index();
                    self.pending.text = cx.tabs.search_text(current).unwrap_or_default();
                }
                cx.status.print_user_input(InputAction::Set, &self.echo());
                Ok(())
            }
        }
    }

    /// Prompt plus typed text, as echoed in the status bar.
    pub fn echo(&self) -> String {
        let sign = match self.pending.offset_mode {
            OffsetMode::Left => "-",
            OffsetMode::Right => "+",
            OffsetMode::Idle | OffsetMode::Absolute => "",
        };
        format!("{}{}{}", self.state.prompt(), sign, self.pending.text)
    }

    /// Perform the work of `state` with the buffered input.
    ///
    /// The only consumer of the pending text and offset mode.
    pub fn execute_action(&mut self, state: State, cx: &mut Collaborators<'_>) -> Result<()> {
        let text = self.pending.text.trim().to_string();
        let tab_count = cx.tabs.tab_count();
        let current = cx.tabs.current_tab_index();
        debug!(%state, text = %text, tab_count, current, "execute action");

        match state {
            State::OpenTab => {
                let index = cx.tabs.open_tab(&text);
                cx.status.set_content_path_text(&text);
                cx.status.update_info(index);
            }
            State::OpenFile => {
                if let Some(path) = cx.files.choose_file() {
                    let src = path.display().to_string();
                    let index = cx.tabs.open_tab(&src);
                    cx.status.set_content_path_text(&src);
                    cx.status.update_info(index);
                }
            }
            State::NewSearch => {
                let index = cx.tabs.open_tab("");
                cx.tabs.search_in_tab(index, &text);
                cx.status.update_info(index);
            }
            State::EditSearch => {
                require_tabs(tab_count, 1)?;
                cx.tabs.search_in_tab(current, &text);
            }
            State::Find => {
                require_tabs(tab_count, 1)?;
                let text = if text.is_empty() {
                    self.last_find.clone().ok_or(TabmodeError::NoPreviousFind)?
                } else {
                    text
                };
                let settings = FindSettings {
                    text: text.clone(),
                    backward: false,
                };
                self.last_find = Some(text);
                cx.tabs.find_in_tab(current, &settings);
            }
            State::FindUp | State::FindDown => {
                require_tabs(tab_count, 1)?;
                let text = self.last_find.clone().ok_or(TabmodeError::NoPreviousFind)?;
                let settings = FindSettings {
                    text,
                    backward: state == State::FindUp,
                };
                cx.tabs.find_in_tab(current, &settings);
            }
            State::CloseTab => {
                let index = self.target_index(&text, OffsetMode::Absolute, current, tab_count)?;
                cx.tabs.close_tab(index);
                if cx.tabs.tab_count() > 0 {
                    cx.status.update_info(cx.tabs.current_tab_index());
                }
            }
            State::RefreshTab => {
                let index = self.target_index(&text, OffsetMode::Absolute, current, tab_count)?;
                cx.tabs.reload_tab(index);
            }
            State::MoveLeft | State::MoveRight => {
                require_tabs(tab_count, 2)?;
                let mode = if state == State::MoveLeft {
                    OffsetMode::Left
                } else {
                    OffsetMode::Right
                };
                let index = resolve(parse_magnitude(&text)?, mode, current, tab_count)?;
                cx.tabs.move_cursor(index);
                cx.status.update_info(index);
            }
            State::MoveTab => {
                require_tabs(tab_count, 2)?;
                let index = resolve(
                    parse_magnitude(&text)?,
                    self.pending.offset_mode,
                    current,
                    tab_count,
                )?;
                cx.tabs.move_tab(current, index);
                cx.status.update_info(index);
            }
            State::ScrollUp | State::ScrollDown => {
                require_tabs(tab_count, 1)?;
                let direction = if state == State::ScrollUp {
                    ScrollDirection::Up
                } else {
                    ScrollDirection::Down
                };
                cx.tabs.scroll_tab(current, direction);
            }
            State::HistoryPrev | State::HistoryNext => {
                require_tabs(tab_count, 1)?;
                let direction = if state == State::HistoryPrev {
                    HistoryDirection::Back
                } else {
                    HistoryDirection::Forward
                };
                cx.tabs.history_nav(current, direction);
            }
            State::Idle | State::Command => {}
        }
        Ok(())
    }

    /// Typed tab number, or the current tab when nothing was typed.
    fn target_index(
        &self,
        text: &str,
        mode: OffsetMode,
        current: usize,
        tab_count: usize,
    ) -> Result<usize> {
        match parse_magnitude(text)? {
            Some(magnitude) => resolve(Some(magnitude), mode, current, tab_count),
            None => {
                require_tabs(tab_count, 1)?;
                Ok(current.min(tab_count - 1))
            }
        }
    }
}

fn require_tabs(tab_count: usize, needed: usize) -> Result<()> {
    if tab_count < needed {
        return Err(TabmodeError::NoTabsOpen);
    }
    Ok(())
}

fn parse_magnitude(text: &str) -> Result<Option<i64>> {
    if text.is_empty() {
        return Ok(None);
    }
    text.parse::<i64>()
        .map(Some)
        .map_err(|_| TabmodeError::MalformedIndex(text.to_string()))
}
