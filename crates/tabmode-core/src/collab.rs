//! Interfaces to the host application.
//!
//! The interpreter never owns UI objects. It receives these capability
//! references on every call and drives them; anything long-running happens on
//! the collaborator's side after the call returns.

use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryDirection {
    Back,
    Forward,
}

/// Text search within a tab's content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FindSettings {
    pub text: String,
    pub backward: bool,
}

/// How `StatusBar::print_user_input` updates the echoed input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputAction {
    Set,
    Append,
    Clear,
}

/// The tab container being driven.
pub trait TabCollaborator {
    /// Open a tab showing `src` and return its index.
    fn open_tab(&mut self, src: &str) -> usize;
    fn close_tab(&mut self, index: usize);
    fn move_tab(&mut self, from: usize, to: usize);
    /// Make `index` the current tab.
    fn move_cursor(&mut self, index: usize);
    fn reload_tab(&mut self, index: usize);
    fn search_in_tab(&mut self, index: usize, text: &str);
    fn find_in_tab(&mut self, index: usize, settings: &FindSettings);
    fn scroll_tab(&mut self, index: usize, direction: ScrollDirection);
    fn history_nav(&mut self, index: usize, direction: HistoryDirection);
    /// The search text a tab was opened with, if any.
    fn search_text(&self, index: usize) -> Option<String>;
    fn tab_count(&self) -> usize;
    fn current_tab_index(&self) -> usize;
}

/// Status line and transient popups.
pub trait StatusBar {
    fn print_user_input(&mut self, action: InputAction, text: &str);
    fn update_info(&mut self, index: usize);
    fn show_search_result(&mut self, found: bool);
    fn set_content_path_text(&mut self, text: &str);
    fn show_message(&mut self, text: &str);
    fn show_warning(&mut self, text: &str);
}

pub trait FileOpener {
    /// Ask the user for a file. `None` when the dialog is dismissed.
    fn choose_file(&mut self) -> Option<PathBuf>;
}

/// Everything the router drives, borrowed for the duration of one event.
pub struct Collaborators<'a> {
    pub tabs: &'a mut dyn TabCollaborator,
    pub status: &'a mut dyn StatusBar,
    pub files: &'a mut dyn FileOpener,
}

impl<'a> Collaborators<'a> {
    pub fn new(
        tabs: &'a mut dyn TabCollaborator,
        status: &'a mut dyn StatusBar,
        files: &'a mut dyn FileOpener,
    ) -> Self {
        Self {
            tabs,
            status,
            files,
        }
    }
}
