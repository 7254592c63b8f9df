//! Recording collaborators for unit tests.

use std::path::PathBuf;

use crate::collab::{
    Collaborators, FileOpener, FindSettings, HistoryDirection, InputAction, ScrollDirection,
    StatusBar, TabCollaborator,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Call {
    Open(String),
    Close(usize),
    MoveTab(usize, usize),
    MoveCursor(usize),
    Reload(usize),
    Search(usize, String),
    Find(usize, FindSettings),
    Scroll(usize, ScrollDirection),
    History(usize, HistoryDirection),
}

#[derive(Debug, Default)]
pub(crate) struct FakeTabs {
    /// One entry per open tab: the search it was opened with.
    pub searches: Vec<Option<String>>,
    pub current: usize,
    pub calls: Vec<Call>,
}

impl TabCollaborator for FakeTabs {
    fn open_tab(&mut self, src: &str) -> usize {
        self.calls.push(Call::Open(src.to_string()));
        self.searches.push(None);
        self.current = self.searches.len() - 1;
        self.current
    }

    fn close_tab(&mut self, index: usize) {
        self.calls.push(Call::Close(index));
        if index < self.searches.len() {
            self.searches.remove(index);
        }
        self.current = self.current.min(self.searches.len().saturating_sub(1));
    }

    fn move_tab(&mut self, from: usize, to: usize) {
        self.calls.push(Call::MoveTab(from, to));
        let tab = self.searches.remove(from);
        self.searches.insert(to, tab);
        self.current = to;
    }

    fn move_cursor(&mut self, index: usize) {
        self.calls.push(Call::MoveCursor(index));
        self.current = index;
    }

    fn reload_tab(&mut self, index: usize) {
        self.calls.push(Call::Reload(index));
    }

    fn search_in_tab(&mut self, index: usize, text: &str) {
        self.calls.push(Call::Search(index, text.to_string()));
        self.searches[index] = Some(text.to_string());
    }

    fn find_in_tab(&mut self, index: usize, settings: &FindSettings) {
        self.calls.push(Call::Find(index, settings.clone()));
    }

    fn scroll_tab(&mut self, index: usize, direction: ScrollDirection) {
        self.calls.push(Call::Scroll(index, direction));
    }

    fn history_nav(&mut self, index: usize, direction: HistoryDirection) {
        self.calls.push(Call::History(index, direction));
    }

    fn search_text(&self, index: usize) -> Option<String> {
        self.searches.get(index).cloned().flatten()
    }

    fn tab_count(&self) -> usize {
        self.searches.len()
    }

    fn current_tab_index(&self) -> usize {
        self.current
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakeStatus {
    pub inputs: Vec<(InputAction, String)>,
    pub info: Vec<usize>,
    pub messages: Vec<String>,
    pub warnings: Vec<String>,
    pub content_path: Option<String>,
}

impl FakeStatus {
    pub fn last_input(&self) -> Option<&str> {
        self.inputs.last().map(|(_, text)| text.as_str())
    }
}

impl StatusBar for FakeStatus {
    fn print_user_input(&mut self, action: InputAction, text: &str) {
        self.inputs.push((action, text.to_string()));
    }

    fn update_info(&mut self, index: usize) {
        self.info.push(index);
    }

    fn show_search_result(&mut self, _found: bool) {}

    fn set_content_path_text(&mut self, text: &str) {
        self.content_path = Some(text.to_string());
    }

    fn show_message(&mut self, text: &str) {
        self.messages.push(text.to_string());
    }

    fn show_warning(&mut self, text: &str) {
        self.warnings.push(text.to_string());
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakeFiles {
    pub next: Option<PathBuf>,
}

impl FileOpener for FakeFiles {
    fn choose_file(&mut self) -> Option<PathBuf> {
        self.next.take()
    }
}

#[derive(Debug, Default)]
pub(crate) struct Host {
    pub tabs: FakeTabs,
    pub status: FakeStatus,
    pub files: FakeFiles,
}

impl Host {
    pub fn with_tabs(count: usize) -> Self {
        let mut host = Self::default();
        host.tabs.searches = vec![None; count];
        host
    }

    pub fn collaborators(&mut self) -> Collaborators<'_> {
        Collaborators::new(&mut self.tabs, &mut self.status, &mut self.files)
    }
}
