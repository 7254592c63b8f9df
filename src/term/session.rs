//! In-memory tab session driven by the router.

use std::path::Path;
use tracing::{debug, info};

use tabmode_core::{FindSettings, HistoryDirection, ScrollDirection, TabCollaborator};

const MAX_PREVIEW_BYTES: u64 = 64 * 1024;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tab {
    pub title: String,
    pub body: String,
    pub search: Option<String>,
    pub scroll: u16,
    history: Vec<String>,
    position: usize,
}

impl Tab {
    fn new(src: &str) -> Self {
        let title = if src.is_empty() { "search" } else { src };
        let mut tab = Self {
            title: title.to_string(),
            body: String::new(),
            search: None,
            scroll: 0,
            history: Vec::new(),
            position: 0,
        };
        tab.visit(src.to_string());
        tab
    }

    fn visit(&mut self, location: String) {
        self.history.truncate(self.position + 1);
        self.history.push(location);
        self.position = self.history.len() - 1;
        self.render();
    }

    fn location(&self) -> &str {
        self.history.get(self.position).map_or("", String::as_str)
    }

    fn render(&mut self) {
        let location = self.location().to_string();
        self.body = match location.strip_prefix("search:") {
            Some(query) => format!("Results for '{query}'"),
            None if location.is_empty() => String::new(),
            None => preview(&location),
        };
        self.scroll = 0;
    }
}

/// File contents for paths that exist, the location itself otherwise.
fn preview(location: &str) -> String {
    let path = Path::new(location);
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() && meta.len() <= MAX_PREVIEW_BYTES => {
            std::fs::read_to_string(path).unwrap_or_else(|err| format!("{location}: {err}"))
        }
        Ok(meta) if meta.is_file() => format!("{location}: {} bytes", meta.len()),
        _ => location.to_string(),
    }
}

/// Open tabs plus notifications for the status bar that arrive after an
/// action has been dispatched.
#[derive(Debug, Default)]
pub struct Session {
    tabs: Vec<Tab>,
    current: usize,
    notices: Vec<String>,
    find_result: Option<bool>,
}

impl Session {
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn current(&self) -> Option<&Tab> {
        self.tabs.get(self.current)
    }

    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    pub fn take_find_result(&mut self) -> Option<bool> {
        self.find_result.take()
    }
}

impl TabCollaborator for Session {
    fn open_tab(&mut self, src: &str) -> usize {
        self.tabs.push(Tab::new(src));
        self.current = self.tabs.len() - 1;
        info!(index = self.current, src, "tab opened");
        self.current
    }

    fn close_tab(&mut self, index: usize) {
        if index >= self.tabs.len() {
            return;
        }
        let tab = self.tabs.remove(index);
        info!(index, title = %tab.title, "tab closed");
        if self.current > index || self.current >= self.tabs.len() {
            self.current = self.current.saturating_sub(1);
        }
    }

    fn move_tab(&mut self, from: usize, to: usize) {
        if from >= self.tabs.len() || to >= self.tabs.len() {
            return;
        }
        let tab = self.tabs.remove(from);
        self.tabs.insert(to, tab);
        self.current = to;
    }

    fn move_cursor(&mut self, index: usize) {
        if index < self.tabs.len() {
            self.current = index;
        }
    }

    fn reload_tab(&mut self, index: usize) {
        if let Some(tab) = self.tabs.get_mut(index) {
            tab.render();
            self.notices.push(format!("reloaded {}", tab.title));
        }
    }

    fn search_in_tab(&mut self, index: usize, text: &str) {
        if let Some(tab) = self.tabs.get_mut(index) {
            tab.search = Some(text.to_string());
            tab.title = format!("search: {text}");
            tab.visit(format!("search:{text}"));
        }
    }

    fn find_in_tab(&mut self, index: usize, settings: &FindSettings) {
        let Some(tab) = self.tabs.get_mut(index) else {
            return;
        };
        let lines: Vec<&str> = tab.body.lines().collect();
        let start = usize::from(tab.scroll).min(lines.len());
        let matches = |line: &usize| lines.get(*line).is_some_and(|l| l.contains(&settings.text));
        // Search from the line after (or before) the top line, wrapping once.
        let hit = if settings.backward {
            (0..start).rev().chain((start..lines.len()).rev()).find(matches)
        } else {
            (start + 1..lines.len()).chain(0..=start).find(matches)
        };
        debug!(index, text = %settings.text, ?hit, "find");
        if let Some(line) = hit {
            tab.scroll = u16::try_from(line).unwrap_or(u16::MAX);
        }
        self.find_result = Some(hit.is_some());
    }

    fn scroll_tab(&mut self, index: usize, direction: ScrollDirection) {
        if let Some(tab) = self.tabs.get_mut(index) {
            tab.scroll = match direction {
                ScrollDirection::Up => tab.scroll.saturating_sub(1),
                ScrollDirection::Down => tab.scroll.saturating_add(1),
            };
        }
    }

    fn history_nav(&mut self, index: usize, direction: HistoryDirection) {
        let Some(tab) = self.tabs.get_mut(index) else {
            return;
        };
        let moved = match direction {
            HistoryDirection::Back if tab.position > 0 => {
                tab.position -= 1;
                true
            }
            HistoryDirection::Forward if tab.position + 1 < tab.history.len() => {
                tab.position += 1;
                true
            }
            _ => false,
        };
        if moved {
            tab.render();
        } else {
            self.notices.push("no further history".to_string());
        }
    }

    fn search_text(&self, index: usize) -> Option<String> {
        self.tabs.get(index).and_then(|tab| tab.search.clone())
    }

    fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    fn current_tab_index(&self) -> usize {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(titles: &[&str]) -> Session {
        let mut session = Session::default();
        for title in titles {
            session.open_tab(title);
        }
        session
    }

    fn titles(session: &Session) -> Vec<&str> {
        session.tabs().iter().map(|tab| tab.title.as_str()).collect()
    }

    #[test]
    fn open_makes_new_tab_current() {
        let mut session = session(&["a", "b"]);
        assert_eq!(session.current_tab_index(), 1);
        assert_eq!(session.open_tab("c"), 2);
        assert_eq!(session.tab_count(), 3);
    }

    #[test]
    fn close_before_current_shifts_cursor() {
        let mut session = session(&["a", "b", "c"]);
        session.close_tab(0);
        assert_eq!(session.current_tab_index(), 1);
        assert_eq!(session.current().map(|tab| tab.title.as_str()), Some("c"));
        session.close_tab(1);
        assert_eq!(session.current_tab_index(), 0);
    }

    #[test]
    fn move_tab_follows_the_tab() {
        let mut session = session(&["a", "b", "c"]);
        session.move_tab(0, 2);
        assert_eq!(titles(&session), ["b", "c", "a"]);
        assert_eq!(session.current_tab_index(), 2);
    }

    #[test]
    fn search_is_remembered_and_navigable() {
        let mut session = session(&["home"]);
        session.search_in_tab(0, "rust");
        assert_eq!(session.search_text(0).as_deref(), Some("rust"));
        session.history_nav(0, HistoryDirection::Back);
        assert_eq!(session.tabs()[0].body, "home");
        session.history_nav(0, HistoryDirection::Back);
        assert_eq!(session.take_notices(), vec!["no further history".to_string()]);
        session.history_nav(0, HistoryDirection::Forward);
        assert_eq!(session.tabs()[0].body, "Results for 'rust'");
    }

    #[test]
    fn find_reports_result() {
        let mut session = session(&[]);
        let index = session.open_tab("");
        session.tabs[index].body = "alpha\nbeta\ngamma".to_string();
        let forward = FindSettings {
            text: "gamma".to_string(),
            backward: false,
        };
        session.find_in_tab(index, &forward);
        assert_eq!(session.take_find_result(), Some(true));
        assert_eq!(session.tabs()[index].scroll, 2);

        let missing = FindSettings {
            text: "delta".to_string(),
            backward: true,
        };
        session.find_in_tab(index, &missing);
        assert_eq!(session.take_find_result(), Some(false));
    }

    #[test]
    fn reads_small_files() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "line one\nline two").expect("write");
        let mut session = Session::default();
        session.open_tab(&path.display().to_string());
        assert_eq!(session.tabs()[0].body, "line one\nline two");
    }
}
