use tabmode_core::{InputAction, StatusBar};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlashKind {
    Message,
    Warning,
}

/// The bottom line: echoed input while typing, otherwise the last
/// message and the current tab.
#[derive(Debug, Default)]
pub struct StatusLine {
    pub input: String,
    pub info: String,
    pub content_path: String,
    pub flash: Option<(FlashKind, String)>,
}

impl StatusLine {
    /// Flashes last until the next key press.
    pub fn clear_flash(&mut self) {
        self.flash = None;
    }
}

impl StatusBar for StatusLine {
    fn print_user_input(&mut self, action: InputAction, text: &str) {
        match action {
            InputAction::Set => self.input = text.to_string(),
            InputAction::Append => self.input.push_str(text),
            InputAction::Clear => self.input.clear(),
        }
    }

    fn update_info(&mut self, index: usize) {
        self.info = format!("tab {index}");
    }

    fn show_search_result(&mut self, found: bool) {
        if !found {
            self.flash = Some((FlashKind::Warning, "not found".to_string()));
        }
    }

    fn set_content_path_text(&mut self, text: &str) {
        self.content_path = text.to_string();
    }

    fn show_message(&mut self, text: &str) {
        self.flash = Some((FlashKind::Message, text.to_string()));
    }

    fn show_warning(&mut self, text: &str) {
        self.flash = Some((FlashKind::Warning, text.to_string()));
    }
}
