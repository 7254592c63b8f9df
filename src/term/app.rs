use crossterm::event::{KeyEvent, KeyEventKind};

use super::files::QueuedFiles;
use super::session::Session;
use super::status::StatusLine;
use tabmode_core::{Collaborators, InputRouter, StatusBar};

/// Router plus the collaborators it drives.
pub struct App {
    pub router: InputRouter,
    pub session: Session,
    pub status: StatusLine,
    pub files: QueuedFiles,
}

impl App {
    pub fn new(router: InputRouter, files: QueuedFiles) -> Self {
        Self {
            router,
            session: Session::default(),
            status: StatusLine::default(),
            files,
        }
    }

    pub fn handle_key(&mut self, event: &KeyEvent) {
        if event.kind == KeyEventKind::Press {
            self.status.clear_flash();
        }
        let mut cx = Collaborators::new(&mut self.session, &mut self.status, &mut self.files);
        self.router.handle_event(event, &mut cx);
        self.deliver_notifications();
    }

    /// Results that the session produced after an action was dispatched.
    fn deliver_notifications(&mut self) {
        if let Some(found) = self.session.take_find_result() {
            self.status.show_search_result(found);
        }
        for notice in self.session.take_notices() {
            self.status.show_message(&notice);
        }
    }
}
