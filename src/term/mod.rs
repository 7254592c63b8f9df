//! Terminal host: a raw-mode event loop feeding the router.

mod app;
mod files;
mod session;
mod status;
mod ui;

pub use app::App;
pub use files::QueuedFiles;

use crossterm::event::{
    self, Event, KeyEvent, KeyEventKind, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::{execute, terminal};
use ratatui::prelude::*;
use std::io;
use tabmode_keys::Key;
use tracing::{debug, info};

/// Take over the terminal until Ctrl-c.
pub fn run(app: &mut App) -> io::Result<()> {
    let mut terminal = ratatui::try_init()?;
    // Release events need the kitty protocol; without it one is made up
    // after every press.
    let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        execute!(
            io::stdout(),
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
    }
    info!(enhanced, "terminal ready");

    let result = run_app(&mut terminal, app, enhanced);

    if enhanced {
        let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
    }
    ratatui::restore();
    result
}

pub fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    enhanced: bool,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if is_quit(&key) {
            debug!("quit requested");
            return Ok(());
        }
        if !enhanced && key.kind == KeyEventKind::Release {
            continue;
        }
        app.handle_key(&key);
        if !enhanced && key.kind == KeyEventKind::Press {
            let release = KeyEvent::new_with_kind(key.code, key.modifiers, KeyEventKind::Release);
            app.handle_key(&release);
        }
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Press && Key::from_event(key) == Some(Key::char('c').ctrl())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn only_ctrl_c_press_quits() {
        let press = KeyEvent::new_with_kind(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
            KeyEventKind::Press,
        );
        let release = KeyEvent::new_with_kind(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
            KeyEventKind::Release,
        );
        assert!(is_quit(&press));
        assert!(!is_quit(&release));
        assert!(!is_quit(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)));
    }
}
