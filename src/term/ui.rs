//! Rendering

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
};

use super::app::App;
use super::session::Tab;
use super::status::FlashKind;
use tabmode_core::TabCollaborator;

pub(crate) const TAB_BAR_HEIGHT: u16 = 1;
pub(crate) const BODY_MIN_HEIGHT: u16 = 3;
pub(crate) const STATUS_BAR_HEIGHT: u16 = 1;

pub(crate) fn split_main_chunks(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TAB_BAR_HEIGHT),
            Constraint::Min(BODY_MIN_HEIGHT),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

pub fn draw(f: &mut Frame, app: &App) {
    let [tab_area, body_area, status_area] = split_main_chunks(f.area());
    draw_tab_bar(f, app, tab_area);
    draw_body(f, app, body_area);
    draw_status_bar(f, app, status_area);
}

fn draw_tab_bar(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<String> = app
        .session
        .tabs()
        .iter()
        .enumerate()
        .map(|(index, tab)| tab_label(index, tab))
        .collect();
    if titles.is_empty() {
        let hint = Paragraph::new("no tabs open").style(Style::default().fg(Color::DarkGray));
        f.render_widget(hint, area);
        return;
    }
    let tabs = Tabs::new(titles)
        .select(app.session.current_tab_index())
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    f.render_widget(tabs, area);
}

/// Typed tab numbers are 0-based, so the bar shows them that way.
fn tab_label(index: usize, tab: &Tab) -> String {
    format!("{index} {}", tab.title)
}

fn queued_label(remaining: usize) -> Option<String> {
    match remaining {
        0 => None,
        1 => Some("1 file queued".to_string()),
        n => Some(format!("{n} files queued")),
    }
}

fn draw_body(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", app.router.state()));
    let paragraph = match app.session.current() {
        Some(tab) => Paragraph::new(tab.body.as_str())
            .scroll((tab.scroll, 0))
            .wrap(Wrap { trim: false }),
        None => Paragraph::new(format!(
            "Press {} for commands, Ctrl+c to quit",
            app.router.table().leader()
        )),
    };
    f.render_widget(paragraph.block(block), area);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let status = &app.status;
    let (text, style) = if !status.input.is_empty() {
        (status.input.clone(), Style::default().fg(Color::White))
    } else if let Some((kind, message)) = &status.flash {
        let color = match kind {
            FlashKind::Message => Color::Yellow,
            FlashKind::Warning => Color::Red,
        };
        (message.clone(), Style::default().fg(color))
    } else {
        let chords: Vec<String> = app
            .router
            .pending_chords()
            .iter()
            .map(ToString::to_string)
            .collect();
        let mut text = format!("{}  |  {}  |  {}", status.content_path, status.info, chords.join(" "));
        if let Some(queued) = queued_label(app.files.remaining()) {
            text.push_str("  |  ");
            text.push_str(&queued);
        }
        (text, Style::default().fg(Color::DarkGray))
    };
    f.render_widget(Paragraph::new(Line::from(Span::styled(text, style))), area);
}
