use gostr_core::app::{following_lines, EntryScreen, Session};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    widgets::{ListItem, Paragraph},
    Frame,
};

use super::{render_error, render_input, render_list};
use crate::ui::theme;

pub(crate) fn render_relays(f: &mut Frame, area: Rect, cursor: usize, session: &Session) {
    let relays = &session.config.relays;
    if relays.is_empty() {
        f.render_widget(Paragraph::new("No relays (a to add)").style(theme::muted()), area);
        return;
    }
    let items = relays
        .iter()
        .map(|(url, policy)| ListItem::new(format!("{:<3}{}", policy.to_string(), url)))
        .collect();
    render_list(f, area, items, cursor);
}

pub(crate) fn render_following(f: &mut Frame, area: Rect, session: &Session) {
    let lines = following_lines(&session.config);
    if lines.is_empty() {
        f.render_widget(Paragraph::new("Not following anyone").style(theme::muted()), area);
        return;
    }
    let text: Vec<ratatui::text::Line> = lines.into_iter().map(ratatui::text::Line::from).collect();
    f.render_widget(Paragraph::new(text).style(theme::text()), area);
}

pub(crate) fn render_entry(f: &mut Frame, area: Rect, entry: &EntryScreen, title: &str) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .split(area);
    render_input(f, chunks[0], &entry.input, title);
    render_error(f, chunks[1], entry.error.as_deref());
}
