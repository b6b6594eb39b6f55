mod compose;
mod feed;
mod image;
mod menu;
mod settings;
mod thread;

pub(crate) use compose::{render_compose_message, render_compose_note};
pub(crate) use feed::render_feed;
pub(crate) use image::{render_image_preview, render_image_select};
pub(crate) use menu::{render_menu, render_options};
pub(crate) use settings::{render_entry, render_following, render_relays};
pub(crate) use thread::render_thread;

use chrono::DateTime;
use gostr_core::app::{Session, TextInput};
use gostr_core::publish::read_direct_message;
use nostr_sdk::prelude::*;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::ui::theme;

/// Selectable list with the row at `cursor` highlighted.
pub(crate) fn render_list(f: &mut Frame, area: Rect, items: Vec<ListItem>, cursor: usize) {
    let mut state = ListState::default();
    if !items.is_empty() {
        state.select(Some(cursor.min(items.len() - 1)));
    }
    let list = List::new(items)
        .style(theme::text())
        .highlight_style(theme::selected())
        .highlight_symbol("> ");
    f.render_stateful_widget(list, area, &mut state);
}

/// Bordered single-line input showing the placeholder while empty.
pub(crate) fn render_input(f: &mut Frame, area: Rect, input: &TextInput, title: &str) {
    let (text, style) = if input.text.is_empty() {
        (input.placeholder.clone(), theme::hint())
    } else {
        (format!("{}_", input.text), theme::text())
    };
    let widget = Paragraph::new(text).style(style).block(
        Block::default()
            .title(title.to_string())
            .borders(Borders::ALL)
            .border_style(ratatui::style::Style::default().fg(theme::ACCENT_WARNING)),
    );
    f.render_widget(widget, area);
}

pub(crate) fn render_error(f: &mut Frame, area: Rect, error: Option<&str>) {
    if let Some(error) = error {
        f.render_widget(Paragraph::new(error.to_string()).style(theme::error()), area);
    }
}

pub(crate) fn timestamp(event: &Event) -> String {
    DateTime::from_timestamp(event.created_at.as_u64() as i64, 0)
        .map(|t| t.format("%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

/// Display text of an event: decrypted for direct messages when possible.
pub(crate) fn content(event: &Event, session: &Session) -> String {
    if event.kind != Kind::EncryptedDirectMessage {
        return event.content.clone();
    }
    session
        .keys
        .as_ref()
        .and_then(|keys| read_direct_message(keys, event).ok())
        .unwrap_or_else(|| "<encrypted>".to_string())
}

/// One-line summary: time, author, reaction markers, first content line.
pub(crate) fn summary_line(event: &Event, session: &Session) -> Line<'static> {
    let mut spans = vec![
        Span::styled(format!("{} ", timestamp(event)), theme::muted()),
        Span::styled(
            session.names.display(&event.pubkey),
            ratatui::style::Style::default().fg(theme::ACCENT_PRIMARY),
        ),
    ];
    if session.reactions.liked(&event.id).is_some() {
        spans.push(Span::styled(" +", ratatui::style::Style::default().fg(theme::ACCENT_SUCCESS)));
    }
    if session.reactions.boosted(&event.id).is_some() {
        spans.push(Span::styled(" ⟳", ratatui::style::Style::default().fg(theme::ACCENT_SUCCESS)));
    }
    let text = content(event, session);
    let first = text.lines().next().unwrap_or_default().to_string();
    spans.push(Span::raw(format!(": {}", first)));
    Line::from(spans)
}
