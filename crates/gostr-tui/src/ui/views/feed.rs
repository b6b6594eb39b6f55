use gostr_core::app::{FeedScreen, Session};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    widgets::{ListItem, Paragraph},
    Frame,
};

use super::{render_list, summary_line};
use crate::ui::theme;

pub(crate) fn render_feed(f: &mut Frame, area: Rect, feed: &FeedScreen, session: &Session) {
    let chunks = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).split(area);

    let status = feed
        .status_line()
        .unwrap_or_else(|| format!("{} events", feed.events.len()));
    let style = match feed.status {
        gostr_core::app::FeedStatus::Failed(_) => theme::error(),
        _ => theme::muted(),
    };
    f.render_widget(Paragraph::new(status).style(style), chunks[0]);

    let items = feed
        .events
        .iter()
        .map(|event| ListItem::new(summary_line(event, session)))
        .collect();
    render_list(f, chunks[1], items, feed.cursor);
}
