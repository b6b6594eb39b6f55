use gostr_core::app::{Session, ThreadScreen};
use gostr_core::keys::shorten;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Paragraph, Wrap},
    Frame,
};

use super::{content, render_list, summary_line, timestamp};
use crate::ui::theme;

pub(crate) fn render_thread(f: &mut Frame, area: Rect, thread: &ThreadScreen, session: &Session) {
    let chunks = Layout::vertical([
        Constraint::Percentage(45),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .split(area);

    let event = thread.stack.current();
    let mut header = vec![
        Span::styled(session.names.display(&event.pubkey), theme::title()),
        Span::styled(format!("  {}", timestamp(event)), theme::muted()),
        Span::styled(format!("  {}", shorten(&event.id.to_hex())), theme::hint()),
    ];
    if session.reactions.liked(&event.id).is_some() {
        header.push(Span::styled("  liked", theme::muted()));
    }
    if session.reactions.boosted(&event.id).is_some() {
        header.push(Span::styled("  boosted", theme::muted()));
    }
    let body = Paragraph::new(content(event, session))
        .style(theme::text())
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(Line::from(header))
                .borders(Borders::ALL)
                .border_style(ratatui::style::Style::default().fg(theme::BORDER_INACTIVE)),
        );
    f.render_widget(body, chunks[0]);

    let top = thread.stack.top();
    let info = match &thread.status {
        Some(status) => Paragraph::new(status.clone()).style(theme::error()),
        None if top.replies.is_loading() => Paragraph::new("Loading replies…").style(theme::muted()),
        None => Paragraph::new(format!(
            "{} replies · depth {}",
            top.replies.replies().len(),
            thread.stack.depth()
        ))
        .style(theme::muted()),
    };
    f.render_widget(info, chunks[1]);

    let items = top
        .replies
        .replies()
        .iter()
        .map(|reply| ListItem::new(summary_line(reply, session)))
        .collect();
    render_list(f, chunks[2], items, top.cursor);
}
