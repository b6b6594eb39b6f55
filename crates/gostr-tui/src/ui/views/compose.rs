use gostr_core::app::{ComposeMessageScreen, ComposeNoteScreen, RecipientStage, Session};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    widgets::{ListItem, Paragraph},
    Frame,
};

use super::{render_error, render_input, render_list};
use crate::ui::theme;

pub(crate) fn render_compose_note(f: &mut Frame, area: Rect, compose: &ComposeNoteScreen, session: &Session) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .split(area);

    let context = match &compose.reply {
        Some(reply) => format!("Replying to {}", session.names.display(&reply.target.pubkey)),
        None => "New note".to_string(),
    };
    f.render_widget(Paragraph::new(context).style(theme::muted()), chunks[0]);
    render_input(f, chunks[1], &compose.input, "Note");
    if compose.publishing {
        f.render_widget(Paragraph::new("Publishing…").style(theme::muted()), chunks[2]);
    } else {
        render_error(f, chunks[2], compose.error.as_deref());
    }
}

pub(crate) fn render_compose_message(f: &mut Frame, area: Rect, compose: &ComposeMessageScreen) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .split(area);

    match &compose.stage {
        RecipientStage::Picking { cursor } => {
            f.render_widget(Paragraph::new("Send to:").style(theme::muted()), chunks[0]);
            let mut items: Vec<ListItem> = compose
                .follows
                .iter()
                .map(|r| ListItem::new(r.label.clone()))
                .collect();
            items.push(ListItem::new("Enter pubkey…"));
            render_list(f, chunks[1], items, *cursor);
        }
        RecipientStage::Typing(input) => {
            f.render_widget(Paragraph::new("Send to:").style(theme::muted()), chunks[0]);
            let area = Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).split(chunks[1]);
            render_input(f, area[0], input, "Recipient");
        }
        RecipientStage::Chosen(recipient) => {
            f.render_widget(
                Paragraph::new(format!("To {}", recipient.label)).style(theme::muted()),
                chunks[0],
            );
            let area = Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).split(chunks[1]);
            render_input(f, area[0], &compose.input, "Message");
        }
    }
    if compose.publishing {
        f.render_widget(Paragraph::new("Sending…").style(theme::muted()), chunks[2]);
    } else {
        render_error(f, chunks[2], compose.error.as_deref());
    }
}
