use gostr_core::app::{AppState, Screen};
use gostr_core::constants::CLIENT_NAME;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    widgets::{Block, Paragraph},
    Frame,
};

use crate::ui::{theme, views};

const PADDING: &str = " ";

pub(crate) fn render(f: &mut Frame, app: &AppState) {
    let bg_block = Block::default().style(Style::default().bg(theme::BG_APP));
    f.render_widget(bg_block, f.area());

    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(f.area());

    let header = Paragraph::new(format!("{}{} - {}", PADDING, CLIENT_NAME, title(&app.screen)))
        .style(theme::title());
    f.render_widget(header, chunks[0]);

    let body = Rect {
        x: chunks[1].x + 1,
        width: chunks[1].width.saturating_sub(2),
        ..chunks[1]
    };
    render_screen(f, body, &app.screen, app);

    let hints = Paragraph::new(format!("{}{}", PADDING, hints(&app.screen))).style(theme::hint());
    f.render_widget(hints, chunks[2]);

    if let Some(notice) = &app.notice {
        let notice = Paragraph::new(format!("{}{}", PADDING, notice)).style(theme::error());
        f.render_widget(notice, chunks[3]);
    }
}

fn render_screen(f: &mut Frame, area: Rect, screen: &Screen, app: &AppState) {
    let session = &app.session;
    match screen {
        Screen::Menu { cursor } => views::render_menu(f, area, *cursor),
        Screen::Options { cursor } => views::render_options(f, area, *cursor),
        Screen::Feed(feed) => views::render_feed(f, area, feed, session),
        Screen::Thread(thread) => views::render_thread(f, area, thread, session),
        Screen::Relays { cursor } => views::render_relays(f, area, *cursor, session),
        Screen::Following => views::render_following(f, area, session),
        Screen::KeyEntry(entry) => views::render_entry(f, area, entry, "Private key"),
        Screen::RelayEntry(entry) => views::render_entry(f, area, entry, "Relay URL"),
        Screen::FollowEntry(entry) => views::render_entry(f, area, entry, "Follow"),
        Screen::ComposeNote(compose) => views::render_compose_note(f, area, compose, session),
        Screen::ComposeMessage(compose) => views::render_compose_message(f, area, compose),
        Screen::ImageSelect(select) => views::render_image_select(f, area, select),
        Screen::ImagePreview(preview) => views::render_image_preview(f, area, preview),
    }
}

fn title(screen: &Screen) -> String {
    match screen {
        Screen::Menu { .. } => "Menu".to_string(),
        Screen::Options { .. } => "Options".to_string(),
        Screen::Feed(feed) => feed.request.mode.title().to_string(),
        Screen::Thread(thread) => format!("{} - Thread", thread.feed.request.mode.title()),
        Screen::Relays { .. } => "Relays".to_string(),
        Screen::Following => "Following".to_string(),
        Screen::KeyEntry(_) => "Set key".to_string(),
        Screen::RelayEntry(_) => "Add relay".to_string(),
        Screen::FollowEntry(_) => "Follow".to_string(),
        Screen::ComposeNote(compose) if compose.reply.is_some() => "Reply".to_string(),
        Screen::ComposeNote(_) => "Publish note".to_string(),
        Screen::ComposeMessage(_) => "Message".to_string(),
        Screen::ImageSelect(_) => "Images".to_string(),
        Screen::ImagePreview(_) => "Image".to_string(),
    }
}

fn hints(screen: &Screen) -> &'static str {
    match screen {
        Screen::Menu { .. } => "j/k move · enter select · 1-9 jump · q quit",
        Screen::Options { .. } => "j/k move · enter select · esc back",
        Screen::Feed(feed) if feed.request.mode.is_inbox() => {
            "j/k move · enter open · m message · r reload · tab home · esc back"
        }
        Screen::Feed(_) => "j/k move · enter open · r reload · tab inbox · esc back",
        Screen::Thread(_) => {
            "j/k move · enter open · l like · b boost · r reply · c copy npub · i images · esc back"
        }
        Screen::Relays { .. } => "j/k move · a add · r remove · esc back",
        Screen::Following => "esc back",
        Screen::KeyEntry(_) | Screen::RelayEntry(_) | Screen::FollowEntry(_) => {
            "enter save · esc cancel"
        }
        Screen::ComposeNote(_) => "enter publish · esc cancel",
        Screen::ComposeMessage(_) => "enter next · esc back",
        Screen::ImageSelect(_) => "j/k move · enter preview · esc back",
        Screen::ImagePreview(_) => "esc back",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gostr_core::app::{update, FeedScreen, Key, Message};
    use gostr_core::config::Config;
    use gostr_core::feed::{FeedMode, FeedRequest};
    use nostr_sdk::prelude::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(app: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_menu_renders_items_and_title() {
        let app = AppState::new(Config::default());
        let screen = draw(&app);
        assert!(screen.contains("gostr - Menu"));
        assert!(screen.contains("1. Home"));
        assert!(screen.contains("9. Quit"));
    }

    #[test]
    fn test_feed_renders_events_and_notice() {
        let mut app = AppState::new(Config::default());
        let author = Keys::generate();
        let note = EventBuilder::text_note("hello relay")
            .sign_with_keys(&author)
            .unwrap();
        let mut feed = FeedScreen::loading(FeedRequest::new(FeedMode::Aether, 10), 1);
        app.screen = Screen::Feed(feed.clone());
        assert!(draw(&app).contains("Loading"));

        feed.status = gostr_core::app::FeedStatus::Ready;
        feed.events = vec![note];
        app.screen = Screen::Feed(feed);
        app.notice = Some("Set key first".to_string());
        let screen = draw(&app);
        assert!(screen.contains("gostr - Aether"));
        assert!(screen.contains("hello relay"));
        assert!(screen.contains("Set key first"));
    }

    #[test]
    fn test_entry_shows_placeholder_then_text() {
        let mut app = AppState::new(Config::default());
        update(&mut app, Message::Key(Key::Char('8')));
        update(&mut app, Message::Key(Key::Char('2')));
        assert!(draw(&app).contains("nsec or hex..."));
        update(&mut app, Message::Key(Key::Char('x')));
        assert!(draw(&app).contains("x_"));
    }
}
