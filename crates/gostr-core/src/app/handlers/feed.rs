use tracing::{debug, warn};

use super::compose::open_compose_message;
use crate::app::input::Key;
use crate::app::message::Command;
use crate::app::screen::{FeedScreen, FeedStatus, Screen, ThreadScreen};
use crate::app::AppState;
use crate::feed::{FeedError, FeedMode, FeedPage, FeedRequest};
use crate::thread::ThreadStack;

/// Switch to a loading feed for `mode` and request it.
pub(crate) fn start_feed(state: &mut AppState, mode: FeedMode) -> Option<Command> {
    let request = FeedRequest::new(mode, state.session.config.feed_limit);
    Some(load(state, request))
}

fn load(state: &mut AppState, request: FeedRequest) -> Command {
    let request_id = state.next_request_id();
    let query = state.session.feed_query(request.clone());
    state.screen = Screen::Feed(FeedScreen::loading(request, request_id));
    Command::LoadFeed { request_id, query }
}

pub(crate) fn on_key(state: &mut AppState, mut feed: FeedScreen, key: Key) -> Option<Command> {
    match key {
        k if k.is_up() => feed.cursor = feed.cursor.saturating_sub(1),
        k if k.is_down() => {
            if feed.cursor + 1 < feed.events.len() {
                feed.cursor += 1;
            }
        }
        Key::Enter => return open_thread(state, feed),
        Key::Char('r') => return Some(load(state, feed.request)),
        Key::Tab => {
            let mode = if feed.request.mode.is_inbox() {
                FeedMode::Home { notes_only: true }
            } else {
                FeedMode::Inbox
            };
            return start_feed(state, mode);
        }
        Key::Char('m') if feed.request.mode.is_inbox() => {
            open_compose_message(state, None, Screen::Feed(feed));
            return None;
        }
        k if k.is_back() => {
            state.screen = Screen::default();
            return None;
        }
        _ => {}
    }
    state.screen = Screen::Feed(feed);
    None
}

fn open_thread(state: &mut AppState, feed: FeedScreen) -> Option<Command> {
    let Some(event) = feed.selected().cloned() else {
        state.screen = Screen::Feed(feed);
        return None;
    };
    let command = state.session.load_replies(event.id);
    state.screen = Screen::Thread(ThreadScreen {
        feed,
        stack: ThreadStack::open(event),
        status: None,
    });
    Some(command)
}

/// Apply a finished feed load. Completions for a request that is no longer
/// on screen are dropped.
pub(crate) fn on_loaded(
    state: &mut AppState,
    request_id: u64,
    result: Result<FeedPage, FeedError>,
) -> Option<Command> {
    let Some(feed) = state.screen.feed_mut() else {
        debug!("discarding feed {} (no feed on screen)", request_id);
        return None;
    };
    if feed.request_id != request_id || !feed.is_loading() {
        debug!(
            "discarding feed {} (current is {})",
            request_id, feed.request_id
        );
        return None;
    }
    match result {
        Ok(page) => {
            feed.events = page.events;
            feed.cursor = 0;
            feed.status = FeedStatus::Ready;
            state.session.names.apply(page.names);
            state.session.reactions = page.reactions;
        }
        Err(e) => {
            warn!("feed load failed: {}", e);
            feed.status = FeedStatus::Failed(e.to_string());
        }
    }
    None
}
