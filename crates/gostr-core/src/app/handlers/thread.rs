use nostr_sdk::prelude::*;
use tracing::{debug, warn};

use super::compose::{open_compose_message, open_compose_note};
use super::images::open_images;
use super::NEEDS_KEY;
use crate::app::input::Key;
use crate::app::message::Command;
use crate::app::screen::{ReplyContext, Screen, ThreadScreen};
use crate::app::AppState;
use crate::error::CoreError;
use crate::image::extract_image_urls;
use crate::keys::npub;
use crate::models::reactions::ReactionChange;
use crate::thread::{PopOutcome, RepliesPage};

pub(crate) fn on_key(state: &mut AppState, mut thread: ThreadScreen, key: Key) -> Option<Command> {
    thread.status = None;
    let command = match key {
        k if k.is_up() => {
            thread.stack.move_cursor(false);
            None
        }
        k if k.is_down() => {
            thread.stack.move_cursor(true);
            None
        }
        Key::Enter => thread
            .stack
            .select_reply()
            .map(|id| state.session.load_replies(id)),
        Key::Esc | Key::Char('u') | Key::Char('q') => match thread.stack.pop() {
            PopOutcome::Closed => {
                state.screen = Screen::Feed(thread.feed);
                return None;
            }
            PopOutcome::Reload(id) => Some(state.session.load_replies(id)),
        },
        Key::Char('l') => toggle_like(state, &mut thread),
        Key::Char('b') => toggle_boost(state, &mut thread),
        Key::Char('c') => match npub(&thread.stack.current().pubkey) {
            Ok(npub) => Some(Command::CopyToClipboard(npub)),
            Err(e) => {
                thread.status = Some(format!("Copy failed: {}", e));
                None
            }
        },
        Key::Char('r') => return reply(state, thread),
        Key::Char('i') => return images(state, thread),
        _ => None,
    };
    state.screen = Screen::Thread(thread);
    command
}

fn toggle_like(state: &AppState, thread: &mut ThreadScreen) -> Option<Command> {
    let Some(keys) = state.session.keys.clone() else {
        thread.status = Some(NEEDS_KEY.to_string());
        return None;
    };
    let target = thread.stack.current();
    Some(match state.session.reactions.liked(&target.id) {
        Some(reaction) => Command::Unlike { keys, reaction },
        None => Command::Like {
            keys,
            target: target.clone(),
        },
    })
}

fn toggle_boost(state: &AppState, thread: &mut ThreadScreen) -> Option<Command> {
    let target = thread.stack.current();
    if target.kind != Kind::TextNote {
        thread.status = Some("Only text notes can be boosted".to_string());
        return None;
    }
    let Some(keys) = state.session.keys.clone() else {
        thread.status = Some(NEEDS_KEY.to_string());
        return None;
    };
    Some(match state.session.reactions.boosted(&target.id) {
        Some(reaction) => Command::Unboost { keys, reaction },
        None => Command::Boost {
            keys,
            target: target.clone(),
        },
    })
}

fn reply(state: &mut AppState, mut thread: ThreadScreen) -> Option<Command> {
    if state.session.keys.is_none() {
        thread.status = Some(NEEDS_KEY.to_string());
        state.screen = Screen::Thread(thread);
        return None;
    }
    let target = thread.stack.current().clone();
    if thread.feed.request.mode.is_inbox() {
        open_compose_message(state, Some(target.pubkey), Screen::Thread(thread));
        return None;
    }
    if target.kind != Kind::TextNote {
        thread.status = Some("Only text notes can be replied to".to_string());
        state.screen = Screen::Thread(thread);
        return None;
    }
    let context = ReplyContext {
        root: thread.stack.root().clone(),
        target,
    };
    open_compose_note(state, Some(context), Screen::Thread(thread));
    None
}

fn images(state: &mut AppState, mut thread: ThreadScreen) -> Option<Command> {
    if !state.session.config.allow_image_preview {
        thread.status = Some("Image preview is disabled".to_string());
        state.screen = Screen::Thread(thread);
        return None;
    }
    let urls = extract_image_urls(&thread.stack.current().content);
    if urls.is_empty() {
        thread.status = Some("No images".to_string());
        state.screen = Screen::Thread(thread);
        return None;
    }
    open_images(state, urls, Screen::Thread(thread))
}

/// Apply fetched replies. Only the frame currently on top takes them.
pub(crate) fn on_replies(
    state: &mut AppState,
    target: EventId,
    result: Result<RepliesPage, CoreError>,
) -> Option<Command> {
    let Some(thread) = state.screen.thread_mut() else {
        debug!("discarding replies for {} (thread closed)", target);
        return None;
    };
    match result {
        Ok(page) => {
            state.session.names.apply(page.names);
            thread.stack.apply_replies(&target, page.replies);
        }
        Err(e) => {
            if thread.stack.current().id != target {
                debug!("discarding reply error for {}: {}", target, e);
                return None;
            }
            warn!("loading replies for {} failed: {}", target, e);
            thread.stack.apply_replies(&target, Vec::new());
            thread.status = Some(format!("Loading replies failed: {}", e));
        }
    }
    None
}

pub(crate) fn on_reaction(
    state: &mut AppState,
    result: Result<ReactionChange, CoreError>,
) -> Option<Command> {
    let status = match result {
        Ok(change) => {
            state.session.reactions.apply(change);
            return None;
        }
        Err(e) => {
            warn!("reaction failed: {}", e);
            format!("Reaction failed: {}", e)
        }
    };
    match state.screen.thread_mut() {
        Some(thread) => thread.status = Some(status),
        None => state.notice = Some(status),
    }
    None
}

pub(crate) fn on_copied(state: &mut AppState, result: Result<(), CoreError>) -> Option<Command> {
    let status = match result {
        Ok(()) => "Copied npub".to_string(),
        Err(e) => format!("Copy failed: {}", e),
    };
    match state.screen.thread_mut() {
        Some(thread) => thread.status = Some(status),
        None => state.notice = Some(status),
    }
    None
}

#[cfg(test)]
mod tests {
    use nostr_sdk::prelude::*;

    use crate::app::test_support::*;
    use crate::app::{update, AppState, Command, Key, Message, Screen};
    use crate::error::CoreError;
    use crate::feed::FeedPage;
    use crate::models::names::NameUpdates;
    use crate::models::reactions::{ReactionChange, ReactionIndex};
    use crate::thread::RepliesPage;

    /// Open a feed with `events` and enter the thread of the first one.
    fn open_thread(state: &mut AppState, digit: char, events: Vec<Event>) -> EventId {
        let Some(Command::LoadFeed { request_id, .. }) = press(state, Key::Char(digit)) else {
            panic!("expected a feed load");
        };
        update(
            state,
            Message::FeedLoaded {
                request_id,
                result: Ok(FeedPage {
                    events,
                    names: NameUpdates::new(),
                    reactions: ReactionIndex::new(),
                }),
            },
        );
        match press(state, Key::Enter) {
            Some(Command::LoadReplies { target, .. }) => target,
            other => panic!("expected reply load, got {:?}", other),
        }
    }

    fn replies(state: &mut AppState, target: EventId, replies: Vec<Event>) {
        update(
            state,
            Message::RepliesLoaded {
                target,
                result: Ok(RepliesPage {
                    replies,
                    names: NameUpdates::new(),
                }),
            },
        );
    }

    fn thread(state: &AppState) -> &crate::app::ThreadScreen {
        match &state.screen {
            Screen::Thread(thread) => thread,
            other => panic!("expected thread, got {}", other.name()),
        }
    }

    #[test]
    fn test_drill_down_and_back_out() {
        let (mut state, _) = state(false);
        let author = Keys::generate();
        let x = note(&author, "x");
        let y = reply_to(&author, &x, "y");

        assert_eq!(open_thread(&mut state, '1', vec![x.clone()]), x.id);
        replies(&mut state, x.id, vec![y.clone()]);

        let Some(Command::LoadReplies { target, .. }) = press(&mut state, Key::Enter) else {
            panic!("expected load of Y's replies");
        };
        assert_eq!(target, y.id);
        assert_eq!(thread(&state).stack.depth(), 2);

        // X's replies arriving late must not land on Y.
        replies(&mut state, x.id, vec![y.clone()]);
        assert!(thread(&state).stack.top().replies.is_loading());

        let Some(Command::LoadReplies { target, .. }) = press(&mut state, Key::Char('u')) else {
            panic!("expected reload of X's replies");
        };
        assert_eq!(target, x.id);
        assert!(thread(&state).stack.top().replies.is_loading());

        assert!(press(&mut state, Key::Esc).is_none());
        assert!(matches!(state.screen, Screen::Feed(_)));
    }

    #[test]
    fn test_replies_after_thread_closed_are_dropped() {
        let (mut state, _) = state(false);
        let x = note(&Keys::generate(), "x");
        open_thread(&mut state, '1', vec![x.clone()]);
        press(&mut state, Key::Char('q'));
        assert!(matches!(state.screen, Screen::Feed(_)));
        replies(&mut state, x.id, vec![]);
        assert!(matches!(state.screen, Screen::Feed(_)));
    }

    #[test]
    fn test_reply_error_becomes_status() {
        let (mut state, _) = state(false);
        let x = note(&Keys::generate(), "x");
        open_thread(&mut state, '1', vec![x.clone()]);
        update(
            &mut state,
            Message::RepliesLoaded {
                target: x.id,
                result: Err(CoreError::NoRelays),
            },
        );
        let thread = thread(&state);
        assert!(!thread.stack.top().replies.is_loading());
        assert_eq!(
            thread.status.as_deref(),
            Some("Loading replies failed: no relays configured")
        );
    }

    #[test]
    fn test_like_then_unlike() {
        let (mut state, keys) = state(true);
        let keys = keys.unwrap();
        let x = note(&Keys::generate(), "x");
        open_thread(&mut state, '1', vec![x.clone()]);

        let Some(Command::Like { target, .. }) = press(&mut state, Key::Char('l')) else {
            panic!("expected like");
        };
        assert_eq!(target.id, x.id);
        let reaction = note(&keys, "+").id;
        update(
            &mut state,
            Message::ReactionDone(Ok(ReactionChange::Liked {
                target: x.id,
                reaction,
            })),
        );
        assert_eq!(state.session.reactions.liked(&x.id), Some(reaction));

        let Some(Command::Unlike { reaction: undo, .. }) = press(&mut state, Key::Char('l')) else {
            panic!("expected unlike");
        };
        assert_eq!(undo, reaction);
        update(
            &mut state,
            Message::ReactionDone(Ok(ReactionChange::Unliked { reaction })),
        );
        assert_eq!(state.session.reactions.liked(&x.id), None);
    }

    #[test]
    fn test_reactions_need_a_key() {
        let (mut state, _) = state(false);
        open_thread(&mut state, '1', vec![note(&Keys::generate(), "x")]);
        assert!(press(&mut state, Key::Char('l')).is_none());
        assert_eq!(thread(&state).status.as_deref(), Some("Set key first (Options)"));
        assert!(press(&mut state, Key::Char('r')).is_none());
        assert_eq!(thread(&state).status.as_deref(), Some("Set key first (Options)"));
    }

    #[test]
    fn test_failed_reaction_is_reported() {
        let (mut state, _) = state(true);
        open_thread(&mut state, '1', vec![note(&Keys::generate(), "x")]);
        update(
            &mut state,
            Message::ReactionDone(Err(CoreError::Transport("rejected".to_string()))),
        );
        assert_eq!(
            thread(&state).status.as_deref(),
            Some("Reaction failed: transport error: rejected")
        );
    }

    #[test]
    fn test_boost_toggles() {
        let (mut state, keys) = state(true);
        let x = note(&Keys::generate(), "x");
        open_thread(&mut state, '1', vec![x.clone()]);
        assert!(matches!(
            press(&mut state, Key::Char('b')),
            Some(Command::Boost { .. })
        ));
        let reaction = note(keys.as_ref().unwrap(), "boost").id;
        update(
            &mut state,
            Message::ReactionDone(Ok(ReactionChange::Boosted {
                target: x.id,
                reaction,
            })),
        );
        assert!(matches!(
            press(&mut state, Key::Char('b')),
            Some(Command::Unboost { reaction: r, .. }) if r == reaction
        ));
    }

    #[test]
    fn test_copy_npub() {
        let (mut state, _) = state(false);
        let author = Keys::generate();
        open_thread(&mut state, '1', vec![note(&author, "x")]);
        let Some(Command::CopyToClipboard(text)) = press(&mut state, Key::Char('c')) else {
            panic!("expected copy");
        };
        assert_eq!(text, author.public_key().to_bech32().unwrap());
        update(&mut state, Message::Copied(Ok(())));
        assert_eq!(thread(&state).status.as_deref(), Some("Copied npub"));
    }

    #[test]
    fn test_reply_opens_compose_with_thread_context() {
        let (mut state, _) = state(true);
        let author = Keys::generate();
        let x = note(&author, "x");
        let y = reply_to(&author, &x, "y");
        open_thread(&mut state, '1', vec![x.clone()]);
        replies(&mut state, x.id, vec![y.clone()]);
        press(&mut state, Key::Enter);

        press(&mut state, Key::Char('r'));
        let Screen::ComposeNote(compose) = &state.screen else {
            panic!("expected compose-note");
        };
        let context = compose.reply.as_ref().unwrap();
        assert_eq!(context.root.id, x.id);
        assert_eq!(context.target.id, y.id);
    }
}
