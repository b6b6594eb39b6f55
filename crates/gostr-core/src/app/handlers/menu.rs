use super::compose::open_compose_note;
use super::feed::start_feed;
use crate::app::input::Key;
use crate::app::message::Command;
use crate::app::screen::{EntryScreen, MenuItem, OptionItem, Screen, MENU_ITEMS, OPTION_ITEMS};
use crate::app::AppState;
use crate::feed::FeedMode;

/// Digit shortcut (`1` is the first item).
fn shortcut(key: Key, count: usize) -> Option<usize> {
    match key {
        Key::Char(c @ '1'..='9') => {
            let idx = c as usize - '1' as usize;
            (idx < count).then_some(idx)
        }
        _ => None,
    }
}

fn wrap(cursor: usize, count: usize, down: bool) -> usize {
    if down {
        (cursor + 1) % count
    } else {
        (cursor + count - 1) % count
    }
}

pub(crate) fn on_menu_key(state: &mut AppState, cursor: usize, key: Key) -> Option<Command> {
    let count = MENU_ITEMS.len();
    if let Some(idx) = shortcut(key, count) {
        return run_menu_item(state, MENU_ITEMS[idx]);
    }
    let cursor = match key {
        k if k.is_up() => wrap(cursor, count, false),
        k if k.is_down() => wrap(cursor, count, true),
        k if k.is_select() => return run_menu_item(state, MENU_ITEMS[cursor.min(count - 1)]),
        Key::Char('q') | Key::CtrlC => {
            state.quit();
            cursor
        }
        _ => cursor,
    };
    state.screen = Screen::Menu { cursor };
    None
}

fn run_menu_item(state: &mut AppState, item: MenuItem) -> Option<Command> {
    let mode = match item {
        MenuItem::Home => FeedMode::Home { notes_only: true },
        MenuItem::NotesAndComments => FeedMode::Home { notes_only: false },
        MenuItem::Aether => FeedMode::Aether,
        MenuItem::Inbox => FeedMode::Inbox,
        MenuItem::PublishNote => {
            open_compose_note(state, None, Screen::default());
            return None;
        }
        MenuItem::Following => {
            state.screen = Screen::Following;
            return None;
        }
        MenuItem::Follow => {
            state.screen = Screen::FollowEntry(EntryScreen::new("npub or hex..."));
            return None;
        }
        MenuItem::Options => {
            state.screen = Screen::Options { cursor: 0 };
            return None;
        }
        MenuItem::Quit => {
            state.quit();
            state.screen = Screen::default();
            return None;
        }
    };
    start_feed(state, mode)
}

pub(crate) fn on_options_key(state: &mut AppState, cursor: usize, key: Key) -> Option<Command> {
    let count = OPTION_ITEMS.len();
    if let Some(idx) = shortcut(key, count) {
        run_option(state, OPTION_ITEMS[idx]);
        return None;
    }
    let cursor = match key {
        k if k.is_up() => wrap(cursor, count, false),
        k if k.is_down() => wrap(cursor, count, true),
        k if k.is_select() => {
            run_option(state, OPTION_ITEMS[cursor.min(count - 1)]);
            return None;
        }
        k if k.is_back() => {
            state.screen = Screen::default();
            return None;
        }
        Key::Char('q') | Key::CtrlC => {
            state.quit();
            cursor
        }
        _ => cursor,
    };
    state.screen = Screen::Options { cursor };
    None
}

fn run_option(state: &mut AppState, item: OptionItem) {
    state.screen = match item {
        OptionItem::Relays => Screen::Relays { cursor: 0 },
        OptionItem::SetKey => Screen::KeyEntry(EntryScreen::new("nsec or hex...")),
    };
}

#[cfg(test)]
mod tests {
    use crate::app::test_support::*;
    use crate::app::{Command, Key, Screen};
    use crate::feed::FeedMode;

    #[test]
    fn test_menu_cursor_wraps() {
        let (mut state, _) = state(false);
        press(&mut state, Key::Up);
        assert!(matches!(state.screen, Screen::Menu { cursor: 8 }));
        press(&mut state, Key::Char('j'));
        assert!(matches!(state.screen, Screen::Menu { cursor: 0 }));
    }

    #[test]
    fn test_digit_starts_feed() {
        let (mut state, _) = state(false);
        let command = press(&mut state, Key::Char('3'));
        let Some(Command::LoadFeed { request_id, query }) = command else {
            panic!("expected a feed load");
        };
        assert_eq!(query.request.mode, FeedMode::Aether);
        let Screen::Feed(feed) = &state.screen else {
            panic!("expected feed screen");
        };
        assert_eq!(feed.request_id, request_id);
        assert!(feed.is_loading());
    }

    #[test]
    fn test_enter_runs_selected_item() {
        let (mut state, _) = state(false);
        press(&mut state, Key::Down);
        let command = press(&mut state, Key::Enter);
        let Some(Command::LoadFeed { query, .. }) = command else {
            panic!("expected a feed load");
        };
        assert_eq!(query.request.mode, FeedMode::Home { notes_only: false });
    }

    #[test]
    fn test_quit_from_menu_and_options_only() {
        let (mut state, _) = state(false);
        press(&mut state, Key::Char('8'));
        assert!(matches!(state.screen, Screen::Options { .. }));
        press(&mut state, Key::Char('2'));
        assert!(matches!(state.screen, Screen::KeyEntry(_)));
        press(&mut state, Key::Char('q'));
        assert!(state.is_running());

        press(&mut state, Key::Esc);
        assert!(matches!(state.screen, Screen::Options { .. }));
        press(&mut state, Key::Char('q'));
        assert!(!state.is_running());
    }

    #[test]
    fn test_quit_item() {
        let (mut state, _) = state(false);
        press(&mut state, Key::Char('9'));
        assert!(!state.is_running());
    }
}
