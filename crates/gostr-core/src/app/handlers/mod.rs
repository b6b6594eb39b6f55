//! Per-screen key handlers and completion handlers.
//!
//! A key handler receives its screen by value (taken out of the state) and
//! must put a screen back before returning.

pub(super) mod compose;
pub(super) mod feed;
pub(super) mod images;
pub(super) mod menu;
pub(super) mod settings;
pub(super) mod thread;

pub use settings::following_lines;

use super::input::Key;
use super::message::Command;
use super::screen::Screen;
use super::AppState;

/// Status shown when an action needs a private key.
pub(super) const NEEDS_KEY: &str = "Set key first (Options)";

pub(super) fn on_key(state: &mut AppState, key: Key) -> Option<Command> {
    state.notice = None;
    let screen = std::mem::take(&mut state.screen);
    match screen {
        Screen::Menu { cursor } => menu::on_menu_key(state, cursor, key),
        Screen::Options { cursor } => menu::on_options_key(state, cursor, key),
        Screen::Feed(feed) => feed::on_key(state, feed, key),
        Screen::Thread(thread) => thread::on_key(state, thread, key),
        Screen::Relays { cursor } => settings::on_relays_key(state, cursor, key),
        Screen::Following => settings::on_following_key(state, key),
        Screen::KeyEntry(entry) => settings::on_key_entry(state, entry, key),
        Screen::RelayEntry(entry) => settings::on_relay_entry(state, entry, key),
        Screen::FollowEntry(entry) => settings::on_follow_entry(state, entry, key),
        Screen::ComposeNote(compose) => compose::on_note_key(state, compose, key),
        Screen::ComposeMessage(compose) => compose::on_message_key(state, compose, key),
        Screen::ImageSelect(select) => images::on_select_key(state, select, key),
        Screen::ImagePreview(preview) => images::on_preview_key(state, preview, key),
    }
}
