use nostr_sdk::prelude::*;
use tracing::info;

use crate::app::input::Key;
use crate::app::message::Command;
use crate::app::screen::{EntryScreen, Screen};
use crate::app::AppState;
use crate::config::Config;
use crate::error::CoreError;
use crate::keys::{decode_secret_key, parse_public_key, secret_key_hex, shorten};

/// Index of "Set key" in the options list.
const SET_KEY_CURSOR: usize = 1;

/// Following list lines: `name (short key)`, or the short key alone.
pub fn following_lines(config: &Config) -> Vec<String> {
    config
        .following
        .values()
        .map(|follow| {
            let short = shorten(&follow.key);
            if follow.name.trim().is_empty() {
                short
            } else {
                format!("{} ({})", follow.name, short)
            }
        })
        .collect()
}

pub(crate) fn on_relays_key(state: &mut AppState, cursor: usize, key: Key) -> Option<Command> {
    let count = state.session.config.relays.len();
    let mut command = None;
    let cursor = match key {
        k if k.is_up() => cursor.saturating_sub(1),
        k if k.is_down() => (cursor + 1).min(count.saturating_sub(1)),
        Key::Char('a') => {
            state.screen = Screen::RelayEntry(EntryScreen::new("wss://..."));
            return None;
        }
        Key::Char('r') => {
            let selected = state.session.config.relays.keys().nth(cursor).cloned();
            if let Some(url) = selected {
                state.session.config.remove_relay(&url);
                info!("removed relay {}", url);
                command = Some(state.session.save_config());
            }
            cursor.min(state.session.config.relays.len().saturating_sub(1))
        }
        k if k.is_back() || k == Key::Char('q') => {
            state.screen = Screen::Options { cursor: 0 };
            return None;
        }
        _ => cursor,
    };
    state.screen = Screen::Relays { cursor };
    command
}

pub(crate) fn on_following_key(state: &mut AppState, key: Key) -> Option<Command> {
    match key {
        k if k.is_back() || k == Key::Char('q') => state.screen = Screen::default(),
        _ => state.screen = Screen::Following,
    }
    None
}

pub(crate) fn on_key_entry(state: &mut AppState, mut entry: EntryScreen, key: Key) -> Option<Command> {
    match key {
        Key::Esc => {
            state.screen = Screen::Options {
                cursor: SET_KEY_CURSOR,
            };
            None
        }
        Key::Enter => match decode_secret_key(entry.input.value()) {
            Ok(keys) => {
                info!("private key set for {}", keys.public_key());
                state.session.config.private_key = Some(secret_key_hex(&keys));
                state.session.keys = Some(keys);
                state.screen = Screen::Options {
                    cursor: SET_KEY_CURSOR,
                };
                Some(state.session.save_config())
            }
            Err(e) => {
                let reason = match e {
                    CoreError::InvalidKey(reason) => reason,
                    other => other.to_string(),
                };
                entry.error = Some(format!("Invalid key: {}", reason));
                state.screen = Screen::KeyEntry(entry);
                None
            }
        },
        key => {
            if entry.input.handle(key) {
                entry.error = None;
            }
            state.screen = Screen::KeyEntry(entry);
            None
        }
    }
}

pub(crate) fn on_relay_entry(state: &mut AppState, mut entry: EntryScreen, key: Key) -> Option<Command> {
    match key {
        Key::Esc => {
            state.screen = Screen::Relays { cursor: 0 };
            None
        }
        Key::Enter => {
            let url = entry.input.value().to_string();
            if RelayUrl::parse(&url).is_err() {
                entry.error = Some("Invalid relay URL (use wss://...)".to_string());
                state.screen = Screen::RelayEntry(entry);
                return None;
            }
            state.session.config.add_relay(&url);
            info!("added relay {}", url);
            let cursor = state
                .session
                .config
                .relays
                .keys()
                .position(|known| *known == url)
                .unwrap_or(0);
            state.screen = Screen::Relays { cursor };
            Some(state.session.save_config())
        }
        key => {
            if entry.input.handle(key) {
                entry.error = None;
            }
            state.screen = Screen::RelayEntry(entry);
            None
        }
    }
}

pub(crate) fn on_follow_entry(state: &mut AppState, mut entry: EntryScreen, key: Key) -> Option<Command> {
    match key {
        Key::Esc => {
            state.screen = Screen::default();
            None
        }
        Key::Enter => match parse_public_key(entry.input.value()) {
            Some(pubkey) => {
                info!("following {}", pubkey);
                state.session.config.follow(pubkey.to_hex());
                state.screen = Screen::Following;
                Some(state.session.save_config())
            }
            None => {
                entry.error = Some("Invalid pubkey (use npub or hex)".to_string());
                state.screen = Screen::FollowEntry(entry);
                None
            }
        },
        key => {
            if entry.input.handle(key) {
                entry.error = None;
            }
            state.screen = Screen::FollowEntry(entry);
            None
        }
    }
}
