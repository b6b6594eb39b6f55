//! Application state machine.
//!
//! All state lives in [`AppState`] and changes only inside [`update`], which
//! takes one [`Message`] (a key press or a command completion) and returns at
//! most one [`Command`] for the runtime to execute.

mod handlers;
mod input;
mod message;
mod screen;

use nostr_sdk::prelude::*;
use tracing::{debug, warn};

use crate::config::Config;
use crate::feed::{FeedQuery, FeedRequest};
use crate::keys::decode_secret_key;
use crate::models::names::NameMap;
use crate::models::reactions::ReactionIndex;

pub use handlers::following_lines;
pub use input::{Key, TextInput};
pub use message::{Command, Message, PublishOrigin};
pub use screen::{
    ComposeMessageScreen, ComposeNoteScreen, EntryScreen, FeedScreen, FeedStatus, ImagePreviewScreen,
    ImageSelectScreen, ImageStatus, MenuItem, OptionItem, Recipient, RecipientStage, ReplyContext,
    Screen, ThreadScreen, MENU_ITEMS, OPTION_ITEMS,
};

/// Session-scoped state shared by every screen.
#[derive(Debug, Clone)]
pub struct Session {
    pub config: Config,
    pub keys: Option<Keys>,
    pub names: NameMap,
    pub reactions: ReactionIndex,
}

impl Session {
    pub fn new(config: Config) -> Self {
        let keys = config
            .private_key
            .as_deref()
            .and_then(|raw| match decode_secret_key(raw) {
                Ok(keys) => Some(keys),
                Err(e) => {
                    warn!("ignoring stored private key: {}", e);
                    None
                }
            });
        let names = NameMap::from_follows(config.following.values());
        Self {
            config,
            keys,
            names,
            reactions: ReactionIndex::new(),
        }
    }

    pub fn viewer(&self) -> Option<PublicKey> {
        self.keys.as_ref().map(Keys::public_key)
    }

    /// Followed pubkeys; entries that fail to parse are skipped.
    pub fn following(&self) -> Vec<PublicKey> {
        self.config
            .following
            .keys()
            .filter_map(|key| PublicKey::from_hex(key).ok())
            .collect()
    }

    pub fn feed_query(&self, request: FeedRequest) -> FeedQuery {
        FeedQuery {
            request,
            following: self.following(),
            viewer: self.viewer(),
            known_names: self.names.clone(),
            idle: self.config.idle_timeout(),
        }
    }

    pub(crate) fn load_replies(&self, target: EventId) -> Command {
        Command::LoadReplies {
            target,
            known_names: self.names.clone(),
            idle: self.config.idle_timeout(),
        }
    }

    pub(crate) fn save_config(&self) -> Command {
        Command::SaveConfig(self.config.clone())
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub screen: Screen,
    pub session: Session,
    /// One-line notice not tied to a screen (e.g. a failed config save).
    pub notice: Option<String>,
    running: bool,
    next_request_id: u64,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            screen: Screen::default(),
            session: Session::new(config),
            notice: None,
            running: true,
            next_request_id: 1,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub(crate) fn next_request_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }
}

/// The dispatch function.
pub fn update(state: &mut AppState, msg: Message) -> Option<Command> {
    let command = match msg {
        Message::Key(key) => handlers::on_key(state, key),
        Message::FeedLoaded { request_id, result } => {
            handlers::feed::on_loaded(state, request_id, result)
        }
        Message::RepliesLoaded { target, result } => {
            handlers::thread::on_replies(state, target, result)
        }
        Message::ReactionDone(result) => handlers::thread::on_reaction(state, result),
        Message::Copied(result) => handlers::thread::on_copied(state, result),
        Message::Published { origin, result } => handlers::compose::on_published(state, origin, result),
        Message::ImageLoaded { url, result } => handlers::images::on_loaded(state, url, result),
        Message::ConfigSaved(result) => {
            if let Err(e) = result {
                warn!("saving config failed: {}", e);
                state.notice = Some(format!("Saving config failed: {}", e));
            }
            None
        }
    };
    if let Some(command) = &command {
        debug!("{} -> {}", state.screen.name(), command.name());
    }
    command
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_session_seeds_keys_and_names() {
        let (state, keys) = state(true);
        assert_eq!(state.session.viewer(), keys.map(|k| k.public_key()));
        assert_eq!(state.session.following().len(), 1);
        let followed = state.session.following()[0];
        assert_eq!(state.session.names.get(&followed), Some("alice"));
    }

    #[test]
    fn test_bad_stored_key_is_ignored() {
        let config = Config {
            private_key: Some("garbage".to_string()),
            ..Config::default()
        };
        let state = AppState::new(config);
        assert!(state.session.keys.is_none());
    }

    #[test]
    fn test_config_save_failure_becomes_notice() {
        let (mut state, _) = state(false);
        let command = update(
            &mut state,
            Message::ConfigSaved(Err(crate::error::CoreError::Config("disk full".to_string()))),
        );
        assert!(command.is_none());
        assert!(state.notice.as_deref().unwrap().contains("disk full"));

        press(&mut state, Key::Down);
        assert!(state.notice.is_none());
    }

    #[test]
    fn test_request_ids_increase() {
        let (mut state, _) = state(false);
        let a = state.next_request_id();
        let b = state.next_request_id();
        assert!(b > a);
    }
}
