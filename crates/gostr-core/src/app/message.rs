use std::time::Duration;

use nostr_sdk::prelude::*;

use super::input::Key;
use super::screen::ReplyContext;
use crate::config::Config;
use crate::error::CoreError;
use crate::feed::{FeedError, FeedPage, FeedQuery};
use crate::models::names::NameMap;
use crate::models::reactions::ReactionChange;
use crate::thread::RepliesPage;
use crate::transport::PublishReceipt;

/// What a publish was for; decides where control goes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOrigin {
    Note,
    Reply { target: EventId },
    DirectMessage,
}

/// Input to the dispatch function: a key press or the completion of a
/// [`Command`].
#[derive(Debug)]
pub enum Message {
    Key(Key),
    FeedLoaded {
        request_id: u64,
        result: Result<FeedPage, FeedError>,
    },
    RepliesLoaded {
        target: EventId,
        result: Result<RepliesPage, CoreError>,
    },
    ReactionDone(Result<ReactionChange, CoreError>),
    Published {
        origin: PublishOrigin,
        result: Result<PublishReceipt, CoreError>,
    },
    ConfigSaved(Result<(), CoreError>),
    ImageLoaded {
        url: String,
        result: Result<String, CoreError>,
    },
    Copied(Result<(), CoreError>),
}

/// One unit of asynchronous work. Executing it yields exactly one
/// [`Message`]. Commands carry snapshots, never references into state.
#[derive(Debug, Clone)]
pub enum Command {
    LoadFeed {
        request_id: u64,
        query: FeedQuery,
    },
    LoadReplies {
        target: EventId,
        known_names: NameMap,
        idle: Duration,
    },
    PublishNote {
        keys: Keys,
        content: String,
        reply: Option<ReplyContext>,
    },
    SendDirectMessage {
        keys: Keys,
        to: PublicKey,
        content: String,
    },
    Like {
        keys: Keys,
        target: Event,
    },
    Unlike {
        keys: Keys,
        reaction: EventId,
    },
    Boost {
        keys: Keys,
        target: Event,
    },
    Unboost {
        keys: Keys,
        reaction: EventId,
    },
    SaveConfig(Config),
    LoadImage {
        url: String,
    },
    CopyToClipboard(String),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::LoadFeed { .. } => "load-feed",
            Command::LoadReplies { .. } => "load-replies",
            Command::PublishNote { .. } => "publish-note",
            Command::SendDirectMessage { .. } => "send-dm",
            Command::Like { .. } => "like",
            Command::Unlike { .. } => "unlike",
            Command::Boost { .. } => "boost",
            Command::Unboost { .. } => "unboost",
            Command::SaveConfig(_) => "save-config",
            Command::LoadImage { .. } => "load-image",
            Command::CopyToClipboard(_) => "copy",
        }
    }
}
