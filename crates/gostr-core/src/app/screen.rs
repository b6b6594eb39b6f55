//! Screens and their view state.

use nostr_sdk::prelude::*;

use super::input::TextInput;
use crate::feed::FeedRequest;
use crate::thread::ThreadStack;

pub const MENU_ITEMS: [MenuItem; 9] = [
    MenuItem::Home,
    MenuItem::NotesAndComments,
    MenuItem::Aether,
    MenuItem::PublishNote,
    MenuItem::Inbox,
    MenuItem::Following,
    MenuItem::Follow,
    MenuItem::Options,
    MenuItem::Quit,
];

pub const OPTION_ITEMS: [OptionItem; 2] = [OptionItem::Relays, OptionItem::SetKey];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Home,
    NotesAndComments,
    Aether,
    PublishNote,
    Inbox,
    Following,
    Follow,
    Options,
    Quit,
}

impl MenuItem {
    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::Home => "Home",
            MenuItem::NotesAndComments => "Notes + Comments",
            MenuItem::Aether => "Aether",
            MenuItem::PublishNote => "Publish note",
            MenuItem::Inbox => "Inbox",
            MenuItem::Following => "Following",
            MenuItem::Follow => "Follow",
            MenuItem::Options => "Options",
            MenuItem::Quit => "Quit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionItem {
    Relays,
    SetKey,
}

impl OptionItem {
    pub fn label(&self) -> &'static str {
        match self {
            OptionItem::Relays => "Relays",
            OptionItem::SetKey => "Set key (nsec)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedStatus {
    Loading,
    Ready,
    Failed(String),
}

/// One feed list and the request that produced it.
#[derive(Debug, Clone)]
pub struct FeedScreen {
    pub request: FeedRequest,
    pub request_id: u64,
    pub status: FeedStatus,
    pub events: Vec<Event>,
    pub cursor: usize,
}

impl FeedScreen {
    pub fn loading(request: FeedRequest, request_id: u64) -> Self {
        Self {
            request,
            request_id,
            status: FeedStatus::Loading,
            events: Vec::new(),
            cursor: 0,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == FeedStatus::Loading
    }

    /// Status line: loading, an error, or the empty-feed notice.
    pub fn status_line(&self) -> Option<String> {
        match &self.status {
            FeedStatus::Loading => Some("Loading…".to_string()),
            FeedStatus::Failed(message) => Some(message.clone()),
            FeedStatus::Ready if self.events.is_empty() => Some("No events".to_string()),
            FeedStatus::Ready => None,
        }
    }

    pub fn selected(&self) -> Option<&Event> {
        self.events.get(self.cursor)
    }
}

/// Thread view opened from a feed. Backing out past the root returns to
/// `feed`.
#[derive(Debug, Clone)]
pub struct ThreadScreen {
    pub feed: FeedScreen,
    pub stack: ThreadStack,
    pub status: Option<String>,
}

/// Thread context for a reply being composed.
#[derive(Debug, Clone)]
pub struct ReplyContext {
    pub root: Event,
    pub target: Event,
}

#[derive(Debug, Clone)]
pub struct ComposeNoteScreen {
    pub input: TextInput,
    pub reply: Option<ReplyContext>,
    pub error: Option<String>,
    pub publishing: bool,
    pub return_to: Box<Screen>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub pubkey: PublicKey,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipientStage {
    /// Choosing from follows; the slot after the last follow is manual entry.
    Picking { cursor: usize },
    Typing(TextInput),
    Chosen(Recipient),
}

#[derive(Debug, Clone)]
pub struct ComposeMessageScreen {
    pub follows: Vec<Recipient>,
    pub stage: RecipientStage,
    pub input: TextInput,
    pub error: Option<String>,
    pub publishing: bool,
    pub return_to: Box<Screen>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageStatus {
    Loading,
    Ready(String),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct ImageSelectScreen {
    pub urls: Vec<String>,
    pub cursor: usize,
    pub return_to: Box<Screen>,
}

#[derive(Debug, Clone)]
pub struct ImagePreviewScreen {
    pub url: String,
    pub status: ImageStatus,
    pub return_to: Box<Screen>,
}

/// Free-text entry screens (key, relay, follow).
#[derive(Debug, Clone, Default)]
pub struct EntryScreen {
    pub input: TextInput,
    pub error: Option<String>,
}

impl EntryScreen {
    pub fn new(placeholder: &str) -> Self {
        Self {
            input: TextInput::with_placeholder(placeholder),
            error: None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Screen {
    Menu { cursor: usize },
    Options { cursor: usize },
    Feed(FeedScreen),
    Thread(ThreadScreen),
    Relays { cursor: usize },
    Following,
    KeyEntry(EntryScreen),
    RelayEntry(EntryScreen),
    FollowEntry(EntryScreen),
    ComposeNote(ComposeNoteScreen),
    ComposeMessage(ComposeMessageScreen),
    ImageSelect(ImageSelectScreen),
    ImagePreview(ImagePreviewScreen),
}

impl Default for Screen {
    fn default() -> Self {
        Screen::Menu { cursor: 0 }
    }
}

impl Screen {
    fn covered_mut(&mut self) -> Option<&mut Screen> {
        match self {
            Screen::ComposeNote(s) => Some(&mut s.return_to),
            Screen::ComposeMessage(s) => Some(&mut s.return_to),
            Screen::ImageSelect(s) => Some(&mut s.return_to),
            Screen::ImagePreview(s) => Some(&mut s.return_to),
            _ => None,
        }
    }

    /// The thread view, on top or under an overlay screen.
    pub fn thread_mut(&mut self) -> Option<&mut ThreadScreen> {
        match self {
            Screen::Thread(thread) => Some(thread),
            other => other.covered_mut().and_then(Screen::thread_mut),
        }
    }

    /// The feed list, on top, under a thread, or under an overlay screen.
    pub fn feed_mut(&mut self) -> Option<&mut FeedScreen> {
        match self {
            Screen::Feed(feed) => Some(feed),
            Screen::Thread(thread) => Some(&mut thread.feed),
            other => other.covered_mut().and_then(Screen::feed_mut),
        }
    }

    /// Mode of the feed this screen belongs to, if any.
    pub fn is_inbox(&self) -> bool {
        match self {
            Screen::Feed(feed) => feed.request.mode.is_inbox(),
            Screen::Thread(thread) => thread.feed.request.mode.is_inbox(),
            _ => false,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Screen::Menu { .. } => "menu",
            Screen::Options { .. } => "options",
            Screen::Feed(_) => "feed",
            Screen::Thread(_) => "thread",
            Screen::Relays { .. } => "relays",
            Screen::Following => "following",
            Screen::KeyEntry(_) => "key-entry",
            Screen::RelayEntry(_) => "relay-entry",
            Screen::FollowEntry(_) => "follow-entry",
            Screen::ComposeNote(_) => "compose-note",
            Screen::ComposeMessage(_) => "compose-message",
            Screen::ImageSelect(_) => "image-select",
            Screen::ImagePreview(_) => "image-preview",
        }
    }
}
