//! Reply-thread navigation.
//!
//! A [`ThreadStack`] holds the drill-down path from the note opened in the
//! feed (index 0) to the note on screen (last). Each frame owns the direct
//! replies fetched for it. Replies are never carried across a pop: the new
//! top is always fetched again.

use std::time::Duration;

use futures::StreamExt;
use nostr_sdk::prelude::*;
use tracing::{debug, warn};

use crate::constants::REPLY_LIMIT;
use crate::enrich::resolve_names;
use crate::error::CoreResult;
use crate::models::names::{NameMap, NameUpdates};
use crate::stream::bounded_query;
use crate::transport::RelayTransport;

#[derive(Debug, Clone, PartialEq)]
pub enum ReplyCache {
    Loading,
    Loaded(Vec<Event>),
}

impl ReplyCache {
    /// Replies fetched so far; empty while loading.
    pub fn replies(&self) -> &[Event] {
        match self {
            ReplyCache::Loading => &[],
            ReplyCache::Loaded(replies) => replies,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ReplyCache::Loading)
    }
}

#[derive(Debug, Clone)]
pub struct ThreadFrame {
    pub event: Event,
    pub replies: ReplyCache,
    pub cursor: usize,
}

impl ThreadFrame {
    fn loading(event: Event) -> Self {
        Self {
            event,
            replies: ReplyCache::Loading,
            cursor: 0,
        }
    }

    pub fn selected_reply(&self) -> Option<&Event> {
        self.replies.replies().get(self.cursor)
    }
}

/// What a pop left behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopOutcome {
    /// The last frame was removed; the thread view is gone.
    Closed,
    /// Replies for this event must be fetched again.
    Reload(EventId),
}

/// Non-empty stack of thread frames.
#[derive(Debug, Clone)]
pub struct ThreadStack {
    frames: Vec<ThreadFrame>,
}

impl ThreadStack {
    /// Start a thread at `root`. Its replies begin loading.
    pub fn open(root: Event) -> Self {
        Self {
            frames: vec![ThreadFrame::loading(root)],
        }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn frames(&self) -> &[ThreadFrame] {
        &self.frames
    }

    pub fn root(&self) -> &Event {
        &self.frames[0].event
    }

    pub fn top(&self) -> &ThreadFrame {
        &self.frames[self.frames.len() - 1]
    }

    fn top_mut(&mut self) -> &mut ThreadFrame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    pub fn current(&self) -> &Event {
        &self.top().event
    }

    /// Append `event`; returns the id whose replies must be loaded.
    pub fn push(&mut self, event: Event) -> EventId {
        let id = event.id;
        self.frames.push(ThreadFrame::loading(event));
        id
    }

    /// Drop the top frame. Popping the root leaves the stack untouched and
    /// reports [`PopOutcome::Closed`]; the caller drops the whole stack.
    pub fn pop(&mut self) -> PopOutcome {
        if self.frames.len() <= 1 {
            return PopOutcome::Closed;
        }
        self.frames.pop();
        let top = self.top_mut();
        top.replies = ReplyCache::Loading;
        top.cursor = 0;
        PopOutcome::Reload(top.event.id)
    }

    /// Push the reply under the cursor, if any.
    pub fn select_reply(&mut self) -> Option<EventId> {
        let reply = self.top().selected_reply()?.clone();
        Some(self.push(reply))
    }

    pub fn move_cursor(&mut self, down: bool) {
        let top = self.top_mut();
        let len = top.replies.replies().len();
        if down {
            if top.cursor + 1 < len {
                top.cursor += 1;
            }
        } else {
            top.cursor = top.cursor.saturating_sub(1);
        }
    }

    /// Mark the top frame as reloading if it is `target`.
    pub fn reload(&mut self, target: &EventId) -> bool {
        let top = self.top_mut();
        if top.event.id != *target {
            return false;
        }
        top.replies = ReplyCache::Loading;
        top.cursor = 0;
        true
    }

    /// Store replies for `target`. Ignored unless `target` is on top.
    pub fn apply_replies(&mut self, target: &EventId, replies: Vec<Event>) -> bool {
        let top = self.top_mut();
        if top.event.id != *target {
            debug!("discarding replies for {} (no longer on top)", target);
            return false;
        }
        top.replies = ReplyCache::Loaded(replies);
        top.cursor = 0;
        true
    }
}

/// Direct replies to one event plus names for their authors.
#[derive(Debug, Clone, Default)]
pub struct RepliesPage {
    pub replies: Vec<Event>,
    pub names: NameUpdates,
}

pub fn replies_filter(target: EventId) -> Filter {
    Filter::new()
        .kind(Kind::TextNote)
        .event(target)
        .limit(REPLY_LIMIT)
}

pub async fn load_replies(
    transport: &dyn RelayTransport,
    target: EventId,
    known: &NameMap,
    idle: Duration,
) -> CoreResult<RepliesPage> {
    let stream = bounded_query(transport, replies_filter(target), idle).await?;
    let replies: Vec<Event> = stream
        .filter(|event| std::future::ready(event.id != target))
        .take(REPLY_LIMIT)
        .collect()
        .await;
    debug!("loaded {} replies for {}", replies.len(), target);

    let names = match resolve_names(transport, &replies, known, idle).await {
        Ok(names) => names,
        Err(e) => {
            warn!("name lookup for replies failed: {}", e);
            NameUpdates::new()
        }
    };
    Ok(RepliesPage { replies, names })
}
