//! Feed assembly: filter construction per mode, the inclusion pipeline and
//! the full load (query, collect, enrich).

use std::future;
use std::time::Duration;

use futures::{Stream, StreamExt};
use nostr_sdk::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

use crate::enrich::{enrich, Enrichment};
use crate::error::CoreError;
use crate::models::names::{NameMap, NameUpdates};
use crate::models::reactions::ReactionIndex;
use crate::models::tags::is_reply;
use crate::stream::bounded_query;
use crate::transport::RelayTransport;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Follow someone first")]
    NoFollows,
    #[error("Set key first")]
    NoKey,
    #[error(transparent)]
    Transport(#[from] CoreError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedMode {
    /// Notes by followed authors; `notes_only` drops replies.
    Home { notes_only: bool },
    /// Every text note, any author.
    Aether,
    /// Direct messages addressed to the viewer.
    Inbox,
}

impl FeedMode {
    pub fn title(&self) -> &'static str {
        match self {
            FeedMode::Home { notes_only: true } => "Home",
            FeedMode::Home { notes_only: false } => "Notes + Comments",
            FeedMode::Aether => "Aether",
            FeedMode::Inbox => "Inbox",
        }
    }

    pub fn is_inbox(&self) -> bool {
        matches!(self, FeedMode::Inbox)
    }
}

/// Command-line reply refinement.
///
/// `no_replies` is checked first, so setting both rejects every event. The
/// flags are meant to be exclusive and callers must not set both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplyRefinement {
    pub no_replies: bool,
    pub only_replies: bool,
}

/// Inclusion rule applied to each delivered event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedFilter {
    pub mode: FeedMode,
    pub refine: ReplyRefinement,
}

impl FeedFilter {
    pub fn new(mode: FeedMode) -> Self {
        Self {
            mode,
            refine: ReplyRefinement::default(),
        }
    }

    pub fn accepts(&self, event: &Event) -> bool {
        let reply = is_reply(event);
        if self.refine.no_replies && reply {
            return false;
        }
        if self.refine.only_replies && !reply {
            return false;
        }
        match self.mode {
            FeedMode::Home { notes_only: true } => !reply,
            FeedMode::Home { notes_only: false } | FeedMode::Aether | FeedMode::Inbox => true,
        }
    }
}

/// Everything needed to build one feed's relay filter.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedRequest {
    pub mode: FeedMode,
    pub limit: usize,
    pub refine: ReplyRefinement,
    /// Kinds to ask for; `None` means text notes. Ignored for the inbox.
    pub kinds: Option<Vec<Kind>>,
    pub since: Option<Timestamp>,
    pub until: Option<Timestamp>,
}

impl FeedRequest {
    pub fn new(mode: FeedMode, limit: usize) -> Self {
        Self {
            mode,
            limit,
            refine: ReplyRefinement::default(),
            kinds: None,
            since: None,
            until: None,
        }
    }

    pub fn refine(mut self, refine: ReplyRefinement) -> Self {
        self.refine = refine;
        self
    }

    pub fn kinds(mut self, kinds: Vec<Kind>) -> Self {
        self.kinds = Some(kinds);
        self
    }

    pub fn since(mut self, since: Timestamp) -> Self {
        self.since = Some(since);
        self
    }

    pub fn until(mut self, until: Timestamp) -> Self {
        self.until = Some(until);
        self
    }

    pub fn feed_filter(&self) -> FeedFilter {
        FeedFilter {
            mode: self.mode,
            refine: self.refine,
        }
    }

    /// Build the relay filter. Home needs at least one follow and the
    /// inbox needs the viewer's key.
    pub fn build_filter(
        &self,
        following: &[PublicKey],
        viewer: Option<&PublicKey>,
    ) -> Result<Filter, FeedError> {
        let kinds = self
            .kinds
            .clone()
            .filter(|kinds| !kinds.is_empty())
            .unwrap_or_else(|| vec![Kind::TextNote]);

        let mut filter = match self.mode {
            FeedMode::Inbox => {
                let viewer = viewer.ok_or(FeedError::NoKey)?;
                Filter::new()
                    .pubkey(*viewer)
                    .kind(Kind::EncryptedDirectMessage)
            }
            FeedMode::Aether => Filter::new().kinds(kinds),
            FeedMode::Home { .. } => {
                if following.is_empty() {
                    return Err(FeedError::NoFollows);
                }
                Filter::new()
                    .authors(following.iter().copied())
                    .kinds(kinds)
            }
        };

        filter = filter.limit(self.limit);
        if let Some(since) = self.since {
            filter = filter.since(since);
        }
        if let Some(until) = self.until {
            filter = filter.until(until);
        }
        Ok(filter)
    }
}

/// Apply `filter` and stop after `limit` accepted events.
pub fn filter_feed<S>(events: S, filter: FeedFilter, limit: usize) -> impl Stream<Item = Event>
where
    S: Stream<Item = Event>,
{
    events
        .filter(move |event| future::ready(filter.accepts(event)))
        .take(limit)
}

pub async fn collect_feed<S>(events: S, filter: FeedFilter, limit: usize) -> Vec<Event>
where
    S: Stream<Item = Event>,
{
    filter_feed(events, filter, limit).collect().await
}

/// A loaded feed plus the enrichment for it.
#[derive(Debug, Clone, Default)]
pub struct FeedPage {
    pub events: Vec<Event>,
    pub names: NameUpdates,
    pub reactions: ReactionIndex,
}

/// Inputs of one feed load, snapshotted from session state.
#[derive(Debug, Clone)]
pub struct FeedQuery {
    pub request: FeedRequest,
    pub following: Vec<PublicKey>,
    pub viewer: Option<PublicKey>,
    pub known_names: NameMap,
    pub idle: Duration,
}

pub async fn load_feed(
    transport: &dyn RelayTransport,
    query: &FeedQuery,
) -> Result<FeedPage, FeedError> {
    let filter = query
        .request
        .build_filter(&query.following, query.viewer.as_ref())?;
    debug!("loading {} feed", query.request.mode.title());

    let stream = bounded_query(transport, filter, query.idle).await?;
    let events = collect_feed(stream, query.request.feed_filter(), query.request.limit).await;
    info!(
        "{} feed collected {} events",
        query.request.mode.title(),
        events.len()
    );

    let Enrichment { names, reactions } = enrich(
        transport,
        &events,
        &query.known_names,
        query.viewer.as_ref(),
        query.idle,
    )
    .await;

    Ok(FeedPage {
        events,
        names,
        reactions,
    })
}
