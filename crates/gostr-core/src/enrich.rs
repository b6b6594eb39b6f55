//! Secondary queries run after a feed is collected: author names and the
//! viewer's own reactions.

use std::collections::HashSet;
use std::time::Duration;

use futures::StreamExt;
use nostr_sdk::prelude::*;
use tracing::{debug, warn};

use crate::constants::{LIKE_CONTENT, REACTION_LOOKUP_LIMIT};
use crate::error::CoreResult;
use crate::models::names::{NameMap, NameUpdates};
use crate::models::profile::parse_profile_name;
use crate::models::reactions::{ReactionIndex, ReactionKind};
use crate::models::tags::first_event_ref;
use crate::stream::bounded_query;
use crate::transport::RelayTransport;

#[derive(Debug, Clone, Default)]
pub struct Enrichment {
    pub names: NameUpdates,
    pub reactions: ReactionIndex,
}

/// Look up names for authors in `events` that `known` has no name for.
/// Issues no query when every author is already named.
pub async fn resolve_names(
    transport: &dyn RelayTransport,
    events: &[Event],
    known: &NameMap,
    idle: Duration,
) -> CoreResult<NameUpdates> {
    let mut missing: Vec<PublicKey> = Vec::new();
    let mut seen = HashSet::new();
    for event in events {
        if known.is_missing(&event.pubkey) && seen.insert(event.pubkey) {
            missing.push(event.pubkey);
        }
    }

    let mut updates = NameUpdates::new();
    if missing.is_empty() {
        return Ok(updates);
    }

    let filter = Filter::new()
        .kind(Kind::Metadata)
        .authors(missing.iter().copied())
        .limit(missing.len());
    let mut stream = bounded_query(transport, filter, idle).await?;

    while let Some(event) = stream.next().await {
        if event.kind != Kind::Metadata || !seen.contains(&event.pubkey) {
            continue;
        }
        match parse_profile_name(&event.content) {
            Some(name) => updates.insert(event.pubkey, name),
            None => debug!("skipping metadata without a usable name from {}", event.pubkey),
        }
    }

    debug!("resolved {} of {} names", updates.len(), missing.len());
    Ok(updates)
}

/// Find the viewer's likes and boosts on `events`. Empty without a viewer.
pub async fn lookup_reactions(
    transport: &dyn RelayTransport,
    events: &[Event],
    viewer: Option<&PublicKey>,
    idle: Duration,
) -> CoreResult<ReactionIndex> {
    let mut index = ReactionIndex::new();
    let Some(viewer) = viewer else {
        return Ok(index);
    };
    let targets: HashSet<EventId> = events.iter().map(|e| e.id).collect();
    if targets.is_empty() {
        return Ok(index);
    }

    let filter = Filter::new()
        .author(*viewer)
        .kinds([Kind::Reaction, Kind::Repost])
        .limit(REACTION_LOOKUP_LIMIT);
    let mut stream = bounded_query(transport, filter, idle).await?;

    while let Some(event) = stream.next().await {
        let Some(target) = first_event_ref(&event) else {
            continue;
        };
        if !targets.contains(&target) {
            continue;
        }
        if event.kind == Kind::Reaction && event.content == LIKE_CONTENT {
            index.record(ReactionKind::Like, target, event.id);
        } else if event.kind == Kind::Repost {
            index.record(ReactionKind::Boost, target, event.id);
        }
    }

    Ok(index)
}

/// Run both lookups concurrently. A failed lookup yields empty results.
pub async fn enrich(
    transport: &dyn RelayTransport,
    events: &[Event],
    known: &NameMap,
    viewer: Option<&PublicKey>,
    idle: Duration,
) -> Enrichment {
    let (names, reactions) = tokio::join!(
        resolve_names(transport, events, known, idle),
        lookup_reactions(transport, events, viewer, idle),
    );

    let names = names.unwrap_or_else(|e| {
        warn!("name lookup failed: {}", e);
        NameUpdates::new()
    });
    let reactions = reactions.unwrap_or_else(|e| {
        warn!("reaction lookup failed: {}", e);
        ReactionIndex::new()
    });

    Enrichment { names, reactions }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::IDLE_TIMEOUT;
    use crate::models::names::NameUpdates;
    use crate::transport::mock::{MockTransport, Script};

    fn note(keys: &Keys) -> Event {
        EventBuilder::text_note("hi").sign_with_keys(keys).unwrap()
    }

    fn metadata(keys: &Keys, content: &str) -> Event {
        EventBuilder::new(Kind::Metadata, content)
            .sign_with_keys(keys)
            .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_names_skip_query_when_all_known() {
        let author = Keys::generate();
        let mut known = NameMap::new();
        let mut seed = NameUpdates::new();
        seed.insert(author.public_key(), "alice".to_string());
        known.apply(seed);

        let transport = MockTransport::new();
        let updates = resolve_names(&transport, &[note(&author)], &known, IDLE_TIMEOUT)
            .await
            .unwrap();
        assert!(updates.is_empty());
        assert!(transport.filters().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_names_query_missing_authors_once() {
        let alice = Keys::generate();
        let bob = Keys::generate();
        let events = vec![note(&alice), note(&alice), note(&bob)];

        let transport = MockTransport::new().with(
            Kind::Metadata,
            Script::Events(vec![
                metadata(&alice, r#"{"name":"alice"}"#),
                metadata(&bob, "{broken"),
            ]),
        );

        let updates = resolve_names(&transport, &events, &NameMap::new(), IDLE_TIMEOUT)
            .await
            .unwrap();
        assert_eq!(updates.get(&alice.public_key()), Some("alice"));
        assert_eq!(updates.get(&bob.public_key()), None);

        let filters = transport.filters_for(Kind::Metadata);
        assert_eq!(filters.len(), 1);
        assert_eq!(filters[0].limit, Some(2));
        assert_eq!(filters[0].authors.as_ref().unwrap().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reactions_disabled_without_viewer() {
        let transport = MockTransport::new();
        let index = lookup_reactions(&transport, &[note(&Keys::generate())], None, IDLE_TIMEOUT)
            .await
            .unwrap();
        assert!(index.is_empty());
        assert!(transport.filters().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reactions_classified_and_scoped_to_feed() {
        let viewer = Keys::generate();
        let author = Keys::generate();
        let x = note(&author);
        let y = note(&author);
        let outside = note(&author);

        let like = EventBuilder::new(Kind::Reaction, "+")
            .tag(Tag::event(x.id))
            .sign_with_keys(&viewer)
            .unwrap();
        let frown = EventBuilder::new(Kind::Reaction, "-")
            .tag(Tag::event(y.id))
            .sign_with_keys(&viewer)
            .unwrap();
        let boost = EventBuilder::new(Kind::Repost, "{}")
            .tag(Tag::event(y.id))
            .sign_with_keys(&viewer)
            .unwrap();
        let stray = EventBuilder::new(Kind::Reaction, "+")
            .tag(Tag::event(outside.id))
            .sign_with_keys(&viewer)
            .unwrap();

        let transport = MockTransport::new().with(
            Kind::Reaction,
            Script::Events(vec![like.clone(), frown, boost.clone(), stray]),
        );

        let feed = vec![x.clone(), y.clone()];
        let index = lookup_reactions(&transport, &feed, Some(&viewer.public_key()), IDLE_TIMEOUT)
            .await
            .unwrap();

        assert_eq!(index.liked(&x.id), Some(like.id));
        assert_eq!(index.liked(&y.id), None);
        assert_eq!(index.boosted(&y.id), Some(boost.id));
        assert_eq!(index.liked(&outside.id), None);

        let filter = &transport.filters_for(Kind::Reaction)[0];
        assert_eq!(filter.limit, Some(REACTION_LOOKUP_LIMIT));
        assert!(filter.kinds.as_ref().unwrap().contains(&Kind::Repost));
    }

    #[tokio::test(start_paused = true)]
    async fn test_enrich_degrades_on_failure() {
        let viewer = Keys::generate();
        let author = Keys::generate();
        let events = vec![note(&author)];
        let transport = MockTransport::new()
            .with(Kind::Metadata, Script::Fail("down".to_string()))
            .with(Kind::Reaction, Script::Fail("down".to_string()));

        let enrichment = enrich(
            &transport,
            &events,
            &NameMap::new(),
            Some(&viewer.public_key()),
            IDLE_TIMEOUT,
        )
        .await;
        assert!(enrichment.names.is_empty());
        assert!(enrichment.reactions.is_empty());
    }
}
