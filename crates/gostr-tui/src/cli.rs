//! Non-interactive `home` and `inbox` commands: stream one feed to stdout.

use anyhow::Result;
use chrono::DateTime;
use clap::Args;
use futures::StreamExt;
use gostr_core::config::Config;
use gostr_core::feed::{filter_feed, FeedMode, FeedRequest, ReplyRefinement};
use gostr_core::keys::decode_secret_key;
use gostr_core::models::NameMap;
use gostr_core::nostr::NostrTransport;
use gostr_core::publish::read_direct_message;
use gostr_core::stream::bounded_query;
use nostr_sdk::prelude::*;
use tracing::{debug, warn};

#[derive(Args, Debug, Clone, Default)]
pub(crate) struct FeedArgs {
    /// Skip events that reference another event
    #[arg(long, conflicts_with = "onlyreplies")]
    pub noreplies: bool,

    /// Only show events that reference another event
    #[arg(long)]
    pub onlyreplies: bool,

    /// Event kinds to request (comma separated); ignored for the inbox
    #[arg(long, value_delimiter = ',')]
    pub kinds: Vec<u16>,

    /// Only events created at or after this unix time
    #[arg(long)]
    pub since: Option<u64>,

    /// Only events created at or before this unix time
    #[arg(long)]
    pub until: Option<u64>,

    /// Maximum number of events to print
    #[arg(long)]
    pub limit: Option<usize>,

    /// Print raw event JSON
    #[arg(long)]
    pub json: bool,

    /// Include event ids and kinds, and debug logging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

pub(crate) fn feed_request(args: &FeedArgs, inbox: bool, default_limit: usize) -> FeedRequest {
    let mode = if inbox {
        FeedMode::Inbox
    } else {
        FeedMode::Home { notes_only: false }
    };
    let mut request = FeedRequest::new(mode, args.limit.unwrap_or(default_limit)).refine(
        ReplyRefinement {
            no_replies: args.noreplies,
            only_replies: args.onlyreplies,
        },
    );
    if !args.kinds.is_empty() {
        request = request.kinds(args.kinds.iter().copied().map(Kind::from).collect());
    }
    if let Some(since) = args.since {
        request = request.since(Timestamp::from(since));
    }
    if let Some(until) = args.until {
        request = request.until(Timestamp::from(until));
    }
    request
}

pub(crate) async fn run_feed(config: Config, args: FeedArgs, inbox: bool) -> Result<()> {
    let keys = match config.private_key.as_deref().map(decode_secret_key) {
        Some(Ok(keys)) => Some(keys),
        Some(Err(e)) => {
            warn!("ignoring stored private key: {}", e);
            None
        }
        None => None,
    };
    let viewer = keys.as_ref().map(Keys::public_key);
    let following: Vec<PublicKey> = config
        .following
        .keys()
        .filter_map(|key| PublicKey::from_hex(key).ok())
        .collect();

    let request = feed_request(&args, inbox, config.feed_limit);
    let filter = request.build_filter(&following, viewer.as_ref())?;
    debug!("feed filter: {}", filter.as_json());

    let transport = NostrTransport::connect(&config.active_relays()).await?;
    let stream = bounded_query(&transport, filter, config.idle_timeout()).await?;
    let mut events = std::pin::pin!(filter_feed(stream, request.feed_filter(), request.limit));

    let mut names = NameMap::from_follows(config.following.values());
    while let Some(event) = events.next().await {
        names.observe(&event);
        println!("{}", format_event(&event, &names, keys.as_ref(), &args));
    }

    transport.disconnect().await;
    Ok(())
}

pub(crate) fn format_event(
    event: &Event,
    names: &NameMap,
    keys: Option<&Keys>,
    args: &FeedArgs,
) -> String {
    if args.json {
        return event.as_json();
    }
    let time = DateTime::from_timestamp(event.created_at.as_u64() as i64, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default();
    let content = if event.kind == Kind::EncryptedDirectMessage {
        keys.and_then(|keys| read_direct_message(keys, event).ok())
            .unwrap_or_else(|| "<encrypted>".to_string())
    } else {
        event.content.clone()
    };
    let line = format!("{} {}: {}", time, names.display(&event.pubkey), content);
    if args.verbose {
        format!("{} kind:{}\n{}", event.id.to_hex(), event.kind.as_u16(), line)
    } else {
        line
    }
}
