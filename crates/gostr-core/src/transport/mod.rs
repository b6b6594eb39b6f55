//! The seam between the engine and the relay network.

#[cfg(test)]
pub(crate) mod mock;

use async_trait::async_trait;
use futures::stream::BoxStream;
use nostr_sdk::prelude::*;

use crate::error::CoreResult;

/// Per-relay outcome of a publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayStatus {
    pub relay: String,
    pub accepted: bool,
    pub message: Option<String>,
}

impl RelayStatus {
    pub fn accepted(relay: impl Into<String>) -> Self {
        Self {
            relay: relay.into(),
            accepted: true,
            message: None,
        }
    }

    pub fn rejected(relay: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            relay: relay.into(),
            accepted: false,
            message: Some(message.into()),
        }
    }
}

/// A published event and what each relay said about it.
#[derive(Debug, Clone)]
pub struct PublishReceipt {
    pub event: Event,
    pub statuses: Vec<RelayStatus>,
}

impl PublishReceipt {
    pub fn accepted_count(&self) -> usize {
        self.statuses.iter().filter(|s| s.accepted).count()
    }
}

/// Subscribe/publish against a set of relays.
///
/// Subscription streams are fanned in across relays, may repeat events and
/// never end on their own; callers bound them with
/// [`crate::stream::bounded_query`]. Dropping the stream releases the
/// subscription.
#[async_trait]
pub trait RelayTransport: Send + Sync {
    async fn subscribe(&self, filter: Filter) -> CoreResult<BoxStream<'static, Event>>;

    async fn publish(&self, event: Event) -> CoreResult<PublishReceipt>;

    /// Bring the connected relay set in line with `relays`.
    async fn sync_relays(&self, _relays: &[String]) -> CoreResult<()> {
        Ok(())
    }
}
