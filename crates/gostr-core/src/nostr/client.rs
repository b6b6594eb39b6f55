use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, BoxStream};
use futures::StreamExt;
use nostr_sdk::prelude::*;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use crate::error::{CoreError, CoreResult};
use crate::transport::{PublishReceipt, RelayStatus, RelayTransport};

const PUBLISH_TIMEOUT: Duration = Duration::from_secs(5);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

fn transport_err(e: impl std::fmt::Display) -> CoreError {
    CoreError::Transport(e.to_string())
}

/// [`RelayTransport`] over a nostr-sdk relay pool.
#[derive(Clone)]
pub struct NostrTransport {
    client: Client,
}

impl NostrTransport {
    /// Add `relays` to a fresh client and start connecting.
    pub async fn connect(relays: &[String]) -> CoreResult<Self> {
        let transport = Self {
            client: Client::default(),
        };
        transport.spawn_notice_logger();
        transport.sync_relays(relays).await?;
        Ok(transport)
    }

    fn spawn_notice_logger(&self) {
        let mut notifications = self.client.notifications();
        tokio::spawn(async move {
            loop {
                match notifications.recv().await {
                    Ok(RelayPoolNotification::Message {
                        relay_url,
                        message: RelayMessage::Notice(notice),
                    }) => {
                        if notice.contains("bad signature") {
                            continue;
                        }
                        debug!("notice from {}: {}", relay_url, notice);
                    }
                    Ok(RelayPoolNotification::Shutdown) | Err(RecvError::Closed) => break,
                    Ok(_) | Err(RecvError::Lagged(_)) => {}
                }
            }
        });
    }

    pub async fn disconnect(&self) {
        self.client.disconnect().await;
    }
}

/// The event carried by `notification` if it belongs to subscription `id`.
///
/// Reads raw relay `EVENT` messages: the pool's `Event` notification fires
/// only the first time the pool sees an id. Dedup happens downstream.
fn subscription_event(notification: RelayPoolNotification, id: &SubscriptionId) -> Option<Event> {
    match notification {
        RelayPoolNotification::Message {
            message: RelayMessage::Event {
                subscription_id,
                event,
            },
            ..
        } if *subscription_id == *id => Some(event.into_owned()),
        _ => None,
    }
}

/// Unsubscribes when the owning stream is dropped.
struct SubscriptionGuard {
    client: Client,
    id: SubscriptionId,
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let client = self.client.clone();
        let id = self.id.clone();
        handle.spawn(async move {
            client.unsubscribe(&id).await;
        });
    }
}

#[async_trait]
impl RelayTransport for NostrTransport {
    async fn subscribe(&self, filter: Filter) -> CoreResult<BoxStream<'static, Event>> {
        if self.client.relays().await.is_empty() {
            return Err(CoreError::NoRelays);
        }

        // Listen before subscribing so early events are not missed.
        let notifications = self.client.notifications();
        let output = self
            .client
            .subscribe(filter, None)
            .await
            .map_err(transport_err)?;
        let id = output.val;
        debug!("subscribed {} on {} relays", id, output.success.len());

        let guard = SubscriptionGuard {
            client: self.client.clone(),
            id,
        };

        let events = stream::unfold(
            (notifications, guard),
            |(mut notifications, guard)| async move {
                loop {
                    match notifications.recv().await {
                        Ok(RelayPoolNotification::Shutdown) | Err(RecvError::Closed) => {
                            return None;
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            warn!("subscription {} lagged, {} notifications lost", guard.id, skipped);
                        }
                        Ok(notification) => {
                            if let Some(event) = subscription_event(notification, &guard.id) {
                                return Some((event, (notifications, guard)));
                            }
                        }
                    }
                }
            },
        );
        Ok(events.boxed())
    }

    async fn publish(&self, event: Event) -> CoreResult<PublishReceipt> {
        let output = tokio::time::timeout(PUBLISH_TIMEOUT, self.client.send_event(&event))
            .await
            .map_err(|_| CoreError::Transport("timed out waiting for relays".to_string()))?
            .map_err(transport_err)?;

        let mut statuses: Vec<RelayStatus> = output
            .success
            .iter()
            .map(|url| RelayStatus::accepted(url.to_string()))
            .collect();
        statuses.extend(
            output
                .failed
                .iter()
                .map(|(url, reason)| RelayStatus::rejected(url.to_string(), reason.clone())),
        );
        statuses.sort_by(|a, b| a.relay.cmp(&b.relay));

        if output.success.is_empty() {
            let reasons: Vec<String> = statuses
                .iter()
                .filter_map(|s| s.message.as_ref().map(|m| format!("{}: {}", s.relay, m)))
                .collect();
            return Err(CoreError::Transport(format!(
                "no relay accepted the event ({})",
                reasons.join(", ")
            )));
        }

        info!(
            "published {} to {}/{} relays",
            event.id,
            output.success.len(),
            statuses.len()
        );
        Ok(PublishReceipt { event, statuses })
    }

    async fn sync_relays(&self, relays: &[String]) -> CoreResult<()> {
        let mut wanted = HashSet::new();
        for raw in relays {
            match RelayUrl::parse(raw) {
                Ok(url) => {
                    wanted.insert(url);
                }
                Err(e) => warn!("skipping relay {}: {}", raw, e),
            }
        }
        if wanted.is_empty() && !relays.is_empty() {
            return Err(CoreError::NoRelays);
        }

        let current: HashSet<RelayUrl> = self.client.relays().await.into_keys().collect();
        for url in current.difference(&wanted) {
            debug!("removing relay {}", url);
            self.client
                .remove_relay(url.clone())
                .await
                .map_err(transport_err)?;
        }
        for url in wanted.difference(&current) {
            debug!("adding relay {}", url);
            self.client
                .add_relay(url.clone())
                .await
                .map_err(transport_err)?;
        }

        if tokio::time::timeout(CONNECT_TIMEOUT, self.client.connect())
            .await
            .is_err()
        {
            warn!("relay connect timed out after {:?}", CONNECT_TIMEOUT);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::*;

    fn relay_url() -> RelayUrl {
        RelayUrl::parse("wss://relay.example.com").unwrap()
    }

    fn relay_event(id: &SubscriptionId, event: &Event) -> RelayPoolNotification {
        RelayPoolNotification::Message {
            relay_url: relay_url(),
            message: RelayMessage::Event {
                subscription_id: Cow::Owned(id.clone()),
                event: Cow::Owned(event.clone()),
            },
        }
    }

    #[test]
    fn test_subscription_event_every_delivery() {
        let ours = SubscriptionId::new("ours");
        let event = EventBuilder::text_note("seen before")
            .sign_with_keys(&Keys::generate())
            .unwrap();

        // The same event arriving again, as on a reload, is still delivered.
        for _ in 0..2 {
            let delivered = subscription_event(relay_event(&ours, &event), &ours);
            assert_eq!(delivered.map(|e| e.id), Some(event.id));
        }
    }

    #[test]
    fn test_subscription_event_ignores_others() {
        let ours = SubscriptionId::new("ours");
        let theirs = SubscriptionId::new("theirs");
        let event = EventBuilder::text_note("gm")
            .sign_with_keys(&Keys::generate())
            .unwrap();

        assert!(subscription_event(relay_event(&theirs, &event), &ours).is_none());

        let pool_event = RelayPoolNotification::Event {
            relay_url: relay_url(),
            subscription_id: ours.clone(),
            event: Box::new(event),
        };
        assert!(subscription_event(pool_event, &ours).is_none());

        let notice = RelayPoolNotification::Message {
            relay_url: relay_url(),
            message: RelayMessage::Notice(Cow::Owned("hello".to_string())),
        };
        assert!(subscription_event(notice, &ours).is_none());
    }
}
