use std::sync::Mutex;

use async_trait::async_trait;
use futures::channel::mpsc::UnboundedReceiver;
use futures::stream::{self, BoxStream};
use futures::StreamExt;
use nostr_sdk::prelude::*;

use super::{PublishReceipt, RelayStatus, RelayTransport};
use crate::error::{CoreError, CoreResult};

pub(crate) const MOCK_RELAY: &str = "wss://relay.mock";

/// What a scripted subscription delivers.
pub(crate) enum Script {
    /// Deliver these events, then stay open like a real relay.
    Events(Vec<Event>),
    /// Deliver these events, then end.
    Closed(Vec<Event>),
    /// Forward whatever the test sends.
    Channel(UnboundedReceiver<Event>),
    /// Refuse the subscription.
    Fail(String),
}

/// Scripted transport. A subscription takes the first queued script whose
/// kind appears in the filter; with none left it stays silent.
#[derive(Default)]
pub(crate) struct MockTransport {
    scripts: Mutex<Vec<(Kind, Script)>>,
    filters: Mutex<Vec<Filter>>,
    published: Mutex<Vec<Event>>,
    publish_error: Mutex<Option<String>>,
    synced: Mutex<Vec<Vec<String>>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(self, kind: Kind, script: Script) -> Self {
        self.scripts.lock().unwrap().push((kind, script));
        self
    }

    pub(crate) fn failing_publish(self, message: &str) -> Self {
        *self.publish_error.lock().unwrap() = Some(message.to_string());
        self
    }

    pub(crate) fn filters(&self) -> Vec<Filter> {
        self.filters.lock().unwrap().clone()
    }

    pub(crate) fn filters_for(&self, kind: Kind) -> Vec<Filter> {
        self.filters()
            .into_iter()
            .filter(|f| matches_kind(f, kind))
            .collect()
    }

    pub(crate) fn published(&self) -> Vec<Event> {
        self.published.lock().unwrap().clone()
    }

    pub(crate) fn synced(&self) -> Vec<Vec<String>> {
        self.synced.lock().unwrap().clone()
    }
}

fn matches_kind(filter: &Filter, kind: Kind) -> bool {
    filter
        .kinds
        .as_ref()
        .map(|kinds| kinds.contains(&kind))
        .unwrap_or(false)
}

#[async_trait]
impl RelayTransport for MockTransport {
    async fn subscribe(&self, filter: Filter) -> CoreResult<BoxStream<'static, Event>> {
        let script = {
            let mut scripts = self.scripts.lock().unwrap();
            let position = scripts
                .iter()
                .position(|(kind, _)| matches_kind(&filter, *kind));
            position.map(|i| scripts.remove(i).1)
        };
        self.filters.lock().unwrap().push(filter);

        match script {
            Some(Script::Events(events)) => {
                Ok(stream::iter(events).chain(stream::pending()).boxed())
            }
            Some(Script::Closed(events)) => Ok(stream::iter(events).boxed()),
            Some(Script::Channel(rx)) => Ok(rx.boxed()),
            Some(Script::Fail(message)) => Err(CoreError::Transport(message)),
            None => Ok(stream::pending().boxed()),
        }
    }

    async fn publish(&self, event: Event) -> CoreResult<PublishReceipt> {
        if let Some(message) = self.publish_error.lock().unwrap().clone() {
            return Err(CoreError::Transport(message));
        }
        self.published.lock().unwrap().push(event.clone());
        Ok(PublishReceipt {
            event,
            statuses: vec![RelayStatus::accepted(MOCK_RELAY)],
        })
    }

    async fn sync_relays(&self, relays: &[String]) -> CoreResult<()> {
        self.synced.lock().unwrap().push(relays.to_vec());
        Ok(())
    }
}
