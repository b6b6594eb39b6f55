//! Stream adapters that turn open-ended relay subscriptions into bounded,
//! duplicate-free sequences.

pub mod idle;
pub mod unique;

use std::time::Duration;

use futures::stream::BoxStream;
use futures::Stream;
use nostr_sdk::prelude::*;

use crate::error::CoreResult;
use crate::transport::RelayTransport;

pub use idle::IdleTimeout;
pub use unique::{merge_unique, Unique};

/// A subscription after dedup and idle termination.
pub type BoundedStream = IdleTimeout<Unique<BoxStream<'static, Event>>>;

pub trait EventStreamExt: Stream<Item = Event> + Sized {
    fn unique(self) -> Unique<Self> {
        Unique::new(self)
    }

    fn idle_timeout(self, idle: Duration) -> IdleTimeout<Self> {
        IdleTimeout::new(self, idle)
    }
}

impl<S> EventStreamExt for S where S: Stream<Item = Event> + Sized {}

/// Open a subscription and wrap it as dedup + idle-terminated.
pub async fn bounded_query(
    transport: &dyn RelayTransport,
    filter: Filter,
    idle: Duration,
) -> CoreResult<BoundedStream> {
    let raw = transport.subscribe(filter).await?;
    Ok(raw.unique().idle_timeout(idle))
}
