use std::collections::HashSet;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::stream::{select_all, BoxStream, SelectAll};
use futures::{ready, Stream};
use nostr_sdk::prelude::*;
use tracing::trace;

/// Drops every event whose id was already yielded. First occurrence wins and
/// output keeps arrival order.
#[derive(Debug)]
#[must_use = "streams do nothing unless polled"]
pub struct Unique<S> {
    inner: S,
    seen: HashSet<EventId>,
}

impl<S> Unique<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            seen: HashSet::new(),
        }
    }

    /// Number of distinct ids yielded so far.
    pub fn seen(&self) -> usize {
        self.seen.len()
    }
}

impl<S> Stream for Unique<S>
where
    S: Stream<Item = Event> + Unpin,
{
    type Item = Event;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Event>> {
        let this = self.get_mut();
        loop {
            match ready!(Pin::new(&mut this.inner).poll_next(cx)) {
                Some(event) => {
                    if this.seen.insert(event.id) {
                        return Poll::Ready(Some(event));
                    }
                    trace!("dropping duplicate event {}", event.id);
                }
                None => return Poll::Ready(None),
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

/// Fan in several per-relay streams and dedup across all of them.
pub fn merge_unique<I>(sources: I) -> Unique<SelectAll<BoxStream<'static, Event>>>
where
    I: IntoIterator<Item = BoxStream<'static, Event>>,
{
    Unique::new(select_all(sources))
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::mpsc;
    use futures::{stream, StreamExt};

    fn note(content: &str) -> Event {
        EventBuilder::text_note(content)
            .sign_with_keys(&Keys::generate())
            .unwrap()
    }

    #[tokio::test]
    async fn test_duplicates_keep_first_position() {
        let a = note("a");
        let b = note("b");
        let c = note("c");
        let delivered = vec![
            a.clone(),
            b.clone(),
            a.clone(),
            c.clone(),
            b.clone(),
            a.clone(),
        ];

        let mut unique = Unique::new(stream::iter(delivered));
        let mut out = Vec::new();
        while let Some(event) = unique.next().await {
            out.push(event.id);
        }

        assert_eq!(out, vec![a.id, b.id, c.id]);
        assert_eq!(unique.seen(), 3);
    }

    #[tokio::test]
    async fn test_three_relays_deliver_a_a_b() {
        let a = note("a");
        let b = note("b");
        let (r1, rx1) = mpsc::unbounded();
        let (r2, rx2) = mpsc::unbounded();
        let (r3, rx3) = mpsc::unbounded();

        let mut merged = merge_unique(vec![rx1.boxed(), rx2.boxed(), rx3.boxed()]);

        r1.unbounded_send(a.clone()).unwrap();
        assert_eq!(merged.next().await.map(|e| e.id), Some(a.id));

        r2.unbounded_send(a.clone()).unwrap();
        r3.unbounded_send(b.clone()).unwrap();
        drop((r1, r2, r3));

        let rest: Vec<EventId> = merged.map(|e| e.id).collect().await;
        assert_eq!(rest, vec![b.id]);
    }

    #[tokio::test]
    async fn test_merge_of_nothing_ends() {
        let merged = merge_unique(Vec::<BoxStream<'static, Event>>::new());
        assert!(merged.collect::<Vec<_>>().await.is_empty());
    }
}
