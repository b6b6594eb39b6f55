use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::Stream;
use tokio::time::{sleep, Instant, Sleep};
use tracing::trace;

/// Ends the wrapped stream once `idle` passes without an item.
///
/// The clock starts on the first poll and every yielded item restarts it.
/// Upstream is always polled before the timer, so an item that is ready when
/// the deadline fires is still delivered.
#[must_use = "streams do nothing unless polled"]
pub struct IdleTimeout<S> {
    inner: S,
    idle: Duration,
    timer: Option<Pin<Box<Sleep>>>,
    finished: bool,
}

impl<S> IdleTimeout<S> {
    pub fn new(inner: S, idle: Duration) -> Self {
        Self {
            inner,
            idle,
            timer: None,
            finished: false,
        }
    }

    pub fn idle(&self) -> Duration {
        self.idle
    }

    fn finish(&mut self) {
        self.finished = true;
        self.timer = None;
    }
}

impl<S> Stream for IdleTimeout<S>
where
    S: Stream + Unpin,
{
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<S::Item>> {
        let this = self.get_mut();
        if this.finished {
            return Poll::Ready(None);
        }

        match Pin::new(&mut this.inner).poll_next(cx) {
            Poll::Ready(Some(item)) => {
                let deadline = Instant::now() + this.idle;
                match this.timer.as_mut() {
                    Some(timer) => timer.as_mut().reset(deadline),
                    None => this.timer = Some(Box::pin(tokio::time::sleep_until(deadline))),
                }
                return Poll::Ready(Some(item));
            }
            Poll::Ready(None) => {
                this.finish();
                return Poll::Ready(None);
            }
            Poll::Pending => {}
        }

        let idle = this.idle;
        let timer = this.timer.get_or_insert_with(|| Box::pin(sleep(idle)));
        match timer.as_mut().poll(cx) {
            Poll::Ready(()) => {
                trace!("stream idle for {:?}, closing", idle);
                this.finish();
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
