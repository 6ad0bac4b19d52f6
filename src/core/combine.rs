//! Fan-in of many fallible streams into one.
//!
//! [`fan_in`] polls every source concurrently and yields items in the order
//! they become ready, whichever source they come from:
//!
//! - A source that finishes is dropped from the set; the others keep going.
//! - The combined stream finishes when every source has finished.
//! - The first error is yielded and ends the combined stream. All the
//!   sources still running are dropped at that point, which cancels
//!   whatever they were waiting on without waiting for them.
//! - Dropping the combined stream drops every unfinished source.
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::ready;
use futures::stream::{FusedStream, FuturesUnordered, StreamFuture};
use futures::{Stream, StreamExt};
use tracing::debug;

/// Stream returned by [`fan_in`].
#[must_use = "streams do nothing unless polled"]
pub struct FanIn<S> {
    pending: FuturesUnordered<StreamFuture<S>>,
    terminated: bool,
}

/// Merges `sources` into a single stream, in completion order.
pub fn fan_in<S, T, E>(sources: impl IntoIterator<Item = S>) -> FanIn<S>
where
    S: Stream<Item = Result<T, E>> + Unpin,
{
    FanIn {
        pending: sources.into_iter().map(StreamExt::into_future).collect(),
        terminated: false,
    }
}

impl<S> FanIn<S> {
    /// Number of sources that have not finished yet.
    #[must_use]
    pub fn live_sources(&self) -> usize {
        self.pending.len()
    }

    fn dispose(&mut self) {
        if !self.pending.is_empty() {
            debug!(target: "fan-in", live_sources = self.pending.len(), "disposing unfinished sources");
            self.pending.clear();
        }
    }
}

impl<S, T, E> Stream for FanIn<S>
where
    S: Stream<Item = Result<T, E>> + Unpin,
{
    type Item = Result<T, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        if this.terminated {
            return Poll::Ready(None);
        }

        loop {
            match ready!(this.pending.poll_next_unpin(cx)) {
                None => {
                    this.terminated = true;
                    return Poll::Ready(None);
                }
                Some((None, _finished)) => {}
                Some((Some(Ok(item)), source)) => {
                    this.pending.push(source.into_future());
                    return Poll::Ready(Some(Ok(item)));
                }
                Some((Some(Err(err)), _failed)) => {
                    this.dispose();
                    this.terminated = true;
                    return Poll::Ready(Some(Err(err)));
                }
            }
        }
    }
}

impl<S, T, E> FusedStream for FanIn<S>
where
    S: Stream<Item = Result<T, E>> + Unpin,
{
    fn is_terminated(&self) -> bool {
        self.terminated
    }
}

impl<S> Drop for FanIn<S> {
    fn drop(&mut self) {
        self.dispose();
    }
}
