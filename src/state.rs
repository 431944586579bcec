//! The state cell: current value, thread-safe writes, observation streams.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

/// Marker trait for state objects.
///
/// States should be:
/// - Immutable (each write replaces the whole value)
/// - Comparable (`PartialEq` for detecting changes)
/// - Cheap enough to clone on every read
///
/// Blanket-implemented for every type meeting the bounds.
pub trait State: Clone + PartialEq + Send + Sync + 'static {}

impl<T> State for T where T: Clone + PartialEq + Send + Sync + 'static {}

/// Cheaply cloneable handle to the current state value.
///
/// The cell is the one shared mutable resource in the container. Reads return
/// a clone of the current value; writes replace it atomically and wake every
/// observer. The pipeline itself never writes the cell; concrete reducers do,
/// as a side effect of reducing (see [`Reducer`](crate::Reducer)).
///
/// The cell imposes no read-modify-write discipline: two reductions that both
/// `read`, compute, and `write` can interleave. Serializing such updates is
/// the concrete collaborator's responsibility.
#[derive(Clone)]
pub struct StateCell<S: State> {
    current: Arc<watch::Sender<S>>,
}

impl<S: State> StateCell<S> {
    /// Create a cell holding `initial`.
    pub fn new(initial: S) -> Self {
        let (current, _) = watch::channel(initial);
        Self {
            current: Arc::new(current),
        }
    }

    /// Return a clone of the current value. Never blocks, never fails.
    pub fn read(&self) -> S {
        self.current.borrow().clone()
    }

    /// Replace the current value and notify every observer.
    ///
    /// Safe to call from any thread or task, including from inside an
    /// in-flight reduction. Every write notifies, even if the new value
    /// compares equal to the old one.
    pub fn write(&self, next: S) {
        self.current.send_replace(next);
    }

    /// Observe the state as a replay-latest-then-continue stream.
    ///
    /// The stream yields the value current at subscription time first, then
    /// every subsequent update. Observers are independent; each may subscribe
    /// at any point. An observer that polls slower than writes arrive sees
    /// the most recent value and may skip intermediates. The stream ends when
    /// the last cell handle is dropped.
    pub fn observe(&self) -> StateStream<S> {
        StateStream {
            inner: WatchStream::new(self.current.subscribe()),
        }
    }
}

/// Stream of state values produced by [`StateCell::observe`].
pub struct StateStream<S: State> {
    inner: WatchStream<S>,
}

impl<S: State> Stream for StateStream<S> {
    type Item = S;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<S>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
