//! The store: an action bus feeding reductions whose output re-enters the bus.
//!
//! Dispatched actions are queued onto an unbounded channel and consumed by a
//! single long-lived bus task. For each delivery the bus checks that the
//! store is still alive, snapshots the state, invokes the reducer, and spawns
//! an independent drain task for the reduction's output stream. Every action
//! the stream yields is sent back into the same channel, so chains of any
//! depth cost queue entries, never stack frames.

use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::action::Action;
use crate::error::StoreError;
use crate::lifecycle::Liveness;
use crate::reducer::{ActionStream, Reducer};
use crate::state::{StateCell, StateStream};

/// Unidirectional state container.
///
/// Holds a [`StateCell`] and the inbound end of the action bus. Constructed
/// with an initial state and a reducer; from then on the only way in is
/// [`dispatch`](Store::dispatch) and the only ways out are
/// [`current_state`](Store::current_state) and
/// [`observe_state`](Store::observe_state).
///
/// Dropping the store releases it: deliveries still in the queue, and any
/// follow-ups produced by reductions already in flight, fail with
/// [`StoreError::UseAfterRelease`] and are dropped one by one. The bus task
/// terminates once the last in-flight reduction has completed and the queue
/// is drained. There is no cancellation API for in-flight reductions.
pub struct Store<R: Reducer> {
    cell: StateCell<R::State>,
    actions: mpsc::UnboundedSender<R::Action>,
    live: Liveness,
}

impl<R: Reducer> Store<R> {
    /// Create a store with `initial` state and the reducer produced by
    /// `make_reducer`.
    ///
    /// The factory receives a handle to the store's state cell so the
    /// concrete reducer can write (and re-read) state from inside
    /// [`reduce`](Reducer::reduce). Must be called from within a tokio
    /// runtime; the bus task is spawned here.
    pub fn new<F>(initial: R::State, make_reducer: F) -> Self
    where
        F: FnOnce(StateCell<R::State>) -> R,
    {
        let cell = StateCell::new(initial);
        let (actions, inbound) = mpsc::unbounded_channel();
        let live = Liveness::new();
        let reducer = make_reducer(cell.clone());

        // The bus holds only a weak sender: the channel closes once the
        // store handle and every in-flight drain task are gone.
        tokio::spawn(run_bus(
            reducer,
            cell.clone(),
            live.clone(),
            actions.downgrade(),
            inbound,
        ));

        Self {
            cell,
            actions,
            live,
        }
    }

    /// Dispatch an action onto the bus. Fire-and-forget.
    ///
    /// Returns immediately; no error is surfaced to the caller. The action
    /// will eventually be paired with a state snapshot and passed to the
    /// reducer, in the order `dispatch` was called.
    pub fn dispatch(&self, action: R::Action) {
        if self.actions.send(action).is_err() {
            tracing::debug!("action dropped: bus is no longer running");
        }
    }

    /// Return a clone of the current state. Never blocks, never fails.
    pub fn current_state(&self) -> R::State {
        self.cell.read()
    }

    /// Observe state changes, starting with the current value.
    ///
    /// See [`StateCell::observe`] for the replay-latest contract.
    pub fn observe_state(&self) -> StateStream<R::State> {
        self.cell.observe()
    }
}

impl<R: Reducer> Drop for Store<R> {
    fn drop(&mut self) {
        self.live.release();
    }
}

/// Bus task: consume deliveries and reap completed reduction drains.
///
/// Exits when the channel closes, which happens once the store handle and
/// every drain task have dropped their senders and the queue is empty.
async fn run_bus<R: Reducer>(
    reducer: R,
    cell: StateCell<R::State>,
    live: Liveness,
    feedback: mpsc::WeakUnboundedSender<R::Action>,
    mut inbound: mpsc::UnboundedReceiver<R::Action>,
) {
    let mut drains: JoinSet<()> = JoinSet::new();

    loop {
        tokio::select! {
            delivered = inbound.recv() => {
                match delivered {
                    Some(action) => {
                        service(&reducer, &cell, &live, &feedback, &mut drains, action);
                    }
                    None => break,
                }
            }
            // Reap completed drains so retained handles do not accumulate
            // under sustained dispatch. A handle is never torn down before
            // its stream completes.
            Some(joined) = drains.join_next(), if !drains.is_empty() => {
                if let Err(err) = joined {
                    if err.is_panic() {
                        tracing::error!("reduction task panicked; bus continues");
                    }
                }
            }
        }
    }
}

/// Service one delivered action: liveness check, snapshot, reduce, drain.
fn service<R: Reducer>(
    reducer: &R,
    cell: &StateCell<R::State>,
    live: &Liveness,
    feedback: &mpsc::WeakUnboundedSender<R::Action>,
    drains: &mut JoinSet<()>,
    action: R::Action,
) {
    // The snapshot must not be read once the store is gone. Upgrading the
    // sender up front also guarantees follow-ups a live path back in.
    let feedback = match feedback.upgrade() {
        Some(sender) if !live.is_released() => sender,
        _ => {
            tracing::debug!(
                error = %StoreError::UseAfterRelease,
                "dropping action delivered after release"
            );
            return;
        }
    };

    let snapshot = cell.read();
    let output = reducer.reduce(action, snapshot);
    drains.spawn(drain_reduction(output, feedback));
}

/// Drain one reduction's output stream, feeding follow-ups back into the bus.
///
/// The strong sender held here keeps the channel open for exactly as long as
/// this reduction can still produce actions. Failures stay local: the first
/// `Err` item ends this reduction and the bus keeps running.
async fn drain_reduction<A: Action>(
    mut output: ActionStream<A>,
    feedback: mpsc::UnboundedSender<A>,
) {
    while let Some(item) = output.next().await {
        match item {
            Ok(follow_up) => {
                if feedback.send(follow_up).is_err() {
                    break;
                }
            }
            Err(err) => {
                tracing::debug!(error = %err, "reduction stream failed");
                break;
            }
        }
    }
}
