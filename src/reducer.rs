//! The reduction step: the pipeline's single extension point.

use std::marker::PhantomData;
use std::pin::Pin;

use futures::future;
use futures::stream::{self, Stream, StreamExt};

use crate::action::Action;
use crate::error::StoreError;
use crate::state::State;

/// Boxed fallible stream of follow-up actions produced by one reduction.
///
/// A reduction may take arbitrary asynchronous time between items. The first
/// `Err` item ends the reduction; the error stays local to it.
pub type ActionStream<A> = Pin<Box<dyn Stream<Item = Result<A, StoreError>> + Send>>;

/// An already-exhausted [`ActionStream`]: this reduction yields no follow-up
/// actions, so the chain terminates here.
pub fn done<A: Action>() -> ActionStream<A> {
    stream::empty().boxed()
}

/// Reducer maps an action and a state snapshot to follow-up actions.
///
/// This is the container's only extension point. The `state` argument is the
/// snapshot read at the moment the action left the bus, not at dispatch time;
/// a reducer that needs the live value mid-reduction should keep its own
/// [`StateCell`](crate::StateCell) handle and call `read()` itself. State
/// changes happen here too: reducers write the cell as a side effect while
/// (or before) yielding follow-up actions.
///
/// The default body refuses to operate: it fails every action with
/// [`StoreError::UnimplementedReduction`]. Concrete reducers override it.
pub trait Reducer: Send + 'static {
    /// The state type this reducer operates on.
    type State: State;

    /// The action type this reducer handles.
    type Action: Action;

    /// Reduce one action against a state snapshot.
    fn reduce(&self, _action: Self::Action, _state: Self::State) -> ActionStream<Self::Action> {
        stream::once(future::ready(Err(StoreError::UnimplementedReduction))).boxed()
    }
}

/// Adapter turning a closure into a [`Reducer`].
///
/// Spares small collaborators and tests a struct definition:
///
/// ```ignore
/// let reducer = FnReducer::new(|action: u32, state: u32| {
///     // ...
///     done()
/// });
/// ```
pub struct FnReducer<S, A, F> {
    reduce_fn: F,
    _marker: PhantomData<fn() -> (S, A)>,
}

impl<S, A, F> FnReducer<S, A, F>
where
    S: State,
    A: Action,
    F: Fn(A, S) -> ActionStream<A> + Send + 'static,
{
    /// Wrap `reduce_fn` as a reducer.
    pub fn new(reduce_fn: F) -> Self {
        Self {
            reduce_fn,
            _marker: PhantomData,
        }
    }
}

impl<S, A, F> Reducer for FnReducer<S, A, F>
where
    S: State,
    A: Action,
    F: Fn(A, S) -> ActionStream<A> + Send + 'static,
{
    type State = S;
    type Action = A;

    fn reduce(&self, action: A, state: S) -> ActionStream<A> {
        (self.reduce_fn)(action, state)
    }
}
