//! Unidirectional state container with a self-feeding action pipeline.
//!
//! A [`Store`] holds an immutable `State` value that changes only in response
//! to dispatched `Action` values. Every action is queued onto an internal bus,
//! paired with a snapshot of the state at the moment it is taken off the bus,
//! and handed to a [`Reducer`]. The reducer yields a stream of follow-up
//! actions, each of which re-enters the same bus, so a single dispatch can
//! cascade indefinitely until every reduction in the chain runs dry.
//!
//! # Architecture
//!
//! ```text
//! dispatch(action) ──→ bus ──→ reduce(action, snapshot) ──→ stream<Action>
//!        ↑                                 │                      │
//!        │                            writes cell           follow-ups
//!        └───────────────────────────────────────────────────────┘
//! ```
//!
//! - **State cell**: owns the current value; synchronous reads, writes safe
//!   from any task, and replay-latest-then-continue observation streams
//! - **Action pipeline**: delivers actions FIFO, runs reductions as
//!   independent tasks, and feeds their output back into itself
//!
//! The pipeline never touches the state itself; concrete reducers write the
//! [`StateCell`] as a side effect while yielding follow-up actions.
//!
//! # Example
//!
//! ```ignore
//! use statebus::{done, FnReducer, Store};
//!
//! let store = Store::new(0u32, |cell| {
//!     FnReducer::new(move |action: u32, state: u32| {
//!         cell.write(state + action);
//!         done()
//!     })
//! });
//!
//! store.dispatch(41);
//! let mut states = store.observe_state();
//! ```
//!
//! Failures inside a reduction stay inside that reduction: they are logged
//! and swallowed at the pipeline boundary, and the bus keeps servicing
//! subsequent actions.

mod action;
mod error;
mod lifecycle;
mod reducer;
mod state;
mod store;

pub use action::Action;
pub use error::StoreError;
pub use reducer::{done, ActionStream, FnReducer, Reducer};
pub use state::{State, StateCell, StateStream};
pub use store::Store;
