//! Error types for the store and its reduction pipeline.

use thiserror::Error;

/// Errors that can occur while servicing a dispatched action.
///
/// Every variant is local to a single reduction or delivery attempt. None of
/// them terminates the bus or the store; the pipeline logs and swallows them
/// at the reduction boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// `Reducer::reduce` was invoked without a concrete implementation.
    #[error("reduce was invoked on the base reducer; implement Reducer::reduce")]
    UnimplementedReduction,

    /// The store was released before the bus could service this delivery.
    #[error("store was released before the action could be serviced")]
    UseAfterRelease,

    /// A dispatched action is not valid in the current state.
    ///
    /// Never raised by the pipeline itself; reserved for concrete reducers
    /// to fail their own output stream with.
    #[error("action rejected in the current state: {reason}")]
    InvalidAction { reason: String },
}
