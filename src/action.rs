//! Marker trait for dispatchable actions.

/// Marker trait for action objects.
///
/// Actions represent an intent or an event: user input, a completed side
/// effect, a timer firing. They are transient messages owned by the bus only
/// while in transit, and are consumed by [`Reducer::reduce`](crate::Reducer::reduce).
///
/// Blanket-implemented for every type meeting the bounds; nothing to derive.
pub trait Action: PartialEq + Send + 'static {}

impl<T> Action for T where T: PartialEq + Send + 'static {}
