//! Explicit open/released lifecycle for the store.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable released-flag shared between a store and its bus task.
///
/// Replaces ownership-counting tricks with an explicit lifecycle: the bus
/// polls the flag before reading state for a delivery, and fails the delivery
/// once the store is gone.
#[derive(Clone)]
pub(crate) struct Liveness {
    released: Arc<AtomicBool>,
}

impl Liveness {
    pub(crate) fn new() -> Self {
        Self {
            released: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Mark the store released. Idempotent; logs only on the first call.
    pub(crate) fn release(&self) {
        if !self.released.swap(true, Ordering::SeqCst) {
            tracing::trace!("store released");
        }
    }

    pub(crate) fn is_released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }
}
