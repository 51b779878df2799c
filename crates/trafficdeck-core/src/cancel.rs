//! Cooperative cancellation shared between a signal handler and a run loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::DeckError;

/// Cancellation flag that can be cloned into a signal handler.
///
/// # Example
/// ```
/// use trafficdeck_core::cancel::CancellationToken;
///
/// let token = CancellationToken::new();
/// let handler_side = token.clone();
/// handler_side.cancel();
/// assert!(token.is_cancelled());
/// assert!(token.check_cancelled().is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Request cancellation. Repeated calls have no further effect.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Checkpoint for run loops.
    pub fn check_cancelled(&self) -> Result<(), DeckError> {
        if self.is_cancelled() {
            Err(DeckError::Cancelled)
        } else {
            Ok(())
        }
    }
}
