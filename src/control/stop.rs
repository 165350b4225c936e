//! # Stop signal.
//!
//! [`StopSignal`] is the flag an input listener raises when the user asks to
//! stop. The supervisor reads it with a non-blocking check on every tick and
//! can also await [`StopSignal::requested`] to wake up as soon as it is raised.
//! Unlike a [`CancellationToken`](tokio_util::sync::CancellationToken) it can
//! be cleared again when the user declines the confirmation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Notify;

#[derive(Debug, Default)]
struct Inner {
    flag: AtomicBool,
    notify: Notify,
}

/// Cloneable handle to a shared, resettable stop request.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    inner: Arc<Inner>,
}

impl StopSignal {
    /// Creates a cleared signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the signal.
    ///
    /// Returns `true` only on the cleared → raised transition.
    pub fn request(&self) -> bool {
        let fresh = !self.inner.flag.swap(true, Ordering::AcqRel);
        if fresh {
            self.inner.notify.notify_waiters();
        }
        fresh
    }

    /// Returns the current state without waiting.
    #[inline]
    pub fn is_requested(&self) -> bool {
        self.inner.flag.load(Ordering::Acquire)
    }

    /// Clears the signal (stop declined).
    pub fn clear(&self) {
        self.inner.flag.store(false, Ordering::Release);
    }

    /// Completes once the signal is raised (immediately if it already is).
    pub async fn requested(&self) {
        loop {
            let notified = self.inner.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if self.is_requested() {
                return;
            }
            notified.await;
        }
    }
}
