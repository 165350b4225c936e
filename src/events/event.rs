//! # Runtime events emitted by the supervisor and task runners.
//!
//! The [`EventKind`] enum classifies event types across four categories:
//! - **Run events**: start, timeout, stop dialog, completion
//! - **Task lifecycle events**: starting, completed, cancelled, failed
//! - **Shutdown events**: OS signal, grace exceeded
//! - **Subscriber events**: overflow, panic
//!
//! The [`Event`] struct carries additional metadata such as timestamps, task name,
//! reasons and numeric values.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Use `seq` to restore the exact order when events are delivered out of order.
//!
//! ## Example
//! ```rust
//! use computevisor::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::TaskFailed)
//!     .with_task("Function_2")
//!     .with_reason("boom");
//!
//! assert_eq!(ev.kind, EventKind::TaskFailed);
//! assert_eq!(ev.task.as_deref(), Some("Function_2"));
//! assert_eq!(ev.reason.as_deref(), Some("boom"));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Subscriber events ===
    /// Subscriber panicked during event processing.
    ///
    /// Sets:
    /// - `task`: subscriber name
    /// - `reason`: panic info/message
    SubscriberPanicked,

    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets:
    /// - `task`: subscriber name
    /// - `reason`: reason string (e.g., "full", "closed")
    SubscriberOverflow,

    // === Run events ===
    /// Supervisor spawned all tasks.
    ///
    /// Sets:
    /// - `value`: the fixed argument `x`
    /// - `count`: number of tasks
    /// - `timeout_ms`: global timeout budget
    RunStarted,

    /// Global timeout exceeded; running tasks are being cancelled.
    ///
    /// Sets:
    /// - `timeout_ms`: configured budget
    TimeoutHit,

    /// Stop signal observed; the user is asked to confirm.
    StopRequested,

    /// User confirmed the stop; running tasks are being cancelled.
    StopConfirmed,

    /// User declined the stop; the run resumes.
    StopDeclined,

    /// Every task reached a terminal state on its own.
    AllDone,

    /// Results were harvested.
    ///
    /// Sets:
    /// - `value`: combined result (absent when undefined)
    /// - `reason`: how the run ended (`all_done`, `timed_out`, `cancelled`)
    RunFinished,

    // === Shutdown events ===
    /// Shutdown requested (OS signal observed).
    ShutdownRequested,

    /// Grace period exceeded; some tasks did not stop in time and were aborted.
    ///
    /// Sets:
    /// - `reason`: comma separated names of stuck tasks
    /// - `timeout_ms`: the grace period
    GraceExceeded,

    // === Task lifecycle events ===
    /// Task is starting.
    ///
    /// Sets:
    /// - `task`: task name
    TaskStarting,

    /// Task finished and wrote its value.
    ///
    /// Sets:
    /// - `task`: task name
    TaskCompleted,

    /// Task observed cancellation and stopped without a value.
    ///
    /// Sets:
    /// - `task`: task name
    TaskCancelled,

    /// Task failed.
    ///
    /// Sets:
    /// - `task`: task name
    /// - `reason`: failure message
    TaskFailed,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Debug, Clone)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,

    /// Timeout or grace period in milliseconds (compact).
    pub timeout_ms: Option<u32>,
    /// Human-readable reason (errors, overflow details, etc.).
    pub reason: Option<Arc<str>>,
    /// Numeric payload (argument or combined result).
    pub value: Option<f64>,
    /// Number of tasks, if applicable.
    pub count: Option<u32>,
    /// Name of the task, if applicable.
    pub task: Option<Arc<str>>,
    /// Event classification.
    pub kind: EventKind,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            timeout_ms: None,
            reason: None,
            value: None,
            count: None,
            task: None,
            kind,
        }
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches a task name.
    #[inline]
    pub fn with_task(mut self, task: impl Into<Arc<str>>) -> Self {
        self.task = Some(task.into());
        self
    }

    /// Attaches a duration (stored as milliseconds).
    #[inline]
    pub fn with_timeout(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.timeout_ms = Some(ms);
        self
    }

    /// Attaches a numeric payload.
    #[inline]
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    /// Attaches a count.
    #[inline]
    pub fn with_count(mut self, n: usize) -> Self {
        self.count = Some(n.min(u32::MAX as usize) as u32);
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::SubscriberOverflow)
            .with_task(subscriber)
            .with_reason(format!("subscriber={subscriber} reason={reason}"))
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_task(subscriber)
            .with_reason(info)
    }

    /// Returns `true` for events reporting a dropped subscriber delivery.
    #[inline]
    pub fn is_subscriber_overflow(&self) -> bool {
        matches!(self.kind, EventKind::SubscriberOverflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_is_monotonic() {
        let a = Event::new(EventKind::TaskStarting);
        let b = Event::new(EventKind::TaskCompleted);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn test_timeout_is_clamped() {
        let ev = Event::new(EventKind::TimeoutHit).with_timeout(Duration::from_secs(u64::MAX));
        assert_eq!(ev.timeout_ms, Some(u32::MAX));
    }

    #[test]
    fn test_overflow_detection() {
        assert!(Event::subscriber_overflow("rec", "full").is_subscriber_overflow());
        assert!(!Event::subscriber_panicked("rec", "boom".into()).is_subscriber_overflow());
        assert!(!Event::new(EventKind::TaskFailed).is_subscriber_overflow());
    }
}
