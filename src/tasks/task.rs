//! # Task abstraction and lifecycle state.
//!
//! This module defines the [`Task`] trait (async, cancelable, one result) and
//! [`TaskState`], the lifecycle a task moves through while it runs.
//! The common handle type is [`TaskRef`], an `Arc<dyn Task>` suitable for
//! sharing across the runtime.
//!
//! A task receives a [`CancellationToken`] and must check it cooperatively;
//! it is never forcibly terminated while it honors the token.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::{channel::Sink, error::TaskError};

/// # Shared handle to a task object.
///
/// This is the primary type used by the supervisor and config.
pub type TaskRef = Arc<dyn Task>;

/// # Asynchronous, cancelable unit producing at most one result.
///
/// A `Task` has a stable [`name`](Task::name) and an async [`run`](Task::run)
/// method. `run` computes a function of `x` and publishes the value on `sink`.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use tokio_util::sync::CancellationToken;
/// use computevisor::{Task, TaskError, channel::Sink};
///
/// struct Halve;
///
/// #[async_trait]
/// impl Task for Halve {
///     fn name(&self) -> &str { "halve" }
///
///     async fn run(&self, x: f64, ctx: CancellationToken, sink: Sink) -> Result<(), TaskError> {
///         if ctx.is_cancelled() {
///             return Err(TaskError::Canceled);
///         }
///         sink.write(x / 2.0)?;
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Task: Send + Sync + 'static {
    /// Returns a stable, human-readable task name.
    fn name(&self) -> &str;

    /// Executes the task once.
    ///
    /// Implementations must write **nothing** to `sink` when they return an
    /// error, and return [`TaskError::Canceled`] when they stop because of `ctx`.
    async fn run(&self, x: f64, ctx: CancellationToken, sink: Sink) -> Result<(), TaskError>;
}

/// Lifecycle state of one task, written only by the task's own runner.
///
/// ```text
/// Pending ──► Running ──┬─► Completed
///                       ├─► Cancelled
///                       └─► Failed(reason)
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskState {
    /// Spawned but not yet started.
    Pending,
    /// Executing (suspended in its work period).
    Running,
    /// Finished and wrote its value.
    Completed,
    /// Observed cancellation; wrote nothing.
    Cancelled,
    /// Errored; wrote nothing.
    Failed(Arc<str>),
}

impl TaskState {
    /// Returns `true` for `Completed`, `Cancelled` and `Failed`.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TaskState::Completed | TaskState::Cancelled | TaskState::Failed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(!TaskState::Pending.is_terminal());
        assert!(!TaskState::Running.is_terminal());
        assert!(TaskState::Completed.is_terminal());
        assert!(TaskState::Cancelled.is_terminal());
        assert!(TaskState::Failed(Arc::from("x")).is_terminal());
    }
}
