//! Error types used by the computevisor runtime, tasks and channels.
//!
//! - [`RuntimeError`]: errors raised by the supervisor itself.
//! - [`TaskError`]: errors returned by a single task execution.
//! - [`ChannelError`]: failures writing or reading a result channel.
//! - [`OutcomeError`]: why a harvested task has no usable value.
//!
//! All types provide `as_label` for logs; none of them cross the task
//! boundary as a panic. The supervisor turns task errors into terminal state.

use std::sync::Arc;
use thiserror::Error;

/// # Errors produced by the supervisor runtime.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// `run` was called with an empty task list; there is nothing to combine.
    #[error("no tasks to supervise")]
    NoTasks,
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use computevisor::RuntimeError;
    ///
    /// assert_eq!(RuntimeError::NoTasks.as_label(), "runtime_no_tasks");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::NoTasks => "runtime_no_tasks",
        }
    }
}

/// # Errors on a result channel.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelError {
    /// The read end was dropped; the record cannot be delivered.
    #[error("channel reader disconnected")]
    Disconnected,

    /// The write end was dropped without producing a record.
    #[error("channel closed without a value")]
    Closed,
}

impl ChannelError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            ChannelError::Disconnected => "channel_disconnected",
            ChannelError::Closed => "channel_closed",
        }
    }
}

/// # Errors produced by task execution.
///
/// Tasks are never retried; every variant is terminal.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum TaskError {
    /// Task observed cancellation and stopped without producing a value.
    #[error("context cancelled")]
    Canceled,

    /// Writing the result failed.
    #[error("channel error: {0}")]
    Channel(#[from] ChannelError),

    /// Task execution failed for any other reason.
    #[error("execution failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },
}

impl TaskError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use computevisor::{ChannelError, TaskError};
    ///
    /// let err = TaskError::from(ChannelError::Disconnected);
    /// assert_eq!(err.as_label(), "task_channel");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            TaskError::Canceled => "task_canceled",
            TaskError::Channel(_) => "task_channel",
            TaskError::Fail { .. } => "task_failed",
        }
    }
}

/// # Why a task outcome carries no value.
///
/// `EmptyChannel` is an internal consistency failure: the task reported
/// success, yet its channel holds nothing. It is kept apart from
/// cancellation so that it is surfaced, never silently ignored.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OutcomeError {
    /// Producer reported `Completed` but the channel holds no record.
    #[error("channel empty")]
    EmptyChannel,

    /// Reading the channel failed.
    #[error("channel read failed: {0}")]
    Channel(ChannelError),

    /// The task itself failed.
    #[error("task failed: {reason}")]
    Task {
        /// Failure message reported by the task.
        reason: Arc<str>,
    },
}

impl OutcomeError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            OutcomeError::EmptyChannel => "outcome_empty_channel",
            OutcomeError::Channel(_) => "outcome_channel",
            OutcomeError::Task { .. } => "outcome_task_failed",
        }
    }
}
