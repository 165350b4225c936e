//! # Task abstractions and specifications.
//!
//! This module provides the core task-related types:
//! - [`Task`] - trait for implementing async cancelable tasks
//! - [`TaskState`] - lifecycle state observed by the supervisor
//! - [`TaskFn`] - function-backed task implementation
//! - [`ComputeTask`] / [`Computation`] - delayed evaluation of a strategy
//! - [`TaskSpec`] - configuration entry mapping a name to a computation

mod compute;
mod spec;
mod task;
mod task_fn;

pub use compute::{Computation, ComputeTask};
pub use spec::TaskSpec;
pub use task::{Task, TaskRef, TaskState};
pub use task_fn::TaskFn;
