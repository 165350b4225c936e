//! # Function-backed task (`TaskFn`)
//!
//! [`TaskFn`] wraps a closure `F: Fn(f64, CancellationToken, Sink) -> Fut`,
//! producing a fresh future per run. This avoids shared mutable state and
//! needs no `Mutex`.
//!
//! ## Example
//! ```rust
//! use tokio_util::sync::CancellationToken;
//! use computevisor::{TaskFn, TaskRef, TaskError, channel::Sink};
//!
//! let t: TaskRef = TaskFn::arc("triple", |x: f64, ctx: CancellationToken, sink: Sink| async move {
//!     if ctx.is_cancelled() {
//!         return Err(TaskError::Canceled);
//!     }
//!     sink.write(x * 3.0)?;
//!     Ok(())
//! });
//!
//! assert_eq!(t.name(), "triple");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::channel::Sink;
use crate::error::TaskError;
use crate::tasks::task::Task;

/// Function-backed task implementation.
#[derive(Debug)]
pub struct TaskFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> TaskFn<F> {
    /// Creates a new function-backed task.
    ///
    /// Prefer [`TaskFn::arc`] when you immediately need a [`TaskRef`](crate::TaskRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the task and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<F, Fut> Task for TaskFn<F>
where
    F: Fn(f64, CancellationToken, Sink) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, x: f64, ctx: CancellationToken, sink: Sink) -> Result<(), TaskError> {
        (self.f)(x, ctx, sink).await
    }
}
