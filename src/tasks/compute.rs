//! # Delayed computation task.
//!
//! [`ComputeTask`] simulates a long-running deterministic function of one
//! argument: it suspends for its `delay`, applies its [`Computation`] and
//! writes the single result to its sink.
//!
//! ## Cancellation points
//! ```text
//! run(x, ctx, sink)
//!   ├─ ctx already cancelled?  → Err(Canceled), nothing written
//!   ├─ sleep(delay) vs ctx     → ctx first: Err(Canceled), nothing written
//!   └─ value = f(x) → sink.write(value)?  → Ok(())
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::channel::Sink;
use crate::error::TaskError;
use crate::tasks::task::Task;

/// Computation strategy bound to a task.
#[derive(Clone)]
pub enum Computation {
    /// `f(x) = x * 2`
    Double,
    /// `f(x) = x * x`
    Square,
    /// Any deterministic `f64 -> f64` function.
    Custom {
        /// Short description shown in logs.
        label: Cow<'static, str>,
        /// The function itself.
        func: Arc<dyn Fn(f64) -> f64 + Send + Sync>,
    },
}

impl Computation {
    /// Wraps an arbitrary function as a strategy.
    pub fn custom<F>(label: impl Into<Cow<'static, str>>, func: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Computation::Custom {
            label: label.into(),
            func: Arc::new(func),
        }
    }

    /// Evaluates the function at `x`.
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            Computation::Double => x * 2.0,
            Computation::Square => x * x,
            Computation::Custom { func, .. } => func(x),
        }
    }

    /// Returns a short description of the function.
    pub fn label(&self) -> &str {
        match self {
            Computation::Double => "x*2",
            Computation::Square => "x*x",
            Computation::Custom { label, .. } => label,
        }
    }
}

impl fmt::Debug for Computation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Computation").field(&self.label()).finish()
    }
}

/// Task that evaluates a [`Computation`] after a simulated work period.
#[derive(Debug, Clone)]
pub struct ComputeTask {
    name: Cow<'static, str>,
    computation: Computation,
    delay: Duration,
}

impl ComputeTask {
    /// Creates a new compute task.
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        computation: Computation,
        delay: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            computation,
            delay,
        }
    }

    /// Creates the task and returns it as a shared handle.
    pub fn arc(
        name: impl Into<Cow<'static, str>>,
        computation: Computation,
        delay: Duration,
    ) -> Arc<Self> {
        Arc::new(Self::new(name, computation, delay))
    }

    /// Returns the bound computation.
    pub fn computation(&self) -> &Computation {
        &self.computation
    }

    /// Returns the simulated work period.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl Task for ComputeTask {
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, x: f64, ctx: CancellationToken, sink: Sink) -> Result<(), TaskError> {
        if ctx.is_cancelled() {
            return Err(TaskError::Canceled);
        }
        tokio::select! {
            biased;
            _ = ctx.cancelled() => return Err(TaskError::Canceled),
            _ = time::sleep(self.delay) => {}
        }

        let value = self.computation.apply(x);
        sink.write(value)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::pipe;
    use crate::error::ChannelError;

    #[test]
    fn test_builtin_computations() {
        for x in [-3.0, 0.0, 1.5, 5.0, 1e10] {
            assert_eq!(Computation::Double.apply(x), x * 2.0);
            assert_eq!(Computation::Square.apply(x), x * x);
        }
    }

    #[test]
    fn test_custom_computation() {
        let c = Computation::custom("x+1", |x| x + 1.0);
        assert_eq!(c.apply(41.0), 42.0);
        assert_eq!(c.label(), "x+1");
    }

    #[tokio::test(start_paused = true)]
    async fn test_writes_value_after_delay() {
        let task = ComputeTask::new("double", Computation::Double, Duration::from_secs(2));
        let (sink, mut source) = pipe();

        task.run(5.0, CancellationToken::new(), sink).await.unwrap();
        assert_eq!(source.try_read(), Ok(Some(10.0)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_during_delay_writes_nothing() {
        let task = ComputeTask::new("square", Computation::Square, Duration::from_secs(60));
        let (sink, mut source) = pipe();
        let token = CancellationToken::new();

        let canceller = {
            let token = token.clone();
            tokio::spawn(async move {
                time::sleep(Duration::from_secs(1)).await;
                token.cancel();
            })
        };

        let res = task.run(5.0, token, sink).await;
        canceller.await.unwrap();

        assert!(matches!(res, Err(TaskError::Canceled)));
        assert_eq!(source.try_read(), Err(ChannelError::Closed));
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let task = ComputeTask::new("double", Computation::Double, Duration::ZERO);
        let (sink, mut source) = pipe();
        let token = CancellationToken::new();
        token.cancel();

        let res = task.run(5.0, token, sink).await;
        assert!(matches!(res, Err(TaskError::Canceled)));
        assert_eq!(source.try_read(), Err(ChannelError::Closed));
    }

    #[tokio::test]
    async fn test_write_failure_is_channel_error() {
        let task = ComputeTask::new("double", Computation::Double, Duration::ZERO);
        let (sink, source) = pipe();
        drop(source);

        let res = task.run(5.0, CancellationToken::new(), sink).await;
        assert!(matches!(
            res,
            Err(TaskError::Channel(ChannelError::Disconnected))
        ));
    }
}
