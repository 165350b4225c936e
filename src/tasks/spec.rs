//! # Task specification (configuration entry).
//!
//! [`TaskSpec`] maps a task identity to a computation strategy and a simulated
//! work period. A [`Config`](crate::SupervisorConfig) carries a list of specs;
//! [`TaskSpec::into_task`] turns one into a runnable [`ComputeTask`].

use std::borrow::Cow;
use std::time::Duration;

use crate::tasks::compute::{Computation, ComputeTask};
use crate::tasks::task::TaskRef;

/// Name → computation mapping for one task.
///
/// ## Example
/// ```rust
/// use std::time::Duration;
/// use computevisor::{Computation, TaskSpec};
///
/// let spec = TaskSpec::new("Function_1", Computation::Double, Duration::from_millis(2000));
/// let task = spec.into_task();
/// assert_eq!(task.name(), "Function_1");
/// ```
#[derive(Debug, Clone)]
pub struct TaskSpec {
    name: Cow<'static, str>,
    computation: Computation,
    delay: Duration,
}

impl TaskSpec {
    /// Creates a new specification.
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

    /// Returns the task name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the computation strategy.
    pub fn computation(&self) -> &Computation {
        &self.computation
    }

    /// Returns the simulated work period.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Returns a new spec with updated delay.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Builds the runnable task.
    pub fn into_task(self) -> TaskRef {
        ComputeTask::arc(self.name, self.computation, self.delay)
    }
}
