//! # Global runtime configuration.
//!
//! Provides [`Config`] centralized settings for the supervisor runtime. All
//! values are fixed at construction; nothing is reconfigurable mid-run.
//!
//! ## Sentinel values
//! - `poll_interval = 0s` → clamped to 1ms (never a busy loop)
//! - `bus_capacity = 0` → clamped to 1
//! - `timeout` too large to add to the clock (e.g. `Duration::MAX`) → about 30 years

use std::time::Duration;

use tokio::time::Instant;

use crate::tasks::{Computation, TaskRef, TaskSpec};

/// Global configuration for the supervisor runtime.
///
/// ## Field semantics
/// - `argument`: the fixed input `x` every task computes on
/// - `timeout`: global wall-clock budget for the whole run
/// - `poll_interval`: supervisor tick
/// - `grace`: how long to wait for cancelled tasks to settle before aborting them
/// - `bus_capacity`: event bus ring buffer size
/// - `tasks`: name → computation mapping with per-task simulated delay
#[derive(Clone, Debug)]
pub struct Config {
    /// Argument passed to every task.
    pub argument: f64,

    /// Global timeout budget.
    ///
    /// When exceeded, every still-running task is cancelled and reported `TimedOut`.
    pub timeout: Duration,

    /// Interval between supervisor polls.
    pub poll_interval: Duration,

    /// Maximum time to wait for tasks to stop after cancellation.
    ///
    /// Tasks still running afterwards are aborted and reported by their
    /// last observed state.
    pub grace: Duration,

    /// Capacity of the event bus broadcast channel ring buffer.
    pub bus_capacity: usize,

    /// Tasks to run.
    pub tasks: Vec<TaskSpec>,
}

/// Stand-in deadline distance for timeouts that overflow [`Instant`].
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

impl Config {
    /// Returns the instant at which a run started at `start` times out.
    ///
    /// Never panics: a deadline the clock cannot represent becomes about 30 years after `start`.
    pub fn deadline_from(&self, start: Instant) -> Instant {
        start
            .checked_add(self.timeout)
            .unwrap_or_else(|| start + FAR_FUTURE)
    }

    /// Returns the poll interval clamped to a minimum of 1ms.
    #[inline]
    pub fn poll_interval_clamped(&self) -> Duration {
        self.poll_interval.max(Duration::from_millis(1))
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }

    /// Builds runnable tasks from [`Config::tasks`].
    pub fn task_refs(&self) -> Vec<TaskRef> {
        self.tasks.iter().cloned().map(TaskSpec::into_task).collect()
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `argument = 5`
    /// - `timeout = 10s`
    /// - `poll_interval = 100ms`
    /// - `grace = 1s`
    /// - `bus_capacity = 1024`
    /// - `tasks`: `Function_1 = x*2` after 2s, `Function_2 = x*x` after 7s
    fn default() -> Self {
        Self {
            argument: 5.0,
            timeout: Duration::from_secs(10),
            poll_interval: Duration::from_millis(100),
            grace: Duration::from_secs(1),
            bus_capacity: 1024,
            tasks: vec![
                TaskSpec::new(
                    "Function_1",
                    Computation::Double,
                    Duration::from_millis(2000),
                ),
                TaskSpec::new(
                    "Function_2",
                    Computation::Square,
                    Duration::from_millis(7000),
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.argument, 5.0);
        assert_eq!(cfg.timeout, Duration::from_secs(10));

        let names: Vec<&str> = cfg.tasks.iter().map(TaskSpec::name).collect();
        assert_eq!(names, ["Function_1", "Function_2"]);
        assert!(cfg.tasks.iter().all(|t| t.delay() < cfg.timeout));
    }

    #[test]
    fn test_clamping() {
        let cfg = Config {
            poll_interval: Duration::ZERO,
            bus_capacity: 0,
            ..Config::default()
        };
        assert_eq!(cfg.poll_interval_clamped(), Duration::from_millis(1));
        assert_eq!(cfg.bus_capacity_clamped(), 1);
    }

    #[test]
    fn test_deadline_from() {
        let start = Instant::now();
        let cfg = Config::default();
        assert_eq!(cfg.deadline_from(start), start + Duration::from_secs(10));

        let unbounded = Config {
            timeout: Duration::MAX,
            ..Config::default()
        };
        assert_eq!(unbounded.deadline_from(start), start + FAR_FUTURE);
    }

    #[test]
    fn test_task_refs_follow_specs() {
        let refs = Config::default().task_refs();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].name(), "Function_1");
        assert_eq!(refs[1].name(), "Function_2");
    }
}
