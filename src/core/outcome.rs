//! # Harvested outcomes and the final report.
//!
//! After the supervisor loop ends, every task is classified into an
//! [`Outcome`] from its last observed [`TaskState`], the way the run ended
//! ([`RunEnd`]) and, for completed tasks, a read of its channel.
//!
//! ```text
//! Completed ── try_read ──┬─ value         → Value(v)
//!                         ├─ nothing       → Failed(EmptyChannel)
//!                         └─ read error    → Failed(Channel)
//! Failed(reason)                           → Failed(Task { reason })
//! Pending/Running/Cancelled ──┬─ TimedOut  → TimedOut
//!                             └─ otherwise → Cancelled
//! ```
//!
//! The combined result is the product of all values, and exists only if
//! **every** outcome is a value.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::channel::Source;
use crate::error::{ChannelError, OutcomeError};
use crate::tasks::TaskState;

/// How the supervisor loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEnd {
    /// Every task reached a terminal state on its own.
    AllDone,
    /// The global timeout was exceeded.
    TimedOut,
    /// Stopped by a confirmed user request or an OS signal.
    Cancelled,
}

impl RunEnd {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            RunEnd::AllDone => "all_done",
            RunEnd::TimedOut => "timed_out",
            RunEnd::Cancelled => "cancelled",
        }
    }
}

/// Classified terminal result of one task.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The task completed and its channel delivered this value.
    Value(f64),
    /// Stopped before producing a value.
    Cancelled,
    /// Failed; see the reason.
    Failed(OutcomeError),
    /// Did not finish within the global timeout.
    TimedOut,
}

impl Outcome {
    /// Classifies one task.
    pub fn classify(state: &TaskState, end: RunEnd, source: &mut Source) -> Self {
        match state {
            TaskState::Completed => match source.try_read() {
                Ok(Some(v)) => Outcome::Value(v),
                Ok(None) | Err(ChannelError::Closed) => Outcome::Failed(OutcomeError::EmptyChannel),
                Err(e) => Outcome::Failed(OutcomeError::Channel(e)),
            },
            TaskState::Failed(reason) => Outcome::Failed(OutcomeError::Task {
                reason: Arc::clone(reason),
            }),
            TaskState::Pending | TaskState::Running | TaskState::Cancelled => match end {
                RunEnd::TimedOut => Outcome::TimedOut,
                RunEnd::AllDone | RunEnd::Cancelled => Outcome::Cancelled,
            },
        }
    }

    /// Returns the value if there is one.
    pub fn value(&self) -> Option<f64> {
        match self {
            Outcome::Value(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Value(v) => write!(f, "OK, value: {v}"),
            Outcome::Cancelled => f.write_str("CANCELLED (no result)"),
            Outcome::TimedOut => f.write_str("TIMED OUT (no result)"),
            Outcome::Failed(e) => write!(f, "ERROR ({e})"),
        }
    }
}

/// Combines per-task outcomes: the product of all values, or `None` if any
/// outcome is not a value (or there are no outcomes at all).
pub fn combine<'a, I>(outcomes: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a Outcome>,
{
    let mut product: Option<f64> = None;
    for outcome in outcomes {
        let v = outcome.value()?;
        product = Some(product.map_or(v, |p| p * v));
    }
    product
}

/// Outcome of one named task.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskReport {
    /// Task name.
    pub name: Arc<str>,
    /// Classified outcome.
    pub outcome: Outcome,
}

/// Final report of a supervised run.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// How the supervisor loop ended.
    pub end: RunEnd,
    /// Per-task outcomes in spawn order.
    pub tasks: Vec<TaskReport>,
    /// Combined result; `None` means undefined.
    pub result: Option<f64>,
    /// Wall-clock time from spawn to harvest.
    pub elapsed: Duration,
}

impl Report {
    /// Returns the outcome of the named task.
    pub fn outcome(&self, name: &str) -> Option<&Outcome> {
        self.tasks
            .iter()
            .find(|t| &*t.name == name)
            .map(|t| &t.outcome)
    }

    /// Returns `true` if the combined result is defined.
    pub fn is_success(&self) -> bool {
        self.result.is_some()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- FINAL RESULTS ---")?;
        for t in &self.tasks {
            writeln!(f, "[{}] status: {}", t.name, t.outcome)?;
        }
        match self.result {
            Some(result) => {
                let factors: Vec<String> = self
                    .tasks
                    .iter()
                    .filter_map(|t| t.outcome.value())
                    .map(|v| format!("{v:.2}"))
                    .collect();
                write!(f, "SUCCESS. Result: {} = {result:.2}", factors.join(" * "))
            }
            None => write!(f, "CALCULATION FAILED. Result is Undefined."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::pipe;

    #[test]
    fn test_combine_requires_every_value() {
        let both = [Outcome::Value(10.0), Outcome::Value(25.0)];
        assert_eq!(combine(&both), Some(250.0));

        let partial = [Outcome::Value(10.0), Outcome::TimedOut];
        assert_eq!(combine(&partial), None);

        let failed = [Outcome::Failed(OutcomeError::EmptyChannel), Outcome::Value(1.0)];
        assert_eq!(combine(&failed), None);

        assert_eq!(combine(&[Outcome::Cancelled, Outcome::Cancelled]), None);
        assert_eq!(combine(&[] as &[Outcome]), None);
    }

    #[test]
    fn test_completed_reads_channel() {
        let (sink, mut source) = pipe();
        sink.write(10.0).unwrap();
        let o = Outcome::classify(&TaskState::Completed, RunEnd::TimedOut, &mut source);
        assert_eq!(o, Outcome::Value(10.0));
    }

    #[test]
    fn test_completed_with_empty_channel_is_failure() {
        let (sink, mut source) = pipe();
        drop(sink);
        let o = Outcome::classify(&TaskState::Completed, RunEnd::AllDone, &mut source);
        assert_eq!(o, Outcome::Failed(OutcomeError::EmptyChannel));

        let (_sink, mut source) = pipe();
        let o = Outcome::classify(&TaskState::Completed, RunEnd::AllDone, &mut source);
        assert_eq!(o, Outcome::Failed(OutcomeError::EmptyChannel));
    }

    #[test]
    fn test_unfinished_depends_on_run_end() {
        let (_sink, mut source) = pipe();
        for state in [TaskState::Running, TaskState::Cancelled, TaskState::Pending] {
            assert_eq!(
                Outcome::classify(&state, RunEnd::TimedOut, &mut source),
                Outcome::TimedOut
            );
            assert_eq!(
                Outcome::classify(&state, RunEnd::Cancelled, &mut source),
                Outcome::Cancelled
            );
        }
    }

    #[test]
    fn test_failed_keeps_reason() {
        let (_sink, mut source) = pipe();
        let state = TaskState::Failed(Arc::from("boom"));
        let o = Outcome::classify(&state, RunEnd::AllDone, &mut source);
        assert_eq!(
            o,
            Outcome::Failed(OutcomeError::Task {
                reason: Arc::from("boom")
            })
        );
    }

    #[test]
    fn test_report_display() {
        let report = Report {
            end: RunEnd::AllDone,
            tasks: vec![
                TaskReport {
                    name: Arc::from("Function_1"),
                    outcome: Outcome::Value(10.0),
                },
                TaskReport {
                    name: Arc::from("Function_2"),
                    outcome: Outcome::Value(25.0),
                },
            ],
            result: Some(250.0),
            elapsed: Duration::from_secs(7),
        };
        let text = report.to_string();
        assert!(text.contains("[Function_1] status: OK, value: 10"));
        assert!(text.ends_with("SUCCESS. Result: 10.00 * 25.00 = 250.00"));

        let undefined = Report {
            result: None,
            tasks: vec![TaskReport {
                name: Arc::from("Function_2"),
                outcome: Outcome::TimedOut,
            }],
            ..report
        };
        let text = undefined.to_string();
        assert!(text.contains("[Function_2] status: TIMED OUT (no result)"));
        assert!(text.ends_with("Result is Undefined."));
    }
}
