//! # LogWriter, console status printer
//!
//! A minimal subscriber that renders incoming [`Event`]s as status lines on stdout.
//!
//! ## Example output
//! ```text
//! [manager] system started; calculating for x = 5 (tasks=2, timeout=10s)
//! [manager] press 'q' and Enter to stop the calculation
//!    -> Function_1 started
//!    -> Function_2 started
//!    -> Function_1 finished calculation
//! [manager] timeout exceeded (10s); cancelling tasks
//!    -> Function_2 was interrupted
//! [manager] run finished: timed_out
//! ```

use std::time::Duration;

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn task(e: &Event) -> &str {
    e.task.as_deref().unwrap_or("unknown")
}

fn budget(e: &Event) -> Duration {
    Duration::from_millis(u64::from(e.timeout_ms.unwrap_or(0)))
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::RunStarted => {
                println!(
                    "[manager] system started; calculating for x = {} (tasks={}, timeout={:?})",
                    e.value.unwrap_or(f64::NAN),
                    e.count.unwrap_or(0),
                    budget(e),
                );
                println!("[manager] press 'q' and Enter to stop the calculation");
            }
            EventKind::TaskStarting => println!("   -> {} started", task(e)),
            EventKind::TaskCompleted => println!("   -> {} finished calculation", task(e)),
            EventKind::TaskCancelled => println!("   -> {} was interrupted", task(e)),
            EventKind::TaskFailed => println!(
                "   -> {} failed: {}",
                task(e),
                e.reason.as_deref().unwrap_or("unknown")
            ),
            EventKind::TimeoutHit => {
                println!("[manager] timeout exceeded ({:?}); cancelling tasks", budget(e));
            }
            EventKind::StopRequested => {
                println!("[manager] stop requested. confirm cancellation? (y/n)");
            }
            EventKind::StopConfirmed => println!("[manager] cancelled by user"),
            EventKind::StopDeclined => println!("[manager] resuming"),
            EventKind::AllDone => println!("[manager] all tasks finished"),
            EventKind::RunFinished => println!(
                "[manager] run finished: {}",
                e.reason.as_deref().unwrap_or("unknown")
            ),
            EventKind::ShutdownRequested => println!("[shutdown-requested]"),
            EventKind::GraceExceeded => println!(
                "[grace-exceeded] grace={:?} stuck={}",
                budget(e),
                e.reason.as_deref().unwrap_or("")
            ),
            EventKind::SubscriberOverflow => println!(
                "[subscriber-overflow] subscriber={} reason={}",
                task(e),
                e.reason.as_deref().unwrap_or("unknown")
            ),
            EventKind::SubscriberPanicked => println!(
                "[subscriber-panicked] subscriber={} info={}",
                task(e),
                e.reason.as_deref().unwrap_or("unknown")
            ),
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
