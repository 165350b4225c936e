//! # Run a single task to a terminal state.
//!
//! Executes a [`Task`] exactly once, records its lifecycle in a
//! [`watch`] channel owned by this runner and publishes events to [`Bus`].
//!
//! ## Event flow
//! ```text
//! Start:         state = Running   → publish TaskStarting
//! Success:       Ok(())            → state = Completed, publish TaskCompleted
//! Cancellation:  Err(Canceled)     → state = Cancelled, publish TaskCancelled
//! Failure:       Err(e) / panic    → state = Failed(e), publish TaskFailed
//! ```
//!
//! ## Rules
//! - The runner is the **only** writer of the task state.
//! - No retries: every terminal state is final.
//! - The sink moves into the task; when the task returns the sink is dropped,
//!   so a task that wrote nothing leaves a closed, empty channel.

use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::{
    channel::Sink,
    error::TaskError,
    events::{Bus, Event, EventKind},
    tasks::{TaskRef, TaskState},
};

/// Drives `task` once and reports its lifecycle through `state` and `bus`.
pub async fn run_task(
    task: TaskRef,
    x: f64,
    ctx: CancellationToken,
    sink: Sink,
    state: watch::Sender<TaskState>,
    bus: Bus,
) {
    state.send_replace(TaskState::Running);
    bus.publish(Event::new(EventKind::TaskStarting).with_task(task.name()));

    let res = std::panic::AssertUnwindSafe(task.run(x, ctx, sink))
        .catch_unwind()
        .await
        .unwrap_or_else(|_| {
            Err(TaskError::Fail {
                error: "panicked".to_string(),
            })
        });

    match res {
        Ok(()) => {
            state.send_replace(TaskState::Completed);
            bus.publish(Event::new(EventKind::TaskCompleted).with_task(task.name()));
        }
        Err(TaskError::Canceled) => {
            state.send_replace(TaskState::Cancelled);
            bus.publish(Event::new(EventKind::TaskCancelled).with_task(task.name()));
        }
        Err(e) => {
            let reason: Arc<str> = Arc::from(e.to_string());
            state.send_replace(TaskState::Failed(Arc::clone(&reason)));
            bus.publish(
                Event::new(EventKind::TaskFailed)
                    .with_task(task.name())
                    .with_reason(reason),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::pipe;
    use crate::tasks::TaskFn;

    async fn drive(task: TaskRef, ctx: CancellationToken) -> (TaskState, Option<f64>, Vec<EventKind>) {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        let (sink, mut source) = pipe();
        let (tx, state) = watch::channel(TaskState::Pending);

        run_task(task, 5.0, ctx, sink, tx, bus).await;

        let mut kinds = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            kinds.push(ev.kind);
        }
        let value = source.try_read().ok().flatten();
        let last = state.borrow().clone();
        (last, value, kinds)
    }

    #[tokio::test]
    async fn test_success_is_completed() {
        let task: TaskRef = TaskFn::arc("ok", |x: f64, _ctx: CancellationToken, sink: Sink| async move {
            sink.write(x + 1.0)?;
            Ok::<(), TaskError>(())
        });
        let (state, value, kinds) = drive(task, CancellationToken::new()).await;

        assert_eq!(state, TaskState::Completed);
        assert_eq!(value, Some(6.0));
        assert_eq!(kinds, [EventKind::TaskStarting, EventKind::TaskCompleted]);
    }

    #[tokio::test]
    async fn test_cancel_is_cancelled() {
        let task: TaskRef = TaskFn::arc("c", |_x: f64, _ctx: CancellationToken, _sink: Sink| async move {
            Err::<(), TaskError>(TaskError::Canceled)
        });
        let (state, value, kinds) = drive(task, CancellationToken::new()).await;

        assert_eq!(state, TaskState::Cancelled);
        assert_eq!(value, None);
        assert_eq!(kinds, [EventKind::TaskStarting, EventKind::TaskCancelled]);
    }

    #[tokio::test]
    async fn test_error_is_failed_with_reason() {
        let task: TaskRef = TaskFn::arc("f", |_x: f64, _ctx: CancellationToken, _sink: Sink| async move {
            Err::<(), TaskError>(TaskError::Fail {
                error: "boom".into(),
            })
        });
        let (state, _, kinds) = drive(task, CancellationToken::new()).await;

        assert_eq!(state, TaskState::Failed(Arc::from("execution failed: boom")));
        assert_eq!(kinds, [EventKind::TaskStarting, EventKind::TaskFailed]);
    }

    #[tokio::test]
    async fn test_panic_is_failed() {
        let task: TaskRef = TaskFn::arc("p", |_x: f64, _ctx: CancellationToken, _sink: Sink| async move {
            if true {
                panic!("kaboom");
            }
            Ok::<(), TaskError>(())
        });
        let (state, value, _) = drive(task, CancellationToken::new()).await;

        assert!(matches!(state, TaskState::Failed(_)));
        assert_eq!(value, None);
    }
}
