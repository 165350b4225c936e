//! # computevisor
//!
//! **Computevisor** runs a set of long computations in parallel and combines
//! their results, under a global wall-clock timeout and with cooperative,
//! user-confirmed cancellation.
//!
//! Each task computes a function of one argument and hands its single result
//! to the supervisor through a private one-directional byte [`channel`].
//! The supervisor polls task state without blocking on any one task, and on
//! completion, timeout or cancellation harvests whatever results exist.
//!
//! ## Architecture
//! ```text
//!     ┌──────────────┐   ┌──────────────┐        ┌──────────────┐
//!     │ ComputeTask  │   │ ComputeTask  │  ...   │   TaskFn     │
//!     │ (x*2, 2s)    │   │ (x*x, 7s)    │        │ (any f(x))   │
//!     └──────┬───────┘   └──────┬───────┘        └──────┬───────┘
//!            ▼                  ▼                       ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Supervisor::run(x, tasks, &StopSignal, &mut dyn Confirm)          │
//! │  - one runner per task (child CancellationToken, watch state)      │
//! │  - one pipe per task (Sink → runner, Source → supervisor)          │
//! │  - poll loop: timeout → stop request → all done                    │
//! └──────┬──────────────────┬──────────────────────┬──────────────────┘
//!        ▼                  ▼                      ▼
//!    run_task()         run_task()             run_task()
//!        │ Sink.write(f(x))  │                     │
//!        ▼                  ▼                      ▼
//!    Source ──────────► harvest ──► Outcome per task ──► Report
//!                                   (product iff all values)
//!
//! stdin ──► InputListener ──q──► StopSignal        (checked on every tick)
//!                         └─y/n─► Answers: Confirm (asked after a stop request)
//!
//! runners + supervisor ── Event ──► Bus ──► SubscriberSet ──► LogWriter / custom
//! ```
//!
//! ## Features
//! | Area              | Description                                            | Key types                               |
//! |-------------------|--------------------------------------------------------|-----------------------------------------|
//! | **Supervision**   | Parallel run, timeout, stop confirmation, harvest       | [`Supervisor`], [`Report`], [`Outcome`] |
//! | **Tasks**         | Cancelable single-result tasks                          | [`Task`], [`ComputeTask`], [`TaskFn`]   |
//! | **Channels**      | SPSC `f64` byte pipe                                     | [`channel::pipe`]                       |
//! | **Control**       | Stop signal and line-based input                         | [`StopSignal`], [`InputListener`]       |
//! | **Subscribers**   | Status output and custom observers                       | [`Subscribe`], [`Event`]                |
//! | **Errors**        | Typed errors                                             | [`TaskError`], [`OutcomeError`]         |
//! | **Configuration** | Argument, timeout, poll interval, grace, task mapping    | [`SupervisorConfig`], [`TaskSpec`]      |
//!
//! ## Optional features
//! - `logging`: exports the built-in console [`LogWriter`].
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use computevisor::{Computation, StopSignal, Supervisor, SupervisorConfig, TaskSpec};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut cfg = SupervisorConfig::default();
//!     cfg.tasks = vec![
//!         TaskSpec::new("double", Computation::Double, Duration::from_millis(10)),
//!         TaskSpec::new("square", Computation::Square, Duration::from_millis(20)),
//!     ];
//!
//!     let sup = Supervisor::builder(cfg).build();
//!     let stop = StopSignal::new();
//!     let (mut answers, _listener) =
//!         computevisor::InputListener::spawn(tokio::io::BufReader::new(tokio::io::empty()), stop.clone());
//!
//!     let report = sup.run_configured(&stop, &mut answers).await?;
//!     assert_eq!(report.result, Some(250.0));
//!     sup.shutdown().await;
//!     Ok(())
//! }
//! ```
pub mod channel;
mod control;
mod core;
mod error;
mod events;
mod subscribers;
mod tasks;

// ---- Public re-exports ----

pub use control::{Answers, Command, Confirm, InputListener, StopSignal};
pub use core::{
    Config as SupervisorConfig, Outcome, Report, RunEnd, Supervisor, SupervisorBuilder,
    TaskReport, combine,
};
pub use error::{ChannelError, OutcomeError, RuntimeError, TaskError};
pub use events::{Event, EventKind};
pub use subscribers::Subscribe;
pub use tasks::{Computation, ComputeTask, Task, TaskFn, TaskRef, TaskSpec, TaskState};

// Optional: expose the built-in console subscriber.
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
