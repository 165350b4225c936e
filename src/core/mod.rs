//! Runtime core: supervision and result aggregation.
//!
//! The public API from this module is [`Supervisor`] (with its builder and
//! [`Config`]) and the report types produced by a run.
//!
//! Internal modules:
//! - [`runner`]: drives one task to a terminal state and publishes its events;
//! - [`supervisor`]: spawns runners, polls, times out, confirms stops, harvests;
//! - [`outcome`]: per-task classification and the combined result;
//! - [`shutdown`]: OS termination signals.

mod builder;
mod config;
mod outcome;
mod runner;
mod shutdown;
mod supervisor;

pub use builder::SupervisorBuilder;
pub use config::Config;
pub use outcome::{Outcome, Report, RunEnd, TaskReport, combine};
pub use supervisor::Supervisor;
