//! Runtime events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to runtime events emitted by the supervisor, task
//! runners and subscriber workers.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `Supervisor`, `runner::run_task`, `SubscriberSet` workers (overflow/panic).
//! - **Consumers**: `Supervisor` listener task, which fans out to `SubscriberSet`.

mod bus;
mod event;

pub(crate) use bus::Bus;
pub use event::{Event, EventKind};
