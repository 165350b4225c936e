//! Result channels.
//!
//! A channel hands exactly one numeric result from a task to the supervisor
//! without shared mutable state. See [`pipe`] for the contract.

mod pipe;

pub use pipe::{RECORD_LEN, Sink, Source, pipe};
