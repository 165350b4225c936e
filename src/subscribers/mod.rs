//! # Event subscribers.
//!
//! Subscribers are the display side of the runtime: every status line the
//! supervisor and task runners produce is an [`Event`](crate::Event) delivered
//! to each [`Subscribe`] implementor through [`SubscriberSet`].
//!
//! ```text
//! Runner/Supervisor ── publish(Event) ──► Bus ──► SubscriberSet ──┬──► LogWriter (console)
//!                                                                 └──► custom (recorder, metrics, ...)
//! ```

mod set;
mod subscriber;

#[cfg(feature = "logging")]
mod embedded;

pub(crate) use set::SubscriberSet;
pub use subscriber::Subscribe;

#[cfg(feature = "logging")]
pub use embedded::LogWriter;
