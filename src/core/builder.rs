use std::sync::Arc;

use super::{config::Config, supervisor::Supervisor};
use crate::subscribers::Subscribe;

/// Builder for constructing a [`Supervisor`].
pub struct SupervisorBuilder {
    cfg: Config,
    subscribers: Vec<Arc<dyn Subscribe>>,
    os_signals: bool,
}

impl SupervisorBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
            os_signals: false,
        }
    }

    /// Sets event subscribers (display sinks, recorders).
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Adds one subscriber.
    pub fn with_subscriber(mut self, subscriber: Arc<dyn Subscribe>) -> Self {
        self.subscribers.push(subscriber);
        self
    }

    /// Lets SIGINT, SIGTERM and SIGQUIT (Ctrl-C off unix) cancel a run
    /// without confirmation.
    ///
    /// Installing the handlers replaces the default process termination for
    /// these signals for the rest of the process, so leave this off in
    /// libraries and enable it in binaries.
    pub fn with_os_signals(mut self) -> Self {
        self.os_signals = true;
        self
    }

    /// Builds the supervisor and starts its event listener.
    ///
    /// Must be called within a Tokio runtime.
    pub fn build(self) -> Supervisor {
        let mut sup = Supervisor::new(self.cfg, self.subscribers);
        sup.os_signals = self.os_signals;
        sup
    }
}
