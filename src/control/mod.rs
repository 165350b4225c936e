//! User control: stop requests and their confirmation.
//!
//! - [`StopSignal`] resettable flag raised by the input listener
//! - [`InputListener`] reads `q`/`y`/`n` lines concurrently with the supervisor
//! - [`Confirm`] how the supervisor asks for a yes/no answer
//!
//! ## Flow
//! ```text
//! stdin ──► InputListener ──q──► StopSignal ──(tick)──► Supervisor
//!                 │                                        │ publish StopRequested
//!                 └──y/n──► Answers ◄──── confirm() ───────┘
//! ```

mod listener;
mod stop;

use async_trait::async_trait;

pub use listener::{Answers, Command, InputListener};
pub use stop::StopSignal;

/// Source of yes/no answers for a pending stop request.
#[async_trait]
pub trait Confirm: Send {
    /// Waits for the next answer.
    ///
    /// `Some(true)` confirms, `Some(false)` declines, `None` means the input
    /// source is exhausted and no answer will ever come.
    async fn confirm(&mut self) -> Option<bool>;

    /// Drops answers given before the current prompt.
    ///
    /// Called by the supervisor every time a new stop request is raised, so a
    /// confirmation only ever comes from input typed after that request.
    fn discard_pending(&mut self) {}
}
