//! # Line-oriented input listener.
//!
//! [`InputListener::spawn`] reads lines from any [`AsyncBufRead`] in its own
//! task, concurrently with the supervisor loop.
//!
//! ```text
//! line ──► Command::parse
//!            ├─ Stop    && signal clear  → signal.request()
//!            ├─ Confirm && signal raised → answers ◄── true
//!            ├─ Decline && signal raised → answers ◄── false
//!            └─ anything else            → ignored
//! ```
//!
//! The listener never touches task or channel state. It exits when the
//! reader reaches EOF, fails, or the [`Answers`] handle is dropped.

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::control::{Confirm, StopSignal};

/// Recognized input commands (case-insensitive, surrounding whitespace ignored).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `q`: ask to stop the run.
    Stop,
    /// `y`: confirm a pending stop.
    Confirm,
    /// `n`: decline a pending stop.
    Decline,
}

impl Command {
    /// Parses one input line; returns `None` for anything unrecognized.
    pub fn parse(line: &str) -> Option<Self> {
        let token = line.trim();
        if token.eq_ignore_ascii_case("q") {
            Some(Command::Stop)
        } else if token.eq_ignore_ascii_case("y") {
            Some(Command::Confirm)
        } else if token.eq_ignore_ascii_case("n") {
            Some(Command::Decline)
        } else {
            None
        }
    }
}

/// Receiving end for confirmation answers typed by the user.
#[derive(Debug)]
pub struct Answers {
    rx: mpsc::UnboundedReceiver<bool>,
}

#[async_trait]
impl Confirm for Answers {
    async fn confirm(&mut self) -> Option<bool> {
        self.rx.recv().await
    }

    fn discard_pending(&mut self) {
        while self.rx.try_recv().is_ok() {}
    }
}

/// Spawns the background input reader.
pub struct InputListener;

impl InputListener {
    /// Starts reading `reader` line by line.
    ///
    /// Returns the answers handle for the supervisor and the listener's join handle.
    pub fn spawn<R>(reader: R, signal: StopSignal) -> (Answers, JoinHandle<()>)
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(listen(reader, signal, tx));
        (Answers { rx }, handle)
    }
}

async fn listen<R>(reader: R, signal: StopSignal, tx: mpsc::UnboundedSender<bool>)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let pending = signal.is_requested();
        let answer = match Command::parse(&line) {
            Some(Command::Stop) if !pending => {
                signal.request();
                continue;
            }
            Some(Command::Confirm) if pending => true,
            Some(Command::Decline) if pending => false,
            _ => continue,
        };
        if tx.send(answer).is_err() {
            return;
        }
    }
}
