//! # Single-producer/single-consumer byte pipe for `f64` results.
//!
//! [`pipe`] creates a connected pair: the [`Sink`] (write end, owned by a task)
//! and the [`Source`] (read end, owned by the supervisor).
//!
//! ## Wire format
//! Each value is one 8-byte big-endian IEEE-754 record. Records travel as whole
//! `[u8; RECORD_LEN]` frames over an unbounded queue, so a reader either sees a
//! complete record or nothing, and a writer never blocks.
//!
//! ## Read states
//! ```text
//! try_read()
//!   ├─ record queued               → Ok(Some(value))
//!   ├─ empty, writer still alive   → Ok(None)                  (no bytes yet)
//!   └─ empty, writer dropped       → Err(ChannelError::Closed) (stream ended)
//! ```

use tokio::sync::mpsc;

use crate::error::ChannelError;

/// Length in bytes of one encoded record.
pub const RECORD_LEN: usize = 8;

type Record = [u8; RECORD_LEN];

/// Creates a connected write/read pair.
///
/// # Example
/// ```
/// let (sink, mut source) = computevisor::channel::pipe();
/// assert_eq!(source.try_read(), Ok(None));
///
/// sink.write(2.5).unwrap();
/// assert_eq!(source.try_read(), Ok(Some(2.5)));
/// ```
pub fn pipe() -> (Sink, Source) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Sink { tx }, Source { rx })
}

/// Write end of a result pipe.
#[derive(Debug)]
pub struct Sink {
    tx: mpsc::UnboundedSender<Record>,
}

impl Sink {
    /// Appends one encoded value.
    ///
    /// Fails with [`ChannelError::Disconnected`] if the [`Source`] was dropped.
    pub fn write(&self, value: f64) -> Result<(), ChannelError> {
        self.tx
            .send(value.to_be_bytes())
            .map_err(|_| ChannelError::Disconnected)
    }
}

/// Read end of a result pipe.
#[derive(Debug)]
pub struct Source {
    rx: mpsc::UnboundedReceiver<Record>,
}

impl Source {
    /// Reads the next record without waiting.
    pub fn try_read(&mut self) -> Result<Option<f64>, ChannelError> {
        match self.rx.try_recv() {
            Ok(record) => Ok(Some(f64::from_be_bytes(record))),
            Err(mpsc::error::TryRecvError::Empty) => Ok(None),
            Err(mpsc::error::TryRecvError::Disconnected) => Err(ChannelError::Closed),
        }
    }

    /// Returns `true` once the [`Sink`] has been dropped.
    ///
    /// Queued records stay readable after close.
    pub fn is_closed(&self) -> bool {
        self.rx.is_closed()
    }
}
