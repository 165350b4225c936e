//! # Built-in subscribers
//!
//! - [`LogWriter`]: prints status lines for the console (the default display sink).

mod log;

pub use log::LogWriter;
