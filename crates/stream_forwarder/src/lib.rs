#![forbid(unsafe_code)]
//! Line-splitting forwarder for relaying the output of a child process (or
//! any text stream) to a live sink and/or an in-memory capture buffer.
//!
//! - [`StreamForwarder`] reads one character at a time, drops `\r`, and emits
//!   each `\n`-terminated line as soon as it completes. A trailing line
//!   without a terminator is emitted when the input ends.
//! - Input is UTF-8 bytes ([`std::io::Read`], or `tokio::io::AsyncRead` with
//!   the `tokio` feature) or any [`CharSource`] of decoded characters.
//! - Output goes to a [`LineSink`] (closures qualify; [`ConsoleSink`] and
//!   [`WriterSink`] ship with the crate) and/or a [`CaptureBuffer`].
//! - [`StreamForwarder::begin_read`] and, with `tokio`,
//!   [`StreamForwarder::spawn_read`] drain a stream in the background so a
//!   caller can read stdout and stderr of the same child at once.

mod accumulator;
mod capture;
mod config;
mod error;
mod forwarder;
mod reader;
mod sink;

pub use accumulator::LineAccumulator;
pub use capture::CaptureBuffer;
pub use config::ForwarderConfig;
pub use error::{BackgroundReadError, ConfigError};
pub use forwarder::{ReadHandle, StreamForwarder};
pub use reader::{CharSource, Utf8CharReader};
pub use sink::{ConsoleSink, ConsoleTarget, LineSink, WriterSink};

#[cfg(feature = "tokio")]
pub use reader::AsyncUtf8CharReader;
