use std::io::{self, Write};

use tracing::warn;

/// Receiver for the chunks a forwarder emits, called once per chunk on the
/// thread driving the read.
pub trait LineSink: Send + 'static {
    fn write_chunk(&mut self, chunk: &str);
}

impl<F> LineSink for F
where
    F: FnMut(&str) + Send + 'static,
{
    fn write_chunk(&mut self, chunk: &str) {
        self(chunk)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ConsoleTarget {
    Stdout,
    Stderr,
}

/// Mirrors chunks onto the current process's stdout or stderr.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleSink {
    target: ConsoleTarget,
}

impl ConsoleSink {
    pub fn new(target: ConsoleTarget) -> Self {
        Self { target }
    }

    pub fn stdout() -> Self {
        Self::new(ConsoleTarget::Stdout)
    }

    pub fn stderr() -> Self {
        Self::new(ConsoleTarget::Stderr)
    }

    pub fn target(&self) -> ConsoleTarget {
        self.target
    }
}

impl LineSink for ConsoleSink {
    fn write_chunk(&mut self, chunk: &str) {
        let result = match self.target {
            ConsoleTarget::Stdout => write_flushed(&mut io::stdout().lock(), chunk),
            ConsoleTarget::Stderr => write_flushed(&mut io::stderr().lock(), chunk),
        };
        if let Err(err) = result {
            warn!(console = ?self.target, "failed to mirror chunk to console: {err}");
        }
    }
}

/// Writes chunks into an arbitrary [`Write`] implementation.
///
/// Write failures are logged and the chunk is dropped; the read keeps going.
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: W,
}

impl<W: Write + Send + 'static> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send + 'static> LineSink for WriterSink<W> {
    fn write_chunk(&mut self, chunk: &str) {
        if let Err(err) = write_flushed(&mut self.writer, chunk) {
            warn!(bytes = chunk.len(), "failed to write chunk to sink: {err}");
        }
    }
}

fn write_flushed<W: Write + ?Sized>(out: &mut W, chunk: &str) -> io::Result<()> {
    out.write_all(chunk.as_bytes())?;
    out.flush()
}
