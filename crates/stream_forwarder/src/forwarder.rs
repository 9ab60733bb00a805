use std::{
    io::{self, Read},
    thread,
};

use tracing::{debug, trace, warn};

use crate::accumulator::LineAccumulator;
use crate::capture::CaptureBuffer;
use crate::config::ForwarderConfig;
use crate::error::{BackgroundReadError, ConfigError};
use crate::reader::{CharSource, Utf8CharReader};
use crate::sink::LineSink;

const READER_THREAD_NAME: &str = "stream-forwarder";

/// Splits a character stream into lines and hands each one to an optional
/// capture buffer and an optional sink.
///
/// Carriage returns are dropped; every other character, `\n` included, is
/// passed through. A trailing line without a terminator is emitted once the
/// input ends.
///
/// ```
/// use stream_forwarder::StreamForwarder;
///
/// let mut forwarder = StreamForwarder::new();
/// forwarder.capture()?;
/// forwarder.read("build ok\r\ndone".as_bytes())?;
/// assert_eq!(forwarder.captured_output().as_deref(), Some("build ok\ndone"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Default)]
pub struct StreamForwarder {
    accumulator: LineAccumulator,
    capture: Option<CaptureBuffer>,
    sink: Option<Box<dyn LineSink>>,
}

#[derive(Debug, Default, Clone, Copy)]
struct ReadStats {
    lines: usize,
    bytes: usize,
}

impl StreamForwarder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ForwarderConfig) -> Self {
        let ForwarderConfig { capture, sink } = config;
        debug!(capture, sink = sink.is_some(), "configuring stream forwarder");
        Self {
            accumulator: LineAccumulator::new(),
            capture: capture.then(CaptureBuffer::new),
            sink,
        }
    }

    /// Starts recording every emitted chunk. Fails if already capturing.
    pub fn capture(&mut self) -> Result<&mut Self, ConfigError> {
        if self.capture.is_some() {
            return Err(ConfigError::CaptureAlreadyEnabled);
        }
        self.capture = Some(CaptureBuffer::new());
        debug!("stream capture enabled");
        Ok(self)
    }

    /// Installs the sink that receives each emitted chunk.
    ///
    /// `None` is rejected with [`ConfigError::MissingSink`]; a second sink
    /// with [`ConfigError::SinkAlreadySet`]. Neither failure changes the
    /// forwarder.
    pub fn set_sink(&mut self, sink: Option<Box<dyn LineSink>>) -> Result<&mut Self, ConfigError> {
        let Some(sink) = sink else {
            return Err(ConfigError::MissingSink);
        };
        if self.sink.is_some() {
            return Err(ConfigError::SinkAlreadySet);
        }
        self.sink = Some(sink);
        debug!("stream sink installed");
        Ok(self)
    }

    pub fn forward_to<S: LineSink>(&mut self, sink: S) -> Result<&mut Self, ConfigError> {
        self.set_sink(Some(Box::new(sink)))
    }

    pub fn is_capturing(&self) -> bool {
        self.capture.is_some()
    }

    pub fn has_sink(&self) -> bool {
        self.sink.is_some()
    }

    /// Everything emitted so far, or `None` when capture was never enabled.
    pub fn captured_output(&self) -> Option<String> {
        self.capture.as_ref().map(CaptureBuffer::snapshot)
    }

    /// Shared handle to the capture buffer, for polling from another thread.
    pub fn capture_buffer(&self) -> Option<CaptureBuffer> {
        self.capture.clone()
    }

    /// Drains a UTF-8 byte stream to its end.
    ///
    /// Read errors are returned unchanged and drop the partial line pending
    /// at that point. Malformed UTF-8 fails with
    /// [`io::ErrorKind::InvalidData`].
    pub fn read<R: Read>(&mut self, reader: R) -> io::Result<()> {
        self.read_chars(Utf8CharReader::new(reader))
    }

    /// Drains an already-decoded character source to its end.
    pub fn read_chars<S: CharSource>(&mut self, mut source: S) -> io::Result<()> {
        self.accumulator.reset();
        let mut stats = ReadStats::default();
        loop {
            match source.read_char() {
                Ok(Some(ch)) => self.push_char(ch, &mut stats),
                Ok(None) => break,
                Err(err) => return Err(self.abort(err)),
            }
        }
        self.finish(stats);
        Ok(())
    }

    /// Moves the forwarder onto a dedicated thread that drains `reader`.
    ///
    /// The forwarder comes back from [`ReadHandle::join`] once the stream
    /// ends.
    pub fn begin_read<R>(self, reader: R) -> io::Result<ReadHandle>
    where
        R: Read + Send + 'static,
    {
        let capture = self.capture_buffer();
        let handle = thread::Builder::new()
            .name(READER_THREAD_NAME.to_string())
            .spawn(move || -> io::Result<StreamForwarder> {
                let mut forwarder = self;
                forwarder.read(reader)?;
                Ok(forwarder)
            })?;
        Ok(ReadHandle { handle, capture })
    }

    fn push_char(&mut self, ch: char, stats: &mut ReadStats) {
        if let Some(line) = self.accumulator.push(ch) {
            self.emit(&line, stats);
        }
    }

    fn finish(&mut self, mut stats: ReadStats) {
        let partial = self.accumulator.finish();
        if let Some(rest) = partial.as_deref() {
            self.emit(rest, &mut stats);
        }
        debug!(
            lines = stats.lines,
            bytes = stats.bytes,
            partial = partial.is_some(),
            "stream drained"
        );
    }

    fn abort(&mut self, err: io::Error) -> io::Error {
        warn!(
            pending_bytes = self.accumulator.pending().len(),
            "input stream failed mid-read: {err}"
        );
        self.accumulator.reset();
        err
    }

    // Capture first, then the sink, for the identical chunk.
    fn emit(&mut self, chunk: &str, stats: &mut ReadStats) {
        trace!(
            bytes = chunk.len(),
            terminated = chunk.ends_with('\n'),
            "emitting chunk"
        );
        stats.lines += 1;
        stats.bytes += chunk.len();
        if let Some(capture) = &self.capture {
            capture.append(chunk);
        }
        if let Some(sink) = self.sink.as_mut() {
            sink.write_chunk(chunk);
        }
    }
}

impl std::fmt::Debug for StreamForwarder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamForwarder")
            .field("pending", &self.accumulator.pending())
            .field("capture", &self.capture)
            .field("sink", &self.sink.is_some())
            .finish()
    }
}

/// A read running on its own thread, started by
/// [`StreamForwarder::begin_read`].
#[derive(Debug)]
pub struct ReadHandle {
    handle: thread::JoinHandle<io::Result<StreamForwarder>>,
    capture: Option<CaptureBuffer>,
}

impl ReadHandle {
    /// Capture buffer of the forwarder being driven; its contents grow while
    /// the read runs.
    pub fn capture_buffer(&self) -> Option<&CaptureBuffer> {
        self.capture.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn join(self) -> Result<StreamForwarder, BackgroundReadError> {
        match self.handle.join() {
            Ok(result) => Ok(result?),
            Err(_) => Err(BackgroundReadError::Panicked),
        }
    }
}

#[cfg(feature = "tokio")]
mod tokio_read {
    use std::io;

    use tokio::{io::AsyncRead, task::JoinHandle};

    use super::{ReadStats, StreamForwarder};
    use crate::reader::AsyncUtf8CharReader;

    impl StreamForwarder {
        /// Async counterpart of [`StreamForwarder::read`].
        pub async fn read_async<R: AsyncRead + Unpin>(&mut self, reader: R) -> io::Result<()> {
            let mut source = AsyncUtf8CharReader::new(reader);
            self.accumulator.reset();
            let mut stats = ReadStats::default();
            loop {
                match source.read_char().await {
                    Ok(Some(ch)) => self.push_char(ch, &mut stats),
                    Ok(None) => break,
                    Err(err) => return Err(self.abort(err)),
                }
            }
            self.finish(stats);
            Ok(())
        }

        /// Drains `reader` on the tokio runtime, handing the forwarder back
        /// when the stream ends.
        pub fn spawn_read<R>(self, reader: R) -> JoinHandle<io::Result<StreamForwarder>>
        where
            R: AsyncRead + Unpin + Send + 'static,
        {
            tokio::spawn(async move {
                let mut forwarder = self;
                forwarder.read_async(reader).await?;
                Ok::<_, io::Error>(forwarder)
            })
        }
    }

}
