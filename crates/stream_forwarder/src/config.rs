use crate::sink::LineSink;

/// Up-front setup for a [`crate::StreamForwarder`].
///
/// Equivalent to calling [`crate::StreamForwarder::capture`] and
/// [`crate::StreamForwarder::forward_to`] on a fresh forwarder.
#[derive(Default)]
pub struct ForwarderConfig {
    pub capture: bool,
    pub sink: Option<Box<dyn LineSink>>,
}

impl ForwarderConfig {
    pub fn capture(mut self) -> Self {
        self.capture = true;
        self
    }

    /// Sets the sink unless one is already present; the first sink wins,
    /// matching [`crate::StreamForwarder::set_sink`].
    pub fn forward_to<S: LineSink>(mut self, sink: S) -> Self {
        if self.sink.is_none() {
            self.sink = Some(Box::new(sink));
        }
        self
    }
}

impl std::fmt::Debug for ForwarderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForwarderConfig")
            .field("capture", &self.capture)
            .field("sink", &self.sink.is_some())
            .finish()
    }
}
