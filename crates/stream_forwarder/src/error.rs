use thiserror::Error;

/// Misuse of the forwarder's one-shot setup calls.
///
/// Returned before any state is touched, so the forwarder keeps whatever
/// configuration it had.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum ConfigError {
    #[error("already capturing stream")]
    CaptureAlreadyEnabled,
    #[error("line sink set previously")]
    SinkAlreadySet,
    #[error("line sink must be provided")]
    MissingSink,
}

/// Failure of a read that was moved onto a background thread.
#[derive(Debug, Error)]
pub enum BackgroundReadError {
    #[error("I/O error while draining stream: {0}")]
    Io(#[from] std::io::Error),
    #[error("background reader thread panicked")]
    Panicked,
}
