use std::sync::{Arc, Mutex, MutexGuard};

/// Shared, append-only text buffer holding every chunk a forwarder emitted.
///
/// Clones observe the same text, so one handle can be polled from another
/// thread while a background read appends through a second handle.
#[derive(Debug, Clone)]
pub struct CaptureBuffer {
    inner: Arc<Mutex<String>>,
}

impl CaptureBuffer {
    pub(crate) fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(String::new())),
        }
    }

    pub(crate) fn append(&self, chunk: &str) {
        self.lock().push_str(chunk);
    }

    /// Copies out the text captured so far.
    pub fn snapshot(&self) -> String {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // Appends are a single push_str, so a poisoned guard still holds valid text.
    fn lock(&self) -> MutexGuard<'_, String> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
