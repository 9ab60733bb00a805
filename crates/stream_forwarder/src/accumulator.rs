const CARRIAGE_RETURN: char = '\r';
const LINE_FEED: char = '\n';

/// Character-at-a-time line splitter.
///
/// Feeds one `char` per call and hands back a completed line (terminator
/// included) whenever a `\n` arrives. `\r` is dropped on entry and never
/// reaches a returned line. Call [`LineAccumulator::finish`] at end of input
/// to collect a trailing unterminated line.
#[derive(Debug, Default, Clone)]
pub struct LineAccumulator {
    current_line: String,
}

impl LineAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, ch: char) -> Option<String> {
        match ch {
            CARRIAGE_RETURN => None,
            LINE_FEED => {
                self.current_line.push(LINE_FEED);
                Some(std::mem::take(&mut self.current_line))
            }
            other => {
                self.current_line.push(other);
                None
            }
        }
    }

    /// Takes the pending partial line, if there is one.
    pub fn finish(&mut self) -> Option<String> {
        if self.current_line.is_empty() {
            return None;
        }
        Some(std::mem::take(&mut self.current_line))
    }

    pub fn pending(&self) -> &str {
        &self.current_line
    }

    pub fn reset(&mut self) {
        self.current_line.clear();
    }
}
