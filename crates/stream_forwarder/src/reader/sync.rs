use std::io::{self, BufReader, Read};

use super::{decode_sequence, invalid_utf8, sequence_width, CharSource};

/// Decodes a UTF-8 byte stream one scalar value at a time.
///
/// Malformed input, including a sequence cut short by end of input, fails
/// with [`io::ErrorKind::InvalidData`]. Other read errors are returned
/// unchanged; `Interrupted` is retried.
pub struct Utf8CharReader<R: Read> {
    reader: BufReader<R>,
}

impl<R: Read> Utf8CharReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
        }
    }

    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }
    }
}

impl<R: Read> CharSource for Utf8CharReader<R> {
    fn read_char(&mut self) -> io::Result<Option<char>> {
        let Some(first) = self.next_byte()? else {
            return Ok(None);
        };
        let width = sequence_width(first).ok_or_else(invalid_utf8)?;
        let mut sequence = [first, 0, 0, 0];
        for slot in &mut sequence[1..width] {
            *slot = self.next_byte()?.ok_or_else(invalid_utf8)?;
        }
        decode_sequence(&sequence[..width]).map(Some)
    }
}
