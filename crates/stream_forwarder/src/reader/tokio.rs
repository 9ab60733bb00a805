use std::io;

use tokio::io::{AsyncRead, AsyncReadExt, BufReader};

use super::{decode_sequence, invalid_utf8, sequence_width};

/// Async counterpart of [`super::Utf8CharReader`].
pub struct AsyncUtf8CharReader<R: AsyncRead + Unpin> {
    reader: BufReader<R>,
}

impl<R: AsyncRead + Unpin> AsyncUtf8CharReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
        }
    }

    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }

    async fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte).await {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }
    }

    pub async fn read_char(&mut self) -> io::Result<Option<char>> {
        let Some(first) = self.next_byte().await? else {
            return Ok(None);
        };
        let width = sequence_width(first).ok_or_else(invalid_utf8)?;
        let mut sequence = [first, 0, 0, 0];
        for slot in &mut sequence[1..width] {
            *slot = self.next_byte().await?.ok_or_else(invalid_utf8)?;
        }
        decode_sequence(&sequence[..width]).map(Some)
    }
}
