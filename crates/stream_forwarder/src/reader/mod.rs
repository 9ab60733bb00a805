use std::io;

mod sync;

#[cfg(feature = "tokio")]
mod tokio;

pub use sync::Utf8CharReader;

#[cfg(feature = "tokio")]
pub use self::tokio::AsyncUtf8CharReader;

/// Sequential source of decoded characters: one `char` per call, `Ok(None)`
/// at end of input.
pub trait CharSource {
    fn read_char(&mut self) -> io::Result<Option<char>>;
}

impl<S: CharSource + ?Sized> CharSource for &mut S {
    fn read_char(&mut self) -> io::Result<Option<char>> {
        (**self).read_char()
    }
}

impl CharSource for std::str::Chars<'_> {
    fn read_char(&mut self) -> io::Result<Option<char>> {
        Ok(self.next())
    }
}

/// Number of bytes in the UTF-8 sequence introduced by `first`.
fn sequence_width(first: u8) -> Option<usize> {
    match first {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

fn decode_sequence(bytes: &[u8]) -> io::Result<char> {
    std::str::from_utf8(bytes)
        .ok()
        .and_then(|text| text.chars().next())
        .ok_or_else(invalid_utf8)
}

fn invalid_utf8() -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        "stream did not contain valid UTF-8",
    )
}
