// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::{self, ErrorKind, Read};

/// A blocking source of code points. Each call waits for exactly one [`char`].
///
/// The editor treats any error (including end of file) as end of input. See
/// [`crate::InputDeviceMock`] for testing.
pub trait InputDevice: Send {
    /// # Errors
    ///
    /// Returns [`ErrorKind::UnexpectedEof`] when the source is closed, or any error from
    /// the underlying reader.
    fn read_char(&mut self) -> io::Result<char>;
}

/// Decodes UTF-8 from any [`Read`] one byte at a time, so that it never blocks waiting
/// for bytes beyond the current code point.
///
/// Malformed sequences decode to [`char::REPLACEMENT_CHARACTER`]. A byte that breaks a
/// multi byte sequence is kept and decoded on the next call.
#[derive(Debug)]
pub struct Utf8InputDevice<R> {
    reader: R,
    pending: Option<u8>,
}

impl<R: Read> Utf8InputDevice<R> {
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: None,
        }
    }

    fn read_byte(&mut self) -> io::Result<u8> {
        if let Some(byte) = self.pending.take() {
            return Ok(byte);
        }
        let mut buf = [0_u8; 1];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => return Err(ErrorKind::UnexpectedEof.into()),
                Ok(_) => return Ok(buf[0]),
                Err(err) if err.kind() == ErrorKind::Interrupted => {}
                Err(err) => return Err(err),
            }
        }
    }
}

/// Number of bytes in the sequence started by `lead`, or [`None`] if `lead` can't start
/// one.
fn utf8_sequence_len(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

fn is_continuation_byte(byte: u8) -> bool { byte & 0b1100_0000 == 0b1000_0000 }

impl<R: Read + Send> InputDevice for Utf8InputDevice<R> {
    fn read_char(&mut self) -> io::Result<char> {
        let lead = self.read_byte()?;
        let Some(len) = utf8_sequence_len(lead) else {
            return Ok(char::REPLACEMENT_CHARACTER);
        };

        let mut buf = [lead, 0, 0, 0];
        for slot in buf.iter_mut().take(len).skip(1) {
            let byte = self.read_byte()?;
            if !is_continuation_byte(byte) {
                self.pending = Some(byte);
                return Ok(char::REPLACEMENT_CHARACTER);
            }
            *slot = byte;
        }

        Ok(std::str::from_utf8(&buf[..len])
            .ok()
            .and_then(|it| it.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn decode_all(bytes: &[u8]) -> Vec<char> {
        let mut device = Utf8InputDevice::new(bytes);
        let mut acc = vec![];
        while let Ok(ch) = device.read_char() {
            acc.push(ch);
        }
        acc
    }

    #[test]
    fn test_ascii_and_multibyte() {
        assert_eq!(decode_all("a€😀\x1b".as_bytes()), vec!['a', '€', '😀', '\x1b']);
    }

    #[test]
    fn test_invalid_lead_byte() {
        assert_eq!(decode_all(&[0xFF, b'x']), vec!['\u{FFFD}', 'x']);
    }

    #[test]
    fn test_broken_sequence_keeps_next_byte() {
        // 0xE2 starts a 3 byte sequence, but 'a' is not a continuation byte.
        assert_eq!(decode_all(&[0xE2, b'a', b'b']), vec!['\u{FFFD}', 'a', 'b']);
    }

    #[test]
    fn test_surrogate_encoding_is_rejected() {
        assert_eq!(decode_all(&[0xED, 0xA0, 0x80]), vec!['\u{FFFD}']);
    }

    #[test]
    fn test_eof() {
        let mut device = Utf8InputDevice::new(&[0_u8; 0][..]);
        let err = device.read_char().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_truncated_sequence_is_eof() {
        let mut device = Utf8InputDevice::new(&[0xF0_u8, 0x9F][..]);
        assert!(device.read_char().is_err());
    }
}
