// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::InputDevice;
use std::{collections::VecDeque,
          io::{self, ErrorKind}};

/// Replays a scripted sequence of code points, then reports end of file forever.
#[derive(Debug, Clone, Default)]
pub struct InputDeviceMock {
    pub pending: VecDeque<char>,
    /// When set, this error kind is returned instead of `UnexpectedEof` once drained.
    pub error_when_drained: Option<ErrorKind>,
}

impl InputDeviceMock {
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self {
            pending: input.chars().collect(),
            error_when_drained: None,
        }
    }

    #[must_use]
    pub fn with_error_when_drained(mut self, kind: ErrorKind) -> Self {
        self.error_when_drained = Some(kind);
        self
    }

    /// Append more input after construction.
    pub fn push_str(&mut self, input: &str) { self.pending.extend(input.chars()); }

    #[must_use]
    pub fn remaining(&self) -> usize { self.pending.len() }
}

impl InputDevice for InputDeviceMock {
    fn read_char(&mut self) -> io::Result<char> {
        self.pending.pop_front().ok_or_else(|| {
            self.error_when_drained
                .unwrap_or(ErrorKind::UnexpectedEof)
                .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_replays_then_eof() {
        let mut mock = InputDeviceMock::new("hé");
        assert_eq!(mock.read_char().unwrap(), 'h');
        assert_eq!(mock.read_char().unwrap(), 'é');
        assert_eq!(
            mock.read_char().unwrap_err().kind(),
            ErrorKind::UnexpectedEof
        );
    }

    #[test]
    fn test_custom_error_when_drained() {
        let mut mock = InputDeviceMock::new("").with_error_when_drained(ErrorKind::BrokenPipe);
        assert_eq!(mock.read_char().unwrap_err().kind(), ErrorKind::BrokenPipe);
    }
}
