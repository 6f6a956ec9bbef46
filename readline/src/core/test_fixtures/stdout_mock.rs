// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{SafeBuffer, StdMutex};
use std::{io::{Result, Write},
          sync::{Arc, PoisonError}};
use strip_ansi_escapes::strip;

/// You can safely clone this struct, since it only contains an `Arc<StdMutex<Vec<u8>>>`.
/// The inner `buffer` will not be cloned, just the [Arc] will be cloned.
#[derive(Debug, Clone, Default)]
pub struct StdoutMock {
    pub buffer: SafeBuffer,
}

impl StdoutMock {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn get_copy_of_buffer(&self) -> Vec<u8> {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Invalid UTF-8 is replaced, since this is only used for assertions.
    #[must_use]
    pub fn get_copy_of_buffer_as_string(&self) -> String {
        String::from_utf8_lossy(&self.get_copy_of_buffer()).into_owned()
    }

    #[must_use]
    pub fn get_copy_of_buffer_as_string_strip_ansi(&self) -> String {
        let buffer_data = strip(self.get_copy_of_buffer());
        String::from_utf8_lossy(&buffer_data).into_owned()
    }

    pub fn clear(&self) {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Write for StdoutMock {
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<()> { Ok(()) }
}

impl From<Vec<u8>> for StdoutMock {
    fn from(it: Vec<u8>) -> Self {
        Self {
            buffer: Arc::new(StdMutex::new(it)),
        }
    }
}
