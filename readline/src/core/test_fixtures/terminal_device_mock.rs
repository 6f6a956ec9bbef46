// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{ModeToken, Size, StdMutex, TerminalDevice};
use std::{io,
          sync::{Arc, MutexGuard, PoisonError}};

#[derive(Debug, Clone, Default)]
struct Inner {
    is_raw: bool,
    enable_count: usize,
    disable_count: usize,
    suspend_count: usize,
    fail_enable: bool,
    fail_disable: bool,
    size: Option<Size>,
    /// Takes effect after the next size query.
    pending_size: Option<Option<Size>>,
}

/// Observes and steers a [`TerminalDeviceMock`] after it has been boxed and handed to
/// [`crate::Readline`].
#[derive(Debug, Clone, Default)]
pub struct TerminalDeviceMockState {
    inner: Arc<StdMutex<Inner>>,
}

impl TerminalDeviceMockState {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn is_raw(&self) -> bool { self.lock().is_raw }

    #[must_use]
    pub fn enable_count(&self) -> usize { self.lock().enable_count }

    #[must_use]
    pub fn disable_count(&self) -> usize { self.lock().disable_count }

    #[must_use]
    pub fn suspend_count(&self) -> usize { self.lock().suspend_count }

    pub fn set_fail_enable(&self, value: bool) { self.lock().fail_enable = value; }

    pub fn set_fail_disable(&self, value: bool) { self.lock().fail_disable = value; }

    pub fn set_size(&self, size: Option<Size>) { self.lock().size = size; }

    /// The next [`TerminalDevice::window_size`] still reports the current size, every
    /// query after it reports `size`. Simulates a window resized while a line is being
    /// edited.
    pub fn resize_after_next_query(&self, size: Option<Size>) {
        self.lock().pending_size = Some(size);
    }
}

/// Fake terminal. Counts raw mode transitions and can be told to fail them.
#[derive(Debug, Clone, Default)]
pub struct TerminalDeviceMock {
    state: TerminalDeviceMockState,
}

impl TerminalDeviceMock {
    #[must_use]
    pub fn new(size: Size) -> Self {
        let it = Self::default();
        it.state.set_size(Some(size));
        it
    }

    /// Shared handle to this mock's state. Stays valid after the mock is moved.
    #[must_use]
    pub fn state(&self) -> TerminalDeviceMockState { self.state.clone() }
}

impl TerminalDevice for TerminalDeviceMock {
    fn enable_raw_mode(&mut self) -> miette::Result<ModeToken> {
        let mut inner = self.state.lock();
        inner.enable_count += 1;
        if inner.fail_enable {
            miette::bail!("mock: failed to enable raw mode");
        }
        inner.is_raw = true;
        Ok(ModeToken::default())
    }

    fn disable_raw_mode(&mut self, _token: ModeToken) -> miette::Result<()> {
        let mut inner = self.state.lock();
        inner.disable_count += 1;
        if inner.fail_disable {
            miette::bail!("mock: failed to disable raw mode");
        }
        inner.is_raw = false;
        Ok(())
    }

    fn window_size(&self) -> Option<Size> {
        let mut inner = self.state.lock();
        let size = inner.size;
        if let Some(next) = inner.pending_size.take() {
            inner.size = next;
        }
        size
    }

    fn suspend(&mut self) -> io::Result<()> {
        self.state.lock().suspend_count += 1;
        Ok(())
    }
}
