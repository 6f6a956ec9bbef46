// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{Size, ok};
use std::{fmt::Debug, io};

/// Proof that raw mode was enabled, and the state needed to undo it.
///
/// Returned by [`TerminalDevice::enable_raw_mode`] and consumed by
/// [`TerminalDevice::disable_raw_mode`]. A default token carries no saved settings, and
/// disabling with it is a no-op on a real terminal.
#[derive(Debug, Default)]
pub struct ModeToken {
    /// Terminal settings from before raw mode was enabled.
    #[cfg(unix)]
    pub(crate) original: Option<rustix::termios::Termios>,
}

/// The terminal collaborator for one editing session: raw mode on/off, the window size,
/// and job control.
pub trait TerminalDevice: Debug + Send {
    /// Put the terminal in raw mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal attributes can't be read or written. An
    /// implementation must leave the terminal in its original mode when this fails.
    fn enable_raw_mode(&mut self) -> miette::Result<ModeToken>;

    /// Restore the settings saved in `token`. Safe to call with a token from a failed or
    /// partial enable.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal attributes can't be written.
    fn disable_raw_mode(&mut self, token: ModeToken) -> miette::Result<()>;

    /// Width and height in character cells, or [`None`] if unknown.
    fn window_size(&self) -> Option<Size>;

    /// Stop the current process (job control). Returns once the process is resumed.
    ///
    /// # Errors
    ///
    /// Returns an error if the stop signal can't be raised.
    fn suspend(&mut self) -> io::Result<()>;
}

/// RAII guard that holds raw mode on a [`TerminalDevice`].
///
/// - Use [`RawModeGuard::release`] on the normal exit path, so that a failure to leave
///   raw mode is reported to the caller.
/// - On every other exit path (early return, `?`, panic) [`Drop`] restores the terminal
///   and only logs a failure.
#[derive(Debug)]
pub struct RawModeGuard<'a> {
    device: &'a mut dyn TerminalDevice,
    token: Option<ModeToken>,
}

impl<'a> RawModeGuard<'a> {
    /// Enable raw mode on `device`, or adopt `existing` if the caller already holds it.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode can't be enabled. See
    /// [`TerminalDevice::enable_raw_mode`].
    pub fn acquire(
        device: &'a mut dyn TerminalDevice,
        existing: Option<ModeToken>,
    ) -> miette::Result<Self> {
        let token = match existing {
            Some(token) => token,
            None => device.enable_raw_mode()?,
        };
        tracing::debug!(message = "raw mode acquired");
        Ok(Self {
            device,
            token: Some(token),
        })
    }

    /// Access the device while the guard is held, eg: to query the window size.
    pub fn device(&mut self) -> &mut dyn TerminalDevice { &mut *self.device }

    /// Leave raw mode now.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal settings can't be restored.
    pub fn release(mut self) -> miette::Result<()> {
        match self.token.take() {
            Some(token) => {
                tracing::debug!(message = "raw mode released");
                self.device.disable_raw_mode(token)
            }
            None => ok!(),
        }
    }
}

impl Drop for RawModeGuard<'_> {
    fn drop(&mut self) {
        if let Some(token) = self.token.take()
            && let Err(err) = self.device.disable_raw_mode(token)
        {
            tracing::warn!(message = "failed to restore terminal mode", error = %err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TerminalDeviceMock;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_release_disables_once() {
        let mut device = TerminalDeviceMock::default();
        let state = device.state();
        {
            let guard = RawModeGuard::acquire(&mut device, None).unwrap();
            assert!(state.is_raw());
            guard.release().unwrap();
        }
        assert!(!state.is_raw());
        assert_eq!(state.enable_count(), 1);
        assert_eq!(state.disable_count(), 1);
    }

    #[test]
    fn test_drop_disables() {
        let mut device = TerminalDeviceMock::default();
        let state = device.state();
        {
            let _guard = RawModeGuard::acquire(&mut device, None).unwrap();
            assert!(state.is_raw());
        }
        assert!(!state.is_raw());
        assert_eq!(state.disable_count(), 1);
    }

    #[test]
    fn test_existing_token_is_adopted() {
        let mut device = TerminalDeviceMock::default();
        let state = device.state();
        let token = device.enable_raw_mode().unwrap();
        {
            let guard = RawModeGuard::acquire(&mut device, Some(token)).unwrap();
            guard.release().unwrap();
        }
        assert_eq!(state.enable_count(), 1);
        assert_eq!(state.disable_count(), 1);
    }

    #[test]
    fn test_enable_failure_is_reported() {
        let mut device = TerminalDeviceMock::default();
        let state = device.state();
        state.set_fail_enable(true);
        let result = RawModeGuard::acquire(&mut device, None);
        assert!(result.is_err());
        assert!(!state.is_raw());
        assert_eq!(state.disable_count(), 0);
    }

    #[test]
    fn test_release_failure_is_reported() {
        let mut device = TerminalDeviceMock::default();
        let state = device.state();
        state.set_fail_disable(true);
        let guard = RawModeGuard::acquire(&mut device, None).unwrap();
        assert!(guard.release().is_err());
        assert_eq!(state.disable_count(), 1);
    }
}
