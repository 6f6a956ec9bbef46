// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words isatty tcgetattr tcsetattr cfmakeraw SIGSTOP

//! Unix/Linux/macOS implementation of [`TerminalDevice`] using rustix's safe termios
//! API.

use super::{ModeToken, TerminalDevice};
use crate::{Size, get_size};
use miette::miette;
use rustix::{fd::{AsFd, BorrowedFd},
             termios::{self, OptionalActions}};
use std::{fs::File,
          io::{self, Read}};

/// Represents either stdin or `/dev/tty` for terminal operations.
///
/// This enum allows us to handle both cases where stdin is a tty (normal terminal usage)
/// and where stdin is redirected (e.g., piped input), requiring us to use `/dev/tty`.
enum TerminalFd {
    /// Using standard input (when it's a terminal)
    Stdin(io::Stdin),
    /// Using `/dev/tty` (when stdin is redirected)
    DevTty(File),
}

impl AsFd for TerminalFd {
    fn as_fd(&self) -> BorrowedFd<'_> {
        match self {
            TerminalFd::Stdin(stdin) => stdin.as_fd(),
            TerminalFd::DevTty(file) => file.as_fd(),
        }
    }
}

impl Read for TerminalFd {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            TerminalFd::Stdin(stdin) => stdin.read(buf),
            TerminalFd::DevTty(file) => file.read(buf),
        }
    }
}

/// Opens the terminal [`PosixTerminal`] puts in raw mode, for reading keys. This is
/// stdin when it is a tty, so keys come from the same place whose settings are changed.
///
/// # Errors
///
/// Returns an error if stdin is not a tty and `/dev/tty` cannot be opened.
pub fn open_terminal_input() -> io::Result<impl Read + Send + 'static> { get_terminal_fd() }

/// Gets a file descriptor for the controlling terminal: stdin if it is a tty, otherwise
/// `/dev/tty`.
///
/// # Errors
///
/// Returns an error if stdin is not a tty and `/dev/tty` cannot be opened.
fn get_terminal_fd() -> io::Result<TerminalFd> {
    let stdin = io::stdin();
    if termios::isatty(&stdin) {
        Ok(TerminalFd::Stdin(stdin))
    } else {
        let file = File::options().read(true).write(true).open("/dev/tty")?;
        Ok(TerminalFd::DevTty(file))
    }
}

/// The real terminal. Stateless: the saved settings travel in the [`ModeToken`].
#[derive(Debug, Default, Clone, Copy)]
pub struct PosixTerminal;

impl TerminalDevice for PosixTerminal {
    /// Uses rustix's `make_raw()` (same as `cfmakeraw`, and what crossterm does) to
    /// disable canonical mode, echo and signal generation, with `VMIN=1, VTIME=0`.
    fn enable_raw_mode(&mut self) -> miette::Result<ModeToken> {
        let fd = get_terminal_fd()
            .map_err(|e| miette!("failed to get terminal file descriptor: {e}"))?;

        let original = termios::tcgetattr(&fd)
            .map_err(|e| miette!("failed to retrieve terminal attributes: {e}"))?;

        let mut raw = original.clone();
        raw.make_raw();

        if let Err(err) = termios::tcsetattr(&fd, OptionalActions::Now, &raw) {
            // A failed tcsetattr may have applied some of the changes.
            if let Err(restore_err) = termios::tcsetattr(&fd, OptionalActions::Now, &original)
            {
                tracing::warn!(
                    message = "failed to restore terminal attributes",
                    error = %restore_err
                );
            }
            return Err(miette!("failed to set terminal attributes: {err}"));
        }

        Ok(ModeToken {
            original: Some(original),
        })
    }

    fn disable_raw_mode(&mut self, token: ModeToken) -> miette::Result<()> {
        let Some(original) = token.original else {
            return Ok(());
        };

        let fd = get_terminal_fd()
            .map_err(|e| miette!("failed to get terminal file descriptor: {e}"))?;

        termios::tcsetattr(&fd, OptionalActions::Now, &original)
            .map_err(|e| miette!("failed to set terminal attributes: {e}"))?;

        Ok(())
    }

    fn window_size(&self) -> Option<Size> { get_size().ok() }

    fn suspend(&mut self) -> io::Result<()> {
        tracing::debug!(message = "raising SIGSTOP");
        signal_hook::low_level::raise(signal_hook::consts::SIGSTOP)
    }
}
