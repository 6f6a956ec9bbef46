// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Raw mode is a process wide resource: there is one real terminal. Rather than toggling
//! it through global functions, the editor talks to a [`TerminalDevice`] handle that is
//! passed in explicitly, and holds raw mode with a [`RawModeGuard`] for exactly as long
//! as one `readline()` call runs.
//!
//! - [`PosixTerminal`] is the real device (Unix only). It uses [`rustix`] termios.
//! - [`crate::TerminalDeviceMock`] is the test double.
//!
//! [`rustix`]: rustix

// Private modules (hide internal structure).
mod raw_mode_core;

#[cfg(unix)]
mod raw_mode_unix;

// Re-export the public API (flat, ergonomic surface).
pub use raw_mode_core::*;

#[cfg(unix)]
pub use raw_mode_unix::*;
