// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Test doubles for the three terminal collaborators of [`crate::Readline`]. They are
//! public (not `#[cfg(test)]`) so that integration tests and downstream crates can
//! drive an editing session without a real terminal.

// Attach sources.
pub mod input_device_mock;
pub mod stdout_mock;
pub mod terminal_device_mock;

// Re-export.
pub use input_device_mock::*;
pub use stdout_mock::*;
pub use terminal_device_mock::*;
