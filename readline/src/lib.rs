// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words termios tcsetattr

// Skip rustfmt for rest of file.
// https://stackoverflow.com/a/75910283/2085356
#![cfg_attr(rustfmt, rustfmt_skip)]

//! # `r3bl_readline_sync`
//!
//! A blocking line editor for terminal REPLs. It puts the terminal in raw mode, reads
//! one code point at a time, and turns that stream into a finished line of text. Along
//! the way it supports:
//!
//! - Emacs style cursor movement and kill commands (`Ctrl+A`, `Ctrl+E`, `Ctrl+K`,
//!   `Ctrl+U`, `Ctrl+W`, `Alt+b`, `Alt+f`, arrow keys, `Home`, `End`).
//! - History recall with `Up` / `Down` (or `Ctrl+P` / `Ctrl+N`). The line you were
//!   typing before you started browsing is kept as a draft and restored when you come
//!   back down.
//! - Bracketed paste. While a paste is in progress the alternate prompt is used so
//!   that the host application can collect multi line input.
//! - A full screen pager (`Ctrl+O`) that shows the "last output" the host application
//!   handed in, on the terminal's alternate screen.
//!
//! # Architecture
//!
//! ```text
//! InputDevice ──char──▶ KeyDecoder ──EditEvent──▶ Readline ──▶ LineBuffer
//!                                                   │    └───▶ History
//!                                                   └────────▶ Pager (modal)
//! ```
//!
//! - [`KeyDecoder`] is a pure state machine. It never does I/O.
//! - [`LineBuffer`] owns the text and the cursor, and knows how to paint itself with
//!   [`crossterm`] commands.
//! - [`History`] owns the submitted lines and the draft slot.
//! - [`Pager`] takes over the alternate screen and gives it back on every exit path.
//! - [`Readline`] wires them together. Raw mode is held by a [`RawModeGuard`] for the
//!   duration of one [`Readline::readline`] call.
//!
//! All of the terminal facing pieces sit behind traits ([`TerminalDevice`],
//! [`InputDevice`], [`std::io::Write`]) so that tests can drive a whole editing session
//! with [`InputDeviceMock`], [`TerminalDeviceMock`] and [`StdoutMock`].
//!
//! # Example
//!
//! ```no_run
//! use r3bl_readline_sync::{Prompt, Readline, ReadlineEvent};
//!
//! let prompt = Prompt {
//!     prompt: ">>> ".into(),
//!     alt_prompt: "... ".into(),
//!     placeholder: "Send a message (/? for help)".into(),
//!     ..Default::default()
//! };
//! let mut readline = Readline::try_new_stdio(prompt)?;
//! loop {
//!     match readline.readline()? {
//!         ReadlineEvent::Line(line) => println!("{line}"),
//!         ReadlineEvent::Eof | ReadlineEvent::Interrupted => break,
//!         ReadlineEvent::Suspended => {}
//!     }
//! }
//! # Ok::<(), r3bl_readline_sync::ReadlineError>(())
//! ```
//!
//! [`crossterm`]: crossterm

// Enforce strict error handling in production library code only. Tests are allowed to
// use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach modules (re-exported below to provide clean public API).
pub mod core;
pub mod readline_impl;

// Re-export stable public API using glob imports for ergonomic, flat API surface.
#[allow(ambiguous_glob_reexports)]
pub use core::*;
#[allow(ambiguous_glob_reexports)]
pub use readline_impl::*;
