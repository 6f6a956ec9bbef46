// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Skip rustfmt for rest of file.
// https://stackoverflow.com/a/75910283/2085356
#![cfg_attr(rustfmt, rustfmt_skip)]

// Private modules.
mod input_sequences;
mod terminal_raw_mode;

// Re-export flat public API.
pub use input_sequences::*;
pub use terminal_raw_mode::*;
