// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Skip rustfmt for rest of file.
// https://stackoverflow.com/a/75910283/2085356
#![cfg_attr(rustfmt, rustfmt_skip)]

// Attach sources.
pub mod key_decoder;
pub mod line_buffer;
pub mod pager;
pub mod prompt;
pub mod readline;
pub mod readline_history;

// Re-export the public API.
pub use key_decoder::*;
pub use line_buffer::*;
pub use pager::*;
pub use prompt::*;
pub use readline::*;
pub use readline_history::*;

// Constants.
pub const HISTORY_SIZE_MAX: usize = 1_000;
