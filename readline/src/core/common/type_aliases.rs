// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::Arc;

/// Disambiguate the type of `StdMutex` from other mutex flavors.
pub type StdMutex<T> = std::sync::Mutex<T>;

/// Shared, lockable byte sink. Used by [`crate::StdoutMock`].
pub type SafeBuffer = Arc<StdMutex<Vec<u8>>>;

/// Output surface for the editor. Anything that implements [`std::io::Write`].
pub type SendRawTerminal = dyn std::io::Write + Send;
