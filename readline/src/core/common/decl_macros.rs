// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Simple macro to create a [`Result`] with an [`Ok`] variant. It is just syntactic sugar
/// that helps having to write `Ok(())`.
/// - If no arg is passed in then it will return `Ok(())`.
/// - If an arg is passed in then it will return `Ok($arg)`.
#[macro_export]
macro_rules! ok {
    // No args.
    () => {
        Ok(())
    };
    // With arg.
    ($value:expr) => {
        Ok($value)
    };
}

/// Queue one or more [`crossterm`] commands on a writer, returning early with the
/// [`std::io::Error`] if any of them fail. Nothing is flushed.
///
/// ```
/// use crossterm::{cursor::MoveToColumn, terminal::{Clear, ClearType}};
/// use r3bl_readline_sync::queue_commands;
///
/// fn clear_line(out: &mut dyn std::io::Write) -> std::io::Result<()> {
///     queue_commands!(out, MoveToColumn(0), Clear(ClearType::CurrentLine));
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! queue_commands {
    ($writer:expr $(, $command:expr)+ $(,)?) => {{
        use ::crossterm::QueueableCommand as _;
        $( $writer.queue($command)?; )+
    }};
}
