// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{CTRL_G_BELL, DEFAULT_TERM_SIZE, EditEvent, History, InputDevice, KeyDecoder,
            LineBuffer, ModeToken, Pager, Prompt, RawModeGuard, SendRawTerminal, Size,
            TerminalDevice, ok, queue_commands};
use crossterm::{cursor::MoveTo,
                style::Print,
                terminal::{Clear, ClearType}};
use miette::Diagnostic;
use std::{fmt::{self, Debug},
          io::{self, Write}};
use thiserror::Error;

/// Error returned from [`readline()`][Readline::readline]. End of input and `Ctrl+C` are
/// not errors, see [`ReadlineEvent`].
#[derive(Debug, Error, Diagnostic)]
pub enum ReadlineError {
    /// An internal I/O error occurred, eg: writing to the terminal failed.
    #[error(transparent)]
    #[diagnostic(code(r3bl_readline_sync::io))]
    IO(#[from] io::Error),

    /// Raw mode could not be entered or left. The terminal was restored on a best
    /// effort basis before this was returned.
    #[error("failed to change terminal mode: {message}")]
    #[diagnostic(
        code(r3bl_readline_sync::raw_mode),
        help("Is stdin attached to an interactive terminal?")
    )]
    RawMode { message: String },
}

impl ReadlineError {
    /// For the [`miette::Result`] seams of [`TerminalDevice`].
    fn raw_mode(report: miette::Report) -> Self {
        ReadlineError::RawMode {
            message: report.to_string(),
        }
    }
}

/// Events emitted by [`Readline::readline()`].
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ReadlineEvent {
    /// The user pressed `Enter`. Possibly an empty line.
    Line(String),

    /// Input closed, or `Ctrl+D` on an empty line.
    Eof,

    /// The user pressed `Ctrl+C`.
    Interrupted,

    /// The user pressed `Ctrl+Z`. The process was stopped and has been resumed.
    Suspended,
}

/// Internal control flow for the `readline` method. This is used primarily to make
/// testing easier.
#[derive(Debug, PartialEq, Clone)]
pub enum ControlFlowExtended<T, E> {
    ReturnOk(T),
    ReturnError(E),
    Continue,
}

/// A blocking line editor bound to one terminal.
///
/// # Resource handling
///
/// Raw mode is held only while [`Self::readline`] runs, by a [`RawModeGuard`]. It is
/// released on every way out of that call (line, end of input, interrupt, suspend,
/// error) before control returns to the caller. [`Self::set_raw_mode`] lets the caller
/// enter raw mode ahead of time; the next `readline()` call adopts it and still
/// releases it at the end.
///
/// # State that survives between calls
///
/// - [`History`].
/// - Whether a bracketed paste is in progress. While it is, the alt prompt is used.
/// - The "last output" handed in by the host, shown by the pager on `Ctrl+O`.
pub struct Readline {
    prompt: Prompt,
    terminal_device: Box<dyn TerminalDevice>,
    /// Raw mode entered through [`Self::set_raw_mode`], not yet adopted by `readline()`.
    mode_token: Option<ModeToken>,
    input_device: Box<dyn InputDevice>,
    output_device: Box<SendRawTerminal>,
    history: History,
    is_pasting: bool,
    last_output: Option<String>,
}

impl Debug for Readline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Readline")
            .field("prompt", &self.prompt)
            .field("terminal_device", &self.terminal_device)
            .field("is_raw_mode_held", &self.mode_token.is_some())
            .field("history", &self.history)
            .field("is_pasting", &self.is_pasting)
            .field("last_output", &self.last_output)
            .finish_non_exhaustive()
    }
}

impl Readline {
    #[must_use]
    pub fn new(
        prompt: Prompt,
        terminal_device: Box<dyn TerminalDevice>,
        input_device: Box<dyn InputDevice>,
        output_device: Box<SendRawTerminal>,
    ) -> Self {
        Self {
            prompt,
            terminal_device,
            mode_token: None,
            input_device,
            output_device,
            history: History::new(),
            is_pasting: false,
            last_output: None,
        }
    }

    /// Use the process's terminal: [`crate::PosixTerminal`], stdout, and keys read from
    /// the terminal that is put in raw mode. That is stdin when it is a tty, otherwise
    /// `/dev/tty`, so redirected stdin is never read as keys. Raw mode is entered and left
    /// once up front, so that a missing terminal is reported here rather than on the
    /// first `readline()` call.
    ///
    /// # Errors
    ///
    /// - [`ReadlineError::RawMode`] if the terminal can't be put in raw mode.
    /// - [`ReadlineError::IO`] if the terminal can't be opened for reading.
    #[cfg(unix)]
    pub fn try_new_stdio(prompt: Prompt) -> Result<Self, ReadlineError> {
        let mut terminal_device = crate::PosixTerminal;
        let token = terminal_device
            .enable_raw_mode()
            .map_err(ReadlineError::raw_mode)?;
        terminal_device
            .disable_raw_mode(token)
            .map_err(ReadlineError::raw_mode)?;

        Ok(Self::new(
            prompt,
            Box::new(terminal_device),
            Box::new(crate::Utf8InputDevice::new(crate::open_terminal_input()?)),
            Box::new(io::stdout()),
        ))
    }

    #[must_use]
    pub fn prompt(&self) -> &Prompt { &self.prompt }

    /// Changes take effect at the next `readline()` call.
    pub fn prompt_mut(&mut self) -> &mut Prompt { &mut self.prompt }

    #[must_use]
    pub fn history(&self) -> &History { &self.history }

    /// Set maximum history length. The default length is [`crate::HISTORY_SIZE_MAX`].
    pub fn set_max_history(&mut self, max_size: usize) {
        self.history.set_max_size(max_size);
    }

    pub fn enable_history(&mut self) { self.history.enable(); }

    pub fn disable_history(&mut self) { self.history.disable(); }

    /// Content for the pager (`Ctrl+O`). [`None`] or empty makes `Ctrl+O` ring the bell.
    pub fn set_last_output(&mut self, last_output: Option<String>) {
        self.last_output = last_output;
    }

    #[must_use]
    pub fn last_output(&self) -> Option<&str> { self.last_output.as_deref() }

    /// `true` between a bracketed paste start marker and its end marker. This can span
    /// several `readline()` calls when the pasted text has newlines in it.
    #[must_use]
    pub fn is_pasting(&self) -> bool { self.is_pasting }

    /// Enter (`true`) or leave (`false`) raw mode outside of `readline()`. Entering is a
    /// no-op if already entered.
    ///
    /// # Errors
    ///
    /// Returns [`ReadlineError::RawMode`] if the terminal mode can't be changed.
    pub fn set_raw_mode(&mut self, is_on: bool) -> Result<(), ReadlineError> {
        match (is_on, self.mode_token.take()) {
            (true, Some(token)) => self.mode_token = Some(token),
            (true, None) => {
                let token = self
                    .terminal_device
                    .enable_raw_mode()
                    .map_err(ReadlineError::raw_mode)?;
                self.mode_token = Some(token);
            }
            (false, Some(token)) => self
                .terminal_device
                .disable_raw_mode(token)
                .map_err(ReadlineError::raw_mode)?,
            (false, None) => {}
        }
        ok!()
    }

    /// Read one line. Blocks until `Enter`, `Ctrl+C`, `Ctrl+D` on an empty line,
    /// `Ctrl+Z`, or the input closes.
    ///
    /// # Errors
    ///
    /// - [`ReadlineError::RawMode`] if raw mode can't be entered or left.
    /// - [`ReadlineError::IO`] if writing to the terminal fails, or the process can't be
    ///   suspended.
    pub fn readline(&mut self) -> Result<ReadlineEvent, ReadlineError> {
        let mut guard =
            RawModeGuard::acquire(&mut *self.terminal_device, self.mode_token.take())
                .map_err(ReadlineError::raw_mode)?;

        let terminal: &dyn TerminalDevice = guard.device();
        let size = readline_internal::usable_window_size(terminal);

        // Pasted multi line input continues with the alt prompt.
        let prompt_str = if self.is_pasting {
            self.prompt.alt_prompt.as_str()
        } else {
            self.prompt.active_prompt()
        };

        let editor = readline_internal::LineEditor {
            buffer: LineBuffer::new(prompt_str, size.width()),
            decoder: KeyDecoder::new(),
            prompt: &self.prompt,
            history: &mut self.history,
            is_pasting: &mut self.is_pasting,
            last_output: self.last_output.as_deref(),
            input: &mut *self.input_device,
            term: &mut *self.output_device,
            terminal,
        };
        let result = editor.run();

        // Release even if the session failed. The session's error takes precedence.
        let release_result = guard.release().map_err(ReadlineError::raw_mode);
        let event = result?;
        release_result?;

        tracing::debug!(message = "readline done", event = ?event);

        if event == ReadlineEvent::Suspended {
            self.terminal_device.suspend()?;
        }

        Ok(event)
    }
}

impl Drop for Readline {
    fn drop(&mut self) {
        if let Some(token) = self.mode_token.take()
            && let Err(err) = self.terminal_device.disable_raw_mode(token)
        {
            tracing::warn!(message = "failed to restore terminal mode", error = %err);
        }
    }
}

pub mod readline_internal {
    #[allow(clippy::wildcard_imports)]
    use super::*;

    /// One editing session: everything one [`Readline::readline`] call needs, borrowed
    /// from the [`Readline`] for the duration of the call.
    #[allow(missing_debug_implementations)]
    pub struct LineEditor<'a> {
        pub buffer: LineBuffer,
        pub decoder: KeyDecoder,
        pub prompt: &'a Prompt,
        pub history: &'a mut History,
        pub is_pasting: &'a mut bool,
        pub last_output: Option<&'a str>,
        pub input: &'a mut dyn InputDevice,
        pub term: &'a mut dyn Write,
        /// Queried again when the pager opens, the window may have been resized since.
        pub terminal: &'a dyn TerminalDevice,
    }

    impl LineEditor<'_> {
        /// # Errors
        ///
        /// Returns an error if writing to the terminal fails.
        pub fn run(mut self) -> Result<ReadlineEvent, ReadlineError> {
            self.history.begin_session();
            self.render()?;

            loop {
                let ch = match self.input.read_char() {
                    Ok(ch) => ch,
                    Err(err) => {
                        tracing::debug!(message = "input closed", error = %err);
                        self.buffer.finish(self.term)?;
                        return Ok(ReadlineEvent::Eof);
                    }
                };

                let events = self.decoder.next_event(ch);
                if events.is_empty() {
                    continue;
                }

                match apply_events_and_render(&mut self, &events) {
                    ControlFlowExtended::ReturnOk(event) => return Ok(event),
                    ControlFlowExtended::ReturnError(err) => return Err(err),
                    ControlFlowExtended::Continue => {}
                }
            }
        }

        /// Returns the event that ends the session, if `event` ends it.
        ///
        /// # Errors
        ///
        /// Returns an error if writing to the terminal fails.
        pub fn apply_event(
            &mut self,
            event: EditEvent,
        ) -> Result<Option<ReadlineEvent>, ReadlineError> {
            match event {
                EditEvent::Insert(ch) => self.buffer.insert(ch),
                EditEvent::MoveLeft => self.buffer.move_left(),
                EditEvent::MoveRight => self.buffer.move_right(),
                EditEvent::MoveLeftWord => self.buffer.move_left_word(),
                EditEvent::MoveRightWord => self.buffer.move_right_word(),
                EditEvent::MoveToStart => self.buffer.move_to_start(),
                EditEvent::MoveToEnd => self.buffer.move_to_end(),
                EditEvent::DeleteBefore => self.buffer.delete_before(),
                EditEvent::DeleteAtCursor => self.buffer.delete_at(),
                EditEvent::DeleteAtCursorOrEof => {
                    if self.buffer.is_empty() {
                        return self.finish_with(ReadlineEvent::Eof);
                    }
                    self.buffer.delete_at();
                }
                EditEvent::DeleteWord => self.buffer.delete_word_before(),
                EditEvent::DeleteToEnd => self.buffer.delete_to_end(),
                EditEvent::DeleteToStart => self.buffer.delete_to_start(),
                EditEvent::HistoryPrev => {
                    self.history.prev(&mut self.buffer);
                }
                EditEvent::HistoryNext => {
                    self.history.next(&mut self.buffer);
                }
                EditEvent::PasteStart => *self.is_pasting = true,
                EditEvent::PasteEnd => *self.is_pasting = false,
                EditEvent::Enter => {
                    let line = self.buffer.as_string();
                    self.history.record(&line);
                    return self.finish_with(ReadlineEvent::Line(line));
                }
                EditEvent::Interrupt => return self.finish_with(ReadlineEvent::Interrupted),
                EditEvent::Suspend => return self.finish_with(ReadlineEvent::Suspended),
                EditEvent::ClearScreen => {
                    queue_commands!(self.term, Clear(ClearType::All), MoveTo(0, 0));
                    self.buffer.forget_render_position();
                }
                EditEvent::ShowLastOutput => self.show_last_output()?,
            }
            Ok(None)
        }

        /// Redraw the line. The placeholder is hidden mid paste, unless the host is
        /// already in multi line mode.
        ///
        /// # Errors
        ///
        /// Returns an error if writing to the terminal fails.
        pub fn render(&mut self) -> io::Result<()> {
            let prompt: &Prompt = self.prompt;
            let is_placeholder_shown = !*self.is_pasting || prompt.use_alt;
            let placeholder = is_placeholder_shown.then(|| prompt.active_placeholder());
            self.buffer.render(self.term, placeholder)
        }

        fn finish_with(
            &mut self,
            event: ReadlineEvent,
        ) -> Result<Option<ReadlineEvent>, ReadlineError> {
            self.buffer.finish(self.term)?;
            Ok(Some(event))
        }

        fn show_last_output(&mut self) -> io::Result<()> {
            match self.last_output.filter(|it| !it.is_empty()) {
                Some(content) => {
                    let size = usable_window_size(self.terminal);
                    Pager::run(content, self.input, self.term, size)
                }
                None => {
                    queue_commands!(self.term, Print(CTRL_G_BELL));
                    self.term.flush()
                }
            }
        }
    }

    /// The terminal's size, or [`DEFAULT_TERM_SIZE`] when it is unknown or degenerate.
    #[must_use]
    pub fn usable_window_size(terminal: &dyn TerminalDevice) -> Size {
        terminal
            .window_size()
            .filter(|it| it.col_width > 0 && it.row_height > 0)
            .unwrap_or(DEFAULT_TERM_SIZE)
    }

    /// Apply decoded events in order, then redraw. Stops at the first event that ends
    /// the session.
    pub fn apply_events_and_render(
        editor: &mut LineEditor<'_>,
        events: &[EditEvent],
    ) -> ControlFlowExtended<ReadlineEvent, ReadlineError> {
        for event in events {
            match editor.apply_event(*event) {
                Ok(Some(readline_event)) => {
                    return ControlFlowExtended::ReturnOk(readline_event);
                }
                Ok(None) => {}
                Err(err) => return ControlFlowExtended::ReturnError(err),
            }
        }

        match editor.render() {
            Ok(()) => ControlFlowExtended::Continue,
            Err(err) => ControlFlowExtended::ReturnError(err.into()),
        }
    }
}
