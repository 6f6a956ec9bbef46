// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! A small modal viewer for long output, shown on the terminal's alternate screen.
//!
//! The pager is read only with respect to the editing session: it owns a copy of the
//! content, and leaves [`crate::LineBuffer`], [`crate::History`] and the
//! [`crate::KeyDecoder`] alone. Leaving the alternate screen is tied to
//! [`AlternateScreenGuard`], so it happens on every exit path.

use crate::{ANSI_CSI_BRACKET, ANSI_ESC, ANSI_FUNCTION_KEY_TERMINATOR, ARROW_DOWN_FINAL,
            ARROW_UP_FINAL, CTRL_B_BACKWARD, CTRL_C_INTERRUPT, CTRL_F_FORWARD,
            CTRL_J_LINE_FEED, CTRL_M_ENTER, CTRL_O_PAGER, DIM_COLOR, InputDevice,
            SPECIAL_PAGE_DOWN_CODE, SPECIAL_PAGE_UP_CODE, Size, ok, queue_commands};
use crossterm::{cursor::MoveTo,
                style::{Print, ResetColor, SetForegroundColor},
                terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen}};
use std::{fmt::{self, Debug},
          io::{self, Write},
          ops::Range};
use strum_macros::AsRefStr;
use unicode_width::UnicodeWidthChar;

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
pub enum PagerCommand {
    LineDown,
    LineUp,
    PageDown,
    PageUp,
    Top,
    Bottom,
    Quit,
}

/// The content and the window onto it. Dimensions are captured when the pager opens.
#[derive(Debug, Clone)]
pub struct PagerView {
    lines: Vec<String>,
    /// First visible line. Always in `0..=max_offset()`.
    offset: usize,
    width: usize,
    /// Terminal height minus the status line. Never 0.
    visible_height: usize,
}

impl PagerView {
    #[must_use]
    pub fn new(content: &str, size: Size) -> Self {
        Self {
            lines: content.lines().map(str::to_string).collect(),
            offset: 0,
            width: size.width(),
            visible_height: size.height().saturating_sub(1).max(1),
        }
    }

    #[must_use]
    pub fn offset(&self) -> usize { self.offset }

    #[must_use]
    pub fn visible_height(&self) -> usize { self.visible_height }

    #[must_use]
    pub fn line_count(&self) -> usize { self.lines.len() }

    #[must_use]
    pub fn max_offset(&self) -> usize { self.lines.len().saturating_sub(self.visible_height) }

    #[must_use]
    pub fn visible_range(&self) -> Range<usize> {
        self.offset..(self.offset + self.visible_height).min(self.lines.len())
    }

    /// Move the window. [`PagerCommand::Quit`] does nothing here.
    pub fn apply(&mut self, command: PagerCommand) {
        let max_offset = self.max_offset();
        self.offset = match command {
            PagerCommand::LineDown => (self.offset + 1).min(max_offset),
            PagerCommand::LineUp => self.offset.saturating_sub(1),
            PagerCommand::PageDown => (self.offset + self.visible_height).min(max_offset),
            PagerCommand::PageUp => self.offset.saturating_sub(self.visible_height),
            PagerCommand::Top => 0,
            PagerCommand::Bottom => max_offset,
            PagerCommand::Quit => self.offset,
        };
    }

    #[must_use]
    pub fn status_line(&self) -> String {
        let range = self.visible_range();
        format!(
            "[Lines {}-{} of {}] Press q or Ctrl+O to exit, j/k or arrows to scroll",
            range.start + 1,
            range.end,
            self.lines.len()
        )
    }

    /// Paint the whole screen: visible lines, then the dimmed status line.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to, or flushing, the terminal fails.
    pub fn render(&self, term: &mut dyn Write) -> io::Result<()> {
        queue_commands!(term, Clear(ClearType::All), MoveTo(0, 0));
        for line in &self.lines[self.visible_range()] {
            queue_commands!(term, Print(truncate_to_width(line, self.width)), Print("\r\n"));
        }
        queue_commands!(
            term,
            SetForegroundColor(DIM_COLOR),
            Print(truncate_to_width(&self.status_line(), self.width)),
            ResetColor
        );
        term.flush()?;
        ok!()
    }
}

/// Longest prefix of `line` that fits in `width` columns.
#[must_use]
pub fn truncate_to_width(line: &str, width: usize) -> &str {
    let mut used = 0;
    for (index, ch) in line.char_indices() {
        used += ch.width().unwrap_or(0);
        if used > width {
            return &line[..index];
        }
    }
    line
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, AsRefStr)]
pub enum PagerKeyDecoderState {
    #[default]
    Normal,
    Escape,
    Csi,
    /// Got `ESC [ 5` or `ESC [ 6`. Only a `~` completes it.
    AwaitingTilde(PagerCommand),
}

/// Maps keys to [`PagerCommand`]s. Unknown keys are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct PagerKeyDecoder {
    state: PagerKeyDecoderState,
}

impl PagerKeyDecoder {
    #[must_use]
    pub fn state(&self) -> PagerKeyDecoderState { self.state }

    pub fn next_command(&mut self, ch: char) -> Option<PagerCommand> {
        match self.state {
            PagerKeyDecoderState::Normal => match ch {
                'q' | 'Q' | CTRL_O_PAGER | CTRL_C_INTERRUPT => Some(PagerCommand::Quit),
                'j' | CTRL_J_LINE_FEED | CTRL_M_ENTER => Some(PagerCommand::LineDown),
                'k' => Some(PagerCommand::LineUp),
                ' ' | CTRL_F_FORWARD => Some(PagerCommand::PageDown),
                CTRL_B_BACKWARD => Some(PagerCommand::PageUp),
                'g' => Some(PagerCommand::Top),
                'G' => Some(PagerCommand::Bottom),
                ANSI_ESC => {
                    self.state = PagerKeyDecoderState::Escape;
                    None
                }
                _ => None,
            },
            PagerKeyDecoderState::Escape => {
                self.state = if ch == ANSI_CSI_BRACKET {
                    PagerKeyDecoderState::Csi
                } else {
                    PagerKeyDecoderState::Normal
                };
                None
            }
            PagerKeyDecoderState::Csi => {
                self.state = PagerKeyDecoderState::Normal;
                match ch {
                    ARROW_UP_FINAL => Some(PagerCommand::LineUp),
                    ARROW_DOWN_FINAL => Some(PagerCommand::LineDown),
                    SPECIAL_PAGE_UP_CODE => {
                        self.state = PagerKeyDecoderState::AwaitingTilde(PagerCommand::PageUp);
                        None
                    }
                    SPECIAL_PAGE_DOWN_CODE => {
                        self.state =
                            PagerKeyDecoderState::AwaitingTilde(PagerCommand::PageDown);
                        None
                    }
                    _ => None,
                }
            }
            PagerKeyDecoderState::AwaitingTilde(command) => {
                self.state = PagerKeyDecoderState::Normal;
                (ch == ANSI_FUNCTION_KEY_TERMINATOR).then_some(command)
            }
        }
    }
}

/// RAII guard for the alternate screen. Prefer [`AlternateScreenGuard::leave`] so that
/// errors are reported; [`Drop`] leaves best effort on any other exit path.
pub struct AlternateScreenGuard<'a> {
    term: &'a mut dyn Write,
    is_active: bool,
}

impl Debug for AlternateScreenGuard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlternateScreenGuard")
            .field("is_active", &self.is_active)
            .finish_non_exhaustive()
    }
}

impl<'a> AlternateScreenGuard<'a> {
    /// # Errors
    ///
    /// Returns an error if writing to, or flushing, the terminal fails.
    pub fn enter(term: &'a mut dyn Write) -> io::Result<Self> {
        queue_commands!(term, EnterAlternateScreen);
        term.flush()?;
        Ok(Self {
            term,
            is_active: true,
        })
    }

    pub fn term(&mut self) -> &mut dyn Write { &mut *self.term }

    /// # Errors
    ///
    /// Returns an error if writing to, or flushing, the terminal fails.
    pub fn leave(mut self) -> io::Result<()> {
        self.is_active = false;
        Self::leave_impl(self.term)
    }

    fn leave_impl(term: &mut dyn Write) -> io::Result<()> {
        queue_commands!(term, LeaveAlternateScreen);
        term.flush()?;
        ok!()
    }
}

impl Drop for AlternateScreenGuard<'_> {
    fn drop(&mut self) {
        if self.is_active
            && let Err(err) = Self::leave_impl(self.term)
        {
            tracing::warn!(message = "failed to leave alternate screen", error = %err);
        }
    }
}

/// Runs the viewer loop until the user quits or input fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pager;

impl Pager {
    /// Show `content` until a quit key is pressed. A read error closes the pager too,
    /// without being reported: the editing session sees it on its own next read.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails. The alternate screen is left
    /// in any case.
    pub fn run(
        content: &str,
        input: &mut dyn InputDevice,
        term: &mut dyn Write,
        size: Size,
    ) -> io::Result<()> {
        let mut view = PagerView::new(content, size);
        let mut decoder = PagerKeyDecoder::default();
        let mut guard = AlternateScreenGuard::enter(term)?;
        tracing::debug!(message = "pager open", lines = view.line_count());

        view.render(guard.term())?;
        loop {
            let ch = match input.read_char() {
                Ok(ch) => ch,
                Err(err) => {
                    tracing::debug!(message = "pager input closed", error = %err);
                    break;
                }
            };
            match decoder.next_command(ch) {
                Some(PagerCommand::Quit) => break,
                Some(command) => {
                    view.apply(command);
                    view.render(guard.term())?;
                }
                None => {}
            }
        }

        tracing::debug!(message = "pager closed", offset = view.offset());
        guard.leave()
    }
}
