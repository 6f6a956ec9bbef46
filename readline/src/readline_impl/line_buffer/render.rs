// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::core::{LineBuffer, char_display_width, str_display_width_strip_ansi};
use crate::{ok, queue_commands};
use crossterm::{cursor::{MoveToColumn, MoveUp},
                style::{Color, Print, ResetColor, SetForegroundColor},
                terminal::{Clear, ClearType}};
use std::io::{self, Write};

/// Color used for the placeholder and the pager status line.
pub const DIM_COLOR: Color = Color::DarkGrey;

/// `u16` for crossterm cursor commands. Saturates on absurdly long lines.
fn as_u16(it: usize) -> u16 { u16::try_from(it).unwrap_or(u16::MAX) }

/// A screen position relative to the first row of the prompt.
///
/// `col == term_width` is the terminal's pending wrap: the row is full and the next
/// glyph goes to the start of the next row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct ScreenPos {
    row: usize,
    col: usize,
}

impl ScreenPos {
    /// Where a glyph `width` columns wide starts when drawn from here. A glyph that
    /// doesn't fit in the rest of the row starts the next one, like the terminal does.
    fn glyph_start(self, width: usize, term_width: usize) -> Self {
        if self.col > 0 && self.col + width.max(1) > term_width {
            Self { row: self.row + 1, col: 0 }
        } else {
            self
        }
    }

    /// Position after drawing a glyph `width` columns wide.
    fn advance(self, width: usize, term_width: usize) -> Self {
        if width == 0 {
            return self;
        }
        let start = self.glyph_start(width, term_width);
        Self {
            row: start.row,
            col: (start.col + width).min(term_width),
        }
    }

    /// Position after drawing `count` single column glyphs.
    fn advance_cells(self, count: usize, term_width: usize) -> Self {
        (0..count).fold(self, |pos, _| pos.advance(1, term_width))
    }

    fn is_pending_wrap(self, term_width: usize) -> bool { self.col >= term_width }
}

impl LineBuffer {
    /// Erase everything the last render drew, leaving the terminal cursor where the
    /// prompt started. No-op if nothing is on screen.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    pub fn clear(&mut self, term: &mut dyn Write) -> io::Result<()> {
        let Some(row) = self.rendered_row.take() else {
            return ok!();
        };
        if row > 0 {
            queue_commands!(term, MoveUp(as_u16(row)));
        }
        queue_commands!(term, MoveToColumn(0), Clear(ClearType::FromCursorDown));
        ok!()
    }

    /// Redraw prompt and line from scratch, and put the terminal cursor at the buffer's
    /// cursor. When `placeholder` is given and the line is empty, it is drawn dimmed
    /// after the prompt with the cursor left in front of it.
    ///
    /// Positions are recomputed from (prompt, text, cursor, width) on every call, nothing
    /// is carried over from the previous render except the row to go back to.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to, or flushing, the terminal fails.
    pub fn render(&mut self, term: &mut dyn Write, placeholder: Option<&str>) -> io::Result<()> {
        self.clear(term)?;

        let text = self.as_string();
        queue_commands!(term, Print(&self.prompt), Print(&text));
        let mut end = self.position_after(self.text.len());

        if let Some(placeholder) = placeholder.filter(|it| self.is_empty() && !it.is_empty()) {
            queue_commands!(
                term,
                SetForegroundColor(DIM_COLOR),
                Print(placeholder),
                ResetColor
            );
            let placeholder_width = str_display_width_strip_ansi(placeholder);
            end = end.advance_cells(placeholder_width, self.term_width);
        }

        let end_row = self.wrap_if_pending(term, end)?;

        let target = self.cursor_position();
        let rows_up = end_row.saturating_sub(target.row);
        if rows_up > 0 {
            queue_commands!(term, MoveUp(as_u16(rows_up)));
        }
        queue_commands!(term, MoveToColumn(as_u16(target.col)));

        self.rendered_row = Some(target.row);
        term.flush()?;
        ok!()
    }

    /// Redraw without placeholder, move the terminal cursor past the end of the line and
    /// start a new line. Nothing is on screen for this buffer afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to, or flushing, the terminal fails.
    pub fn finish(&mut self, term: &mut dyn Write) -> io::Result<()> {
        self.move_to_end();
        self.render(term, None)?;

        // When the line exactly fills the last row, render already wrapped.
        let end = self.position_after(self.text.len());
        if !end.is_pending_wrap(self.term_width) {
            queue_commands!(term, Print("\r\n"));
        }

        self.rendered_row = None;
        term.flush()?;
        ok!()
    }

    /// The screen was wiped (eg: clear screen). The next render starts at the current
    /// terminal cursor instead of erasing rows that are no longer there.
    pub fn forget_render_position(&mut self) { self.rendered_row = None; }

    /// Position after the prompt and the first `len` code points of the line.
    fn position_after(&self, len: usize) -> ScreenPos {
        let prompt_end =
            ScreenPos::default().advance_cells(self.prompt_width, self.term_width);
        self.text[..len].iter().fold(prompt_end, |pos, &ch| {
            pos.advance(char_display_width(ch), self.term_width)
        })
    }

    /// Where the terminal cursor goes: the start of the glyph under the buffer cursor,
    /// or the cell after the last glyph.
    fn cursor_position(&self) -> ScreenPos {
        let next_width = self
            .text
            .get(self.cursor)
            .map_or(1, |&ch| char_display_width(ch));
        self.position_after(self.cursor)
            .glyph_start(next_width, self.term_width)
    }

    /// Terminals leave the cursor on the last column after filling a row (pending wrap).
    /// Emit an explicit newline so the cursor lands at the start of the next row, and the
    /// row math stays exact. Returns the row the cursor is on afterwards.
    fn wrap_if_pending(&self, term: &mut dyn Write, end: ScreenPos) -> io::Result<usize> {
        if end.is_pending_wrap(self.term_width) {
            queue_commands!(term, Print("\r\n"));
            return ok!(end.row + 1);
        }
        ok!(end.row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StdoutMock;
    use crossterm::Command;
    use pretty_assertions::assert_eq;

    fn ansi(command: impl Command) -> String {
        let mut it = String::new();
        command.write_ansi(&mut it).unwrap();
        it
    }

    #[test]
    fn test_render_prompt_and_line() {
        let mut buffer = LineBuffer::new("$ ", 80);
        buffer.replace("hello");
        let mut stdout_mock = StdoutMock::default();

        buffer.render(&mut stdout_mock, None).unwrap();

        let output = stdout_mock.get_copy_of_buffer_as_string();
        assert!(output.starts_with("$ hello"), "{output:?}");
        assert!(output.ends_with(&ansi(MoveToColumn(7))), "{output:?}");
        assert_eq!(buffer.rendered_row, Some(0));
    }

    #[test]
    fn test_render_cursor_in_the_middle() {
        let mut buffer = LineBuffer::new("$ ", 80);
        buffer.replace("hello");
        buffer.move_left();
        buffer.move_left();
        let mut stdout_mock = StdoutMock::default();

        buffer.render(&mut stdout_mock, None).unwrap();

        let output = stdout_mock.get_copy_of_buffer_as_string();
        assert!(output.ends_with(&ansi(MoveToColumn(5))), "{output:?}");
    }

    #[test]
    fn test_second_render_clears_first() {
        let mut buffer = LineBuffer::new("$ ", 80);
        let mut stdout_mock = StdoutMock::default();
        buffer.render(&mut stdout_mock, None).unwrap();
        stdout_mock.clear();

        buffer.insert('x');
        buffer.render(&mut stdout_mock, None).unwrap();

        let expected_prefix = format!(
            "{}{}$ x",
            ansi(MoveToColumn(0)),
            ansi(Clear(ClearType::FromCursorDown))
        );
        let output = stdout_mock.get_copy_of_buffer_as_string();
        assert!(output.starts_with(&expected_prefix), "{output:?}");
    }

    #[test]
    fn test_placeholder_only_when_empty() {
        let mut buffer = LineBuffer::new(">>> ", 80);
        let mut stdout_mock = StdoutMock::default();

        buffer.render(&mut stdout_mock, Some("Send a message")).unwrap();
        let output = stdout_mock.get_copy_of_buffer_as_string();
        assert!(output.contains(&ansi(SetForegroundColor(DIM_COLOR))));
        assert_eq!(
            stdout_mock.get_copy_of_buffer_as_string_strip_ansi(),
            ">>> Send a message"
        );
        // Cursor goes back to just after the prompt.
        assert!(output.ends_with(&ansi(MoveToColumn(4))), "{output:?}");

        stdout_mock.clear();
        buffer.insert('a');
        buffer.render(&mut stdout_mock, Some("Send a message")).unwrap();
        assert!(!stdout_mock.get_copy_of_buffer_as_string().contains("Send"));
    }

    #[test]
    fn test_wrapped_line_moves_up_to_cursor_row() {
        // Prompt (2) + text (18) exactly fills two rows of a 10 column terminal. The
        // explicit newline puts the terminal cursor on row 2, the cursor is on row 0.
        let mut buffer = LineBuffer::new("$ ", 10);
        buffer.replace("abcdefghijklmnopqr");
        buffer.move_to_start();
        let mut stdout_mock = StdoutMock::default();

        buffer.render(&mut stdout_mock, None).unwrap();

        let expected_tail = format!(
            "opqr\r\n{}{}",
            ansi(MoveUp(2)),
            ansi(MoveToColumn(2))
        );
        let output = stdout_mock.get_copy_of_buffer_as_string();
        assert!(output.ends_with(&expected_tail), "{output:?}");
        assert_eq!(buffer.rendered_row, Some(0));

        // The cursor is already on the prompt row, so clear doesn't move up.
        stdout_mock.clear();
        buffer.clear(&mut stdout_mock).unwrap();
        let expected = format!(
            "{}{}",
            ansi(MoveToColumn(0)),
            ansi(Clear(ClearType::FromCursorDown))
        );
        assert_eq!(stdout_mock.get_copy_of_buffer_as_string(), expected);
    }

    #[test]
    fn test_clear_goes_back_up_to_prompt_row() {
        let mut buffer = LineBuffer::new("$ ", 10);
        buffer.replace("abcdefghijklmnopqrst");
        let mut stdout_mock = StdoutMock::default();
        buffer.render(&mut stdout_mock, None).unwrap();
        assert_eq!(buffer.rendered_row, Some(2));

        stdout_mock.clear();
        buffer.clear(&mut stdout_mock).unwrap();
        let expected = format!(
            "{}{}{}",
            ansi(MoveUp(2)),
            ansi(MoveToColumn(0)),
            ansi(Clear(ClearType::FromCursorDown))
        );
        assert_eq!(stdout_mock.get_copy_of_buffer_as_string(), expected);
        assert_eq!(buffer.rendered_row, None);
    }

    #[test]
    fn test_wide_glyph_that_does_not_fit_starts_next_row() {
        // `> 世` fills 4 of 5 columns. `界` doesn't fit in the last one, so the terminal
        // leaves it blank and draws `界` at the start of row 1, then `世` after it.
        let mut buffer = LineBuffer::new("> ", 5);
        buffer.replace("世界世");
        let mut stdout_mock = StdoutMock::default();

        buffer.render(&mut stdout_mock, None).unwrap();

        let output = stdout_mock.get_copy_of_buffer_as_string();
        assert!(output.ends_with(&format!("世界世{}", ansi(MoveToColumn(4)))), "{output:?}");
        assert_eq!(buffer.rendered_row, Some(1));

        // Cursor on the wrapped `界` goes to the start of row 1, not the blank cell.
        buffer.move_left();
        buffer.move_left();
        stdout_mock.clear();
        buffer.render(&mut stdout_mock, None).unwrap();
        let output = stdout_mock.get_copy_of_buffer_as_string();
        assert!(output.ends_with(&ansi(MoveToColumn(0))), "{output:?}");
        assert_eq!(buffer.rendered_row, Some(1));

        // Cursor on the first `世` is one row up.
        buffer.move_left();
        stdout_mock.clear();
        buffer.render(&mut stdout_mock, None).unwrap();
        let expected_tail = format!("{}{}", ansi(MoveUp(1)), ansi(MoveToColumn(2)));
        let output = stdout_mock.get_copy_of_buffer_as_string();
        assert!(output.ends_with(&expected_tail), "{output:?}");
        assert_eq!(buffer.rendered_row, Some(0));
    }

    #[test]
    fn test_wide_glyph_exactly_filling_row_wraps_once() {
        // `> ab世` is exactly 6 columns wide in a 6 column terminal.
        let mut buffer = LineBuffer::new("> ", 6);
        buffer.replace("ab世");
        let mut stdout_mock = StdoutMock::default();

        buffer.render(&mut stdout_mock, None).unwrap();

        let output = stdout_mock.get_copy_of_buffer_as_string();
        assert!(output.ends_with(&format!("ab世\r\n{}", ansi(MoveToColumn(0)))), "{output:?}");
        assert_eq!(buffer.rendered_row, Some(1));

        stdout_mock.clear();
        buffer.finish(&mut stdout_mock).unwrap();
        let output = stdout_mock.get_copy_of_buffer_as_string();
        assert_eq!(output.matches("\r\n").count(), 1, "{output:?}");
    }

    #[test]
    fn test_finish_ends_with_newline_once() {
        let mut buffer = LineBuffer::new("$ ", 80);
        buffer.replace("ls");
        buffer.move_to_start();
        let mut stdout_mock = StdoutMock::default();
        buffer.finish(&mut stdout_mock).unwrap();
        assert!(stdout_mock.get_copy_of_buffer_as_string().ends_with("\r\n"));
        assert_eq!(buffer.cursor(), 2);
        assert_eq!(buffer.rendered_row, None);

        // Exactly fills the row: the wrap newline is the only one.
        let mut buffer = LineBuffer::new("$ ", 4);
        buffer.replace("ab");
        let mut stdout_mock = StdoutMock::default();
        buffer.finish(&mut stdout_mock).unwrap();
        let output = stdout_mock.get_copy_of_buffer_as_string();
        assert_eq!(output.matches("\r\n").count(), 1, "{output:?}");
    }
}
