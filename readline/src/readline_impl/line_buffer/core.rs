// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// The line being edited: its code points and a cursor into them.
///
/// The cursor is an index in `0..=len()`, where `len()` is the position after the last
/// code point. Every operation keeps it in range; operations at the edges of the buffer
/// are no-ops.
///
/// Rendering lives in [`super::render`]. The buffer only remembers which terminal row
/// it left the cursor on, so that the next render can find its way back to the prompt.
#[derive(Debug, Clone)]
pub struct LineBuffer {
    pub(super) text: Vec<char>,
    pub(super) cursor: usize,
    pub(super) prompt: String,
    /// Display width of `prompt` with ANSI escapes removed.
    pub(super) prompt_width: usize,
    /// Never 0.
    pub(super) term_width: usize,
    /// Row (relative to the first row of the prompt) that the last render left the
    /// terminal cursor on. [`None`] when nothing is on screen.
    pub(super) rendered_row: Option<usize>,
}

/// Display width of `ch` in terminal columns. Control chars count as 0.
#[must_use]
pub fn char_display_width(ch: char) -> usize { ch.width().unwrap_or(0) }

/// Display width of `text` in terminal columns. Control chars count as 0.
#[must_use]
pub fn chars_display_width(text: &[char]) -> usize {
    text.iter().copied().map(char_display_width).sum()
}

/// Display width of `text` in terminal columns, ignoring ANSI escape sequences.
#[must_use]
pub fn str_display_width_strip_ansi(text: &str) -> usize {
    strip_ansi_escapes::strip_str(text).width()
}

impl LineBuffer {
    #[must_use]
    pub fn new(prompt: impl Into<String>, term_width: usize) -> Self {
        let prompt = prompt.into();
        let prompt_width = str_display_width_strip_ansi(&prompt);
        Self {
            text: vec![],
            cursor: 0,
            prompt,
            prompt_width,
            term_width: term_width.max(1),
            rendered_row: None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize { self.text.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.text.is_empty() }

    #[must_use]
    pub fn cursor(&self) -> usize { self.cursor }

    #[must_use]
    pub fn as_string(&self) -> String { self.text.iter().collect() }

    /// Display width of the text, not including the prompt.
    #[must_use]
    pub fn display_width(&self) -> usize { chars_display_width(&self.text) }

    pub fn insert(&mut self, ch: char) {
        self.text.insert(self.cursor, ch);
        self.cursor += 1;
    }

    /// Backspace.
    pub fn delete_before(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.text.remove(self.cursor);
        }
    }

    /// Forward delete.
    pub fn delete_at(&mut self) {
        if self.cursor < self.text.len() {
            self.text.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) { self.cursor = self.cursor.saturating_sub(1); }

    pub fn move_right(&mut self) {
        if self.cursor < self.text.len() {
            self.cursor += 1;
        }
    }

    pub fn move_to_start(&mut self) { self.cursor = 0; }

    pub fn move_to_end(&mut self) { self.cursor = self.text.len(); }

    /// Start of the word before the cursor: skip whitespace, then the word.
    pub fn move_left_word(&mut self) { self.cursor = self.word_start_before_cursor(); }

    /// End of the word after the cursor: skip whitespace, then the word.
    pub fn move_right_word(&mut self) {
        let len = self.text.len();
        while self.cursor < len && self.text[self.cursor].is_whitespace() {
            self.cursor += 1;
        }
        while self.cursor < len && !self.text[self.cursor].is_whitespace() {
            self.cursor += 1;
        }
    }

    /// Delete from the start of the word before the cursor up to the cursor.
    pub fn delete_word_before(&mut self) {
        let start = self.word_start_before_cursor();
        self.text.drain(start..self.cursor);
        self.cursor = start;
    }

    /// Kill to end of line.
    pub fn delete_to_end(&mut self) { self.text.truncate(self.cursor); }

    /// Kill to start of line.
    pub fn delete_to_start(&mut self) {
        self.text.drain(..self.cursor);
        self.cursor = 0;
    }

    /// Swap in new content (eg: a history entry). The cursor goes to the end.
    pub fn replace(&mut self, new_text: &str) {
        self.text = new_text.chars().collect();
        self.cursor = self.text.len();
    }

    fn word_start_before_cursor(&self) -> usize {
        let mut it = self.cursor;
        while it > 0 && self.text[it - 1].is_whitespace() {
            it -= 1;
        }
        while it > 0 && !self.text[it - 1].is_whitespace() {
            it -= 1;
        }
        it
    }
}
