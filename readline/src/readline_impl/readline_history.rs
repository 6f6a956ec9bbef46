// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{HISTORY_SIZE_MAX, LineBuffer};
use std::collections::VecDeque;

/// Submitted lines, oldest first, and a browsing position into them.
///
/// `pos == entries.len()` means "not browsing": the [`LineBuffer`] shows the live line.
/// The first step up saves the live line as the draft. Coming back down to the end
/// restores it, and the draft is gone after that.
#[derive(Debug)]
pub struct History {
    entries: VecDeque<String>,
    max_size: usize,
    pos: usize,
    /// Only meaningful while browsing. An empty draft is still a draft.
    draft: Option<String>,
    is_enabled: bool,
}

impl Default for History {
    fn default() -> Self { Self::new() }
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
            max_size: HISTORY_SIZE_MAX,
            pos: 0,
            draft: None,
            is_enabled: true,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize { self.entries.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    #[must_use]
    pub fn position(&self) -> usize { self.pos }

    #[must_use]
    pub fn is_browsing(&self) -> bool { self.pos < self.entries.len() }

    #[must_use]
    pub fn max_size(&self) -> usize { self.max_size }

    #[must_use]
    pub fn is_enabled(&self) -> bool { self.is_enabled }

    #[must_use]
    pub fn entries(&self) -> impl Iterator<Item = &str> { self.entries.iter().map(String::as_str) }

    pub fn enable(&mut self) { self.is_enabled = true; }

    /// Stop recording new lines. Existing entries can still be browsed.
    pub fn disable(&mut self) { self.is_enabled = false; }

    /// Shrinking drops the oldest entries.
    pub fn set_max_size(&mut self, max_size: usize) {
        self.max_size = max_size;
        self.evict_oldest();
        self.end_browsing();
    }

    /// Append a submitted line. Empty lines, and any line while disabled, are not kept.
    /// Always stops browsing. Returns whether the line was added.
    pub fn record(&mut self, line: &str) -> bool {
        let is_added = self.is_enabled && !line.is_empty();
        if is_added {
            self.entries.push_back(line.to_string());
            self.evict_oldest();
        }
        self.end_browsing();
        tracing::debug!(message = "history record", is_added, len = self.entries.len());
        is_added
    }

    /// Start of a new editing session: not browsing, no draft.
    pub fn begin_session(&mut self) { self.end_browsing(); }

    /// Step to the previous (older) entry and show it in `buffer`. The first step saves
    /// the buffer's content as the draft. Returns `false` at the oldest entry.
    pub fn prev(&mut self, buffer: &mut LineBuffer) -> bool {
        if self.pos == 0 {
            return false;
        }
        if self.pos == self.entries.len() {
            self.draft = Some(buffer.as_string());
        }
        self.pos -= 1;
        buffer.replace(&self.entries[self.pos]);
        tracing::debug!(message = "history prev", pos = self.pos);
        true
    }

    /// Step to the next (newer) entry and show it in `buffer`. Stepping past the newest
    /// entry restores the draft. Returns `false` when not browsing.
    pub fn next(&mut self, buffer: &mut LineBuffer) -> bool {
        if self.pos >= self.entries.len() {
            return false;
        }
        self.pos += 1;
        if self.pos == self.entries.len() {
            buffer.replace(&self.draft.take().unwrap_or_default());
        } else {
            buffer.replace(&self.entries[self.pos]);
        }
        tracing::debug!(message = "history next", pos = self.pos);
        true
    }

    fn evict_oldest(&mut self) {
        while self.entries.len() > self.max_size {
            self.entries.pop_front();
        }
    }

    fn end_browsing(&mut self) {
        self.pos = self.entries.len();
        self.draft = None;
    }
}
