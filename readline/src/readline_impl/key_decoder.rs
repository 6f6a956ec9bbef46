// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Turns a stream of code points into [`EditEvent`]s.
//!
//! ```text
//!            ESC                 [                  2
//! Normal ──────────▶ Escape ──────────▶ Extended ──────────▶ AwaitingPasteMarker
//!   ▲  ◀── b f DEL ───┘  ◀── A B C D H F ──┘ │                    │ (3 chars)
//!   │  ◀──────────── anything else ──────────┘                    │
//!   │                                          3                  │
//!   ├──────────────── AwaitingMetaDeleteSuppression ◀─── Extended │
//!   └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! A sequence that starts in [`DecoderState::AwaitingMetaDeleteSuppression`] returns
//! there instead of to [`DecoderState::Normal`].
//!
//! Garbled or unknown escape sequences are dropped: they never reach the line as text.
//! The decoder never asks for more input than the sequence it is in the middle of.

use crate::{ANSI_CSI_BRACKET, ANSI_DEL, ANSI_ESC, ARROW_DOWN_FINAL, ARROW_LEFT_FINAL,
            ARROW_RIGHT_FINAL, ARROW_UP_FINAL, BRACKETED_PASTE_CODE,
            BRACKETED_PASTE_END_TAIL, BRACKETED_PASTE_MARKER_LEN,
            BRACKETED_PASTE_START_TAIL, CTRL_A_LINE_START, CTRL_B_BACKWARD,
            CTRL_C_INTERRUPT, CTRL_D_DELETE, CTRL_E_LINE_END, CTRL_F_FORWARD,
            CTRL_H_BACKSPACE, CTRL_I_TAB, CTRL_J_LINE_FEED, CTRL_K_KILL,
            CTRL_L_CLEAR_SCREEN, CTRL_M_ENTER, CTRL_N_NEXT, CTRL_NULL, CTRL_O_PAGER,
            CTRL_P_PREV, CTRL_U_KILL_TO_START, CTRL_W_DELETE_WORD, CTRL_Z_SUSPEND,
            META_WORD_BACKWARD, META_WORD_FORWARD, SPECIAL_DELETE_CODE,
            SPECIAL_END_FINAL, SPECIAL_HOME_FINAL, TAB_WIDTH};
use smallvec::{SmallVec, smallvec};
use strum_macros::AsRefStr;

/// A logical editing action, independent of the bytes that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
pub enum EditEvent {
    Insert(char),
    MoveLeft,
    MoveRight,
    MoveLeftWord,
    MoveRightWord,
    MoveToStart,
    MoveToEnd,
    /// Backspace.
    DeleteBefore,
    /// `Ctrl+D`: forward delete, or end of input when the line is empty.
    DeleteAtCursorOrEof,
    /// The `Delete` key. Never ends input.
    DeleteAtCursor,
    DeleteWord,
    DeleteToEnd,
    DeleteToStart,
    HistoryPrev,
    HistoryNext,
    PasteStart,
    PasteEnd,
    Enter,
    Interrupt,
    ClearScreen,
    ShowLastOutput,
    Suspend,
}

/// Most inputs decode to zero or one event. `TAB` decodes to [`TAB_WIDTH`] inserts.
pub type DecodedEvents = SmallVec<[EditEvent; TAB_WIDTH]>;

/// Exactly one of these is active at a time.
///
/// A forward delete (`ESC [ 3`) arms a one shot suppression of the next key that is
/// neither a bound control code nor part of an escape sequence (normally the `~` that
/// ends the delete sequence). While armed, the idle state is
/// [`DecoderState::AwaitingMetaDeleteSuppression`] instead of [`DecoderState::Normal`],
/// and escape sequences carry `suppress_next` so that the suppression is still armed
/// when they end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, AsRefStr)]
pub enum DecoderState {
    #[default]
    Normal,
    /// Got `ESC`.
    Escape { suppress_next: bool },
    /// Got `ESC [`.
    EscapeExtended { suppress_next: bool },
    /// Got `ESC [ 2`. Collecting the fixed length tail of a bracketed paste marker.
    AwaitingPasteMarker {
        remaining: usize,
        tail: [char; BRACKETED_PASTE_MARKER_LEN],
        suppress_next: bool,
    },
    /// Idle, with the next unbound key to be swallowed.
    AwaitingMetaDeleteSuppression,
}

impl DecoderState {
    /// The state to go back to once a key or sequence is done.
    fn idle(suppress_next: bool) -> Self {
        if suppress_next {
            DecoderState::AwaitingMetaDeleteSuppression
        } else {
            DecoderState::Normal
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct KeyDecoder {
    state: DecoderState,
}

impl KeyDecoder {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn state(&self) -> DecoderState { self.state }

    /// Drop any partially decoded sequence.
    pub fn reset(&mut self) { self.state = DecoderState::Normal; }

    /// Feed one code point. Returns the events it completes, possibly none.
    pub fn next_event(&mut self, ch: char) -> DecodedEvents {
        let events = match self.state {
            DecoderState::Normal => self.on_idle(ch, false),
            DecoderState::AwaitingMetaDeleteSuppression => self.on_idle(ch, true),
            DecoderState::Escape { suppress_next } => self.on_escape(ch, suppress_next),
            DecoderState::EscapeExtended { suppress_next } => {
                self.on_escape_extended(ch, suppress_next)
            }
            DecoderState::AwaitingPasteMarker {
                remaining,
                tail,
                suppress_next,
            } => self.on_paste_marker(ch, remaining, tail, suppress_next),
        };

        tracing::trace!(
            message = "decoded",
            input = ?ch,
            next_state = self.state.as_ref(),
            events = ?events.as_slice()
        );

        events
    }

    /// Bound control codes act immediately and leave a pending suppression armed.
    fn on_idle(&mut self, ch: char, suppress_next: bool) -> DecodedEvents {
        if let Some(events) = control_code_events(ch) {
            return events;
        }
        if ch == ANSI_ESC {
            self.state = DecoderState::Escape { suppress_next };
            return smallvec![];
        }
        if suppress_next {
            self.state = DecoderState::Normal;
            return smallvec![];
        }
        insert_events(ch)
    }

    fn on_escape(&mut self, ch: char, suppress_next: bool) -> DecodedEvents {
        self.state = DecoderState::idle(suppress_next);
        match ch {
            META_WORD_BACKWARD => smallvec![EditEvent::MoveLeftWord],
            META_WORD_FORWARD => smallvec![EditEvent::MoveRightWord],
            ANSI_DEL => smallvec![EditEvent::DeleteWord],
            ANSI_CSI_BRACKET => {
                self.state = DecoderState::EscapeExtended { suppress_next };
                smallvec![]
            }
            _ => smallvec![],
        }
    }

    fn on_escape_extended(&mut self, ch: char, suppress_next: bool) -> DecodedEvents {
        self.state = DecoderState::idle(suppress_next);
        match ch {
            ARROW_UP_FINAL => smallvec![EditEvent::HistoryPrev],
            ARROW_DOWN_FINAL => smallvec![EditEvent::HistoryNext],
            ARROW_RIGHT_FINAL => smallvec![EditEvent::MoveRight],
            ARROW_LEFT_FINAL => smallvec![EditEvent::MoveLeft],
            SPECIAL_HOME_FINAL => smallvec![EditEvent::MoveToStart],
            SPECIAL_END_FINAL => smallvec![EditEvent::MoveToEnd],
            BRACKETED_PASTE_CODE => {
                self.state = DecoderState::AwaitingPasteMarker {
                    remaining: BRACKETED_PASTE_MARKER_LEN,
                    tail: ['\0'; BRACKETED_PASTE_MARKER_LEN],
                    suppress_next,
                };
                smallvec![]
            }
            SPECIAL_DELETE_CODE => {
                self.state = DecoderState::AwaitingMetaDeleteSuppression;
                smallvec![EditEvent::DeleteAtCursor]
            }
            _ => smallvec![],
        }
    }

    fn on_paste_marker(
        &mut self,
        ch: char,
        remaining: usize,
        mut tail: [char; BRACKETED_PASTE_MARKER_LEN],
        suppress_next: bool,
    ) -> DecodedEvents {
        tail[BRACKETED_PASTE_MARKER_LEN - remaining] = ch;
        let remaining = remaining - 1;

        if remaining > 0 {
            self.state = DecoderState::AwaitingPasteMarker {
                remaining,
                tail,
                suppress_next,
            };
            return smallvec![];
        }

        self.state = DecoderState::idle(suppress_next);
        if tail == BRACKETED_PASTE_START_TAIL {
            smallvec![EditEvent::PasteStart]
        } else if tail == BRACKETED_PASTE_END_TAIL {
            smallvec![EditEvent::PasteEnd]
        } else {
            smallvec![]
        }
    }
}

/// Events for the control codes that act the same in [`DecoderState::Normal`] and
/// [`DecoderState::AwaitingMetaDeleteSuppression`]. [`None`] means `ch` is not one of
/// them.
fn control_code_events(ch: char) -> Option<DecodedEvents> {
    let event = match ch {
        CTRL_NULL => return Some(smallvec![]),
        CTRL_I_TAB => return Some(smallvec![EditEvent::Insert(' '); TAB_WIDTH]),
        CTRL_A_LINE_START => EditEvent::MoveToStart,
        CTRL_B_BACKWARD => EditEvent::MoveLeft,
        CTRL_C_INTERRUPT => EditEvent::Interrupt,
        CTRL_D_DELETE => EditEvent::DeleteAtCursorOrEof,
        CTRL_E_LINE_END => EditEvent::MoveToEnd,
        CTRL_F_FORWARD => EditEvent::MoveRight,
        CTRL_H_BACKSPACE | ANSI_DEL => EditEvent::DeleteBefore,
        CTRL_J_LINE_FEED | CTRL_M_ENTER => EditEvent::Enter,
        CTRL_K_KILL => EditEvent::DeleteToEnd,
        CTRL_L_CLEAR_SCREEN => EditEvent::ClearScreen,
        CTRL_N_NEXT => EditEvent::HistoryNext,
        CTRL_O_PAGER => EditEvent::ShowLastOutput,
        CTRL_P_PREV => EditEvent::HistoryPrev,
        CTRL_U_KILL_TO_START => EditEvent::DeleteToStart,
        CTRL_W_DELETE_WORD => EditEvent::DeleteWord,
        CTRL_Z_SUSPEND => EditEvent::Suspend,
        _ => return None,
    };
    Some(smallvec![event])
}

/// Printable code points are inserted. Other control codes (C0 and C1) are ignored.
fn insert_events(ch: char) -> DecodedEvents {
    if ch.is_control() {
        smallvec![]
    } else {
        smallvec![EditEvent::Insert(ch)]
    }
}
