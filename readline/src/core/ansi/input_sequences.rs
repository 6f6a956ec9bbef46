// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! ANSI/ASCII input code points that the editor and the pager react to.
//!
//! The input stream is already decoded into [`char`]s, so every constant here is a
//! `char` rather than a `u8`.
//!
//! # Control codes (C0)
//!
//! `Ctrl+<letter>` produces `letter - 0x40`, so `Ctrl+A` is `0x01`, `Ctrl+Z` is `0x1A`.
//!
//! # Escape sequences
//!
//! - Meta (Alt) keys: `ESC <char>`, eg: `ESC b`.
//! - CSI keys: `ESC [ <final>` or `ESC [ <code> ~`.
//! - Bracketed paste: `ESC [ 200~` ... `ESC [ 201~`.

// ==================== Control Codes ====================

/// `Ctrl+@` (0x00). Ignored.
pub const CTRL_NULL: char = '\x00';

/// `Ctrl+A` (0x01): move to start of line.
pub const CTRL_A_LINE_START: char = '\x01';

/// `Ctrl+B` (0x02): move left one char. Page up in the pager.
pub const CTRL_B_BACKWARD: char = '\x02';

/// `Ctrl+C` (0x03): interrupt.
pub const CTRL_C_INTERRUPT: char = '\x03';

/// `Ctrl+D` (0x04): delete at cursor, or end of input on an empty line.
pub const CTRL_D_DELETE: char = '\x04';

/// `Ctrl+E` (0x05): move to end of line.
pub const CTRL_E_LINE_END: char = '\x05';

/// `Ctrl+F` (0x06): move right one char. Page down in the pager.
pub const CTRL_F_FORWARD: char = '\x06';

/// BEL (0x07): audible alert.
pub const CTRL_G_BELL: char = '\x07';

/// `Ctrl+H` (0x08): backspace on terminals that don't send DEL.
pub const CTRL_H_BACKSPACE: char = '\x08';

/// TAB (0x09).
pub const CTRL_I_TAB: char = '\x09';

/// `Ctrl+J` / LF (0x0A): enter.
pub const CTRL_J_LINE_FEED: char = '\x0A';

/// `Ctrl+K` (0x0B): kill to end of line.
pub const CTRL_K_KILL: char = '\x0B';

/// `Ctrl+L` (0x0C): clear screen.
pub const CTRL_L_CLEAR_SCREEN: char = '\x0C';

/// CR (0x0D): enter.
pub const CTRL_M_ENTER: char = '\x0D';

/// `Ctrl+N` (0x0E): next history entry.
pub const CTRL_N_NEXT: char = '\x0E';

/// `Ctrl+O` (0x0F): open (and close) the pager.
pub const CTRL_O_PAGER: char = '\x0F';

/// `Ctrl+P` (0x10): previous history entry.
pub const CTRL_P_PREV: char = '\x10';

/// `Ctrl+U` (0x15): kill to start of line.
pub const CTRL_U_KILL_TO_START: char = '\x15';

/// `Ctrl+W` (0x17): delete the word before the cursor.
pub const CTRL_W_DELETE_WORD: char = '\x17';

/// `Ctrl+Z` (0x1A): suspend.
pub const CTRL_Z_SUSPEND: char = '\x1A';

/// ESC (0x1B): starts every escape sequence.
pub const ANSI_ESC: char = '\x1B';

/// DEL (0x7F): what most terminals send for the backspace key.
pub const ANSI_DEL: char = '\x7F';

// ==================== ANSI Sequence Components ====================

/// Meta `b`: move left one word.
pub const META_WORD_BACKWARD: char = 'b';

/// Meta `f`: move right one word.
pub const META_WORD_FORWARD: char = 'f';

/// CSI bracket: `[`. Second char of every CSI sequence.
pub const ANSI_CSI_BRACKET: char = '[';

/// Function key terminator: `~`.
pub const ANSI_FUNCTION_KEY_TERMINATOR: char = '~';

// ==================== CSI Final Chars ====================

/// CSI A: up arrow.
pub const ARROW_UP_FINAL: char = 'A';

/// CSI B: down arrow.
pub const ARROW_DOWN_FINAL: char = 'B';

/// CSI C: right arrow.
pub const ARROW_RIGHT_FINAL: char = 'C';

/// CSI D: left arrow.
pub const ARROW_LEFT_FINAL: char = 'D';

/// CSI H: home.
pub const SPECIAL_HOME_FINAL: char = 'H';

/// CSI F: end.
pub const SPECIAL_END_FINAL: char = 'F';

// ==================== CSI Codes (CSI n~) ====================

/// CSI 2: start of the bracketed paste markers `200~` / `201~`.
pub const BRACKETED_PASTE_CODE: char = '2';

/// CSI 3~: delete.
pub const SPECIAL_DELETE_CODE: char = '3';

/// CSI 5~: page up.
pub const SPECIAL_PAGE_UP_CODE: char = '5';

/// CSI 6~: page down.
pub const SPECIAL_PAGE_DOWN_CODE: char = '6';

/// Number of chars that follow [`BRACKETED_PASTE_CODE`] in a paste marker.
pub const BRACKETED_PASTE_MARKER_LEN: usize = 3;

/// Tail of `ESC [ 200~`.
pub const BRACKETED_PASTE_START_TAIL: [char; BRACKETED_PASTE_MARKER_LEN] = ['0', '0', '~'];

/// Tail of `ESC [ 201~`.
pub const BRACKETED_PASTE_END_TAIL: [char; BRACKETED_PASTE_MARKER_LEN] = ['0', '1', '~'];

// ==================== Misc ====================

/// `TAB` is expanded to this many spaces.
pub const TAB_WIDTH: usize = 8;
