// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Drive whole editing sessions through [`Readline`] with mock devices.

use crossterm::{Command,
                terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen}};
use pretty_assertions::assert_eq;
use r3bl_readline_sync::{InputDeviceMock, Prompt, Readline, ReadlineError, ReadlineEvent,
                         Size, StdoutMock, TerminalDeviceMock, TerminalDeviceMockState};
use test_case::test_case;

struct Session {
    readline: Readline,
    stdout_mock: StdoutMock,
    terminal_state: TerminalDeviceMockState,
}

fn prompt() -> Prompt {
    Prompt {
        prompt: "> ".into(),
        alt_prompt: ". ".into(),
        placeholder: "Send a message".into(),
        alt_placeholder: "More".into(),
        use_alt: false,
    }
}

fn session(input: &str) -> Session {
    let terminal_device = TerminalDeviceMock::new(Size::new(40, 10));
    let terminal_state = terminal_device.state();
    let stdout_mock = StdoutMock::new();
    let readline = Readline::new(
        prompt(),
        Box::new(terminal_device),
        Box::new(InputDeviceMock::new(input)),
        Box::new(stdout_mock.clone()),
    );
    Session {
        readline,
        stdout_mock,
        terminal_state,
    }
}

fn ansi(command: impl Command) -> String {
    let mut it = String::new();
    command.write_ansi(&mut it).unwrap();
    it
}

fn line(it: &str) -> ReadlineEvent { ReadlineEvent::Line(it.to_string()) }

#[test_case("hello\r", line("hello") ; "enter")]
#[test_case("hello\n", line("hello") ; "line feed")]
#[test_case("\r", line("") ; "empty line")]
#[test_case("abc", ReadlineEvent::Eof ; "input closes mid line")]
#[test_case("ab\x03", ReadlineEvent::Interrupted ; "ctrl c")]
#[test_case("\x04", ReadlineEvent::Eof ; "ctrl d on empty line")]
#[test_case("ab\x01\x04\r", line("b") ; "ctrl d deletes at cursor")]
#[test_case("hello world\x1bb\x0b\r", line("hello ") ; "meta b then kill to end")]
#[test_case("one two\x17\r", line("one ") ; "ctrl w deletes word")]
#[test_case("one two\x15\r", line("") ; "ctrl u deletes to start")]
#[test_case("ab\x1b[D\x1b[3~\r", line("a") ; "delete key")]
#[test_case("ab\x1b[D\x1b[3~~\r", line("a~") ; "only one tilde is swallowed")]
#[test_case("a\tb\r", line("a        b") ; "tab inserts spaces")]
#[test_case("a\x1b[Zb\x1b[2999c\r", line("abc") ; "garbled escapes are dropped")]
#[test_case("héllo 世界\r", line("héllo 世界") ; "non ascii")]
#[test_case("abc\x7f\x08\r", line("a") ; "backspace")]
fn test_single_session(input: &str, expected: ReadlineEvent) {
    let mut it = session(input);
    assert_eq!(it.readline.readline().unwrap(), expected);
    assert!(!it.terminal_state.is_raw());
    assert_eq!(it.terminal_state.enable_count(), 1);
    assert_eq!(it.terminal_state.disable_count(), 1);
}

#[test]
fn test_every_session_ends_with_newline() {
    for input in ["x\r", "x\x03", "x", "\x04"] {
        let mut it = session(input);
        it.readline.readline().unwrap();
        let output = it.stdout_mock.get_copy_of_buffer_as_string();
        assert!(output.ends_with("\r\n"), "{input:?} -> {output:?}");
    }
}

#[test]
fn test_prompt_and_placeholder_are_drawn() {
    let mut it = session("\r");
    it.readline.readline().unwrap();
    let output = it.stdout_mock.get_copy_of_buffer_as_string_strip_ansi();
    assert!(output.starts_with("> Send a message"));
}

#[test]
fn test_history_across_calls() {
    let mut it = session("one\rtwo\r\x1b[A\x1b[A\r\x10\x10\x10\x0e\r");
    assert_eq!(it.readline.readline().unwrap(), line("one"));
    assert_eq!(it.readline.readline().unwrap(), line("two"));
    assert_eq!(it.readline.readline().unwrap(), line("one"));
    // History is now [one, two, one]: up three times, down once.
    assert_eq!(it.readline.readline().unwrap(), line("two"));
    assert_eq!(
        it.readline.history().entries().collect::<Vec<_>>(),
        vec!["one", "two", "one", "two"]
    );
}

#[test]
fn test_history_restores_draft() {
    let mut it = session("one\rdr\x1b[A\x1b[B\r");
    assert_eq!(it.readline.readline().unwrap(), line("one"));
    assert_eq!(it.readline.readline().unwrap(), line("dr"));
}

#[test]
fn test_history_size_is_bounded() {
    let mut it = session("a\rb\rc\r");
    it.readline.set_max_history(2);
    for _ in 0..3 {
        it.readline.readline().unwrap();
    }
    assert_eq!(it.readline.history().entries().collect::<Vec<_>>(), vec!["b", "c"]);
}

#[test]
fn test_disabled_history_records_nothing() {
    let mut it = session("a\r\x1b[A\r");
    it.readline.disable_history();
    assert_eq!(it.readline.readline().unwrap(), line("a"));
    assert_eq!(it.readline.readline().unwrap(), line(""));
    assert!(it.readline.history().is_empty());
}

#[test]
fn test_bracketed_paste_spans_calls_with_alt_prompt() {
    let mut it = session("\x1b[200~first\rsecond\x1b[201~\r");

    assert_eq!(it.readline.readline().unwrap(), line("first"));
    assert!(it.readline.is_pasting());
    it.stdout_mock.clear();

    assert_eq!(it.readline.readline().unwrap(), line("second"));
    assert!(!it.readline.is_pasting());
    let output = it.stdout_mock.get_copy_of_buffer_as_string_strip_ansi();
    assert!(output.contains(". second"), "{output:?}");
    assert!(!output.contains("> "), "{output:?}");
}

#[test]
fn test_use_alt_switches_prompt() {
    let mut it = session("\rx\r");
    it.readline.prompt_mut().use_alt = true;
    it.readline.readline().unwrap();
    let output = it.stdout_mock.get_copy_of_buffer_as_string_strip_ansi();
    assert!(output.starts_with(". More"), "{output:?}");
}

#[test]
fn test_ctrl_o_without_last_output_rings_bell() {
    let mut it = session("\x0fok\r");
    assert_eq!(it.readline.readline().unwrap(), line("ok"));
    let output = it.stdout_mock.get_copy_of_buffer_as_string();
    assert!(output.contains('\x07'));
    assert!(!output.contains(&ansi(EnterAlternateScreen)));
}

#[test]
fn test_ctrl_o_shows_last_output_in_pager() {
    let mut it = session("one\rab\x0fjkq\r");
    assert_eq!(it.readline.readline().unwrap(), line("one"));
    it.readline.set_last_output(Some("first\nsecond\nthird".into()));
    assert_eq!(it.readline.readline().unwrap(), line("ab"));

    let output = it.stdout_mock.get_copy_of_buffer_as_string();
    let enter = output.find(&ansi(EnterAlternateScreen)).unwrap();
    let leave = output.find(&ansi(LeaveAlternateScreen)).unwrap();
    assert!(enter < leave);
    assert!(output[enter..leave].contains("second"));
    assert!(output[leave..].contains("ab"));

    // Keys read by the pager never reach the line, the history or the paste state.
    assert_eq!(
        it.readline.history().entries().collect::<Vec<_>>(),
        vec!["one", "ab"]
    );
    assert_eq!(it.readline.history().position(), 2);
    assert!(!it.readline.is_pasting());
    assert_eq!(it.readline.last_output(), Some("first\nsecond\nthird"));
}

#[test]
fn test_pager_uses_window_size_at_the_time_it_opens() {
    let mut it = session("\x0fq\r");
    // The window shrinks after the size query at the start of the line.
    it.terminal_state
        .resize_after_next_query(Some(Size::new(40, 4)));
    let content = (1..=10)
        .map(|n| format!("line {n}"))
        .collect::<Vec<_>>()
        .join("\n");
    it.readline.set_last_output(Some(content));

    assert_eq!(it.readline.readline().unwrap(), line(""));

    // 4 rows: 3 lines of content and the status line.
    let output = it.stdout_mock.get_copy_of_buffer_as_string();
    assert!(output.contains("[Lines 1-3 of 10]"), "{output:?}");
    assert!(!output.contains("[Lines 1-9 of 10]"), "{output:?}");
}

#[test]
fn test_pager_closes_when_input_closes() {
    let mut it = session("\x0f");
    it.readline.set_last_output(Some("text".into()));
    assert_eq!(it.readline.readline().unwrap(), ReadlineEvent::Eof);
    let output = it.stdout_mock.get_copy_of_buffer_as_string();
    assert!(output.contains(&ansi(LeaveAlternateScreen)));
    assert!(!it.terminal_state.is_raw());
}

#[test]
fn test_ctrl_l_clears_screen() {
    let mut it = session("ls\x0c\r");
    assert_eq!(it.readline.readline().unwrap(), line("ls"));
    let output = it.stdout_mock.get_copy_of_buffer_as_string();
    assert!(output.contains(&ansi(Clear(ClearType::All))));
}

#[test]
fn test_ctrl_z_suspends_after_leaving_raw_mode() {
    let mut it = session("ab\x1a");
    assert_eq!(it.readline.readline().unwrap(), ReadlineEvent::Suspended);
    assert_eq!(it.terminal_state.suspend_count(), 1);
    assert!(!it.terminal_state.is_raw());
}

#[test]
fn test_enable_failure_reads_no_input() {
    let mut it = session("x\r");
    it.terminal_state.set_fail_enable(true);
    let result = it.readline.readline();
    assert!(matches!(result, Err(ReadlineError::RawMode { .. })));
    assert!(it.stdout_mock.get_copy_of_buffer().is_empty());

    it.terminal_state.set_fail_enable(false);
    assert_eq!(it.readline.readline().unwrap(), line("x"));
}

#[test]
fn test_disable_failure_is_reported() {
    let mut it = session("x\r");
    it.terminal_state.set_fail_disable(true);
    let result = it.readline.readline();
    assert!(matches!(result, Err(ReadlineError::RawMode { .. })));
    assert_eq!(it.terminal_state.disable_count(), 1);
}

#[test]
fn test_set_raw_mode_is_adopted_by_readline() {
    let mut it = session("x\r");
    it.readline.set_raw_mode(true).unwrap();
    it.readline.set_raw_mode(true).unwrap();
    assert!(it.terminal_state.is_raw());
    assert_eq!(it.terminal_state.enable_count(), 1);

    assert_eq!(it.readline.readline().unwrap(), line("x"));
    assert!(!it.terminal_state.is_raw());
    assert_eq!(it.terminal_state.enable_count(), 1);
    assert_eq!(it.terminal_state.disable_count(), 1);

    it.readline.set_raw_mode(false).unwrap();
    assert_eq!(it.terminal_state.disable_count(), 1);
}

#[test]
fn test_drop_restores_raw_mode_set_by_caller() {
    let it = session("");
    let terminal_state = it.terminal_state.clone();
    let mut readline = it.readline;
    readline.set_raw_mode(true).unwrap();
    drop(readline);
    assert!(!terminal_state.is_raw());
}

#[test]
fn test_unknown_window_size_uses_default() {
    let mut it = session("x\r");
    it.terminal_state.set_size(None);
    assert_eq!(it.readline.readline().unwrap(), line("x"));
}
