// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Interactive demo of [`Readline`]. Echoes every submitted entry, and keeps the last
//! one around for the pager (`Ctrl+O`).
//!
//! Multi line entries are collected in two ways:
//! - Paste text with newlines in it (bracketed paste).
//! - Start a line with `"""`, and end the entry with another line that starts with
//!   `"""`.

use clap::Parser;
use r3bl_readline_sync::{Prompt, Readline, ReadlineEvent, TracingConfig, init_tracing};

const MULTILINE_FENCE: &str = r#"""""#;
const HISTORY_COMMAND: &str = "/history";

#[derive(Debug, Parser)]
#[command(bin_name = "readline_repl")]
#[command(about = "Type lines, browse history, paste, and page through the last output")]
#[command(version)]
#[command(next_line_help = true)]
pub struct CLIArg {
    #[arg(long, default_value = ">>> ", help = "Prompt for the first line of an entry")]
    pub prompt: String,

    #[arg(long, default_value = "... ", help = "Prompt for the following lines")]
    pub alt_prompt: String,

    #[arg(
        long,
        default_value = r#"Send a message (""" for multi line, Ctrl+O to view last output)"#,
        help = "Dimmed hint shown while the line is empty"
    )]
    pub placeholder: String,

    #[arg(long, default_value_t = r3bl_readline_sync::HISTORY_SIZE_MAX)]
    pub max_history: usize,

    #[arg(
        long,
        short = 'f',
        help = "Log file path. Defaults to `readline_log.txt` in the current directory"
    )]
    pub log_file: Option<String>,

    #[arg(long, short = 'l', default_value = "debug", help = "Log level")]
    pub log_level: tracing::Level,

    #[arg(long, short = 'n', help = "Disable logging")]
    pub no_log: bool,
}

fn main() -> miette::Result<()> {
    let cli_arg = CLIArg::parse();

    if !cli_arg.no_log {
        init_tracing(TracingConfig::new_file(cli_arg.log_file.clone(), cli_arg.log_level))?;
    }

    let prompt = Prompt {
        prompt: cli_arg.prompt,
        alt_prompt: cli_arg.alt_prompt,
        placeholder: cli_arg.placeholder,
        alt_placeholder: format!("End with {MULTILINE_FENCE}"),
        use_alt: false,
    };
    let mut readline = Readline::try_new_stdio(prompt)?;
    readline.set_max_history(cli_arg.max_history);
    tracing::info!(message = "repl start", max_history = cli_arg.max_history);

    let mut pending = Vec::<String>::new();
    loop {
        let line = match readline.readline()? {
            ReadlineEvent::Line(line) => line,
            ReadlineEvent::Eof | ReadlineEvent::Interrupted => break,
            ReadlineEvent::Suspended => continue,
        };

        if let Some(rest) = line.strip_prefix(MULTILINE_FENCE) {
            let prompt = readline.prompt_mut();
            prompt.use_alt = !prompt.use_alt;
            if !rest.is_empty() {
                pending.push(rest.to_string());
            }
        } else {
            pending.push(line);
        }

        if readline.prompt().use_alt || readline.is_pasting() {
            continue;
        }

        let entry = pending.join("\n");
        pending.clear();
        submit(&mut readline, entry);
    }

    tracing::info!(message = "repl end");
    Ok(())
}

fn submit(readline: &mut Readline, entry: String) {
    if entry.trim().is_empty() {
        return;
    }

    let output = if entry.trim() == HISTORY_COMMAND {
        readline
            .history()
            .entries()
            .enumerate()
            .map(|(index, it)| format!("{index:>4}  {it}"))
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        entry
    };

    tracing::debug!(message = "submit", lines = output.lines().count());
    println!("{output}");
    readline.set_last_output(Some(output));
}
