// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use tracing_core::LevelFilter;

/// Default log file used by [`TracingConfig::new_file`].
pub const DEFAULT_LOG_FILE_PATH: &str = "readline_log.txt";

/// Configure the tracing logging to suit your needs. You can display the logs to a:
/// 1. file,
/// 2. stdout or stderr,
/// 3. both.
///
/// While the editor is running the terminal is in raw mode, so writing logs to the
/// display will garble the line being edited. Prefer [`WriterConfig::File`] for
/// interactive programs.
///
/// Fields:
/// - `writer_config`: [`WriterConfig`] to choose where to write the logs.
/// - `level`: [`tracing::Level`] - The log level to use for tracing.
/// - `scope`: [`TracingScope`] - Global (apps) or thread local (tests).
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub writer_config: WriterConfig,
    pub level: tracing::Level,
    pub scope: TracingScope,
}

/// - `tracing_log_file_path`: [String] is the path of the log file, eg:
///   `/tmp/readline_log.txt`.
/// - `DisplayPreference`: [`DisplayPreference`] is the preferred display to use for
///   logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriterConfig {
    None,
    Display(DisplayPreference),
    File(String /* tracing_log_file_path */),
    DisplayAndFile(DisplayPreference, String /* tracing_log_file_path */),
}

impl WriterConfig {
    #[must_use]
    pub fn display_preference(&self) -> Option<DisplayPreference> {
        match self {
            WriterConfig::Display(it) | WriterConfig::DisplayAndFile(it, _) => Some(*it),
            WriterConfig::None | WriterConfig::File(_) => None,
        }
    }

    #[must_use]
    pub fn file_path(&self) -> Option<&str> {
        match self {
            WriterConfig::File(it) | WriterConfig::DisplayAndFile(_, it) => Some(it),
            WriterConfig::None | WriterConfig::Display(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPreference {
    Stdout,
    Stderr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracingScope {
    /// Set once for the whole process. Can't be changed afterwards.
    Global,
    /// Set for the current thread until the returned guard is dropped.
    ThreadLocal,
}

impl TracingConfig {
    #[must_use]
    pub fn new_file(filename: Option<String>, level: tracing::Level) -> Self {
        Self {
            writer_config: WriterConfig::File(
                filename.unwrap_or_else(|| DEFAULT_LOG_FILE_PATH.to_string()),
            ),
            level,
            scope: TracingScope::Global,
        }
    }

    #[must_use]
    pub fn new_display(preferred_display: DisplayPreference, level: tracing::Level) -> Self {
        Self {
            writer_config: WriterConfig::Display(preferred_display),
            level,
            scope: TracingScope::Global,
        }
    }

    #[must_use]
    pub fn get_level_filter(&self) -> LevelFilter {
        if self.writer_config == WriterConfig::None {
            LevelFilter::OFF
        } else {
            LevelFilter::from_level(self.level)
        }
    }
}
