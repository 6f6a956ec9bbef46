// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::PathBuf;

/// Creates a file appender that never rolls over. The parent folder must exist.
///
/// Note that if you wrap this up in a non blocking writer, the file is only written when
/// the worker guard is dropped, which is easy to get wrong in a short lived REPL.
///
/// # Errors
///
/// Returns an error if:
/// - The path has no parent directory
/// - The path has no file name
pub fn try_create(
    path_str: &str,
) -> miette::Result<tracing_appender::rolling::RollingFileAppender> {
    let path = PathBuf::from(path_str);

    let parent = match path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => PathBuf::from("."),
        Some(parent) => parent.to_path_buf(),
        None => miette::bail!(
            "Can't access the folder of {}. It might not exist.",
            path.display()
        ),
    };

    let Some(file_name) = path.file_name() else {
        miette::bail!("Can't access the file name of {}.", path.display());
    };

    Ok(tracing_appender::rolling::never(parent, file_name))
}
