// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # [`init_tracing`]
//!
//! Set up [`tracing_subscriber`] from a [`TracingConfig`]. Logs can go to `stdout`,
//! `stderr`, a file, or a display and a file at the same time. Every sink gets the same
//! compact, plain text format.

use super::{DisplayPreference, TracingScope, WriterConfig, rolling_file_appender_impl,
            tracing_config::TracingConfig};
use tracing::dispatcher;
use tracing_core::{LevelFilter, Subscriber};
use tracing_subscriber::{Layer, Registry, fmt::MakeWriter, layer::SubscriberExt,
                         registry::LookupSpan, util::SubscriberInitExt};

/// Type alias for a boxed layer.
pub type DynLayer<S> = dyn Layer<S> + Send + Sync + 'static;

/// Initialize the tracing system with the provided [`TracingConfig`].
///
/// # Return
/// 1. [`TracingScope::ThreadLocal`]: a [`tracing::dispatcher::DefaultGuard`]. Drop it to
///    reset the tracing system to its previous state for that thread.
/// 2. [`TracingScope::Global`]: [`None`]. The global default can only be set once.
///
/// # Errors
///
/// Returns an error if the log file can't be created, or if a global subscriber has
/// already been set.
pub fn init_tracing(
    tracing_config: TracingConfig,
) -> miette::Result<Option<dispatcher::DefaultGuard>> {
    if tracing_config.writer_config == WriterConfig::None {
        return Ok(None);
    }

    let layers = try_create_layers(&tracing_config)?;
    match tracing_config.scope {
        TracingScope::Global => {
            tracing_subscriber::registry()
                .with(layers)
                .try_init()
                .map_err(|e| miette::miette!("failed to set global subscriber: {e}"))?;
            Ok(None)
        }
        TracingScope::ThreadLocal => {
            Ok(Some(tracing_subscriber::registry().with(layers).set_default()))
        }
    }
}

/// The level filter, then one `fmt` layer per sink named in
/// [`TracingConfig::writer_config`]. This does not install anything, for that use
/// [`init_tracing`] or:
/// `tracing_subscriber::registry().with(try_create_layers(..)?).init()`.
///
/// # Errors
///
/// Returns an error if the log file can't be created.
pub fn try_create_layers(
    tracing_config: &TracingConfig,
) -> miette::Result<Vec<Box<DynLayer<Registry>>>> {
    let level_filter = tracing_config.get_level_filter();
    let mut layers: Vec<Box<DynLayer<Registry>>> = vec![Box::new(level_filter)];

    if let Some(display_pref) = tracing_config.writer_config.display_preference() {
        layers.push(match display_pref {
            DisplayPreference::Stdout => fmt_layer(std::io::stdout, level_filter),
            DisplayPreference::Stderr => fmt_layer(std::io::stderr, level_filter),
        });
    }

    if let Some(file_path) = tracing_config.writer_config.file_path() {
        let file = rolling_file_appender_impl::try_create(file_path)?;
        layers.push(fmt_layer(file, level_filter));
    }

    Ok(layers)
}

/// Compact, no ANSI colors (log files are read with plain text tools), no thread ids,
/// no source locations. The concrete writer type is erased.
fn fmt_layer<S, W>(make_writer: W, level_filter: LevelFilter) -> Box<DynLayer<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    Box::new(
        tracing_subscriber::fmt::layer()
            .compact()
            .with_ansi(false)
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_file(false)
            .with_line_number(false)
            .with_writer(make_writer)
            .with_filter(level_filter),
    )
}
