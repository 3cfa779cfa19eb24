// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing setup. `RUST_LOG` overrides the default level in both modes.

use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Commands log warnings and errors to stderr.
pub fn init_command() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter("warn"))
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Workers log to their per-project file. Keep the guard alive until exit so
/// buffered lines are flushed.
pub fn init_worker(log: &Path) -> io::Result<WorkerGuard> {
    let dir = log.parent().unwrap_or(Path::new("."));
    std::fs::create_dir_all(dir)?;
    let name = log
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "log path has no file name"))?;

    let appender = tracing_appender::rolling::never(dir, name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter("info"))
        .with_writer(writer)
        .with_ansi(false)
        .try_init();
    Ok(guard)
}
