//! Logging and tracing initialization.

use std::sync::Mutex;

use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::config::LoggingConfig;

/// Initialize the tracing subscriber with the given configuration.
///
/// Logs go to stderr unless `config.file` is set. Calling this twice is
/// harmless; the second subscriber is discarded.
pub fn init_logging(config: &LoggingConfig) {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let (writer, file_error) = log_writer(config);

    if config.json {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(writer)
            .json()
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    } else {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(writer)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }

    if let (Some(path), Some(e)) = (config.file.as_ref(), file_error) {
        tracing::warn!(path = %path.display(), error = %e, "Cannot open log file, logging to stderr");
    }
}

/// Writer for log output: the configured file, or stderr when it is unset or
/// cannot be created.
fn log_writer(config: &LoggingConfig) -> (BoxMakeWriter, Option<std::io::Error>) {
    match config.file.as_ref().map(std::fs::File::create) {
        Some(Ok(file)) => (BoxMakeWriter::new(Mutex::new(file)), None),
        Some(Err(e)) => (BoxMakeWriter::new(std::io::stderr), Some(e)),
        None => (BoxMakeWriter::new(std::io::stderr), None),
    }
}
