//! Telemetry setup

use std::io::IsTerminal;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogSettings;
use crate::constants::DEFAULT_LOG_FILTER;
use crate::error::AppError;

/// Stream the console layer writes to. Tools that print results on stdout
/// log to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    Stdout,
    Stderr,
}

impl LogOutput {
    fn writer(self) -> BoxMakeWriter {
        match self {
            LogOutput::Stdout => BoxMakeWriter::new(std::io::stdout),
            LogOutput::Stderr => BoxMakeWriter::new(std::io::stderr),
        }
    }

    /// Colors only when a terminal is attached.
    fn use_ansi(self) -> bool {
        match self {
            LogOutput::Stdout => std::io::stdout().is_terminal(),
            LogOutput::Stderr => std::io::stderr().is_terminal(),
        }
    }
}

/// Installs the global subscriber. Keep the returned guard alive for as long
/// as file logging should keep flushing.
pub fn init_telemetry(settings: &LogSettings, output: LogOutput) -> Result<Option<WorkerGuard>, AppError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let (file_writer, guard) = match settings.directory.as_deref() {
        Some(directory) => {
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("worklogz")
                .filename_suffix("log")
                .build(directory)
                .map_err(|e| AppError::TelemetryError(e.to_string()))?;
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(writer), Some(guard))
        }
        None => (None, None),
    };

    // No colors in file
    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .with_writer(writer)
            .with_target(true)
            .with_ansi(false)
    });

    let registry = tracing_subscriber::registry().with(env_filter).with(file_layer);

    let result = match settings.format.as_str() {
        "json" => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(output.writer())
                    .with_target(true)
                    .with_level(true),
            )
            .try_init(),
        _ => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_writer(output.writer())
                    .with_ansi(output.use_ansi())
                    .with_target(true)
                    .with_level(true),
            )
            .try_init(),
    };

    result.map_err(|e| AppError::TelemetryError(e.to_string()))?;
    Ok(guard)
}
