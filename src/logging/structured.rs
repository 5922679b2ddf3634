//! Subscriber setup for the command-line tool
//!
//! Human-readable events go to stderr; stdout carries sanitized documents
//! and must stay clean. An optional rolling JSON file receives the same
//! events together with the `sanitize` span that wraps each run, so a log
//! line can be traced back to its mode and input size.

use crate::config::LoggingConfig;
use crate::domain::{Result, SanitizerError};
use std::path::Path;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::Registry;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// File name prefix of the rolling run log
const LOG_FILE_NAME: &str = "dossier-sanitizer.log";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Keeps the background file writer alive; drop it last to flush
pub struct LoggingGuard {
    file_guard: Option<WorkerGuard>,
}

impl LoggingGuard {
    /// Whether run events are also written to the local log file
    pub fn writes_file(&self) -> bool {
        self.file_guard.is_some()
    }
}

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence over `level`. Only the crate's own events
/// pass the default filter.
///
/// # Errors
///
/// [`SanitizerError::Configuration`] for an unknown level or an unusable
/// log directory.
///
/// # Example
///
/// ```no_run
/// use dossier_sanitizer::logging::init_logging;
/// use dossier_sanitizer::config::LoggingConfig;
///
/// let _guard = init_logging("info", &LoggingConfig::default()).expect("logging starts");
/// ```
pub fn init_logging(level: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let filter = crate_filter(parse_level(level)?);

    let (file, file_guard) = if config.local_enabled {
        let (layer, guard) = run_log_layer(config, filter.clone())?;
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    // Span close events carry the run duration
    let console = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_span_events(FmtSpan::CLOSE)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(file)
        .with(console)
        .init();

    tracing::debug!(
        file_logging = config.local_enabled,
        log_dir = %config.local_path,
        "Logging initialized"
    );

    Ok(LoggingGuard { file_guard })
}

/// JSON layer writing to a rolling file under `local_path`
fn run_log_layer(config: &LoggingConfig, filter: EnvFilter) -> Result<(BoxedLayer, WorkerGuard)> {
    let dir = Path::new(&config.local_path);
    std::fs::create_dir_all(dir).map_err(|e| {
        SanitizerError::Configuration(format!(
            "Failed to create log directory {}: {e}",
            dir.display()
        ))
    })?;

    let appender = RollingFileAppender::new(rotation(&config.local_rotation), dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = tracing_subscriber::fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(false)
        .with_writer(writer)
        .with_filter(filter)
        .boxed();
    Ok((layer, guard))
}

/// Rotation for a validated `local_rotation` value
fn rotation(name: &str) -> Rotation {
    match name {
        "hourly" => Rotation::HOURLY,
        "never" => Rotation::NEVER,
        _ => Rotation::DAILY,
    }
}

/// `RUST_LOG` if set, else this crate at `level`
fn crate_filter(level: LevelFilter) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("dossier_sanitizer={level}")))
}

fn parse_level(name: &str) -> Result<LevelFilter> {
    let level = match name.to_ascii_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            return Err(SanitizerError::Configuration(format!(
                "Invalid log level: {name}. Must be one of: trace, debug, info, warn, error"
            )))
        }
    };
    Ok(level)
}
