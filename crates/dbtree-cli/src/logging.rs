//! Logging and tracing setup for the dbtree binary
//!
//! Console output goes to stderr so scripts printed on stdout stay clean.
//! A JSON file layer with daily rotation keeps a record for bug reports.
//! `RUST_LOG` overrides the configured filter.

use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Directory where log files should be written
    pub log_dir: PathBuf,

    /// Whether to enable JSON output to files
    pub enable_json_logs: bool,

    /// Whether to enable console output on stderr
    pub enable_console_logs: bool,

    /// Whether to include file/line information in logs
    pub include_location: bool,

    /// Whether to log span open/close events
    pub enable_spans: bool,

    /// Default log level filter
    pub default_filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: log_directory(),
            enable_json_logs: true,
            enable_console_logs: false,
            include_location: false,
            enable_spans: false,
            default_filter: "warn,dbtree_cli=info,dbtree_services=info,dbtree_driver_mysql=info"
                .to_string(),
        }
    }
}

impl LoggingConfig {
    /// Configuration for `--verbose` runs: pretty stderr output, debug level
    pub fn verbose() -> Self {
        Self {
            enable_console_logs: true,
            include_location: cfg!(debug_assertions),
            enable_spans: true,
            default_filter: "info,dbtree_cli=debug,dbtree_services=debug,dbtree_objects=debug,dbtree_driver_mysql=debug"
                .to_string(),
            ..Self::default()
        }
    }
}

/// Initialize the logging system with the given configuration.
///
/// The returned guard flushes the file writer when dropped and must be kept
/// alive until the program exits.
pub fn init(config: LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    // NEW fires once per span; ENTER would repeat on every async re-poll.
    let span_events = if config.enable_spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let mut layers = Vec::new();
    let mut guard = None;

    if config.enable_console_logs {
        let console_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_span_events(span_events.clone())
            .with_ansi(true)
            .pretty()
            .with_filter(env_filter.clone())
            .boxed();

        layers.push(console_layer);
    }

    if config.enable_json_logs {
        std::fs::create_dir_all(&config.log_dir)?;
        let file_appender = tracing_appender::rolling::daily(&config.log_dir, "dbtree.log");
        let (non_blocking, worker_guard) = tracing_appender::non_blocking(file_appender);
        guard = Some(worker_guard);

        let json_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_span_events(span_events)
            .with_ansi(false)
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_writer(non_blocking)
            .with_filter(env_filter)
            .boxed();

        layers.push(json_layer);
    }

    tracing_subscriber::registry().with(layers).try_init()?;

    tracing::debug!(
        log_dir = %config.log_dir.display(),
        json_enabled = config.enable_json_logs,
        console_enabled = config.enable_console_logs,
        "Logging system initialized"
    );

    Ok(guard)
}

/// Get the log directory path
pub fn log_directory() -> PathBuf {
    dbtree_settings::logs_dir().unwrap_or_else(|_| {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dbtree")
            .join("logs")
    })
}
