//! Logging infrastructure for scene export
//!
//! The library only emits `tracing` spans and events; installing a subscriber
//! is left to the caller. [`init_logging`] is the convenience used by the CLI
//! and by tests that want to see the pipeline at work.
//!
//! # Usage
//!
//! ```rust,no_run
//! use tikz_export::core::logging::init_logging;
//!
//! // Initialize with default settings
//! init_logging(None, None).unwrap();
//! ```
//!
//! # Log Formats
//!
//! - `compact`: single line per event
//! - `pretty`: multi-line, with file and line numbers
//! - `json`: one JSON object per event
//!
//! # Environment Variables
//!
//! - `TIKZ_EXPORT_LOG_LEVEL`: log level (trace|debug|info|warn|error|off)
//! - `RUST_LOG`: standard `tracing-subscriber` filter, used when the above is unset
//! - `TIKZ_EXPORT_LOG_FORMAT`: log format (compact|pretty|json)
//!
//! # Filtering Logs
//!
//! ```bash
//! # Show the axis binder at trace level, everything else at info
//! RUST_LOG="info,tikz_export::elements::axis=trace" tikz-export convert -i scene.json
//! ```

use std::str::FromStr;

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// Log format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact single-line format
    Compact,
    /// Pretty multi-line format with colors
    Pretty,
    /// JSON format for log aggregation
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

impl LogFormat {
    /// Get all valid format names
    pub fn variants() -> &'static [&'static str] {
        &["compact", "pretty", "json"]
    }

    /// Whether events carry their target, source location and span activity
    pub fn is_detailed(self) -> bool {
        self != LogFormat::Compact
    }

    /// Formatting layer writing to stderr
    fn layer(self) -> Box<dyn Layer<Registry> + Send + Sync> {
        let detailed = self.is_detailed();
        let layer = fmt::Layer::default()
            .with_writer(std::io::stderr)
            .with_level(true)
            .with_target(detailed)
            .with_file(detailed)
            .with_line_number(detailed)
            .with_span_events(if detailed {
                FmtSpan::ACTIVE
            } else {
                FmtSpan::NONE
            });

        match self {
            LogFormat::Compact => layer.boxed(),
            LogFormat::Pretty => layer.pretty().boxed(),
            LogFormat::Json => layer.json().boxed(),
        }
    }
}

/// Initialize the tracing subscriber with the given log level and format
///
/// * `level` - Optional log level (trace|debug|info|warn|error|off). Falls back
///   to `TIKZ_EXPORT_LOG_LEVEL`, then `RUST_LOG`, then `info`.
/// * `format` - Optional log format (compact|pretty|json). Falls back to
///   `TIKZ_EXPORT_LOG_FORMAT`, then `compact`.
///
/// Returns an error for an unknown format, or when a global subscriber is
/// already installed.
pub fn init_logging(
    level: Option<&str>,
    format: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = level
        .map(|s| s.to_string())
        .or_else(|| std::env::var("TIKZ_EXPORT_LOG_LEVEL").ok())
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_string());

    let log_format = format
        .map(|s| s.to_string())
        .or_else(|| std::env::var("TIKZ_EXPORT_LOG_FORMAT").ok())
        .unwrap_or_else(|| "compact".to_string());

    let filter = if log_level == "off" {
        EnvFilter::new("off")
    } else {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&log_level))
            .unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let format =
        LogFormat::from_str(&log_format).map_err(|e| format!("Invalid log format: {}", e))?;

    Registry::default()
        .with(format.layer())
        .with(filter)
        .try_init()?;

    Ok(())
}

/// Initialize logging with default settings (info level, compact format)
pub fn init_default_logging() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(None, None)
}
