//! Logging configuration for Quarry
//!
//! Structured logging through `tracing`. The resolver reports every context
//! selection at `debug`; store-backed contexts report each execution at
//! `trace`. Output can go to stdout, a daily-rotated file, or both.

use quarry_core::{Error, Result};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILE_NAME: &str = "quarry.log";
const QUERY_TRACE_DIRECTIVE: &str = "quarry_context=trace";

/// Log output destination
#[derive(Debug, Clone, PartialEq)]
pub enum LogOutput {
    /// Output to stdout
    Stdout,
    /// Output to a file with daily rotation
    File(PathBuf),
    /// Output to both stdout and file
    Both(PathBuf),
}

impl LogOutput {
    fn file_path(&self) -> Option<&Path> {
        match self {
            LogOutput::Stdout => None,
            LogOutput::File(path) | LogOutput::Both(path) => Some(path),
        }
    }

    fn writes_stdout(&self) -> bool {
        matches!(self, LogOutput::Stdout | LogOutput::Both(_))
    }
}

/// Log format style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line human-readable format (default)
    Pretty,
    /// Compact single-line format
    Compact,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum log level filter, in `EnvFilter` syntax
    pub level: String,
    /// Output destination
    pub output: LogOutput,
    /// Format style
    pub format: LogFormat,
    /// Log every criteria execution regardless of `level`
    pub trace_queries: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            output: LogOutput::Stdout,
            format: LogFormat::Pretty,
            trace_queries: false,
        }
    }
}

impl LogConfig {
    /// Info level, stdout
    pub fn info() -> Self {
        Self::default()
    }

    /// Debug level, which includes context selection
    pub fn debug() -> Self {
        Self {
            level: "debug".to_string(),
            ..Default::default()
        }
    }

    /// Warn level
    pub fn warn() -> Self {
        Self {
            level: "warn".to_string(),
            ..Default::default()
        }
    }

    /// Set log output to file with rotation
    pub fn with_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output = LogOutput::File(path.into());
        self
    }

    /// Set log output to both stdout and file
    pub fn with_both<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output = LogOutput::Both(path.into());
        self
    }

    /// Set log format
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set log level filter
    pub fn with_level<S: Into<String>>(mut self, level: S) -> Self {
        self.level = level.into();
        self
    }

    /// Raise the context crate to `trace` so every criteria execution is logged
    pub fn with_query_tracing(mut self, enabled: bool) -> Self {
        self.trace_queries = enabled;
        self
    }

    fn level_filter(&self) -> Result<EnvFilter> {
        let filter = EnvFilter::try_new(&self.level)
            .map_err(|e| Error::InvalidConfig(format!("log level {:?}: {}", self.level, e)))?;
        self.with_query_directive(filter)
    }

    /// `RUST_LOG` wins over the configured level
    fn env_filter(&self) -> Result<EnvFilter> {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => self.with_query_directive(filter),
            Err(_) => self.level_filter(),
        }
    }

    fn with_query_directive(&self, filter: EnvFilter) -> Result<EnvFilter> {
        if !self.trace_queries {
            return Ok(filter);
        }
        let directive = QUERY_TRACE_DIRECTIVE
            .parse::<Directive>()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;
        Ok(filter.add_directive(directive))
    }

    /// Initialize global logging with this configuration
    ///
    /// Returns a guard that must be kept alive while logging to a file.
    /// When the guard is dropped, buffered lines are flushed and the writer
    /// thread shuts down. Fails if the level does not parse or a global
    /// subscriber is already installed.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use quarry::logging::LogConfig;
    ///
    /// // Keep the guard alive for the lifetime of your application
    /// let _guard = LogConfig::debug().with_file("./logs/quarry.log").init()?;
    /// # Ok::<(), quarry::Error>(())
    /// ```
    pub fn init(self) -> Result<Option<WorkerGuard>> {
        let env_filter = self.env_filter()?;

        let stdout = self.output.writes_stdout();
        let pretty = self.format == LogFormat::Pretty;
        let stdout_pretty = (stdout && pretty).then(|| fmt::layer().pretty());
        let stdout_compact = (stdout && !pretty).then(|| fmt::layer().compact());

        let (writer, guard) = match self.output.file_path() {
            Some(path) => {
                let (writer, guard) = file_writer(path);
                (Some(writer), Some(guard))
            }
            None => (None, None),
        };
        let file_pretty = writer
            .clone()
            .filter(|_| pretty)
            .map(|w| fmt::layer().with_writer(w).with_ansi(false).pretty());
        let file_compact = writer
            .filter(|_| !pretty)
            .map(|w| fmt::layer().with_writer(w).with_ansi(false).compact());

        tracing_subscriber::registry()
            .with(env_filter)
            .with(stdout_pretty)
            .with(stdout_compact)
            .with(file_pretty)
            .with(file_compact)
            .try_init()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;

        Ok(guard)
    }
}

fn file_writer(path: &Path) -> (NonBlocking, WorkerGuard) {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(DEFAULT_FILE_NAME);
    tracing_appender::non_blocking(tracing_appender::rolling::daily(directory, file_name))
}
