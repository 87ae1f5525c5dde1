//! Logging installation for the gate server and the admin CLI.
//!
//! # Design
//! - One entry point installs the global subscriber; format and output stream are chosen
//!   by the caller.
//! - The build identifier is recorded on first installation and read back everywhere else.

use std::io;

use once_cell::sync::OnceCell;
use tracing_subscriber::{
    EnvFilter, fmt, fmt::MakeWriter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::error::{Result, TelemetryError};

/// Filter applied when neither `RUST_LOG` nor the caller asks for something else.
pub const DEFAULT_LOG_LEVEL: &str = "info";

static BUILD_SHA: OnceCell<String> = OnceCell::new();

/// Install the global tracing subscriber described by `config`.
///
/// # Errors
///
/// Returns an error if `config.level` is not a valid filter directive or another
/// subscriber has already been installed globally.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    // First initialisation wins; later calls keep the recorded sha.
    let _ = BUILD_SHA.set(config.build_sha.to_string());

    let filter = build_env_filter(config.level)?;
    match config.output {
        LogOutput::Stdout => install(filter, config.format, io::stdout),
        LogOutput::Stderr => install(filter, config.format, io::stderr),
    }
}

fn install<W>(filter: EnvFilter, format: LogFormat, writer: W) -> Result<()>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let registry = tracing_subscriber::registry().with(filter);
    let installed = match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_target(false).with_writer(writer))
            .try_init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().with_target(false).with_writer(writer))
            .try_init(),
    };
    installed.map_err(|source| TelemetryError::SubscriberInstall { source })
}

/// Build identifier recorded by [`init_logging`], or `dev` before that.
#[must_use]
pub fn build_sha() -> &'static str {
    BUILD_SHA.get().map_or("dev", String::as_str)
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig<'a> {
    /// Filter directive used when `RUST_LOG` is unset (e.g. `info`, `cms_gate_api=debug`).
    pub level: &'a str,
    /// Output format.
    pub format: LogFormat,
    /// Stream receiving log lines.
    pub output: LogOutput,
    /// Build identifier recorded in structured logs.
    pub build_sha: &'a str,
}

impl Default for LoggingConfig<'_> {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL,
            format: LogFormat::infer(),
            output: LogOutput::Stdout,
            build_sha: option_env!("CMS_GATE_BUILD_SHA").unwrap_or("dev"),
        }
    }
}

/// Available output formats for the logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per event.
    Json,
    /// Human-readable lines.
    Pretty,
}

impl LogFormat {
    /// Pretty in debug builds, JSON otherwise.
    #[must_use]
    pub const fn infer() -> Self {
        if cfg!(debug_assertions) {
            Self::Pretty
        } else {
            Self::Json
        }
    }

    /// Parse a configured format name (`CMS_LOG_FORMAT`), falling back to [`LogFormat::infer`].
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("json") => Self::Json,
            Some("pretty") => Self::Pretty,
            _ => Self::infer(),
        }
    }
}

/// Stream the subscriber writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogOutput {
    /// Server default.
    #[default]
    Stdout,
    /// Keeps diagnostics apart from command output in the CLI.
    Stderr,
}

/// `RUST_LOG` wins when set and valid; otherwise `level` must parse.
fn build_env_filter(level: &str) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level).map_err(|source| TelemetryError::InvalidFilter {
        directive: level.to_string(),
        source,
    })
}
