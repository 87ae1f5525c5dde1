//! Startup and serving failures of the gate binary.
//!
//! Each variant names the stage that failed and keeps the underlying error as its source,
//! so `main` can report the full chain once.

use cms_gate_api::ApiServerError;
use cms_gate_config::ConfigError;
use cms_gate_telemetry::TelemetryError;
use thiserror::Error;

/// Result alias for the gate binary.
pub type AppResult<T> = Result<T, AppError>;

/// Failure while bootstrapping or running the gate.
#[derive(Debug, Error)]
pub enum AppError {
    /// Environment could not be turned into a gate configuration.
    #[error("gate configuration is invalid")]
    Config {
        /// Stage that was loading configuration.
        operation: &'static str,
        /// Underlying configuration error.
        source: ConfigError,
    },
    /// Logging could not be installed.
    #[error("logging setup failed")]
    Telemetry {
        /// Stage that was installing logging.
        operation: &'static str,
        /// Underlying telemetry error.
        source: TelemetryError,
    },
    /// Building or serving the HTTP router failed.
    #[error("gate server stopped")]
    ApiServer {
        /// Stage of the server lifecycle.
        operation: &'static str,
        /// Underlying server error.
        source: ApiServerError,
    },
}

impl AppError {
    pub(crate) const fn config(operation: &'static str, source: ConfigError) -> Self {
        Self::Config { operation, source }
    }

    pub(crate) const fn telemetry(operation: &'static str, source: TelemetryError) -> Self {
        Self::Telemetry { operation, source }
    }

    pub(crate) const fn api_server(operation: &'static str, source: ApiServerError) -> Self {
        Self::ApiServer { operation, source }
    }
}
