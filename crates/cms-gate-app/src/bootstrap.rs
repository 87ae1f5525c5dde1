use cms_gate_api::{ApiServer, backend_provider_for};
use cms_gate_config::{Environment, GateConfig};
use cms_gate_telemetry::{GlobalContextGuard, LogFormat, LoggingConfig, record_provider_mode};
use tracing::info;

use crate::error::{AppError, AppResult};

/// Dependencies required to bootstrap the gate.
pub(crate) struct BootstrapDependencies {
    logging: LoggingConfig<'static>,
    env: Environment,
    config: GateConfig,
}

impl BootstrapDependencies {
    /// Snapshot the process environment and derive the gate configuration from it.
    pub(crate) fn from_env() -> AppResult<Self> {
        Self::from_environment(Environment::from_process())
    }

    pub(crate) fn from_environment(env: Environment) -> AppResult<Self> {
        let config = GateConfig::from_env(&env)
            .map_err(|err| AppError::config("gate_config.from_env", err))?;
        let logging = LoggingConfig {
            format: LogFormat::parse(config.log_format.as_deref()),
            ..LoggingConfig::default()
        };
        Ok(Self {
            logging,
            env,
            config,
        })
    }
}

/// Entry point for the gate boot sequence.
///
/// # Errors
///
/// Returns an error if configuration is invalid, logging cannot be installed, or the
/// server fails to bind or serve.
pub async fn run_app() -> AppResult<()> {
    let dependencies = BootstrapDependencies::from_env()?;
    run_app_with(dependencies).await
}

pub(crate) async fn run_app_with(dependencies: BootstrapDependencies) -> AppResult<()> {
    cms_gate_telemetry::init_logging(&dependencies.logging)
        .map_err(|err| AppError::telemetry("telemetry.init", err))?;
    let _context = GlobalContextGuard::new(dependencies.config.provider.as_str());

    let server = build_server(&dependencies.config, &dependencies.env)?;
    info!(
        bind_addr = %dependencies.config.bind_addr,
        runtime = dependencies.config.runtime.as_str(),
        upstream = dependencies
            .config
            .upstream_url
            .as_ref()
            .map_or("none", url::Url::as_str),
        "cms gate bootstrap complete"
    );

    server
        .serve(dependencies.config.bind_addr)
        .await
        .map_err(|err| AppError::api_server("api_server.serve", err))
}

pub(crate) fn build_server(config: &GateConfig, env: &Environment) -> AppResult<ApiServer> {
    let provider = backend_provider_for(config, env);
    record_provider_mode(provider.name());
    ApiServer::new(provider, config.upstream_url.clone())
        .map_err(|err| AppError::api_server("api_server.new", err))
}

#[cfg(test)]
mod tests {
    use cms_gate_config::{Environment, ProviderMode};
    use cms_gate_telemetry::LogFormat;

    use super::{BootstrapDependencies, build_server};
    use crate::error::AppError;

    #[test]
    fn dependencies_follow_environment() -> anyhow::Result<()> {
        let deps = BootstrapDependencies::from_environment(Environment::from_pairs([
            ("CMS_LOCAL_MODE", "true"),
            ("CMS_LOG_FORMAT", "json"),
            ("CMS_BIND_ADDR", "127.0.0.1:0"),
        ]))?;
        assert_eq!(deps.config.provider, ProviderMode::Local);
        assert_eq!(deps.logging.format, LogFormat::Json);
        build_server(&deps.config, &deps.env)?;
        Ok(())
    }

    #[test]
    fn invalid_configuration_is_reported() {
        let err = BootstrapDependencies::from_environment(Environment::from_pairs([(
            "CMS_BIND_ADDR",
            "not-an-address",
        )]))
        .err()
        .expect("invalid bind address");
        assert!(matches!(
            err,
            AppError::Config {
                operation: "gate_config.from_env",
                ..
            }
        ));
    }
}
