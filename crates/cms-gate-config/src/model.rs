//! Typed configuration models and credential resolution.

use std::net::SocketAddr;

use cms_gate_core::Credentials;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::defaults::{
    DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME, DEFAULT_BIND_ADDR, ENV_ADMIN_PASSWORD,
    ENV_ADMIN_USERNAME, ENV_BIND_ADDR, ENV_LOCAL_MODE, ENV_LOG_FORMAT, ENV_RUNTIME_MODE,
    ENV_UPSTREAM_URL,
};
use crate::env::Environment;
use crate::error::{ConfigError, ConfigResult};

/// Explicit Basic Auth settings handed to the backend provider.
///
/// Unset or empty fields fall back to the environment, then to hardcoded defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicAuthConfig {
    /// Expected username.
    pub username: Option<String>,
    /// Expected password.
    pub password: Option<String>,
}

impl BasicAuthConfig {
    /// Resolve the expected credential pair.
    ///
    /// Order: explicit value > environment variable > fallback. Empty strings are
    /// treated as unset at every level.
    #[must_use]
    pub fn resolve(&self, env: &Environment) -> ResolvedCredentials {
        let username = pick(
            self.username.as_deref(),
            env.non_empty(ENV_ADMIN_USERNAME),
            DEFAULT_ADMIN_USERNAME,
        );
        let password = pick(
            self.password.as_deref(),
            env.non_empty(ENV_ADMIN_PASSWORD),
            DEFAULT_ADMIN_PASSWORD,
        );
        ResolvedCredentials {
            credentials: Credentials::new(username, password),
            runtime: RuntimeMode::from_env(env),
        }
    }
}

fn pick<'a>(explicit: Option<&'a str>, env: Option<&'a str>, fallback: &'a str) -> &'a str {
    explicit
        .filter(|value| !value.is_empty())
        .or(env)
        .unwrap_or(fallback)
}

/// Expected credentials together with the runtime mode they were resolved under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCredentials {
    /// Expected credential pair.
    pub credentials: Credentials,
    /// Runtime mode at resolution time.
    pub runtime: RuntimeMode,
}

impl ResolvedCredentials {
    /// Whether a production runtime is running with an empty password.
    #[must_use]
    pub fn password_missing_in_production(&self) -> bool {
        self.credentials.password.is_empty() && matches!(self.runtime, RuntimeMode::Production)
    }
}

/// Deployment mode of the running process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeMode {
    /// Local development or test runs.
    #[default]
    Development,
    /// Production deployments.
    Production,
}

impl RuntimeMode {
    /// Read the runtime mode; anything other than `production` is development.
    #[must_use]
    pub fn from_env(env: &Environment) -> Self {
        match env.get(ENV_RUNTIME_MODE) {
            Some("production") => Self::Production,
            _ => Self::Development,
        }
    }

    #[must_use]
    /// Render the mode as its lowercase string representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

/// Which provider pair guards the admin surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderMode {
    /// HTTP Basic Auth against the configured credential pair.
    #[default]
    Basic,
    /// Local development: every request is authorized.
    Local,
}

impl ProviderMode {
    #[must_use]
    /// Render the mode as its lowercase string representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Local => "local",
        }
    }
}

/// Complete configuration for the gate server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    /// Selected provider pair.
    pub provider: ProviderMode,
    /// Runtime mode.
    pub runtime: RuntimeMode,
    /// Explicit credential settings taken from the environment.
    pub auth: BasicAuthConfig,
    /// Listen address for the HTTP server.
    pub bind_addr: SocketAddr,
    /// CMS backend that authorized requests are forwarded to.
    pub upstream_url: Option<Url>,
    /// Requested log format, if any.
    pub log_format: Option<String>,
}

impl GateConfig {
    /// Load the gate configuration from an environment snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error when the bind address, upstream URL, or local-mode toggle is
    /// malformed.
    pub fn from_env(env: &Environment) -> ConfigResult<Self> {
        let provider = if parse_toggle(env, ENV_LOCAL_MODE)? {
            ProviderMode::Local
        } else {
            ProviderMode::Basic
        };

        let bind_raw = env.non_empty(ENV_BIND_ADDR).unwrap_or(DEFAULT_BIND_ADDR);
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::InvalidBindAddr {
                value: bind_raw.to_string(),
                source,
            })?;

        let upstream_url = env
            .non_empty(ENV_UPSTREAM_URL)
            .map(parse_upstream)
            .transpose()?;

        Ok(Self {
            provider,
            runtime: RuntimeMode::from_env(env),
            auth: BasicAuthConfig {
                username: env.non_empty(ENV_ADMIN_USERNAME).map(str::to_string),
                password: env.non_empty(ENV_ADMIN_PASSWORD).map(str::to_string),
            },
            bind_addr,
            upstream_url,
            log_format: env.non_empty(ENV_LOG_FORMAT).map(str::to_string),
        })
    }
}

fn parse_upstream(raw: &str) -> ConfigResult<Url> {
    let url = Url::parse(raw).map_err(|source| ConfigError::InvalidUpstreamUrl {
        value: raw.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::UnsupportedUpstreamScheme {
            scheme: other.to_string(),
        }),
    }
}

fn parse_toggle(env: &Environment, name: &'static str) -> ConfigResult<bool> {
    match env.get(name).map(str::trim) {
        None | Some("" | "false" | "0" | "no") => Ok(false),
        Some("true" | "1" | "yes") => Ok(true),
        Some(other) => Err(ConfigError::InvalidToggle {
            name,
            value: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_values_win_over_environment() {
        let env = Environment::from_pairs([
            (ENV_ADMIN_USERNAME, "env-user"),
            (ENV_ADMIN_PASSWORD, "env-pass"),
        ]);
        let config = BasicAuthConfig {
            username: Some("explicit".to_string()),
            password: Some("hunter2".to_string()),
        };
        let resolved = config.resolve(&env);
        assert_eq!(resolved.credentials, Credentials::new("explicit", "hunter2"));
    }

    #[test]
    fn environment_fills_missing_or_empty_explicit_values() {
        let env = Environment::from_pairs([
            (ENV_ADMIN_USERNAME, "env-user"),
            (ENV_ADMIN_PASSWORD, "env-pass"),
        ]);
        let config = BasicAuthConfig {
            username: Some(String::new()),
            password: None,
        };
        let resolved = config.resolve(&env);
        assert_eq!(resolved.credentials, Credentials::new("env-user", "env-pass"));
    }

    #[test]
    fn fallbacks_apply_when_nothing_is_configured() {
        let env = Environment::from_pairs([(ENV_ADMIN_USERNAME, "")]);
        let resolved = BasicAuthConfig::default().resolve(&env);
        assert_eq!(resolved.credentials, Credentials::new("admin", ""));
        assert!(!resolved.password_missing_in_production());
    }

    #[test]
    fn empty_password_is_flagged_only_in_production() {
        let prod = Environment::from_pairs([(ENV_RUNTIME_MODE, "production")]);
        let resolved = BasicAuthConfig::default().resolve(&prod);
        assert_eq!(resolved.runtime, RuntimeMode::Production);
        assert!(resolved.password_missing_in_production());

        let with_password = BasicAuthConfig {
            username: None,
            password: Some("secret".to_string()),
        }
        .resolve(&prod);
        assert!(!with_password.password_missing_in_production());
    }

    #[test]
    fn runtime_mode_defaults_to_development() {
        let env = Environment::from_pairs([(ENV_RUNTIME_MODE, "staging")]);
        assert_eq!(RuntimeMode::from_env(&env), RuntimeMode::Development);
        assert_eq!(RuntimeMode::Production.as_str(), "production");
    }

    #[test]
    fn gate_config_uses_defaults() {
        let config = GateConfig::from_env(&Environment::default()).expect("config");
        assert_eq!(config.provider, ProviderMode::Basic);
        assert_eq!(config.runtime, RuntimeMode::Development);
        assert_eq!(config.bind_addr, "0.0.0.0:3000".parse().expect("addr"));
        assert_eq!(config.upstream_url, None);
        assert_eq!(config.auth, BasicAuthConfig::default());
        assert_eq!(config.log_format, None);
    }

    #[test]
    fn gate_config_reads_every_variable() {
        let env = Environment::from_pairs([
            (ENV_LOCAL_MODE, "true"),
            (ENV_RUNTIME_MODE, "production"),
            (ENV_ADMIN_USERNAME, "editor"),
            (ENV_ADMIN_PASSWORD, "hunter2"),
            (ENV_BIND_ADDR, "127.0.0.1:8080"),
            (ENV_UPSTREAM_URL, "http://cms.internal:4001/"),
            (ENV_LOG_FORMAT, "json"),
        ]);
        let config = GateConfig::from_env(&env).expect("config");
        assert_eq!(config.provider, ProviderMode::Local);
        assert_eq!(config.provider.as_str(), "local");
        assert_eq!(config.runtime, RuntimeMode::Production);
        assert_eq!(config.auth.username.as_deref(), Some("editor"));
        assert_eq!(config.auth.password.as_deref(), Some("hunter2"));
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(
            config.upstream_url.as_ref().map(Url::as_str),
            Some("http://cms.internal:4001/")
        );
        assert_eq!(config.log_format.as_deref(), Some("json"));
    }

    #[test]
    fn gate_config_rejects_malformed_values() {
        let bad_addr = Environment::from_pairs([(ENV_BIND_ADDR, "localhost")]);
        assert!(matches!(
            GateConfig::from_env(&bad_addr),
            Err(ConfigError::InvalidBindAddr { .. })
        ));

        let bad_url = Environment::from_pairs([(ENV_UPSTREAM_URL, "not a url")]);
        assert!(matches!(
            GateConfig::from_env(&bad_url),
            Err(ConfigError::InvalidUpstreamUrl { .. })
        ));

        let bad_scheme = Environment::from_pairs([(ENV_UPSTREAM_URL, "ftp://cms.internal")]);
        assert!(matches!(
            GateConfig::from_env(&bad_scheme),
            Err(ConfigError::UnsupportedUpstreamScheme { scheme }) if scheme == "ftp"
        ));

        let bad_toggle = Environment::from_pairs([(ENV_LOCAL_MODE, "sometimes")]);
        assert!(matches!(
            GateConfig::from_env(&bad_toggle),
            Err(ConfigError::InvalidToggle { name: ENV_LOCAL_MODE, .. })
        ));
    }
}
