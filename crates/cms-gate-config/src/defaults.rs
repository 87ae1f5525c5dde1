//! Environment variable names and fallback values.
//!
//! # Design
//! - Centralize names so the server, CLI, and tests agree on the configuration surface.
//! - Keep credential fallbacks explicit; the empty password is intentionally permissive.

/// Admin username variable.
pub const ENV_ADMIN_USERNAME: &str = "CMS_ADMIN_USERNAME";
/// Admin password variable.
pub const ENV_ADMIN_PASSWORD: &str = "CMS_ADMIN_PASSWORD";
/// Runtime mode variable (`production` enables the empty-password warning).
pub const ENV_RUNTIME_MODE: &str = "CMS_ENV";
/// Toggle selecting the local (unauthenticated) providers.
pub const ENV_LOCAL_MODE: &str = "CMS_LOCAL_MODE";
/// Listen address for the gate server.
pub const ENV_BIND_ADDR: &str = "CMS_BIND_ADDR";
/// Upstream CMS backend that authorized requests are forwarded to.
pub const ENV_UPSTREAM_URL: &str = "CMS_UPSTREAM_URL";
/// Log output format (`json` or `pretty`).
pub const ENV_LOG_FORMAT: &str = "CMS_LOG_FORMAT";
/// Session store used by the CLI.
pub const ENV_SESSION_FILE: &str = "CMS_SESSION_FILE";

/// Username used when neither explicit config nor the environment provides one.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
/// Password used when neither explicit config nor the environment provides one.
pub const DEFAULT_ADMIN_PASSWORD: &str = "";
/// Default listen address for the gate server.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
/// Default CLI session store location.
pub const DEFAULT_SESSION_FILE: &str = ".cms-gate/session.json";
