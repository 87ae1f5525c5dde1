//! Payloads returned by the gate's own endpoints.

use serde::{Deserialize, Serialize};

/// RFC 9457 problem document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProblemDetails {
    /// Problem type URI.
    #[serde(rename = "type")]
    pub kind: String,
    /// Short summary of the problem type.
    pub title: String,
    /// HTTP status code.
    pub status: u16,
    /// Occurrence-specific explanation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Liveness probe payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    /// Always `ok` while the process serves requests.
    pub status: String,
    /// Active backend provider.
    pub provider: String,
    /// Build identifier.
    pub build: String,
}

/// Result of an authorized session probe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionResponse {
    /// Provider that accepted the request.
    pub provider: String,
    /// Always `true`; unauthorized probes receive a problem document instead.
    pub authorized: bool,
}
