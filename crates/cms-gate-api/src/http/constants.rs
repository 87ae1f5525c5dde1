//! Shared HTTP constants (headers, problem URIs, limits).

pub(crate) const HEADER_REQUEST_ID: &str = "x-request-id";
pub(crate) const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";

pub(crate) const PROBLEM_INTERNAL: &str = "https://cms-gate.dev/problems/internal";
pub(crate) const PROBLEM_UNAUTHORIZED: &str = "https://cms-gate.dev/problems/unauthorized";
pub(crate) const PROBLEM_BAD_REQUEST: &str = "https://cms-gate.dev/problems/bad-request";
pub(crate) const PROBLEM_NOT_FOUND: &str = "https://cms-gate.dev/problems/not-found";
pub(crate) const PROBLEM_BAD_GATEWAY: &str = "https://cms-gate.dev/problems/bad-gateway";
pub(crate) const PROBLEM_PAYLOAD_TOO_LARGE: &str = "https://cms-gate.dev/problems/payload-too-large";

/// Prefix of the forwarded CMS routes; everything after it is relative to the upstream base.
pub(crate) const CMS_ROUTE_PREFIX: &str = "/api/cms/";

pub(crate) const MAX_FORWARD_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Headers that describe a single connection and are never forwarded.
pub(crate) const HOP_BY_HOP_HEADERS: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];
