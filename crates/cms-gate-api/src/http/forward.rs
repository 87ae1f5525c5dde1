//! Forwarding of authorized CMS requests to the configured upstream.
//!
//! # Design
//! - Method, path below `/api/cms/`, query, body and end-to-end headers are preserved.
//! - The path is taken from the raw request URI and stays percent-encoded. Segments that
//!   could climb out of the upstream base (dot segments, encoded separators) are refused.
//! - Upstream redirects are relayed to the caller, never followed.
//! - Hop-by-hop headers, `host`, and the gate's own `authorization` header stay behind.
//! - Without an upstream the catch-all route answers with a `404` problem.

use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    extract::{State, rejection::BytesRejection},
    http::{HeaderMap, HeaderName, Method, StatusCode, Uri, header},
    response::Response,
};
use tracing::{debug, warn};
use url::Url;

use crate::error::{ApiServerError, ApiServerResult};
use crate::http::constants::{CMS_ROUTE_PREFIX, HOP_BY_HOP_HEADERS};
use crate::http::errors::ApiError;
use crate::state::ApiState;

/// Upstream CMS backend plus the client used to reach it.
pub(crate) struct Forwarder {
    client: reqwest::Client,
    base: Url,
}

impl Forwarder {
    pub(crate) fn new(base: Url) -> ApiServerResult<Self> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|source| ApiServerError::HttpClient { source })?;
        Ok(Self { client, base })
    }

    /// Target for the encoded `path` (relative to `/api/cms/`) under the upstream base path.
    pub(crate) fn target(&self, path: &str, query: Option<&str>) -> Url {
        let mut url = self.base.clone();
        let prefix = url.path().trim_end_matches('/').to_string();
        url.set_path(&format!("{prefix}/{}", path.trim_start_matches('/')));
        url.set_query(query);
        url
    }
}

pub(crate) async fn forward(
    State(state): State<Arc<ApiState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    let Some(upstream) = state.upstream.as_ref() else {
        return Err(ApiError::not_found(format!(
            "no upstream configured for {}",
            uri.path()
        )));
    };

    let relative = relative_path(uri.path())?;
    let body = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::payload_too_large("request body exceeds the forwarding limit")
        } else {
            ApiError::bad_request(format!(
                "failed to read request body: {}",
                rejection.body_text()
            ))
        }
    })?;
    let target = upstream.target(relative, uri.query());

    debug!(method = %method, target = %target, "forwarding cms request");
    let upstream_response = upstream
        .client
        .request(method, target.clone())
        .headers(end_to_end(&headers, true))
        .body(body)
        .send()
        .await
        .map_err(|err| {
            warn!(error = %err, target = %target, "upstream request failed");
            ApiError::bad_gateway("upstream request failed")
        })?;

    let status = upstream_response.status();
    let headers = end_to_end(upstream_response.headers(), false);
    let bytes = upstream_response.bytes().await.map_err(|err| {
        warn!(error = %err, target = %target, "failed to read upstream response");
        ApiError::bad_gateway("failed to read upstream response")
    })?;

    let mut response = Response::builder()
        .status(status)
        .body(Body::from(bytes))
        .map_err(|_| ApiError::internal("failed to build forwarded response"))?;
    *response.headers_mut() = headers;
    Ok(response)
}

/// Encoded path below [`CMS_ROUTE_PREFIX`], refused when any segment could leave the
/// upstream base once joined or decoded.
fn relative_path(path: &str) -> Result<&str, ApiError> {
    let relative = path
        .strip_prefix(CMS_ROUTE_PREFIX)
        .ok_or_else(|| ApiError::not_found(format!("{path} is not a cms route")))?;
    if relative.split('/').any(escapes_base) {
        warn!(path, "refusing cms path that leaves the upstream base");
        return Err(ApiError::bad_request(
            "cms paths may not contain dot segments or encoded separators",
        ));
    }
    Ok(relative)
}

fn escapes_base(segment: &str) -> bool {
    let lowered = segment.to_ascii_lowercase();
    if lowered.contains("%2f") || lowered.contains("%5c") || lowered.contains('\\') {
        return true;
    }
    matches!(lowered.replace("%2e", ".").as_str(), "." | "..")
}

/// Copy `headers` without hop-by-hop entries; request copies also drop host, length and
/// the gate's credentials.
fn end_to_end(headers: &HeaderMap, outbound: bool) -> HeaderMap {
    let mut forwarded = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if is_hop_by_hop(name) || name == header::CONTENT_LENGTH {
            continue;
        }
        if outbound && (name == header::HOST || name == header::AUTHORIZATION) {
            continue;
        }
        forwarded.append(name.clone(), value.clone());
    }
    forwarded
}

fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP_HEADERS.contains(&name.as_str())
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue, header};
    use url::Url;

    use super::{Forwarder, end_to_end, relative_path};

    #[test]
    fn target_joins_under_base_path() -> anyhow::Result<()> {
        let forwarder = Forwarder::new(Url::parse("http://cms.internal:4001/backend/")?)?;
        assert_eq!(
            forwarder.target("entries/42", Some("draft=true")).as_str(),
            "http://cms.internal:4001/backend/entries/42?draft=true"
        );

        let forwarder = Forwarder::new(Url::parse("http://cms.internal:4001")?)?;
        assert_eq!(
            forwarder.target("entries", None).as_str(),
            "http://cms.internal:4001/entries"
        );
        Ok(())
    }

    #[test]
    fn target_keeps_percent_encoding() -> anyhow::Result<()> {
        let forwarder = Forwarder::new(Url::parse("http://cms.internal:4001/backend/")?)?;
        assert_eq!(
            forwarder.target("entries/a%20b", None).as_str(),
            "http://cms.internal:4001/backend/entries/a%20b"
        );
        Ok(())
    }

    #[test]
    fn relative_path_refuses_escaping_segments() {
        assert_eq!(
            relative_path("/api/cms/entries/42").ok(),
            Some("entries/42")
        );
        assert_eq!(
            relative_path("/api/cms/entries/a%20b").ok(),
            Some("entries/a%20b")
        );
        for path in [
            "/api/cms/../admin",
            "/api/cms/entries/./42",
            "/api/cms/%2e%2e/admin",
            "/api/cms/.%2E/admin",
            "/api/cms/..%2F..%2Fadmin%2Fsecret",
            "/api/cms/a%2fb",
            "/api/cms/a%5Cb",
        ] {
            assert!(relative_path(path).is_err(), "{path} should be refused");
        }
        assert!(relative_path("/elsewhere").is_err());
    }

    #[test]
    fn outbound_headers_drop_credentials_and_hop_by_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic x"));
        headers.insert(header::HOST, HeaderValue::from_static("gate"));
        headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("3"));
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert("x-cms-locale", HeaderValue::from_static("en"));

        let outbound = end_to_end(&headers, true);
        assert_eq!(outbound.len(), 2);
        assert!(outbound.contains_key(header::ACCEPT));
        assert!(outbound.contains_key("x-cms-locale"));

        let inbound = end_to_end(&headers, false);
        assert!(inbound.contains_key(header::AUTHORIZATION));
        assert!(!inbound.contains_key(header::CONNECTION));
    }
}
