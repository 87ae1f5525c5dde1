//! Authorization middleware for the protected CMS routes.

use std::sync::Arc;

use axum::{extract::State, http::Request, middleware::Next, response::Response};
use cms_gate_telemetry::record_provider_mode;
use tracing::{debug, warn};

use crate::http::errors::ApiError;
use crate::state::ApiState;

/// Reject requests the configured backend provider does not authorize.
///
/// No `WWW-Authenticate` challenge is sent, so browsers never show their native prompt;
/// the admin UI drives login itself.
pub(crate) async fn require_authorization(
    State(state): State<Arc<ApiState>>,
    req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let provider = state.provider.name();
    record_provider_mode(provider);

    if !state.provider.is_authorized(req.headers()).await {
        warn!(
            provider,
            method = %req.method(),
            path = %req.uri().path(),
            "rejected unauthorized cms request"
        );
        return Err(ApiError::unauthorized(
            "valid admin credentials are required",
        ));
    }

    debug!(provider, path = %req.uri().path(), "authorized cms request");
    Ok(next.run(req).await)
}
