//! Router construction and server host for the gate.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{Method, Request, header::AUTHORIZATION, header::CONTENT_TYPE},
    middleware,
    routing::{any, get},
};
use cms_gate_telemetry::build_sha;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{Span, info};
use url::Url;

use crate::error::{ApiServerError, ApiServerResult};
use crate::http::auth::require_authorization;
use crate::http::constants::{HEADER_REQUEST_ID, MAX_FORWARD_BODY_BYTES};
use crate::http::forward::{Forwarder, forward};
use crate::http::health::{health, session};
use crate::provider::BackendAuthProvider;
use crate::state::ApiState;

/// Axum router wrapper hosting the gate in front of the CMS API.
pub struct ApiServer {
    router: Router,
}

impl ApiServer {
    /// Build the router around `provider`, forwarding authorized CMS calls to `upstream`.
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream HTTP client cannot be constructed.
    pub fn new(
        provider: Arc<dyn BackendAuthProvider>,
        upstream: Option<Url>,
    ) -> ApiServerResult<Self> {
        let upstream = upstream.map(Forwarder::new).transpose()?;
        let state = Arc::new(ApiState::new(provider, upstream));

        let cors_layer = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([CONTENT_TYPE, AUTHORIZATION]);
        let trace_layer = TraceLayer::new_for_http()
            .make_span_with(|request: &Request<_>| {
                let request_id = request
                    .headers()
                    .get(HEADER_REQUEST_ID)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("")
                    .to_string();
                tracing::info_span!(
                    "http.request",
                    method = %request.method(),
                    route = %request.uri().path(),
                    request_id = %request_id,
                    provider = tracing::field::Empty,
                    build_sha = %build_sha(),
                    status_code = tracing::field::Empty,
                    latency_ms = tracing::field::Empty
                )
            })
            .on_request(|_request: &Request<_>, _span: &Span| {})
            .on_response(
                |response: &axum::response::Response, latency: Duration, span: &Span| {
                    span.record("status_code", response.status().as_u16());
                    let latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
                    span.record("latency_ms", latency_ms);
                },
            );
        // Set before propagate so generated ids are echoed on the response too.
        let layered = ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(trace_layer);

        let router = Self::public_routes()
            .merge(Self::cms_routes(&state))
            .layer(cors_layer)
            .layer(layered)
            .with_state(state);

        Ok(Self { router })
    }

    fn public_routes() -> Router<Arc<ApiState>> {
        Router::new().route("/health", get(health))
    }

    fn cms_routes(state: &Arc<ApiState>) -> Router<Arc<ApiState>> {
        Router::new()
            .route("/api/cms/session", get(session))
            .route(
                "/api/cms/{*path}",
                any(forward).layer(DefaultBodyLimit::max(MAX_FORWARD_BODY_BYTES)),
            )
            .route_layer(middleware::from_fn_with_state(
                Arc::clone(state),
                require_authorization,
            ))
    }

    /// Consume the server and return the underlying router.
    #[must_use]
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Serve the gate on `addr` until the listener fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot bind or the server terminates unexpectedly.
    pub async fn serve(self, addr: SocketAddr) -> ApiServerResult<()> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ApiServerError::Bind { addr, source })?;
        info!(%addr, "cms gate listening");
        axum::serve(listener, self.router.into_make_service())
            .await
            .map_err(|source| ApiServerError::Serve { source })
    }
}
