//! Tower layers around the router
//!
//! Outermost first: rate limit, request id, trace span, timeout, CORS.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, HeaderName, HeaderValue, Method, Request, StatusCode},
    Router,
};
use feed_common::{CorsConfig, RateLimitConfig};
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::GlobalKeyExtractor, GovernorLayer,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

use crate::state::AppState;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Inputs for [`apply_middleware`], borrowed from the loaded config
#[derive(Debug, Clone)]
pub struct MiddlewareConfig<'a> {
    pub rate_limit: &'a RateLimitConfig,
    pub cors: &'a CorsConfig,
    pub request_timeout: Duration,
    pub is_production: bool,
}

pub fn apply_middleware(router: Router<AppState>, config: &MiddlewareConfig<'_>) -> Router<AppState> {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let timeout =
        TimeoutLayer::with_status_code(StatusCode::SERVICE_UNAVAILABLE, config.request_timeout);
    let trace = TraceLayer::new_for_http()
        .make_span_with(request_span)
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    router
        .layer(cors_layer(config.cors, config.is_production))
        .layer(timeout)
        .layer(trace)
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
}

/// One span per request, tagged with the id set by the outer layer
fn request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id,
    )
}

/// Token bucket shared by every caller
///
/// A zero rate or burst cannot build a limiter; the router is then served
/// without one.
pub fn apply_rate_limit(router: Router<AppState>, config: &RateLimitConfig) -> Router<AppState> {
    let built = GovernorConfigBuilder::default()
        .per_second(u64::from(config.requests_per_second))
        .burst_size(config.burst)
        .key_extractor(GlobalKeyExtractor)
        .finish();

    let Some(governor) = built else {
        tracing::warn!(
            requests_per_second = config.requests_per_second,
            burst = config.burst,
            "Rate limiter disabled: invalid configuration"
        );
        return router;
    };

    router.layer(GovernorLayer {
        config: Arc::new(governor),
    })
}

fn cors_layer(config: &CorsConfig, is_production: bool) -> CorsLayer {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            request_id.clone(),
        ])
        .expose_headers([request_id])
        .allow_origin(allowed_origins(&config.allowed_origins, is_production))
}

/// Configured origins win; with none, production blocks cross-origin
/// requests and other environments accept any origin
fn allowed_origins(origins: &[String], is_production: bool) -> AllowOrigin {
    if origins.is_empty() {
        return if is_production {
            tracing::warn!("No CORS origins configured; cross-origin requests are blocked");
            AllowOrigin::list(Vec::<HeaderValue>::new())
        } else {
            AllowOrigin::any()
        };
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Skipping malformed CORS origin");
                None
            }
        })
        .collect();
    AllowOrigin::list(parsed)
}
