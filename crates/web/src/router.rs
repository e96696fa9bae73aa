//! The HTTP surface of the portal: health check, `/api/v1` tree and the
//! tower-http layers wrapped around them. `main.rs` and the integration
//! tests both go through [`build_app_router`].

use std::time::Duration;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, StatusCode};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::routes;
use crate::state::AppState;

/// How long browsers may cache a preflight answer.
const CORS_MAX_AGE_SECS: u64 = 10 * 60;

/// Assemble the portal router.
///
/// A request meets the layers outermost first: CORS, request id assignment,
/// the trace span, id echo on the reply, gzip, the per-request deadline and
/// finally the panic guard closest to the handlers.
pub fn build_app_router(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config);
    let request_timeout = Duration::from_secs(state.config.request_timeout_secs);
    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        // Load balancers hit `/health` without the version prefix.
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        // A panicking handler becomes a plain 500.
        .layer(CatchPanicLayer::new())
        // Slow backend calls are cut off here.
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        // Gzip listings for slow mobile connections.
        .layer(CompressionLayer::new())
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Callers may supply their own id; one is minted otherwise.
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// CORS for the configured front-end origins.
///
/// # Panics
///
/// On an origin that is not a valid header value. Only called at startup.
pub fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .map(|origin| {
            origin
                .parse()
                .unwrap_or_else(|e| panic!("CORS_ORIGINS entry '{origin}' is not usable: {e}"))
        })
        .collect();

    // Credentials are allowed so the session cookie crosses origins.
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(CORS_MAX_AGE_SECS))
}
