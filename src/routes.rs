//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /r/{code}`              - Short-code redirect (never rate limited)
//! - `GET  /go/{affiliate}/{slug}` - Vanity redirect (never rate limited)
//! - `GET  /pixel`                 - Conversion pixel (never rate limited)
//! - `POST /convert`               - Server-to-server conversion (never rate limited)
//! - `GET  /health`                - Health check for both database roles
//! - `/api/*`                      - Dashboard API (rate limited)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (proxy-aware when configured)
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::api::routes::{conversion_routes, dashboard_routes, tracking_routes};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting keys on forwarding headers
///   instead of the peer socket address; enable only behind a trusted proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, behind_proxy))
}

/// The router without path normalization.
///
/// Rate-limited routes need the peer address, so serve with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn router(state: AppState, behind_proxy: bool) -> Router {
    let limited = Router::new().nest("/api", dashboard_routes());

    let limited = if behind_proxy {
        limited.layer(rate_limit::proxied_layer())
    } else {
        limited.layer(rate_limit::layer())
    };

    Router::new()
        .merge(tracking_routes())
        .merge(conversion_routes())
        .merge(limited)
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(tracing::layer())
}
