//! Route tables for the tracking endpoints and the dashboard API.

use crate::api::handlers::{
    conversion_handler, create_link_handler, links_handler, offers_handler, payouts_handler,
    pixel_handler, redirect_handler, stats_handler, vanity_redirect_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Public tracking routes that must never be throttled.
///
/// # Endpoints
///
/// - `GET /r/{code}`              - Short-code redirect
/// - `GET /go/{affiliate}/{slug}` - Vanity redirect
/// - `GET /pixel`                 - Conversion pixel
pub fn tracking_routes() -> Router<AppState> {
    Router::new()
        .route("/r/{code}", get(redirect_handler))
        .route("/go/{affiliate}/{slug}", get(vanity_redirect_handler))
        .route("/pixel", get(pixel_handler))
}

/// Server-to-server conversion reports.
///
/// Not throttled: one advertiser backend reports every conversion from a
/// single address.
///
/// - `POST /convert`
pub fn conversion_routes() -> Router<AppState> {
    Router::new().route("/convert", post(conversion_handler))
}

/// Dashboard API, mounted under `/api`.
///
/// There is no per-caller authorization: anyone who can reach these routes
/// can read any affiliate's stats and payouts and create links for it, given
/// its code. The restricted database role is shared by every request, so row
/// level security cannot scope them either. Keep `/api` on a private network
/// or behind an authenticating proxy.
///
/// # Endpoints
///
/// - `GET  /offers`                     - Active offers
/// - `GET  /affiliates/{code}/stats`    - Daily stats and totals
/// - `GET  /affiliates/{code}/links`    - Links with totals (`?search=`)
/// - `POST /affiliates/{code}/links`    - Create a link
/// - `GET  /affiliates/{code}/payouts`  - Payout history
pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/offers", get(offers_handler))
        .route("/affiliates/{code}/stats", get(stats_handler))
        .route(
            "/affiliates/{code}/links",
            get(links_handler).post(create_link_handler),
        )
        .route("/affiliates/{code}/payouts", get(payouts_handler))
}
