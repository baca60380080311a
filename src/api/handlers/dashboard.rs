//! Handlers for the affiliate dashboard API.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use chrono::Utc;
use validator::Validate;

use crate::api::dto::links::{CreateLinkRequest, LinkResponse, LinkSummaryResponse, LinksQuery};
use crate::api::dto::offers::{OfferResponse, PayoutResponse};
use crate::api::dto::stats::{StatsQuery, StatsResponse};
use crate::domain::entities::DateRange;
use crate::error::AppError;
use crate::state::AppState;

/// Days covered by the stats endpoint when no range is given.
pub const DEFAULT_STATS_DAYS: i64 = 30;

/// Lists active offers.
///
/// # Endpoint
///
/// `GET /api/offers`
pub async fn offers_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<OfferResponse>>, AppError> {
    let offers = state.dashboard_service.active_offers().await?;
    Ok(Json(offers.into_iter().map(OfferResponse::from).collect()))
}

/// Daily statistics with totals for one affiliate.
///
/// # Endpoint
///
/// `GET /api/affiliates/{code}/stats?from=YYYY-MM-DD&to=YYYY-MM-DD`
///
/// Without `from`/`to` the last 30 days (UTC, including today) are used. A
/// single bound is completed from the default window.
///
/// # Errors
///
/// - 400 if a date is malformed, `from` is after `to`, or the range exceeds 366 days
/// - 404 if the affiliate does not exist
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
    query: Result<Query<StatsQuery>, QueryRejection>,
) -> Result<Json<StatsResponse>, AppError> {
    let Query(query) = query?;

    let today = Utc::now().date_naive();
    let default = DateRange::last_days(today, DEFAULT_STATS_DAYS);
    let range = DateRange::new(
        query.from.unwrap_or(default.from),
        query.to.unwrap_or(default.to),
    )?;

    let overview = state.dashboard_service.overview(&code, range).await?;
    Ok(Json(overview.into()))
}

/// Lists an affiliate's links with lifetime totals.
///
/// # Endpoint
///
/// `GET /api/affiliates/{code}/links?search=term`
pub async fn links_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(query): Query<LinksQuery>,
) -> Result<Json<Vec<LinkSummaryResponse>>, AppError> {
    let links = state
        .dashboard_service
        .links(&code, query.search.as_deref())
        .await?;

    Ok(Json(links.into_iter().map(LinkSummaryResponse::from).collect()))
}

/// Creates a tracking link for an active offer.
///
/// # Endpoint
///
/// `POST /api/affiliates/{code}/links`
///
/// # Request Body
///
/// ```json
/// { "offer_id": "7d3f2a1e-9c4b-4e8a-b1d2-0f5e6a7b8c9d", "name": "IG bio" }
/// ```
///
/// # Errors
///
/// - 400 if the body is invalid, the name is too long, or the offer is
///   unknown or inactive
/// - 404 if the affiliate does not exist
pub async fn create_link_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let link = state
        .dashboard_service
        .create_link(&code, payload.offer_id, payload.name)
        .await?;

    Ok((StatusCode::CREATED, Json(link.into())))
}

/// Lists an affiliate's payouts, most recent first.
///
/// # Endpoint
///
/// `GET /api/affiliates/{code}/payouts`
pub async fn payouts_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Vec<PayoutResponse>>, AppError> {
    let payouts = state.dashboard_service.payouts(&code).await?;
    Ok(Json(payouts.into_iter().map(PayoutResponse::from).collect()))
}
