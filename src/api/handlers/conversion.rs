//! Handler for server-to-server conversion reports.

use axum::{Json, body::Bytes, extract::State};
use serde_json::json;

use crate::api::dto::conversion::{ConversionAccepted, parse_conversion_body};
use crate::error::AppError;
use crate::state::AppState;

/// Records a conversion reported by an advertiser's backend.
///
/// # Endpoint
///
/// `POST /convert`
///
/// # Request Body
///
/// ```json
/// {
///   "link_id": "7d3f2a1e-9c4b-4e8a-b1d2-0f5e6a7b8c9d",
///   "session_id": "c0a8...",
///   "revenue_cents": 4999,
///   "external_order_id": "order-77",
///   "currency": "EUR",
///   "meta": { "sku": "A-1" }
/// }
/// ```
///
/// A body that is not a JSON object is treated as `{}`.
///
/// # Errors
///
/// - 400 if `link_id` or `session_id` is missing, `link_id` is not a UUID, or
///   a field has the wrong type
/// - 500 if the conversion cannot be stored
pub async fn conversion_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ConversionAccepted>, AppError> {
    let request = parse_conversion_body(&body).map_err(|e| {
        AppError::bad_request("Invalid field type", json!({ "reason": e.to_string() }))
    })?;

    state
        .conversion_service
        .record_report(request.into())
        .await?;

    Ok(Json(ConversionAccepted { ok: true }))
}
