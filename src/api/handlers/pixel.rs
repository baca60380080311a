//! Handler for the conversion tracking pixel.

use axum::{
    body::Bytes,
    extract::{RawQuery, State},
    http::header,
    response::IntoResponse,
};

use crate::api::dto::pixel::parse_pixel_query;
use crate::state::AppState;

/// 1x1 transparent GIF.
pub const PIXEL_GIF: [u8; 43] = [
    0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x01, 0x00, 0x01, 0x00, 0x80, 0x00, 0x00, 0xff, 0xff,
    0xff, 0x00, 0x00, 0x00, 0x21, 0xf9, 0x04, 0x01, 0x00, 0x00, 0x01, 0x00, 0x2c, 0x00, 0x00,
    0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x02, 0x02, 0x44, 0x01, 0x00, 0x3b,
];

/// Records a conversion from an image request.
///
/// # Endpoint
///
/// `GET /pixel?link_id=&sid=&rev=&oid=&cur=`
///
/// Always answers `200 OK` with the GIF and `Cache-Control: no-store`.
/// Missing identifiers skip recording; storage failures are logged only.
pub async fn pixel_handler(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> impl IntoResponse {
    let pixel = parse_pixel_query(query.as_deref());
    state.conversion_service.record_pixel(pixel).await;

    (
        [
            (header::CONTENT_TYPE, "image/gif"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        Bytes::from_static(&PIXEL_GIF),
    )
}
