//! DTOs for the server-to-server conversion endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::services::ConversionReport;

/// Body of `POST /convert`.
///
/// Every field is optional at the wire level; the service decides which
/// ones are required.
#[derive(Debug, Default, Deserialize)]
pub struct ConversionRequest {
    #[serde(default)]
    pub link_id: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub revenue_cents: Option<i64>,
    #[serde(default)]
    pub external_order_id: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub meta: Option<Value>,
}

impl From<ConversionRequest> for ConversionReport {
    fn from(r: ConversionRequest) -> Self {
        ConversionReport {
            link_id: r.link_id,
            session_id: r.session_id,
            revenue_cents: r.revenue_cents,
            external_order_id: r.external_order_id,
            currency: r.currency,
            meta: r.meta,
        }
    }
}

/// Success body of `POST /convert`.
#[derive(Debug, Serialize)]
pub struct ConversionAccepted {
    pub ok: bool,
}

/// Interprets a raw request body.
///
/// A body that is not JSON, or JSON that is not an object, is read as `{}`.
///
/// # Errors
///
/// Returns the serde error when a JSON object has a field of the wrong type.
pub fn parse_conversion_body(body: &[u8]) -> Result<ConversionRequest, serde_json::Error> {
    match serde_json::from_slice::<Value>(body) {
        Ok(value @ Value::Object(_)) => serde_json::from_value(value),
        _ => Ok(ConversionRequest::default()),
    }
}
