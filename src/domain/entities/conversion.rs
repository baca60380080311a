//! Conversion entity representing a reported revenue event.

use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

/// Currency recorded when the reporter does not send one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// An immutable conversion record.
///
/// Correlated to the originating click only through `session_id`. Duplicate
/// reports for the same `external_order_id` are stored as separate records.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub id: Uuid,
    pub link_id: Uuid,
    pub session_id: String,
    pub revenue_cents: i64,
    pub currency: String,
    pub external_order_id: Option<String>,
    pub meta: Option<Value>,
    pub created_at: DateTime<Utc>,
}

/// Input data for recording a new conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewConversion {
    pub link_id: Uuid,
    pub session_id: String,
    pub revenue_cents: i64,
    pub currency: String,
    pub external_order_id: Option<String>,
    pub meta: Option<Value>,
}
