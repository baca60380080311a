//! Payout entity.

use chrono::NaiveDate;
use uuid::Uuid;

/// A commission payout covering a billing period.
///
/// Payouts are computed and settled outside this service; the dashboard only
/// lists them. `status` is one of `pending`, `approved` or `paid`.
#[derive(Debug, Clone, PartialEq)]
pub struct Payout {
    pub id: Uuid,
    pub affiliate_id: Uuid,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub revenue_cents: i64,
    pub commission_cents: i64,
    pub status: String,
}
