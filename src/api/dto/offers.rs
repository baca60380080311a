//! DTOs for offers and payouts.

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::{Offer, Payout};

#[derive(Debug, Serialize)]
pub struct OfferResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

impl From<Offer> for OfferResponse {
    fn from(o: Offer) -> Self {
        Self {
            id: o.id,
            name: o.name,
            slug: o.slug,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PayoutResponse {
    pub id: Uuid,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub revenue_cents: i64,
    pub commission_cents: i64,
    pub status: String,
}

impl From<Payout> for PayoutResponse {
    fn from(p: Payout) -> Self {
        Self {
            id: p.id,
            period_start: p.period_start,
            period_end: p.period_end,
            revenue_cents: p.revenue_cents,
            commission_cents: p.commission_cents,
            status: p.status,
        }
    }
}
