//! Affiliate entity.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A marketer who owns tracking links.
///
/// Affiliates are provisioned out of band (see the `admin` binary) and are
/// addressed publicly by their unique `code`, e.g. in vanity URLs
/// `/go/{code}/{offer_slug}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Affiliate {
    pub id: Uuid,
    pub code: String,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Affiliate {
    pub fn new(id: Uuid, code: String, user_id: Option<Uuid>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            code,
            user_id,
            created_at,
        }
    }
}
