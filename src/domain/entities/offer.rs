//! Offer entity representing an advertiser campaign.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// An advertiser campaign that links point to.
///
/// Inactive offers are invisible to the redirect pipeline: links pointing at
/// them resolve as "not found".
#[derive(Debug, Clone, PartialEq)]
pub struct Offer {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub destination_url: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Offer {
    pub fn new(
        id: Uuid,
        name: String,
        slug: String,
        destination_url: String,
        active: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            slug,
            destination_url,
            active,
            created_at,
        }
    }
}
