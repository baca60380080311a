//! DTOs for affiliate link listing and creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::{Link, LinkSummary};

/// Query parameters of `GET /api/affiliates/{code}/links`.
#[derive(Debug, Default, Deserialize)]
pub struct LinksQuery {
    #[serde(default)]
    pub search: Option<String>,
}

/// Body of `POST /api/affiliates/{code}/links`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    pub offer_id: Uuid,

    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: Uuid,
    pub short_code: String,
    pub name: Option<String>,
    pub offer_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<Link> for LinkResponse {
    fn from(l: Link) -> Self {
        Self {
            id: l.id,
            short_code: l.short_code,
            name: l.name,
            offer_id: l.offer_id,
            created_at: l.created_at,
        }
    }
}

/// A link with its offer and lifetime counters.
#[derive(Debug, Serialize)]
pub struct LinkSummaryResponse {
    #[serde(flatten)]
    pub link: LinkResponse,
    pub offer_name: String,
    pub offer_slug: String,
    pub clicks: i64,
    pub conversions: i64,
    pub revenue_cents: i64,
}

impl From<LinkSummary> for LinkSummaryResponse {
    fn from(s: LinkSummary) -> Self {
        Self {
            link: s.link.into(),
            offer_name: s.offer_name,
            offer_slug: s.offer_slug,
            clicks: s.totals.clicks,
            conversions: s.totals.conversions,
            revenue_cents: s.totals.revenue_cents,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_name_limit() {
        let ok = CreateLinkRequest {
            offer_id: Uuid::new_v4(),
            name: Some("x".repeat(100)),
        };
        assert!(ok.validate().is_ok());

        let too_long = CreateLinkRequest {
            offer_id: Uuid::new_v4(),
            name: Some("x".repeat(101)),
        };
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn test_create_request_name_optional() {
        let req: CreateLinkRequest =
            serde_json::from_str(r#"{"offer_id":"7d3f2a1e-9c4b-4e8a-b1d2-0f5e6a7b8c9d"}"#).unwrap();
        assert!(req.name.is_none());
        assert!(req.validate().is_ok());
    }
}
