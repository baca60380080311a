//! Link entity representing an affiliate tracking link.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::stats::StatsTotals;

/// A tracking link owned by one affiliate and pointing at one offer.
///
/// `short_code` is the public routing key used in `/r/{short_code}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: Uuid,
    pub affiliate_id: Uuid,
    pub offer_id: Uuid,
    pub short_code: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: Uuid,
        affiliate_id: Uuid,
        offer_id: Uuid,
        short_code: String,
        name: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            affiliate_id,
            offer_id,
            short_code,
            name,
            created_at,
        }
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub affiliate_id: Uuid,
    pub offer_id: Uuid,
    pub short_code: String,
    pub name: Option<String>,
}

/// Outcome of a successful link resolution: where to send the visitor and
/// which link to attribute the click to.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLink {
    pub link_id: Uuid,
    pub destination_url: String,
}

impl ResolvedLink {
    /// Whether the destination can be sent as a `Location` header value.
    ///
    /// Header values allow visible ASCII, spaces, tabs and obs-text; any
    /// other control byte makes the redirect unsendable.
    pub fn has_sendable_destination(&self) -> bool {
        self.destination_url
            .bytes()
            .all(|b| b == b'\t' || (b >= 0x20 && b != 0x7f))
    }
}

/// A link joined with its offer and lifetime totals, as shown on the dashboard.
#[derive(Debug, Clone)]
pub struct LinkSummary {
    pub link: Link,
    pub offer_name: String,
    pub offer_slug: String,
    pub totals: StatsTotals,
}

impl LinkSummary {
    /// Case-insensitive substring match over short code, link name and offer name.
    ///
    /// An empty term matches everything.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        if term.is_empty() {
            return true;
        }

        self.link.short_code.to_lowercase().contains(&term)
            || self
                .link
                .name
                .as_deref()
                .is_some_and(|n| n.to_lowercase().contains(&term))
            || self.offer_name.to_lowercase().contains(&term)
    }
}
