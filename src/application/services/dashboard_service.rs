//! Read models and link provisioning for the affiliate dashboard.
//!
//! Runs against the restricted database role: reads go through the aggregate
//! views and the only write is link creation.

use std::sync::Arc;

use crate::domain::entities::{
    Affiliate, DailyStat, DateRange, Link, LinkSummary, NewLink, Offer, Payout, StatsTotals,
};
use crate::domain::repositories::{
    AffiliateRepository, LinkRepository, OfferRepository, StatsRepository,
};
use crate::error::AppError;
use crate::utils::code_generator::generate_short_code;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

/// Maximum length of a link's display name.
pub const MAX_LINK_NAME_LENGTH: usize = 100;

const MAX_CODE_ATTEMPTS: usize = 10;

/// Daily rows for a range plus their totals.
#[derive(Debug, Clone)]
pub struct StatsOverview {
    pub range: DateRange,
    pub rows: Vec<DailyStat>,
    pub totals: StatsTotals,
}

/// Repositories backing the dashboard.
pub struct DashboardRepositories {
    pub affiliates: Arc<dyn AffiliateRepository>,
    pub offers: Arc<dyn OfferRepository>,
    pub links: Arc<dyn LinkRepository>,
    pub stats: Arc<dyn StatsRepository>,
}

pub struct DashboardService {
    affiliates: Arc<dyn AffiliateRepository>,
    offers: Arc<dyn OfferRepository>,
    links: Arc<dyn LinkRepository>,
    stats: Arc<dyn StatsRepository>,
}

impl DashboardService {
    pub fn new(repositories: DashboardRepositories) -> Self {
        Self {
            affiliates: repositories.affiliates,
            offers: repositories.offers,
            links: repositories.links,
            stats: repositories.stats,
        }
    }

    /// Active offers an affiliate can promote, ordered by name.
    pub async fn active_offers(&self) -> Result<Vec<Offer>, AppError> {
        self.offers.list_active().await
    }

    /// Daily statistics and totals for an affiliate over `range`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the affiliate does not exist.
    pub async fn overview(
        &self,
        affiliate_code: &str,
        range: DateRange,
    ) -> Result<StatsOverview, AppError> {
        let affiliate = self.affiliate(affiliate_code).await?;
        let rows = self.stats.daily_stats(affiliate.id, range).await?;
        let totals = StatsTotals::from_rows(&rows);

        Ok(StatsOverview {
            range,
            rows,
            totals,
        })
    }

    /// The affiliate's links with lifetime totals, filtered by `search`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the affiliate does not exist.
    pub async fn links(
        &self,
        affiliate_code: &str,
        search: Option<&str>,
    ) -> Result<Vec<LinkSummary>, AppError> {
        let affiliate = self.affiliate(affiliate_code).await?;
        let mut links = self.links.list_with_totals(affiliate.id).await?;

        if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
            links.retain(|l| l.matches(term));
        }

        Ok(links)
    }

    /// Creates a new link for an active offer with a generated short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the affiliate does not exist.
    /// Returns [`AppError::Validation`] if the offer is unknown or inactive,
    /// or the name exceeds 100 characters.
    /// Returns [`AppError::Internal`] if no free short code is found.
    pub async fn create_link(
        &self,
        affiliate_code: &str,
        offer_id: Uuid,
        name: Option<String>,
    ) -> Result<Link, AppError> {
        let affiliate = self.affiliate(affiliate_code).await?;

        let name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        if name
            .as_ref()
            .is_some_and(|n| n.chars().count() > MAX_LINK_NAME_LENGTH)
        {
            return Err(AppError::bad_request(
                "Link name must be at most 100 characters",
                json!({ "field": "name" }),
            ));
        }

        match self.offers.find_by_id(offer_id).await? {
            Some(offer) if offer.active => {}
            _ => {
                return Err(AppError::bad_request(
                    "Offer is not available",
                    json!({ "offer_id": offer_id }),
                ));
            }
        }

        for _ in 0..MAX_CODE_ATTEMPTS {
            let short_code = generate_short_code();
            if self.links.short_code_exists(&short_code).await? {
                continue;
            }

            let new_link = NewLink {
                affiliate_id: affiliate.id,
                offer_id,
                short_code,
                name: name.clone(),
            };

            match self.links.create(new_link).await {
                Ok(link) => {
                    info!(
                        affiliate = %affiliate.code,
                        short_code = %link.short_code,
                        "Link created"
                    );
                    return Ok(link);
                }
                Err(AppError::Conflict { .. }) => {
                    warn!("Short code collided on insert, retrying");
                    continue;
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions" }),
        ))
    }

    /// Payouts for an affiliate, most recent period first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the affiliate does not exist.
    pub async fn payouts(&self, affiliate_code: &str) -> Result<Vec<Payout>, AppError> {
        let affiliate = self.affiliate(affiliate_code).await?;
        self.stats.payouts(affiliate.id).await
    }

    async fn affiliate(&self, code: &str) -> Result<Affiliate, AppError> {
        self.affiliates
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Affiliate not found", json!({ "code": code })))
    }
}
