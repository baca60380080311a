//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{
    ClickService, ConversionService, DashboardRepositories, DashboardService, LinkService,
    RedirectService,
};
use crate::domain::repositories::{
    AffiliateRepository, ClickRepository, ConversionRepository, HealthRepository, LinkRepository,
    OfferRepository, StatsRepository,
};
use crate::infrastructure::database::Database;
use crate::infrastructure::persistence::{
    PgAffiliateRepository, PgClickRepository, PgConversionRepository, PgHealthRepository,
    PgLinkRepository, PgOfferRepository, PgStatsRepository,
};

/// Immutable, reference-counted service handles.
///
/// Cloned per request by axum; nothing in here is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    pub redirect_service: Arc<RedirectService>,
    pub conversion_service: Arc<ConversionService>,
    pub dashboard_service: Arc<DashboardService>,
    pub tracking_health: Arc<dyn HealthRepository>,
    pub dashboard_health: Arc<dyn HealthRepository>,
    /// Read the client IP from forwarding headers.
    pub behind_proxy: bool,
    /// Add `Secure` to the session cookie.
    pub session_cookie_secure: bool,
}

/// Repository handles for one deployment.
///
/// Tracking repositories run on the elevated role, dashboard repositories on
/// the restricted one.
pub struct Repositories {
    pub tracking_links: Arc<dyn LinkRepository>,
    pub clicks: Arc<dyn ClickRepository>,
    pub conversions: Arc<dyn ConversionRepository>,
    pub tracking_health: Arc<dyn HealthRepository>,
    pub dashboard_links: Arc<dyn LinkRepository>,
    pub affiliates: Arc<dyn AffiliateRepository>,
    pub offers: Arc<dyn OfferRepository>,
    pub stats: Arc<dyn StatsRepository>,
    pub dashboard_health: Arc<dyn HealthRepository>,
}

impl Repositories {
    /// PostgreSQL repositories bound to the two pools.
    pub fn postgres(database: &Database) -> Self {
        let tracking = database.tracking.clone();
        let dashboard = database.dashboard.clone();

        Self {
            tracking_links: Arc::new(PgLinkRepository::new(tracking.clone())),
            clicks: Arc::new(PgClickRepository::new(tracking.clone())),
            conversions: Arc::new(PgConversionRepository::new(tracking.clone())),
            tracking_health: Arc::new(PgHealthRepository::new(tracking)),
            dashboard_links: Arc::new(PgLinkRepository::new(dashboard.clone())),
            affiliates: Arc::new(PgAffiliateRepository::new(dashboard.clone())),
            offers: Arc::new(PgOfferRepository::new(dashboard.clone())),
            stats: Arc::new(PgStatsRepository::new(dashboard.clone())),
            dashboard_health: Arc::new(PgHealthRepository::new(dashboard)),
        }
    }
}

impl AppState {
    /// Wires services on top of the given repositories.
    pub fn new(repositories: Repositories, behind_proxy: bool, session_cookie_secure: bool) -> Self {
        let redirect_service = RedirectService::new(
            LinkService::new(repositories.tracking_links),
            ClickService::new(repositories.clicks),
        );
        let conversion_service = ConversionService::new(repositories.conversions);
        let dashboard_service = DashboardService::new(DashboardRepositories {
            affiliates: repositories.affiliates,
            offers: repositories.offers,
            links: repositories.dashboard_links,
            stats: repositories.stats,
        });

        Self {
            redirect_service: Arc::new(redirect_service),
            conversion_service: Arc::new(conversion_service),
            dashboard_service: Arc::new(dashboard_service),
            tracking_health: repositories.tracking_health,
            dashboard_health: repositories.dashboard_health,
            behind_proxy,
            session_cookie_secure,
        }
    }
}
