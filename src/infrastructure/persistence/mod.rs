//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries mapped through private `FromRow` row types.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Link resolution, creation and listing
//! - [`PgAffiliateRepository`] - Affiliate lookup
//! - [`PgOfferRepository`] - Offer listing
//! - [`PgClickRepository`] - Click recording
//! - [`PgConversionRepository`] - Conversion recording
//! - [`PgStatsRepository`] - Aggregate views and payouts
//! - [`PgHealthRepository`] - Connectivity check

pub mod pg_affiliate_repository;
pub mod pg_click_repository;
pub mod pg_conversion_repository;
pub mod pg_health_repository;
pub mod pg_link_repository;
pub mod pg_offer_repository;
pub mod pg_stats_repository;

pub use pg_affiliate_repository::PgAffiliateRepository;
pub use pg_click_repository::PgClickRepository;
pub use pg_conversion_repository::PgConversionRepository;
pub use pg_health_repository::PgHealthRepository;
pub use pg_link_repository::PgLinkRepository;
pub use pg_offer_repository::PgOfferRepository;
pub use pg_stats_repository::PgStatsRepository;
