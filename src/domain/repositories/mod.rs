//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern and are
//! implemented by the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for unit tests
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Link resolution, creation and listing
//! - [`AffiliateRepository`] - Affiliate lookup by code
//! - [`OfferRepository`] - Active offer listing
//! - [`ClickRepository`] - Click recording
//! - [`ConversionRepository`] - Conversion recording
//! - [`StatsRepository`] - Aggregated statistics and payouts
//! - [`HealthRepository`] - Store connectivity check

pub mod affiliate_repository;
pub mod click_repository;
pub mod conversion_repository;
pub mod health_repository;
pub mod link_repository;
pub mod offer_repository;
pub mod stats_repository;

pub use affiliate_repository::AffiliateRepository;
pub use click_repository::ClickRepository;
pub use conversion_repository::ConversionRepository;
pub use health_repository::HealthRepository;
pub use link_repository::LinkRepository;
pub use offer_repository::OfferRepository;
pub use stats_repository::StatsRepository;

#[cfg(test)]
pub use affiliate_repository::MockAffiliateRepository;
#[cfg(test)]
pub use click_repository::MockClickRepository;
#[cfg(test)]
pub use conversion_repository::MockConversionRepository;
#[cfg(test)]
pub use health_repository::MockHealthRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use offer_repository::MockOfferRepository;
#[cfg(test)]
pub use stats_repository::MockStatsRepository;
