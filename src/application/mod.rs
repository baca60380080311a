//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::redirect_service::RedirectService`] - Link resolution, session and click recording
//! - [`services::conversion_service::ConversionService`] - Pixel and server-to-server conversions
//! - [`services::dashboard_service::DashboardService`] - Affiliate statistics, links and payouts

pub mod services;
