//! Business logic services for the application layer.

pub mod click_service;
pub mod conversion_service;
pub mod dashboard_service;
pub mod link_service;
pub mod redirect_service;

pub use click_service::ClickService;
pub use conversion_service::{ConversionReport, ConversionService, PixelConversion, PixelOutcome};
pub use dashboard_service::{DashboardRepositories, DashboardService, StatsOverview};
pub use link_service::{LinkService, LinkTarget};
pub use redirect_service::{RedirectService, Redirection, Visit};
