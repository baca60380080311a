//! HTTP request handlers.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod conversion;
pub mod dashboard;
pub mod health;
pub mod pixel;
pub mod redirect;

pub use conversion::conversion_handler;
pub use dashboard::{
    create_link_handler, links_handler, offers_handler, payouts_handler, stats_handler,
};
pub use health::health_handler;
pub use pixel::pixel_handler;
pub use redirect::{redirect_handler, vanity_redirect_handler};
