//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without persistence concerns.
//!
//! # Entity Types
//!
//! - [`Affiliate`] - A marketer owning tracking links
//! - [`Offer`] - An advertiser campaign with a destination URL
//! - [`Link`] - A short code owned by an affiliate, pointing at an offer
//! - [`Click`] - A redirect through a link
//! - [`Conversion`] - A revenue event attributed to a link and session
//! - [`Payout`] - A settled or pending commission period
//!
//! # Design Pattern
//!
//! Writable entities have a separate `New*` struct for creation
//! (`NewLink`, `NewClick`, `NewConversion`); ids and timestamps are assigned
//! by the database.

pub mod affiliate;
pub mod click;
pub mod conversion;
pub mod link;
pub mod offer;
pub mod payout;
pub mod stats;

pub use affiliate::Affiliate;
pub use click::{Click, ClientHints, Device, NewClick, UtmParams};
pub use conversion::{Conversion, DEFAULT_CURRENCY, NewConversion};
pub use link::{Link, LinkSummary, NewLink, ResolvedLink};
pub use offer::Offer;
pub use payout::Payout;
pub use stats::{DailyStat, DateRange, DateRangeError, StatsTotals};
