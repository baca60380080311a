//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation. The tracking endpoints parse leniently by hand.

pub mod conversion;
pub mod health;
pub mod links;
pub mod offers;
pub mod pixel;
pub mod stats;
