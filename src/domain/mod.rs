//! Domain layer containing business entities and logic.
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Repository traits define contracts implemented by infrastructure.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`session`] - Visitor session identity and cookie policy
//!
//! # Redirect Flow
//!
//! 1. HTTP handler receives `/r/{code}` or `/go/{affiliate}/{slug}`
//! 2. [`repositories::LinkRepository`] resolves the link (inactive offers are misses)
//! 3. [`session::SessionIdentity`] reuses or mints the visitor session
//! 4. [`entities::NewClick`] is persisted via [`repositories::ClickRepository`]
//! 5. The handler answers `302 Found`, setting the cookie for new sessions

pub mod entities;
pub mod repositories;
pub mod session;
