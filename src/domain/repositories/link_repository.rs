//! Repository trait for tracking link data access.

use crate::domain::entities::{Link, LinkSummary, NewLink, ResolvedLink};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for tracking links.
///
/// The resolution methods back the redirect pipeline and must be a single read
/// against the current snapshot: a link whose offer is inactive resolves to
/// `None`, exactly like a missing link.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Finds the link with exactly this short code (case-sensitive) whose
    /// offer is active.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn resolve_short_code(&self, short_code: &str) -> Result<Option<ResolvedLink>, AppError>;

    /// Finds the link owned by `affiliate_code` that points at the offer
    /// `offer_slug`, provided the offer is active.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn resolve_vanity(
        &self,
        affiliate_code: &str,
        offer_slug: &str,
    ) -> Result<Option<ResolvedLink>, AppError>;

    /// Returns true if any link already uses `short_code`.
    async fn short_code_exists(&self, short_code: &str) -> Result<bool, AppError>;

    /// Creates a new link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Lists an affiliate's links with offer details and lifetime totals,
    /// newest first.
    async fn list_with_totals(&self, affiliate_id: Uuid) -> Result<Vec<LinkSummary>, AppError>;
}
