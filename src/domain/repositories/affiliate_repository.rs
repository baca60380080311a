//! Repository trait for affiliate lookups.

use crate::domain::entities::Affiliate;
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AffiliateRepository: Send + Sync {
    /// Finds an affiliate by its public code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<Affiliate>, AppError>;
}
