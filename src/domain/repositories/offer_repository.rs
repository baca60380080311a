//! Repository trait for offer lookups.

use crate::domain::entities::Offer;
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Read-only access to advertiser offers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OfferRepository: Send + Sync {
    /// Lists active offers ordered by name.
    async fn list_active(&self) -> Result<Vec<Offer>, AppError>;

    /// Finds an offer by id regardless of its active flag.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Offer>, AppError>;
}
