//! Connectivity check for the backing store.

use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HealthRepository: Send + Sync {
    /// Round-trips a trivial query through the pool.
    async fn ping(&self) -> Result<(), AppError>;
}
