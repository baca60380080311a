//! Repository trait for conversion recording.

use crate::domain::entities::{Conversion, NewConversion};
use crate::error::AppError;
use async_trait::async_trait;

/// Append-only storage for conversion events.
///
/// No idempotency is enforced on `external_order_id`: recording the same
/// conversion twice stores two rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConversionRepository: Send + Sync {
    /// Inserts exactly one conversion record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn record(&self, new_conversion: NewConversion) -> Result<Conversion, AppError>;
}
