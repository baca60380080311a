//! Repository trait for dashboard statistics.

use crate::domain::entities::{DailyStat, DateRange, Payout};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Read-only access to the store-maintained aggregate views and payouts.
///
/// Aggregation happens in the database (`v_affiliate_stats_daily`,
/// `v_affiliate_totals`); implementations only filter and order.
///
/// # Examples
///
/// See integration tests: `tests/repository_stats.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Daily rows for one affiliate within `range` (inclusive), ordered by day.
    ///
    /// Days without any activity are absent.
    async fn daily_stats(
        &self,
        affiliate_id: Uuid,
        range: DateRange,
    ) -> Result<Vec<DailyStat>, AppError>;

    /// Payouts for one affiliate, most recent period first.
    async fn payouts(&self, affiliate_id: Uuid) -> Result<Vec<Payout>, AppError>;
}
