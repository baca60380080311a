//! PostgreSQL implementation of statistics repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{DailyStat, DateRange, Payout};
use crate::domain::repositories::StatsRepository;
use crate::error::AppError;

/// Reads the aggregate views maintained by the database.
pub struct PgStatsRepository {
    pool: Arc<PgPool>,
}

impl PgStatsRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct DailyRow {
    day: NaiveDate,
    clicks: i64,
    conversions: i64,
    revenue_cents: i64,
}

#[derive(sqlx::FromRow)]
struct PayoutRow {
    id: Uuid,
    affiliate_id: Uuid,
    period_start: NaiveDate,
    period_end: NaiveDate,
    revenue_cents: i64,
    commission_cents: i64,
    status: String,
}

#[async_trait]
impl StatsRepository for PgStatsRepository {
    async fn daily_stats(
        &self,
        affiliate_id: Uuid,
        range: DateRange,
    ) -> Result<Vec<DailyStat>, AppError> {
        let rows = sqlx::query_as::<_, DailyRow>(
            r#"
            SELECT day, clicks, conversions, revenue_cents
            FROM v_affiliate_stats_daily
            WHERE affiliate_id = $1 AND day BETWEEN $2 AND $3
            ORDER BY day ASC
            "#,
        )
        .bind(affiliate_id)
        .bind(range.from)
        .bind(range.to)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| DailyStat {
                day: r.day,
                clicks: r.clicks,
                conversions: r.conversions,
                revenue_cents: r.revenue_cents,
            })
            .collect())
    }

    async fn payouts(&self, affiliate_id: Uuid) -> Result<Vec<Payout>, AppError> {
        let rows = sqlx::query_as::<_, PayoutRow>(
            r#"
            SELECT id, affiliate_id, period_start, period_end,
                   revenue_cents, commission_cents, status
            FROM payouts
            WHERE affiliate_id = $1
            ORDER BY period_start DESC
            "#,
        )
        .bind(affiliate_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| Payout {
                id: r.id,
                affiliate_id: r.affiliate_id,
                period_start: r.period_start,
                period_end: r.period_end,
                revenue_cents: r.revenue_cents,
                commission_cents: r.commission_cents,
                status: r.status,
            })
            .collect())
    }
}
