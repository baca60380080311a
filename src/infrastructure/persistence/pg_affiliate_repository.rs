//! PostgreSQL implementation of affiliate repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::Affiliate;
use crate::domain::repositories::AffiliateRepository;
use crate::error::AppError;

pub struct PgAffiliateRepository {
    pool: Arc<PgPool>,
}

impl PgAffiliateRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AffiliateRow {
    id: Uuid,
    code: String,
    user_id: Option<Uuid>,
    created_at: DateTime<Utc>,
}

#[async_trait]
impl AffiliateRepository for PgAffiliateRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<Affiliate>, AppError> {
        let row = sqlx::query_as::<_, AffiliateRow>(
            "SELECT id, code, user_id, created_at FROM affiliates WHERE code = $1",
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(|r| Affiliate::new(r.id, r.code, r.user_id, r.created_at)))
    }
}
