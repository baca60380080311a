//! PostgreSQL implementation of conversion repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;
use sqlx::types::Json;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Conversion, NewConversion};
use crate::domain::repositories::ConversionRepository;
use crate::error::AppError;

pub struct PgConversionRepository {
    pool: Arc<PgPool>,
}

impl PgConversionRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ConversionRow {
    id: Uuid,
    link_id: Uuid,
    session_id: String,
    revenue_cents: i64,
    currency: String,
    external_order_id: Option<String>,
    meta: Option<Json<Value>>,
    created_at: DateTime<Utc>,
}

#[async_trait]
impl ConversionRepository for PgConversionRepository {
    async fn record(&self, new_conversion: NewConversion) -> Result<Conversion, AppError> {
        let row = sqlx::query_as::<_, ConversionRow>(
            r#"
            INSERT INTO conversions (
                link_id, session_id, revenue_cents, currency, external_order_id, meta
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING
                id, link_id, session_id, revenue_cents, currency, external_order_id, meta,
                created_at
            "#,
        )
        .bind(new_conversion.link_id)
        .bind(new_conversion.session_id)
        .bind(new_conversion.revenue_cents)
        .bind(new_conversion.currency)
        .bind(new_conversion.external_order_id)
        .bind(new_conversion.meta.map(Json))
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(Conversion {
            id: row.id,
            link_id: row.link_id,
            session_id: row.session_id,
            revenue_cents: row.revenue_cents,
            currency: row.currency,
            external_order_id: row.external_order_id,
            meta: row.meta.map(|Json(v)| v),
            created_at: row.created_at,
        })
    }
}
