//! PostgreSQL implementation of offer repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::Offer;
use crate::domain::repositories::OfferRepository;
use crate::error::AppError;

pub struct PgOfferRepository {
    pool: Arc<PgPool>,
}

impl PgOfferRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct OfferRow {
    id: Uuid,
    name: String,
    slug: String,
    destination_url: String,
    active: bool,
    created_at: DateTime<Utc>,
}

impl From<OfferRow> for Offer {
    fn from(r: OfferRow) -> Self {
        Offer::new(
            r.id,
            r.name,
            r.slug,
            r.destination_url,
            r.active,
            r.created_at,
        )
    }
}

#[async_trait]
impl OfferRepository for PgOfferRepository {
    async fn list_active(&self) -> Result<Vec<Offer>, AppError> {
        let rows = sqlx::query_as::<_, OfferRow>(
            r#"
            SELECT id, name, slug, destination_url, active, created_at
            FROM offers
            WHERE active
            ORDER BY name ASC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Offer::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Offer>, AppError> {
        let row = sqlx::query_as::<_, OfferRow>(
            "SELECT id, name, slug, destination_url, active, created_at FROM offers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Offer::from))
    }
}
