//! PostgreSQL implementation of click repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Click, Device, NewClick, UtmParams};
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

/// Append-only click storage.
///
/// A `link_id` that no longer exists violates the foreign key and surfaces as
/// an internal error.
pub struct PgClickRepository {
    pool: Arc<PgPool>,
}

impl PgClickRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ClickRow {
    id: Uuid,
    link_id: Uuid,
    session_id: String,
    ip: Option<String>,
    user_agent: Option<String>,
    referer: Option<String>,
    device: String,
    utm_source: Option<String>,
    utm_medium: Option<String>,
    utm_campaign: Option<String>,
    utm_term: Option<String>,
    utm_content: Option<String>,
    subid: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<ClickRow> for Click {
    fn from(r: ClickRow) -> Self {
        Click {
            id: r.id,
            link_id: r.link_id,
            session_id: r.session_id,
            ip: r.ip,
            user_agent: r.user_agent,
            referer: r.referer,
            device: Device::from_db(&r.device),
            utm: UtmParams {
                source: r.utm_source,
                medium: r.utm_medium,
                campaign: r.utm_campaign,
                term: r.utm_term,
                content: r.utm_content,
                subid: r.subid,
            },
            created_at: r.created_at,
        }
    }
}

#[async_trait]
impl ClickRepository for PgClickRepository {
    async fn record(&self, new_click: NewClick) -> Result<Click, AppError> {
        let row = sqlx::query_as::<_, ClickRow>(
            r#"
            INSERT INTO clicks (
                link_id, session_id, ip, user_agent, referer, device,
                utm_source, utm_medium, utm_campaign, utm_term, utm_content, subid
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING
                id, link_id, session_id, ip, user_agent, referer, device,
                utm_source, utm_medium, utm_campaign, utm_term, utm_content, subid,
                created_at
            "#,
        )
        .bind(new_click.link_id)
        .bind(new_click.session_id)
        .bind(new_click.ip)
        .bind(new_click.user_agent)
        .bind(new_click.referer)
        .bind(new_click.device.as_str())
        .bind(new_click.utm.source)
        .bind(new_click.utm.medium)
        .bind(new_click.utm.campaign)
        .bind(new_click.utm.term)
        .bind(new_click.utm.content)
        .bind(new_click.utm.subid)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }
}
