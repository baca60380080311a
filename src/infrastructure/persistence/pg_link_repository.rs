//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Link, LinkSummary, NewLink, ResolvedLink, StatsTotals};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// PostgreSQL repository for link resolution and management.
///
/// Resolution joins `links` with `offers` and filters on `offers.active` in
/// the same statement, so a deactivated offer is never served.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ResolvedRow {
    link_id: Uuid,
    destination_url: String,
}

impl From<ResolvedRow> for ResolvedLink {
    fn from(r: ResolvedRow) -> Self {
        ResolvedLink {
            link_id: r.link_id,
            destination_url: r.destination_url,
        }
    }
}

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: Uuid,
    affiliate_id: Uuid,
    offer_id: Uuid,
    short_code: String,
    name: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link::new(
            r.id,
            r.affiliate_id,
            r.offer_id,
            r.short_code,
            r.name,
            r.created_at,
        )
    }
}

#[derive(sqlx::FromRow)]
struct SummaryRow {
    id: Uuid,
    affiliate_id: Uuid,
    offer_id: Uuid,
    short_code: String,
    name: Option<String>,
    created_at: DateTime<Utc>,
    offer_name: String,
    offer_slug: String,
    clicks: i64,
    conversions: i64,
    revenue_cents: i64,
}

impl From<SummaryRow> for LinkSummary {
    fn from(r: SummaryRow) -> Self {
        LinkSummary {
            link: Link::new(
                r.id,
                r.affiliate_id,
                r.offer_id,
                r.short_code,
                r.name,
                r.created_at,
            ),
            offer_name: r.offer_name,
            offer_slug: r.offer_slug,
            totals: StatsTotals {
                clicks: r.clicks,
                conversions: r.conversions,
                revenue_cents: r.revenue_cents,
            },
        }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn resolve_short_code(&self, short_code: &str) -> Result<Option<ResolvedLink>, AppError> {
        let row = sqlx::query_as::<_, ResolvedRow>(
            r#"
            SELECT l.id AS link_id, o.destination_url
            FROM links l
            JOIN offers o ON o.id = l.offer_id
            WHERE l.short_code = $1 AND o.active
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ResolvedLink::from))
    }

    async fn resolve_vanity(
        &self,
        affiliate_code: &str,
        offer_slug: &str,
    ) -> Result<Option<ResolvedLink>, AppError> {
        // An affiliate may hold several links to one offer; the oldest wins.
        let row = sqlx::query_as::<_, ResolvedRow>(
            r#"
            SELECT l.id AS link_id, o.destination_url
            FROM links l
            JOIN affiliates a ON a.id = l.affiliate_id
            JOIN offers o ON o.id = l.offer_id
            WHERE a.code = $1 AND o.slug = $2 AND o.active
            ORDER BY l.created_at ASC
            LIMIT 1
            "#,
        )
        .bind(affiliate_code)
        .bind(offer_slug)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ResolvedLink::from))
    }

    async fn short_code_exists(&self, short_code: &str) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM links WHERE short_code = $1)")
                .bind(short_code)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }

    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (affiliate_id, offer_id, short_code, name)
            VALUES ($1, $2, $3, $4)
            RETURNING id, affiliate_id, offer_id, short_code, name, created_at
            "#,
        )
        .bind(new_link.affiliate_id)
        .bind(new_link.offer_id)
        .bind(new_link.short_code)
        .bind(new_link.name)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn list_with_totals(&self, affiliate_id: Uuid) -> Result<Vec<LinkSummary>, AppError> {
        let rows = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT
                l.id, l.affiliate_id, l.offer_id, l.short_code, l.name, l.created_at,
                o.name AS offer_name,
                o.slug AS offer_slug,
                COALESCE(t.clicks, 0)::bigint AS clicks,
                COALESCE(t.conversions, 0)::bigint AS conversions,
                COALESCE(t.revenue_cents, 0)::bigint AS revenue_cents
            FROM links l
            JOIN offers o ON o.id = l.offer_id
            LEFT JOIN v_affiliate_totals t ON t.link_id = l.id
            WHERE l.affiliate_id = $1
            ORDER BY l.created_at DESC
            "#,
        )
        .bind(affiliate_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(LinkSummary::from).collect())
    }
}
