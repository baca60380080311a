#![allow(dead_code)]

use affiliate_tracker::domain::entities::{
    Affiliate, Click, Conversion, DailyStat, DateRange, Device, Link, LinkSummary, NewClick,
    NewConversion, NewLink, Offer, Payout, ResolvedLink, StatsTotals,
};
use affiliate_tracker::domain::repositories::{
    AffiliateRepository, ClickRepository, ConversionRepository, HealthRepository, LinkRepository,
    OfferRepository, StatsRepository,
};
use affiliate_tracker::error::AppError;
use affiliate_tracker::routes::router;
use affiliate_tracker::state::{AppState, Repositories};
use async_trait::async_trait;
use axum::extract::ConnectInfo;
use axum_test::TestServer;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tower::Layer;
use uuid::Uuid;

// ─── HTTP harness ───────────────────────────────────────────────────────────

/// Inserts a fixed peer address, as `into_make_service_with_connect_info` would.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}

pub fn test_server(store: &Arc<MemoryStore>) -> TestServer {
    test_server_with(store, false, false)
}

pub fn test_server_with(
    store: &Arc<MemoryStore>,
    behind_proxy: bool,
    secure_cookie: bool,
) -> TestServer {
    let state = AppState::new(store.repositories(), behind_proxy, secure_cookie);
    let app = router(state, behind_proxy).layer(MockConnectInfoLayer);

    TestServer::new(app).unwrap()
}

// ─── In-memory store ────────────────────────────────────────────────────────

#[derive(Default)]
struct Data {
    affiliates: Vec<Affiliate>,
    offers: Vec<Offer>,
    links: Vec<Link>,
    clicks: Vec<Click>,
    conversions: Vec<Conversion>,
    payouts: Vec<Payout>,
}

/// Repository backend for handler tests.
///
/// The failure switches make the matching repository return an internal
/// error, the way a lost database connection would.
#[derive(Default)]
pub struct MemoryStore {
    data: Mutex<Data>,
    pub fail_links: AtomicBool,
    pub fail_clicks: AtomicBool,
    pub fail_conversions: AtomicBool,
    pub tracking_down: AtomicBool,
    pub dashboard_down: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn repositories(self: &Arc<Self>) -> Repositories {
        let repo = Arc::new(MemoryRepository {
            store: self.clone(),
        });

        Repositories {
            tracking_links: repo.clone(),
            clicks: repo.clone(),
            conversions: repo.clone(),
            tracking_health: Arc::new(MemoryHealth {
                store: self.clone(),
                dashboard: false,
            }),
            dashboard_links: repo.clone(),
            affiliates: repo.clone(),
            offers: repo.clone(),
            stats: repo,
            dashboard_health: Arc::new(MemoryHealth {
                store: self.clone(),
                dashboard: true,
            }),
        }
    }

    pub fn add_affiliate(&self, code: &str) -> Affiliate {
        let affiliate = Affiliate::new(Uuid::new_v4(), code.to_string(), None, Utc::now());
        self.data.lock().unwrap().affiliates.push(affiliate.clone());
        affiliate
    }

    pub fn add_offer(&self, slug: &str, destination_url: &str, active: bool) -> Offer {
        let offer = Offer::new(
            Uuid::new_v4(),
            slug.replace('-', " "),
            slug.to_string(),
            destination_url.to_string(),
            active,
            Utc::now(),
        );
        self.data.lock().unwrap().offers.push(offer.clone());
        offer
    }

    pub fn add_link(&self, affiliate: &Affiliate, offer: &Offer, short_code: &str) -> Link {
        self.add_link_at(affiliate, offer, short_code, Utc::now())
    }

    pub fn add_link_at(
        &self,
        affiliate: &Affiliate,
        offer: &Offer,
        short_code: &str,
        created_at: DateTime<Utc>,
    ) -> Link {
        let link = Link::new(
            Uuid::new_v4(),
            affiliate.id,
            offer.id,
            short_code.to_string(),
            None,
            created_at,
        );
        self.data.lock().unwrap().links.push(link.clone());
        link
    }

    pub fn add_click_at(&self, link: &Link, created_at: DateTime<Utc>) {
        let mut data = self.data.lock().unwrap();
        data.clicks.push(Click {
            id: Uuid::new_v4(),
            link_id: link.id,
            session_id: Uuid::new_v4().to_string(),
            ip: None,
            user_agent: None,
            referer: None,
            device: Device::Desktop,
            utm: Default::default(),
            created_at,
        });
    }

    pub fn add_conversion_at(&self, link: &Link, revenue_cents: i64, created_at: DateTime<Utc>) {
        let mut data = self.data.lock().unwrap();
        data.conversions.push(Conversion {
            id: Uuid::new_v4(),
            link_id: link.id,
            session_id: Uuid::new_v4().to_string(),
            revenue_cents,
            currency: "USD".to_string(),
            external_order_id: None,
            meta: None,
            created_at,
        });
    }

    pub fn add_payout(&self, affiliate: &Affiliate, period_start: NaiveDate, status: &str) {
        let mut data = self.data.lock().unwrap();
        data.payouts.push(Payout {
            id: Uuid::new_v4(),
            affiliate_id: affiliate.id,
            period_start,
            period_end: period_start + chrono::Duration::days(6),
            revenue_cents: 10_000,
            commission_cents: 2_000,
            status: status.to_string(),
        });
    }

    pub fn clicks(&self) -> Vec<Click> {
        self.data.lock().unwrap().clicks.clone()
    }

    pub fn conversions(&self) -> Vec<Conversion> {
        self.data.lock().unwrap().conversions.clone()
    }

    pub fn links(&self) -> Vec<Link> {
        self.data.lock().unwrap().links.clone()
    }
}

fn storage_error() -> AppError {
    AppError::internal("Database error", json!({ "reason": "connection refused" }))
}

pub struct MemoryRepository {
    store: Arc<MemoryStore>,
}

impl MemoryRepository {
    fn data(&self) -> std::sync::MutexGuard<'_, Data> {
        self.store.data.lock().unwrap()
    }

    fn check_links(&self) -> Result<(), AppError> {
        if self.store.fail_links.load(Ordering::SeqCst) {
            return Err(storage_error());
        }
        Ok(())
    }
}

fn resolve(data: &Data, link: &Link) -> Option<ResolvedLink> {
    data.offers
        .iter()
        .find(|o| o.id == link.offer_id && o.active)
        .map(|o| ResolvedLink {
            link_id: link.id,
            destination_url: o.destination_url.clone(),
        })
}

#[async_trait]
impl LinkRepository for MemoryRepository {
    async fn resolve_short_code(&self, short_code: &str) -> Result<Option<ResolvedLink>, AppError> {
        self.check_links()?;
        let data = self.data();
        Ok(data
            .links
            .iter()
            .find(|l| l.short_code == short_code)
            .and_then(|l| resolve(&data, l)))
    }

    async fn resolve_vanity(
        &self,
        affiliate_code: &str,
        offer_slug: &str,
    ) -> Result<Option<ResolvedLink>, AppError> {
        self.check_links()?;
        let data = self.data();
        let Some(affiliate) = data.affiliates.iter().find(|a| a.code == affiliate_code) else {
            return Ok(None);
        };
        let Some(offer) = data.offers.iter().find(|o| o.slug == offer_slug) else {
            return Ok(None);
        };

        Ok(data
            .links
            .iter()
            .filter(|l| l.affiliate_id == affiliate.id && l.offer_id == offer.id)
            .min_by_key(|l| l.created_at)
            .and_then(|l| resolve(&data, l)))
    }

    async fn short_code_exists(&self, short_code: &str) -> Result<bool, AppError> {
        Ok(self.data().links.iter().any(|l| l.short_code == short_code))
    }

    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut data = self.data();
        if data.links.iter().any(|l| l.short_code == new_link.short_code) {
            return Err(AppError::conflict("Duplicate entry", json!({})));
        }

        let link = Link::new(
            Uuid::new_v4(),
            new_link.affiliate_id,
            new_link.offer_id,
            new_link.short_code,
            new_link.name,
            Utc::now(),
        );
        data.links.push(link.clone());
        Ok(link)
    }

    async fn list_with_totals(&self, affiliate_id: Uuid) -> Result<Vec<LinkSummary>, AppError> {
        let data = self.data();
        let mut links: Vec<&Link> = data
            .links
            .iter()
            .filter(|l| l.affiliate_id == affiliate_id)
            .collect();
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(links
            .into_iter()
            .filter_map(|l| {
                let offer = data.offers.iter().find(|o| o.id == l.offer_id)?;
                let conversions: Vec<&Conversion> =
                    data.conversions.iter().filter(|c| c.link_id == l.id).collect();

                Some(LinkSummary {
                    link: l.clone(),
                    offer_name: offer.name.clone(),
                    offer_slug: offer.slug.clone(),
                    totals: StatsTotals {
                        clicks: data.clicks.iter().filter(|c| c.link_id == l.id).count() as i64,
                        conversions: conversions.len() as i64,
                        revenue_cents: conversions.iter().map(|c| c.revenue_cents).sum(),
                    },
                })
            })
            .collect())
    }
}

#[async_trait]
impl ClickRepository for MemoryRepository {
    async fn record(&self, new_click: NewClick) -> Result<Click, AppError> {
        if self.store.fail_clicks.load(Ordering::SeqCst) {
            return Err(storage_error());
        }

        let click = Click {
            id: Uuid::new_v4(),
            link_id: new_click.link_id,
            session_id: new_click.session_id,
            ip: new_click.ip,
            user_agent: new_click.user_agent,
            referer: new_click.referer,
            device: new_click.device,
            utm: new_click.utm,
            created_at: Utc::now(),
        };
        self.data().clicks.push(click.clone());
        Ok(click)
    }
}

#[async_trait]
impl ConversionRepository for MemoryRepository {
    async fn record(&self, new_conversion: NewConversion) -> Result<Conversion, AppError> {
        if self.store.fail_conversions.load(Ordering::SeqCst) {
            return Err(storage_error());
        }

        let mut data = self.data();
        // Mirrors the foreign key on conversions.link_id.
        if !data.links.iter().any(|l| l.id == new_conversion.link_id) {
            return Err(AppError::internal("Database error", json!({})));
        }

        let conversion = Conversion {
            id: Uuid::new_v4(),
            link_id: new_conversion.link_id,
            session_id: new_conversion.session_id,
            revenue_cents: new_conversion.revenue_cents,
            currency: new_conversion.currency,
            external_order_id: new_conversion.external_order_id,
            meta: new_conversion.meta,
            created_at: Utc::now(),
        };
        data.conversions.push(conversion.clone());
        Ok(conversion)
    }
}

#[async_trait]
impl AffiliateRepository for MemoryRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<Affiliate>, AppError> {
        Ok(self.data().affiliates.iter().find(|a| a.code == code).cloned())
    }
}

#[async_trait]
impl OfferRepository for MemoryRepository {
    async fn list_active(&self) -> Result<Vec<Offer>, AppError> {
        let mut offers: Vec<Offer> = self
            .data()
            .offers
            .iter()
            .filter(|o| o.active)
            .cloned()
            .collect();
        offers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(offers)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Offer>, AppError> {
        Ok(self.data().offers.iter().find(|o| o.id == id).cloned())
    }
}

#[async_trait]
impl StatsRepository for MemoryRepository {
    async fn daily_stats(
        &self,
        affiliate_id: Uuid,
        range: DateRange,
    ) -> Result<Vec<DailyStat>, AppError> {
        let data = self.data();
        let owned = |link_id: Uuid| {
            data.links
                .iter()
                .any(|l| l.id == link_id && l.affiliate_id == affiliate_id)
        };
        let in_range = |day: NaiveDate| day >= range.from && day <= range.to;

        let mut days: BTreeMap<NaiveDate, DailyStat> = BTreeMap::new();

        for click in data.clicks.iter().filter(|c| owned(c.link_id)) {
            let day = click.created_at.date_naive();
            if in_range(day) {
                day_row(&mut days, day).clicks += 1;
            }
        }
        for conversion in data.conversions.iter().filter(|c| owned(c.link_id)) {
            let day = conversion.created_at.date_naive();
            if in_range(day) {
                let row = day_row(&mut days, day);
                row.conversions += 1;
                row.revenue_cents += conversion.revenue_cents;
            }
        }

        Ok(days.into_values().collect())
    }

    async fn payouts(&self, affiliate_id: Uuid) -> Result<Vec<Payout>, AppError> {
        let mut payouts: Vec<Payout> = self
            .data()
            .payouts
            .iter()
            .filter(|p| p.affiliate_id == affiliate_id)
            .cloned()
            .collect();
        payouts.sort_by(|a, b| b.period_start.cmp(&a.period_start));
        Ok(payouts)
    }
}

fn day_row(days: &mut BTreeMap<NaiveDate, DailyStat>, day: NaiveDate) -> &mut DailyStat {
    days.entry(day).or_insert(DailyStat {
        day,
        clicks: 0,
        conversions: 0,
        revenue_cents: 0,
    })
}

pub struct MemoryHealth {
    store: Arc<MemoryStore>,
    dashboard: bool,
}

#[async_trait]
impl HealthRepository for MemoryHealth {
    async fn ping(&self) -> Result<(), AppError> {
        let down = if self.dashboard {
            &self.store.dashboard_down
        } else {
            &self.store.tracking_down
        };

        if down.load(Ordering::SeqCst) {
            return Err(storage_error());
        }
        Ok(())
    }
}

// ─── PostgreSQL fixtures ────────────────────────────────────────────────────

pub async fn create_test_affiliate(pool: &PgPool, code: &str) -> Uuid {
    sqlx::query_scalar("INSERT INTO affiliates (code) VALUES ($1) RETURNING id")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_offer(pool: &PgPool, slug: &str, url: &str, active: bool) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO offers (name, slug, destination_url, active) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(slug.replace('-', " "))
    .bind(slug)
    .bind(url)
    .bind(active)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_link(
    pool: &PgPool,
    affiliate_id: Uuid,
    offer_id: Uuid,
    short_code: &str,
) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO links (affiliate_id, offer_id, short_code) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(affiliate_id)
    .bind(offer_id)
    .bind(short_code)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_click_at(pool: &PgPool, link_id: Uuid, created_at: DateTime<Utc>) {
    sqlx::query(
        "INSERT INTO clicks (link_id, session_id, device, created_at) VALUES ($1, 'sess', 'desktop', $2)",
    )
    .bind(link_id)
    .bind(created_at)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn create_test_conversion_at(
    pool: &PgPool,
    link_id: Uuid,
    revenue_cents: i64,
    created_at: DateTime<Utc>,
) {
    sqlx::query(
        "INSERT INTO conversions (link_id, session_id, revenue_cents, created_at) VALUES ($1, 'sess', $2, $3)",
    )
    .bind(link_id)
    .bind(revenue_cents)
    .bind(created_at)
    .execute(pool)
    .await
    .unwrap();
}
