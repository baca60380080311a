//! PostgreSQL connection pools for the two database roles.
//!
//! Both pools are created once at startup and shared by every request. They
//! connect lazily, so the process starts even if the database is briefly
//! unavailable; `/health` reports the outage instead.

use anyhow::{Context, Result};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;

/// The elevated tracking pool and the restricted dashboard pool.
#[derive(Clone)]
pub struct Database {
    /// Redirects, clicks, conversions and migrations.
    pub tracking: Arc<PgPool>,
    /// Affiliate-facing reads and link creation.
    pub dashboard: Arc<PgPool>,
}

impl Database {
    /// Builds both pools from configuration without connecting.
    ///
    /// # Errors
    ///
    /// Returns an error if either URL cannot be parsed.
    pub fn connect_lazy(config: &Config) -> Result<Self> {
        let tracking = pool_options(config)
            .connect_lazy(&config.database_url)
            .context("Invalid DATABASE_URL")?;

        let dashboard = pool_options(config)
            .connect_lazy(&config.dashboard_database_url)
            .context("Invalid DASHBOARD_DATABASE_URL")?;

        Ok(Self {
            tracking: Arc::new(tracking),
            dashboard: Arc::new(dashboard),
        })
    }

    /// Applies pending migrations with the elevated role.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(self.tracking.as_ref())
            .await
            .context("Failed to run migrations")?;

        tracing::info!("Database migrations completed");
        Ok(())
    }
}

fn pool_options(config: &Config) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
}
