use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use tracing::Instrument;

use crate::config::Config;
use crate::telemetry::{self};
use crate::telemetry::ops::init::Phase as InitPhase;

/// One connection per run. Without a DSN, libpq-style `PG*` variables apply.
pub async fn connect(cfg: &Config) -> Result<PgPool> {
    let opts = PgPoolOptions::new().max_connections(1);
    let pool = match cfg.dsn.as_deref() {
        Some(dsn) => opts.connect(dsn).await,
        None => opts.connect_with(PgConnectOptions::new()).await,
    };
    pool.context("connect to database")
}

/// `manage init`: apply pending migrations (idempotent).
pub async fn run(pool: &PgPool) -> Result<()> {
    let log = telemetry::init();
    let _g = log.root_span().entered();
    migrate(pool).instrument(log.span(&InitPhase::Migrate)).await?;
    if telemetry::config::json_mode() {
        log.result(&serde_json::json!({ "migrated": true }))?;
    } else {
        println!("✅ Database initialized successfully");
    }
    Ok(())
}

pub async fn migrate(pool: &PgPool) -> Result<()> {
    sqlx::migrate!().run(pool).await.context("apply migrations")?;
    Ok(())
}
