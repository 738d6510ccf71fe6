use anyhow::{Context, Result};
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions, PgSslMode},
    PgPool,
};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, instrument};

/// A single database connection held for the duration of one run.
///
/// Backed by a `PgPool` capped at one connection so that transactions can be
/// owned (`Transaction<'static, Postgres>`) while every statement still runs on
/// the same session.
#[derive(Clone)]
pub struct Db {
    pub pool: PgPool,
}

impl Db {
    // SECURITY: never include raw DSNs in tracing spans (they may contain credentials).
    #[instrument(skip(database_url))]
    pub async fn connect_single(database_url: &str) -> Result<Self> {
        let use_prepared = crate::util::env::env_flag("USE_PREPARED", false);
        let mut connect_options =
            PgConnectOptions::from_str(database_url).context("invalid database URL")?;

        // Ensure TLS is enabled when DSN contains sslmode=require
        if database_url.contains("sslmode=require") && !database_url.contains("sslmode=disable") {
            connect_options = connect_options.ssl_mode(PgSslMode::Require);
        }

        if !use_prepared {
            // PgBouncer txn mode safe
            connect_options = connect_options.statement_cache_capacity(0);
        }

        let pool = PgPoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(connect_options)
            .await
            .context("failed to connect to database")?;
        info!("connected to db");
        Ok(Self { pool })
    }

    /// Close the connection, waiting for it to be returned to the pool first.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("database connection closed");
    }
}
