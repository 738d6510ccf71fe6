use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use crate::catalog::RawCatalog;
use crate::database_ops::category::DEFAULT_CATEGORY_NAME;
use crate::database_ops::ids::CuidIds;
use crate::database_ops::seed::{seed_all, SeedOptions, SeedSummary};
use crate::database_ops::store::PgCatalogStore;
use crate::util::db::Db;
use crate::util::env as env_util;

pub const DEFAULT_CATALOG_PATH: &str = "public/products.json";
pub const DEFAULT_ENV_FILE: &str = ".env";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "seed_products",
    version,
    about = "Seed the storefront database with products from the JSON catalog"
)]
pub struct SeedArgs {
    /// Path to the products JSON (env CATALOG_PATH, default public/products.json).
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Env file holding DIRECT_URL / DATABASE_URL.
    #[arg(long, default_value = DEFAULT_ENV_FILE)]
    pub env_file: PathBuf,

    /// Category every seeded product is attached to.
    #[arg(long, default_value = DEFAULT_CATEGORY_NAME)]
    pub category: String,

    /// Resolve and transform everything but write nothing (env SEED_DRY_RUN).
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Print the final summary as JSON on stdout; log lines go to stderr.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

/// Everything one run needs, resolved up front from flags and environment.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub database_url: String,
    pub catalog_path: PathBuf,
    pub category_name: String,
    pub dry_run: bool,
    pub json_summary: bool,
}

impl SeedConfig {
    /// Load the env file, then merge flags over environment over defaults.
    /// Fails when no connection string is configured.
    pub fn resolve(args: SeedArgs) -> Result<Self> {
        env_util::init_env(&args.env_file);
        env_util::preflight_check(
            "seed-products",
            env_util::DB_URL_KEYS,
            &["DIRECT_URL", "DATABASE_URL", "CATALOG_PATH", "SEED_DRY_RUN"],
        )?;
        let database_url = env_util::db_url()?;
        let catalog_path = args
            .catalog
            .or_else(|| env_util::env_opt("CATALOG_PATH").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_PATH));
        Ok(Self {
            database_url,
            catalog_path,
            category_name: args.category,
            dry_run: args.dry_run || env_util::env_flag("SEED_DRY_RUN", false),
            json_summary: args.json,
        })
    }
}

/// Load the catalog, open the connection, seed, and always close the connection.
pub async fn run(cfg: SeedConfig) -> Result<SeedSummary> {
    info!("starting database seeding");
    let catalog = RawCatalog::load(&cfg.catalog_path)?;
    info!(count = catalog.new_arrivals.len(), "loaded new arrivals");
    info!(count = catalog.top_selling.len(), "loaded top selling products");

    let db = Db::connect_single(&cfg.database_url)
        .await
        .context("error connecting to database")?;

    let mut store = PgCatalogStore::new(db.pool.clone());
    let mut ids = CuidIds;
    let options = SeedOptions {
        category_name: cfg.category_name.clone(),
        dry_run: cfg.dry_run,
    };
    let outcome = seed_all(&mut store, &mut ids, &catalog, &options)
        .await
        .context("error during seeding");
    db.close().await;
    let summary = outcome?;

    if cfg.json_summary {
        println!("{}", summary_json(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(summary)
}

/// The summary as a standalone JSON document; with `--json` it is the only
/// thing written to stdout.
pub fn summary_json(summary: &SeedSummary) -> Result<String> {
    serde_json::to_string_pretty(summary).context("serialize seed summary")
}

fn print_summary(summary: &SeedSummary) {
    if summary.dry_run {
        println!(
            "dry run: {} product(s) would be inserted, {} skipped",
            summary.pending,
            summary.skipped()
        );
    } else if summary.nothing_new() {
        println!("no new products to insert ({} skipped)", summary.skipped());
    } else {
        println!(
            "inserted {} product(s), skipped {}",
            summary.inserted,
            summary.skipped()
        );
    }
}
