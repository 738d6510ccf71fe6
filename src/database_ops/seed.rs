use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{info, warn};

use super::category::{resolve_category, DEFAULT_CATEGORY_NAME};
use super::ids::IdGenerator;
use super::products::transform;
use super::store::{CatalogStore, ProductRow};
use crate::catalog::RawCatalog;
use crate::normalization::slug::slugify;

#[derive(Debug, Clone)]
pub struct SeedOptions {
    pub category_name: String,
    pub dry_run: bool,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            category_name: DEFAULT_CATEGORY_NAME.to_string(),
            dry_run: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SeedSummary {
    pub new_arrivals: usize,
    pub top_selling: usize,
    pub category_id: String,
    pub category_created: bool,
    pub inserted: u64,
    /// Slug already present in the store.
    pub skipped_existing: usize,
    /// Slug repeated within the catalog itself; first occurrence wins.
    pub skipped_duplicate: usize,
    /// Name reduces to an empty slug.
    pub skipped_invalid: usize,
    /// Rows that would be inserted in dry-run mode.
    pub pending: usize,
    pub dry_run: bool,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl SeedSummary {
    pub fn skipped(&self) -> usize {
        self.skipped_existing + self.skipped_duplicate + self.skipped_invalid
    }

    pub fn nothing_new(&self) -> bool {
        self.inserted == 0 && self.pending == 0
    }

    pub fn log(&self) {
        info!(
            new_arrivals = self.new_arrivals,
            top_selling = self.top_selling,
            category_id = %self.category_id,
            category_created = self.category_created,
            inserted = self.inserted,
            skipped_existing = self.skipped_existing,
            skipped_duplicate = self.skipped_duplicate,
            skipped_invalid = self.skipped_invalid,
            pending = self.pending,
            dry_run = self.dry_run,
            "seed summary"
        );
    }
}

/// Seed every catalog entry that is not in the store yet.
///
/// The category is resolved once up front. Product rows are collected first and
/// written in a single transaction; nothing is written when no row is left.
pub async fn seed_all<S, G>(
    store: &mut S,
    ids: &mut G,
    catalog: &RawCatalog,
    options: &SeedOptions,
) -> Result<SeedSummary>
where
    S: CatalogStore + ?Sized,
    G: IdGenerator + ?Sized,
{
    let mut summary = SeedSummary {
        new_arrivals: catalog.new_arrivals.len(),
        top_selling: catalog.top_selling.len(),
        dry_run: options.dry_run,
        started_at: Some(Utc::now()),
        ..SeedSummary::default()
    };

    let category = resolve_category(store, ids, &options.category_name, options.dry_run)
        .await
        .context("resolve category")?;
    summary.category_id = category.id.clone();
    summary.category_created = category.created;

    let mut rows: Vec<ProductRow> = Vec::with_capacity(catalog.len());
    let mut seen: HashSet<String> = HashSet::new();
    for (group, raw) in catalog.entries() {
        let slug = slugify(&raw.name);
        if slug.is_empty() {
            warn!(name = %raw.name, id = %raw.id, %group, "skipping product with empty slug");
            summary.skipped_invalid += 1;
            continue;
        }
        if seen.contains(&slug) {
            warn!(name = %raw.name, %slug, %group, "skipping duplicate slug within catalog");
            summary.skipped_duplicate += 1;
            continue;
        }
        match transform(store, ids, raw, &category.id, group).await? {
            Some(row) => {
                seen.insert(slug);
                rows.push(row);
            }
            None => {
                info!(name = %raw.name, %slug, "skipping existing product");
                seen.insert(slug);
                summary.skipped_existing += 1;
            }
        }
    }

    if rows.is_empty() {
        info!("no new products to insert");
    } else if options.dry_run {
        summary.pending = rows.len();
        for row in &rows {
            info!(slug = %row.slug, sku = %row.sku, featured = row.is_featured, "dry run: would insert");
        }
    } else {
        summary.inserted = store
            .insert_products(&rows)
            .await
            .context("insert products")?;
        info!(count = summary.inserted, "successfully inserted products");
    }

    summary.finished_at = Some(Utc::now());
    summary.log();
    Ok(summary)
}
