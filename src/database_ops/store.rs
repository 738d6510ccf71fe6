//! Storage seam for the seeder.
//!
//! Every table and column name of the storefront schema lives in this file.
//! The schema is owned by the storefront (Prisma, camelCase quoted columns);
//! this crate only reads and inserts.
use anyhow::{Context, Result};
use async_trait::async_trait;
use bigdecimal::BigDecimal;
use serde::Serialize;
use serde_json::Value;
use sqlx::{types::Json, PgPool, Postgres, Transaction};
use tracing::{debug, error, info};

#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMetadata {
    pub rating: Value,
    pub discount_percentage: Value,
    pub original_product_id: Value,
}

/// A fully transformed product, ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRow {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price: BigDecimal,
    pub sale_price: Option<BigDecimal>,
    pub sku: String,
    pub stock: i32,
    pub image_url: Option<String>,
    pub images: Vec<String>,
    pub category_id: String,
    pub is_active: bool,
    pub is_featured: bool,
    pub metadata: ProductMetadata,
}

#[async_trait]
pub trait CatalogStore: Send {
    async fn category_id_by_slug(&mut self, slug: &str) -> Result<Option<String>>;

    /// Insert a category and commit it immediately.
    async fn insert_category(&mut self, category: &NewCategory) -> Result<()>;

    async fn product_slug_exists(&mut self, slug: &str) -> Result<bool>;

    /// Insert all rows inside one transaction. Commits only after the last
    /// insert succeeded; on any failure the transaction is rolled back
    /// explicitly and the error is returned. Returns the number of rows written.
    async fn insert_products(&mut self, rows: &[ProductRow]) -> Result<u64>;
}

const SELECT_CATEGORY_BY_SLUG: &str = "SELECT id FROM categories WHERE slug = $1";

const INSERT_CATEGORY: &str = r#"INSERT INTO categories (id, name, slug, description, "createdAt", "updatedAt")
VALUES ($1, $2, $3, $4, NOW(), NOW())"#;

const SELECT_PRODUCT_BY_SLUG: &str = "SELECT 1 FROM products WHERE slug = $1 LIMIT 1";

const INSERT_PRODUCT: &str = r#"INSERT INTO products
    (id, name, slug, description, price, "salePrice", sku, stock, "imageUrl", images,
     "categoryId", "isActive", "isFeatured", metadata, "createdAt", "updatedAt")
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, NOW(), NOW())"#;

/// `CatalogStore` over the run's single Postgres connection.
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_all(tx: &mut Transaction<'static, Postgres>, rows: &[ProductRow]) -> Result<u64> {
        let mut written = 0u64;
        for row in rows {
            let res = sqlx::query(INSERT_PRODUCT)
                .bind(&row.id)
                .bind(&row.name)
                .bind(&row.slug)
                .bind(&row.description)
                .bind(&row.price)
                .bind(row.sale_price.as_ref())
                .bind(&row.sku)
                .bind(row.stock)
                .bind(row.image_url.as_deref())
                .bind(&row.images)
                .bind(&row.category_id)
                .bind(row.is_active)
                .bind(row.is_featured)
                .bind(Json(&row.metadata))
                .execute(&mut **tx)
                .await
                .with_context(|| format!("insert product slug={}", row.slug))?;
            written += res.rows_affected();
            debug!(slug = %row.slug, sku = %row.sku, "product staged");
        }
        Ok(written)
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn category_id_by_slug(&mut self, slug: &str) -> Result<Option<String>> {
        let id: Option<String> = sqlx::query_scalar(SELECT_CATEGORY_BY_SLUG)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("lookup category slug={slug}"))?;
        Ok(id)
    }

    async fn insert_category(&mut self, category: &NewCategory) -> Result<()> {
        sqlx::query(INSERT_CATEGORY)
            .bind(&category.id)
            .bind(&category.name)
            .bind(&category.slug)
            .bind(&category.description)
            .execute(&self.pool)
            .await
            .with_context(|| format!("insert category slug={}", category.slug))?;
        Ok(())
    }

    async fn product_slug_exists(&mut self, slug: &str) -> Result<bool> {
        let found: Option<i32> = sqlx::query_scalar(SELECT_PRODUCT_BY_SLUG)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("lookup product slug={slug}"))?;
        Ok(found.is_some())
    }

    async fn insert_products(&mut self, rows: &[ProductRow]) -> Result<u64> {
        let mut tx = self.pool.begin().await.context("begin product transaction")?;
        match Self::insert_all(&mut tx, rows).await {
            Ok(written) => {
                tx.commit().await.context("commit product transaction")?;
                info!(rows = written, "product transaction committed");
                Ok(written)
            }
            Err(err) => {
                error!(error = %err, "product insert failed; rolling back");
                if let Err(rb) = tx.rollback().await {
                    error!(error = %rb, "rollback failed");
                }
                Err(err)
            }
        }
    }
}
