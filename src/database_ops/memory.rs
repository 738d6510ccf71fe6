//! In-memory `CatalogStore` used by the seeding tests.
use anyhow::{anyhow, Result};
use async_trait::async_trait;

use super::store::{CatalogStore, NewCategory, ProductRow};

#[derive(Debug, Default)]
pub struct MemoryStore {
    pub categories: Vec<NewCategory>,
    pub products: Vec<ProductRow>,
    /// Inserting a product with this slug fails, simulating a constraint error.
    pub fail_on_slug: Option<String>,
    pub rollbacks: usize,
    pub category_lookups: usize,
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn category_id_by_slug(&mut self, slug: &str) -> Result<Option<String>> {
        self.category_lookups += 1;
        Ok(self
            .categories
            .iter()
            .find(|c| c.slug == slug)
            .map(|c| c.id.clone()))
    }

    async fn insert_category(&mut self, category: &NewCategory) -> Result<()> {
        if self.categories.iter().any(|c| c.slug == category.slug) {
            return Err(anyhow!("duplicate category slug {}", category.slug));
        }
        self.categories.push(category.clone());
        Ok(())
    }

    async fn product_slug_exists(&mut self, slug: &str) -> Result<bool> {
        Ok(self.products.iter().any(|p| p.slug == slug))
    }

    async fn insert_products(&mut self, rows: &[ProductRow]) -> Result<u64> {
        let mut staged: Vec<ProductRow> = Vec::with_capacity(rows.len());
        for row in rows {
            let duplicate = self.products.iter().chain(staged.iter()).any(|p| p.slug == row.slug);
            if duplicate || self.fail_on_slug.as_deref() == Some(row.slug.as_str()) {
                self.rollbacks += 1;
                return Err(anyhow!("insert product slug={} failed", row.slug));
            }
            staged.push(row.clone());
        }
        let written = staged.len() as u64;
        self.products.extend(staged);
        Ok(written)
    }
}
