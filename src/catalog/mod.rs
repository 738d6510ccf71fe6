//! The static JSON catalog the seeder reads from.
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::path::Path;

/// Which top-level catalog group an entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceGroup {
    NewArrivals,
    TopSelling,
}

impl SourceGroup {
    pub fn key(self) -> &'static str {
        match self {
            SourceGroup::NewArrivals => "newArrivals",
            SourceGroup::TopSelling => "topSelling",
        }
    }

    /// Products from the new-arrivals group are featured on the storefront.
    pub fn is_featured(self) -> bool {
        matches!(self, SourceGroup::NewArrivals)
    }
}

impl fmt::Display for SourceGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One raw product entry. Fields the seeder does not use are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    /// Required; an explicit `null` is kept as-is.
    pub id: Value,
    pub name: String,
    #[serde(default)]
    pub price: Value,
    #[serde(default)]
    pub original_price: Option<Value>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub hover_image_url: Option<String>,
    /// `0` when absent; a present `null` is kept.
    #[serde(default = "zero")]
    pub rating: Value,
    #[serde(default = "zero")]
    pub discount_percentage: Value,
}

fn zero() -> Value {
    Value::from(0)
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCatalog {
    #[serde(default)]
    pub new_arrivals: Vec<RawProduct>,
    #[serde(default)]
    pub top_selling: Vec<RawProduct>,
}

impl RawCatalog {
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("catalog JSON does not match the expected shape")
    }

    /// Read and parse the catalog file. A missing file is reported as such,
    /// separately from unreadable or malformed content.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!("products JSON file not found at: {}", path.display());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// All entries tagged with their group: new arrivals first, then top selling.
    pub fn entries(&self) -> impl Iterator<Item = (SourceGroup, &RawProduct)> {
        self.new_arrivals
            .iter()
            .map(|p| (SourceGroup::NewArrivals, p))
            .chain(self.top_selling.iter().map(|p| (SourceGroup::TopSelling, p)))
    }

    pub fn len(&self) -> usize {
        self.new_arrivals.len() + self.top_selling.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
