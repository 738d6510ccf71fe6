use anyhow::{Context, Result};

use super::ids::IdGenerator;
use super::store::{CatalogStore, ProductMetadata, ProductRow};
use crate::catalog::{RawProduct, SourceGroup};
use crate::normalization::price::{parse_decimal, parse_optional_decimal};
use crate::normalization::sku::{generate_sku, source_id_string};
use crate::normalization::slug::slugify;

/// Stock assigned to every seeded product.
pub const DEFAULT_STOCK: i32 = 50;

pub fn product_description(name: &str) -> String {
    format!("High-quality replica of {name}")
}

/// Map a raw entry to a row, or `None` when its slug is already stored.
pub async fn transform<S, G>(
    store: &mut S,
    ids: &mut G,
    raw: &RawProduct,
    category_id: &str,
    group: SourceGroup,
) -> Result<Option<ProductRow>>
where
    S: CatalogStore + ?Sized,
    G: IdGenerator + ?Sized,
{
    let slug = slugify(&raw.name);
    if store.product_slug_exists(&slug).await? {
        return Ok(None);
    }
    build_row(ids.next_id(), raw, category_id, group).map(Some)
}

/// Pure part of the transformation: every derived field of the row.
pub fn build_row(
    id: String,
    raw: &RawProduct,
    category_id: &str,
    group: SourceGroup,
) -> Result<ProductRow> {
    let source_id = source_id_string(&raw.id);
    let price = parse_decimal(&raw.price)
        .with_context(|| format!("product {:?} (id {source_id}): bad price", raw.name))?;
    let sale_price = parse_optional_decimal(raw.original_price.as_ref())
        .with_context(|| format!("product {:?} (id {source_id}): bad originalPrice", raw.name))?;

    let image_url = non_empty(raw.image_url.as_deref());
    let images: Vec<String> = [image_url, non_empty(raw.hover_image_url.as_deref())]
        .into_iter()
        .flatten()
        .map(str::to_string)
        .collect();

    Ok(ProductRow {
        id,
        name: raw.name.clone(),
        slug: slugify(&raw.name),
        description: product_description(&raw.name),
        price,
        sale_price,
        sku: generate_sku(&raw.name, &raw.id),
        stock: DEFAULT_STOCK,
        image_url: image_url.map(str::to_string),
        images,
        category_id: category_id.to_string(),
        is_active: true,
        is_featured: group.is_featured(),
        metadata: ProductMetadata {
            rating: raw.rating.clone(),
            discount_percentage: raw.discount_percentage.clone(),
            original_product_id: raw.id.clone(),
        },
    })
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database_ops::ids::SequentialIds;
    use crate::database_ops::memory::MemoryStore;
    use bigdecimal::BigDecimal;
    use serde_json::{json, Value};
    use std::str::FromStr;

    fn raw(v: Value) -> RawProduct {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn builds_row_with_derived_fields() {
        let entry = raw(json!({
            "id": 1, "name": "Home Jersey", "price": 59.99, "originalPrice": "69.99",
            "imageUrl": "a.png", "hoverImageUrl": "b.png",
            "rating": 4.5, "discountPercentage": 14
        }));
        let row = build_row("c1".into(), &entry, "cat-1", SourceGroup::NewArrivals).unwrap();
        assert_eq!(row.slug, "home-jersey");
        assert_eq!(row.description, "High-quality replica of Home Jersey");
        assert_eq!(row.price, BigDecimal::from_str("59.99").unwrap());
        assert_eq!(row.sale_price, Some(BigDecimal::from_str("69.99").unwrap()));
        assert_eq!(row.sku, "HOMEJERSEY-1");
        assert_eq!(row.stock, 50);
        assert_eq!(row.image_url.as_deref(), Some("a.png"));
        assert_eq!(row.images, vec!["a.png", "b.png"]);
        assert_eq!(row.category_id, "cat-1");
        assert!(row.is_active);
        assert!(row.is_featured);
        assert_eq!(
            serde_json::to_value(&row.metadata).unwrap(),
            json!({"rating": 4.5, "discountPercentage": 14, "originalProductId": 1})
        );
    }

    #[test]
    fn missing_images_yield_empty_list() {
        let entry = raw(json!({"id": "x", "name": "Plain Kit", "price": 10}));
        let row = build_row("c1".into(), &entry, "cat", SourceGroup::TopSelling).unwrap();
        assert!(row.images.is_empty());
        assert_eq!(row.image_url, None);
        assert_eq!(row.sale_price, None);
        assert!(!row.is_featured);
        assert_eq!(
            serde_json::to_value(&row.metadata).unwrap(),
            json!({"rating": 0, "discountPercentage": 0, "originalProductId": "x"})
        );
    }

    #[test]
    fn explicit_null_rating_is_stored_as_null() {
        let entry = raw(json!({"id": 5, "name": "Unrated", "price": 10, "rating": null}));
        let row = build_row("c1".into(), &entry, "cat", SourceGroup::TopSelling).unwrap();
        assert_eq!(
            serde_json::to_value(&row.metadata).unwrap(),
            json!({"rating": null, "discountPercentage": 0, "originalProductId": 5})
        );
    }

    #[test]
    fn hover_only_image_is_kept_without_primary() {
        let entry = raw(json!({"id": 2, "name": "Away", "price": 1, "imageUrl": "", "hoverImageUrl": "h.png"}));
        let row = build_row("c1".into(), &entry, "cat", SourceGroup::TopSelling).unwrap();
        assert_eq!(row.images, vec!["h.png"]);
        assert_eq!(row.image_url, None);
    }

    #[test]
    fn bad_price_is_an_error() {
        let entry = raw(json!({"id": 3, "name": "Broken", "price": "n/a"}));
        let err = build_row("c1".into(), &entry, "cat", SourceGroup::TopSelling).unwrap_err();
        assert!(format!("{err:#}").contains("bad price"));
    }

    #[tokio::test]
    async fn transform_skips_existing_slug() {
        let mut store = MemoryStore::default();
        let mut ids = SequentialIds::new("p-");
        let entry = raw(json!({"id": 1, "name": "Home Jersey", "price": 59.99}));

        let row = transform(&mut store, &mut ids, &entry, "cat", SourceGroup::NewArrivals)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.id, "p-0001");
        store.products.push(row);

        let again = transform(&mut store, &mut ids, &entry, "cat", SourceGroup::NewArrivals)
            .await
            .unwrap();
        assert!(again.is_none());
    }
}
