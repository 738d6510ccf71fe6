use anyhow::Result;
use tracing::info;

use super::ids::IdGenerator;
use super::store::{CatalogStore, NewCategory};
use crate::normalization::slug::slugify;

pub const DEFAULT_CATEGORY_NAME: &str = "Football Jerseys";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryResolution {
    pub id: String,
    pub slug: String,
    /// True when the category did not exist before this run.
    pub created: bool,
}

pub fn category_description(name: &str) -> String {
    format!("{name} football jerseys")
}

/// Find the category by its slug or create it.
///
/// The insert is committed on its own, ahead of and independent from the
/// product transaction. With `dry_run` a missing category is not written; the
/// returned id is a fresh placeholder.
pub async fn resolve_category<S, G>(
    store: &mut S,
    ids: &mut G,
    name: &str,
    dry_run: bool,
) -> Result<CategoryResolution>
where
    S: CatalogStore + ?Sized,
    G: IdGenerator + ?Sized,
{
    let slug = slugify(name);
    if let Some(id) = store.category_id_by_slug(&slug).await? {
        info!(category = name, %slug, %id, "using existing category");
        return Ok(CategoryResolution {
            id,
            slug,
            created: false,
        });
    }

    let category = NewCategory {
        id: ids.next_id(),
        name: name.to_string(),
        slug: slug.clone(),
        description: category_description(name),
    };
    if dry_run {
        info!(category = name, %slug, "dry run: category would be created");
    } else {
        store.insert_category(&category).await?;
        info!(category = name, %slug, id = %category.id, "created category");
    }
    Ok(CategoryResolution {
        id: category.id,
        slug,
        created: true,
    })
}
