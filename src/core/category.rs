//! Category business logic - Listing and config-driven seeding.

use crate::{
    config::app::CategoryConfig,
    entities::{Category, category},
    errors::Result,
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Retrieves every category, in seeding order.
pub async fn get_all_categories(db: &DatabaseConnection) -> Result<Vec<category::Model>> {
    Category::find()
        .order_by_asc(category::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Inserts the configured categories that are not stored yet.
///
/// Existing categories are matched by name and left untouched. Returns the number
/// of categories inserted.
pub async fn seed_categories(db: &DatabaseConnection, configs: &[CategoryConfig]) -> Result<usize> {
    let mut inserted = 0;

    for config in configs {
        let exists = Category::find()
            .filter(category::Column::Name.eq(config.name.as_str()))
            .one(db)
            .await?
            .is_some();
        if exists {
            continue;
        }

        category::ActiveModel {
            name: Set(config.name.clone()),
            image: Set(config.image.clone()),
            ..Default::default()
        }
        .insert(db)
        .await?;
        tracing::debug!("Seeded category '{}'", config.name);
        inserted += 1;
    }

    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    fn configs(names: &[&str]) -> Vec<CategoryConfig> {
        names
            .iter()
            .map(|name| CategoryConfig {
                name: (*name).to_string(),
                image: None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_seed_categories_skips_existing() -> Result<()> {
        let db = setup_test_db().await?;

        assert_eq!(seed_categories(&db, &configs(&["Phones", "Laptops"])).await?, 2);
        assert_eq!(
            seed_categories(&db, &configs(&["Phones", "Laptops", "Audio"])).await?,
            1
        );

        let names: Vec<String> = get_all_categories(&db)
            .await?
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Phones", "Laptops", "Audio"]);

        Ok(())
    }
}
