//! Product business logic - Catalogue reads and the seller/admin review workflow.
//!
//! Sellers list and edit products; every listing or edit puts the product into
//! `pending` review. Admins alone move a product to `approved` or `rejected`. Reads
//! of absent products return `None` or empty lists rather than errors.

use crate::{
    entities::{Product, ProductStatus, product},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, QuerySelect, Set, prelude::*};
use serde::Deserialize;

/// Number of products shown in the "new arrivals" strip.
pub const NEW_ARRIVALS_LIMIT: u64 = 6;

/// Fields a seller supplies when listing a product.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    /// Display name
    pub name: String,
    /// Category name
    pub category: String,
    /// Unit price
    pub price: f64,
    /// Long description
    #[serde(default)]
    pub description: Option<String>,
    /// Image URL
    #[serde(default)]
    pub image: Option<String>,
}

/// Fields a seller may change; absent fields are left as they are.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductChanges {
    /// New display name
    pub name: Option<String>,
    /// New category
    pub category: Option<String>,
    /// New unit price
    pub price: Option<f64>,
    /// New description
    pub description: Option<String>,
    /// New image URL
    pub image: Option<String>,
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::InvalidValue {
            field: "name",
            value: name.to_string(),
        });
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(Error::InvalidAmount { amount: price });
    }
    Ok(())
}

/// Retrieves every product, newest listing last.
pub async fn get_all_products(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
    Product::find()
        .order_by_asc(product::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the products of one category.
pub async fn get_products_by_category(
    db: &DatabaseConnection,
    category: &str,
) -> Result<Vec<product::Model>> {
    Product::find()
        .filter(product::Column::Category.eq(category))
        .order_by_asc(product::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the products listed by one seller.
pub async fn get_products_by_seller(
    db: &DatabaseConnection,
    seller_email: &str,
) -> Result<Vec<product::Model>> {
    Product::find()
        .filter(product::Column::SellerEmail.eq(seller_email))
        .order_by_asc(product::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific product by its unique ID.
pub async fn get_product_by_id(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Option<product::Model>> {
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the most recently listed products, newest first.
pub async fn get_newest_products(
    db: &DatabaseConnection,
    limit: u64,
) -> Result<Vec<product::Model>> {
    Product::find()
        .order_by_desc(product::Column::CreatedDate)
        .order_by_desc(product::Column::Id)
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists a new product for `seller_email` in `pending` state.
///
/// # Errors
/// Returns an error if:
/// - The product name is empty or whitespace-only
/// - The price is negative or not finite (NaN, infinity)
/// - The database insert operation fails
pub async fn create_product(
    db: &DatabaseConnection,
    seller_email: &str,
    input: NewProduct,
) -> Result<product::Model> {
    validate_name(&input.name)?;
    validate_price(input.price)?;

    let product = product::ActiveModel {
        name: Set(input.name.trim().to_string()),
        category: Set(input.category),
        seller_email: Set(seller_email.to_string()),
        price: Set(input.price),
        description: Set(input.description),
        image: Set(input.image),
        status: Set(ProductStatus::Pending),
        created_date: Set(chrono::Utc::now()),
        ..Default::default()
    };
    product.insert(db).await.map_err(Into::into)
}

/// Applies a seller's edits and sends the product back to `pending` review.
///
/// Returns `None` when the product does not exist.
///
/// # Errors
/// Returns an error if:
/// - A new name is empty or a new price is invalid
/// - The database update operation fails
pub async fn update_product(
    db: &DatabaseConnection,
    product_id: i64,
    changes: ProductChanges,
) -> Result<Option<product::Model>> {
    if let Some(name) = &changes.name {
        validate_name(name)?;
    }
    if let Some(price) = changes.price {
        validate_price(price)?;
    }

    let Some(existing) = get_product_by_id(db, product_id).await? else {
        return Ok(None);
    };

    let mut product: product::ActiveModel = existing.into();
    if let Some(name) = changes.name {
        product.name = Set(name.trim().to_string());
    }
    if let Some(category) = changes.category {
        product.category = Set(category);
    }
    if let Some(price) = changes.price {
        product.price = Set(price);
    }
    if changes.description.is_some() {
        product.description = Set(changes.description);
    }
    if changes.image.is_some() {
        product.image = Set(changes.image);
    }
    product.status = Set(ProductStatus::Pending);

    Ok(Some(product.update(db).await?))
}

/// Sets a product's review state. Returns `None` when the product does not exist.
pub async fn change_product_status(
    db: &DatabaseConnection,
    product_id: i64,
    status: ProductStatus,
) -> Result<Option<product::Model>> {
    let Some(existing) = get_product_by_id(db, product_id).await? else {
        return Ok(None);
    };

    let mut product: product::ActiveModel = existing.into();
    product.status = Set(status);

    let updated = product.update(db).await?;
    tracing::info!(product_id, status = ?updated.status, "product status changed");
    Ok(Some(updated))
}

/// Deletes a product. Returns the number of rows removed (0 if absent).
pub async fn delete_product(db: &DatabaseConnection, product_id: i64) -> Result<u64> {
    let result = Product::delete_by_id(product_id).exec(db).await?;
    Ok(result.rows_affected)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_product_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let mut input = new_product("Phone", "Phones", 10.0);
        input.name = "   ".to_string();
        let result = create_product(&db, "seller@example.com", input).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidValue { field: "name", value: _ }
        ));

        let result =
            create_product(&db, "seller@example.com", new_product("Phone", "Phones", -1.0)).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidAmount { amount: -1.0 }
        ));

        let result = create_product(
            &db,
            "seller@example.com",
            new_product("Phone", "Phones", f64::INFINITY),
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidAmount { amount: _ }
        ));

        // Rejected listings never reach the table
        assert!(get_all_products(&db).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_is_pending() -> Result<()> {
        let db = setup_test_db().await?;

        let product =
            create_product(&db, "seller@example.com", new_product(" Phone ", "Phones", 499.0))
                .await?;

        assert_eq!(product.name, "Phone");
        assert_eq!(product.seller_email, "seller@example.com");
        assert_eq!(product.price, 499.0);
        assert_eq!(product.status, ProductStatus::Pending);

        Ok(())
    }

    #[tokio::test]
    async fn test_category_and_seller_filters() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_product(&db, "Phone", "Phones", "s1@example.com").await?;
        create_test_product(&db, "Laptop", "Laptops", "s1@example.com").await?;
        create_test_product(&db, "Tablet", "Phones", "s2@example.com").await?;

        assert_eq!(get_all_products(&db).await?.len(), 3);
        assert_eq!(get_products_by_category(&db, "Phones").await?.len(), 2);
        assert!(get_products_by_category(&db, "Cameras").await?.is_empty());
        assert_eq!(get_products_by_seller(&db, "s1@example.com").await?.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_newest_products_limit_and_order() -> Result<()> {
        let db = setup_test_db().await?;
        for i in 0..8 {
            create_test_product(&db, &format!("Item {i}"), "Misc", "s@example.com").await?;
        }

        let newest = get_newest_products(&db, NEW_ARRIVALS_LIMIT).await?;
        assert_eq!(newest.len(), 6);
        assert_eq!(newest[0].name, "Item 7");
        assert_eq!(newest[5].name, "Item 2");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_product_resets_status() -> Result<()> {
        let db = setup_test_db().await?;
        let product = create_test_product(&db, "Phone", "Phones", "s@example.com").await?;
        change_product_status(&db, product.id, ProductStatus::Approved).await?;

        let changes = ProductChanges {
            price: Some(450.0),
            ..Default::default()
        };
        let updated = update_product(&db, product.id, changes).await?.unwrap();

        assert_eq!(updated.price, 450.0);
        assert_eq!(updated.name, "Phone");
        assert_eq!(updated.status, ProductStatus::Pending);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_product_returns_none() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(update_product(&db, 999, ProductChanges::default()).await?.is_none());
        assert!(
            change_product_status(&db, 999, ProductStatus::Approved)
                .await?
                .is_none()
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_change_status_only_touches_status() -> Result<()> {
        let db = setup_test_db().await?;
        let product = create_test_product(&db, "Phone", "Phones", "s@example.com").await?;

        let updated = change_product_status(&db, product.id, ProductStatus::Rejected)
            .await?
            .unwrap();
        assert_eq!(updated.status, ProductStatus::Rejected);
        assert_eq!(updated.name, product.name);
        assert_eq!(updated.price, product.price);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_product() -> Result<()> {
        let db = setup_test_db().await?;
        let product = create_test_product(&db, "Phone", "Phones", "s@example.com").await?;

        assert_eq!(delete_product(&db, product.id).await?, 1);
        assert!(get_product_by_id(&db, product.id).await?.is_none());
        assert_eq!(delete_product(&db, product.id).await?, 0);

        Ok(())
    }
}
