//! Database configuration module for Gadget Trove.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust structs without hand-written SQL.

use crate::entities::{Cart, CartColumn, Category, Order, Product, User};
use crate::errors::Result;
use sea_orm::{
    ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema, sea_query::Index,
};

const DEFAULT_DATABASE_URL: &str = "sqlite://gadget_trove.sqlite?mode=rwc";

/// Gets the database URL from environment variable or returns the default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by `DATABASE_URL`.
///
/// Falls back to a local `SQLite` file (created on demand) if no environment variable is set.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    tracing::debug!("Connecting to database at {}", database_url);

    Database::connect(&database_url).await.map_err(Into::into)
}

async fn create_table<E>(db: &DatabaseConnection, schema: &Schema, entity: E) -> Result<()>
where
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(builder.build(&statement)).await?;
    Ok(())
}

/// A user holds at most one line per product.
async fn create_cart_key_index(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let mut statement = Index::create();
    statement
        .name("idx_carts_user_product")
        .table(Cart)
        .col(CartColumn::UserEmail)
        .col(CartColumn::ProductId)
        .unique()
        .if_not_exists();
    db.execute(builder.build(&statement)).await?;
    Ok(())
}

/// Creates all storefront tables that do not exist yet.
///
/// It creates tables for products, carts, users, orders, and categories, plus the
/// unique (`user_email`, `product_id`) index on carts.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, Product).await?;
    create_table(db, &schema, Cart).await?;
    create_table(db, &schema, User).await?;
    create_table(db, &schema, Order).await?;
    create_table(db, &schema, Category).await?;
    create_cart_key_index(db).await?;

    Ok(())
}
