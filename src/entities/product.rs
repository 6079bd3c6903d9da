//! Product entity - Represents an item listed for sale by a seller.
//!
//! Sellers create and edit products; every seller edit puts the product back into
//! review (`pending`). Admins move products between review states.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Review state of a product listing
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    /// Awaiting admin review
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Visible to buyers
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Refused by an admin
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (e.g., "Pixel 8")
    pub name: String,
    /// Category name used for browsing
    pub category: String,
    /// Email of the seller who listed the product
    pub seller_email: String,
    /// Unit price in dollars
    pub price: f64,
    /// Optional long description
    pub description: Option<String>,
    /// Optional image URL
    pub image: Option<String>,
    /// Review state
    pub status: ProductStatus,
    /// When the product was listed
    pub created_date: DateTimeUtc,
}

/// `Product` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
