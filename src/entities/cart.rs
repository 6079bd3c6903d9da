//! Cart entity - One product/quantity line in a user's shopping cart.
//!
//! Lines are keyed by (`user_email`, `product_id`) for merging. The display fields are
//! a snapshot taken when the line is first added and are copied into orders at checkout.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Cart line database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "carts")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the cart line
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Email of the cart owner
    pub user_email: String,
    /// Product this line refers to
    #[serde(rename = "productID")]
    pub product_id: i64,
    /// Number of units, never negative
    pub quantity: i64,
    /// Product name at the time of adding
    pub name: Option<String>,
    /// Unit price at the time of adding
    pub price: Option<f64>,
    /// Product image at the time of adding
    pub image: Option<String>,
}

/// `Cart` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
