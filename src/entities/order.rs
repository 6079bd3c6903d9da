//! Order entity - One purchased cart line.
//!
//! A checkout produces one row per cart line, all sharing a `tran_id`. Rows are
//! created unpaid, marked paid as a group on a successful payment callback, and
//! removed as a group when the payment fails or is cancelled.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the order row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Identifier of the cart line this row was created from
    #[serde(rename = "productID")]
    pub product_id: i64,
    /// Buyer email copied from the cart line
    pub user_email: Option<String>,
    /// Product name copied from the cart line
    pub name: Option<String>,
    /// Unit price copied from the cart line
    pub price: Option<f64>,
    /// Product image copied from the cart line
    pub image: Option<String>,
    /// Units ordered
    pub quantity: i64,
    /// Whether the payment for this checkout has been confirmed
    pub paid_status: bool,
    /// Transaction identifier shared by every row of one checkout
    #[serde(rename = "tran_id")]
    pub tran_id: String,
    /// When the checkout was started
    pub created_at: DateTimeUtc,
    /// Customer name from the checkout form
    pub cus_name: String,
    /// Delivery address from the checkout form
    pub delivery_address: String,
    /// Phone number from the checkout form
    pub number: String,
    /// District from the checkout form
    pub district_name: String,
    /// City from the checkout form
    pub city_name: String,
    /// Contact email from the checkout form
    #[serde(rename = "cus_email")]
    pub cus_email: String,
}

/// `Order` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
