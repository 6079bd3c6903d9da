//! Order business logic - Checkout and payment reconciliation.
//!
//! A checkout turns the buyer's cart lines into one order row per line, all sharing a
//! generated transaction identifier (`tran_id`). The rows are written before the
//! payment provider is contacted, so a provider callback always finds them. Provider
//! callbacks then settle the whole group at once: a success marks every row paid, a
//! failure or cancellation removes every row. Each settlement is one statement, so a
//! group is never left half paid or half deleted, and repeating a callback is a no-op.

use crate::{
    config::AppConfig,
    entities::{Order, order},
    errors::{Error, Result},
    payment::{CheckoutSessionRequest, PaymentGateway},
};
use chrono::{DateTime, Utc};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*, sea_query::Expr};
use serde::Deserialize;
use uuid::Uuid;

/// A cart line as submitted at checkout.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutLine {
    /// Identifier of the cart line; stored on the order as `productID`
    #[serde(rename = "_id", alias = "id")]
    pub id: i64,
    /// Buyer email
    #[serde(default)]
    pub user_email: Option<String>,
    /// Product name
    #[serde(default)]
    pub name: Option<String>,
    /// Unit price
    #[serde(default)]
    pub price: Option<f64>,
    /// Product image
    #[serde(default)]
    pub image: Option<String>,
    /// Units ordered
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

const fn default_quantity() -> i64 {
    1
}

/// Delivery and contact details from the checkout form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomerForm {
    /// Buyer name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Street address
    pub delivery_address: String,
    /// Phone number
    pub number: String,
    /// District
    pub district_name: String,
    /// City
    pub city_name: String,
}

/// Hosted-gateway checkout request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    /// Amount to charge for the whole cart
    pub total_price: f64,
    /// Lines being bought
    pub all_carts: Vec<CheckoutLine>,
    /// Buyer details
    pub form_data: CustomerForm,
}

/// Card checkout request; the payment already happened in the storefront.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectOrderRequest {
    /// Lines being bought
    pub all_carts: Vec<CheckoutLine>,
    /// Buyer details
    pub form_data: CustomerForm,
    /// Transaction identifier chosen by the storefront
    #[serde(rename = "tran_id")]
    pub tran_id: String,
    /// Checkout time reported by the storefront
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// An opened hosted checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSession {
    /// Shared transaction identifier of the stored order rows
    pub tran_id: String,
    /// Provider page the buyer must be redirected to
    pub url: String,
}

/// Provider verdict delivered to a payment callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// Payment captured
    Success,
    /// Payment declined or errored
    Fail,
    /// Buyer abandoned the payment page
    Cancel,
}

impl PaymentOutcome {
    /// Path segment used in callback and redirect URLs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Fail => "fail",
            Self::Cancel => "cancel",
        }
    }
}

/// Generates a fresh transaction identifier (`trx` followed by 32 hex characters).
#[must_use]
pub fn new_transaction_id() -> String {
    format!("trx{}", Uuid::new_v4().simple())
}

fn order_rows(
    lines: Vec<CheckoutLine>,
    form: &CustomerForm,
    tran_id: &str,
    created_at: DateTime<Utc>,
) -> Vec<order::ActiveModel> {
    lines
        .into_iter()
        .map(|line| order::ActiveModel {
            product_id: Set(line.id),
            user_email: Set(line.user_email),
            name: Set(line.name),
            price: Set(line.price),
            image: Set(line.image),
            quantity: Set(line.quantity),
            paid_status: Set(false),
            tran_id: Set(tran_id.to_string()),
            created_at: Set(created_at),
            cus_name: Set(form.name.clone()),
            delivery_address: Set(form.delivery_address.clone()),
            number: Set(form.number.clone()),
            district_name: Set(form.district_name.clone()),
            city_name: Set(form.city_name.clone()),
            cus_email: Set(form.email.clone()),
            ..Default::default()
        })
        .collect()
}

/// Stores one unpaid order row per checkout line under `tran_id`.
///
/// All rows go in with one batch insert inside a database transaction, whatever the
/// number of lines.
///
/// # Errors
/// Returns an error if:
/// - `lines` is empty
/// - `tran_id` is empty or already used by another order group
/// - The database operation fails
pub async fn create_order_group(
    db: &DatabaseConnection,
    lines: Vec<CheckoutLine>,
    form: &CustomerForm,
    tran_id: &str,
    created_at: DateTime<Utc>,
) -> Result<Vec<order::Model>> {
    if lines.is_empty() {
        return Err(Error::EmptyCheckout);
    }
    if tran_id.trim().is_empty() {
        return Err(Error::InvalidValue {
            field: "tran_id",
            value: tran_id.to_string(),
        });
    }

    let txn = db.begin().await?;

    let already_used = Order::find()
        .filter(order::Column::TranId.eq(tran_id))
        .count(&txn)
        .await?;
    if already_used > 0 {
        return Err(Error::InvalidValue {
            field: "tran_id",
            value: tran_id.to_string(),
        });
    }

    Order::insert_many(order_rows(lines, form, tran_id, created_at))
        .exec(&txn)
        .await?;

    let rows = Order::find()
        .filter(order::Column::TranId.eq(tran_id))
        .order_by_asc(order::Column::Id)
        .all(&txn)
        .await?;

    txn.commit().await?;

    tracing::info!(tran_id, rows = rows.len(), "order group stored");
    Ok(rows)
}

/// Starts a hosted-gateway checkout.
///
/// The order rows are committed first; only then is the provider asked for a
/// session. If the provider refuses, the rows are removed again so no orphaned
/// unpaid group is left behind.
///
/// # Errors
/// Returns an error if:
/// - The total price is negative or not finite
/// - The cart is empty
/// - The database operation fails
/// - The provider does not open a session
pub async fn initiate_checkout(
    db: &DatabaseConnection,
    gateway: &dyn PaymentGateway,
    config: &AppConfig,
    request: CheckoutRequest,
) -> Result<CheckoutSession> {
    if !request.total_price.is_finite() || request.total_price < 0.0 {
        return Err(Error::InvalidAmount {
            amount: request.total_price,
        });
    }

    let tran_id = new_transaction_id();
    let num_of_item = request.all_carts.len();
    let product_name = request
        .all_carts
        .iter()
        .filter_map(|line| line.name.as_deref())
        .collect::<Vec<_>>()
        .join(", ");

    create_order_group(db, request.all_carts, &request.form_data, &tran_id, Utc::now()).await?;

    let form = request.form_data;
    let session = CheckoutSessionRequest {
        tran_id: tran_id.clone(),
        total_amount: request.total_price,
        currency: config.gateway.currency.clone(),
        success_url: config.callback_url(PaymentOutcome::Success.as_str(), &tran_id),
        fail_url: config.callback_url(PaymentOutcome::Fail.as_str(), &tran_id),
        cancel_url: config.callback_url(PaymentOutcome::Cancel.as_str(), &tran_id),
        ipn_url: config.gateway.ipn_url.clone(),
        product_name: if product_name.is_empty() {
            format!("{num_of_item} item(s)")
        } else {
            product_name
        },
        num_of_item,
        cus_name: form.name,
        cus_email: form.email,
        cus_address: form.delivery_address,
        cus_city: form.district_name,
        cus_state: form.city_name,
        cus_phone: form.number,
    };

    match gateway.init_session(&session).await {
        Ok(url) => Ok(CheckoutSession { tran_id, url }),
        Err(e) => {
            tracing::error!(tran_id = %tran_id, "checkout session failed: {}", e);
            let removed = delete_order_group(db, &tran_id).await?;
            tracing::debug!(tran_id = %tran_id, removed, "unpaid order group discarded");
            Err(e)
        }
    }
}

/// Records an order whose payment was collected in the storefront.
///
/// # Errors
/// Same as [`create_order_group`].
pub async fn place_direct_order(
    db: &DatabaseConnection,
    request: DirectOrderRequest,
) -> Result<Vec<order::Model>> {
    let created_at = request.created_at.unwrap_or_else(Utc::now);
    create_order_group(
        db,
        request.all_carts,
        &request.form_data,
        &request.tran_id,
        created_at,
    )
    .await
}

/// Retrieves every order row of one checkout.
pub async fn get_orders_by_tran_id(
    db: &DatabaseConnection,
    tran_id: &str,
) -> Result<Vec<order::Model>> {
    Order::find()
        .filter(order::Column::TranId.eq(tran_id))
        .order_by_asc(order::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

async fn mark_order_group_paid(db: &DatabaseConnection, tran_id: &str) -> Result<u64> {
    let result = Order::update_many()
        .col_expr(order::Column::PaidStatus, Expr::value(true))
        .filter(order::Column::TranId.eq(tran_id))
        .filter(order::Column::PaidStatus.eq(false))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

async fn delete_order_group(db: &DatabaseConnection, tran_id: &str) -> Result<u64> {
    let result = Order::delete_many()
        .filter(order::Column::TranId.eq(tran_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Applies a provider verdict to every order row sharing `tran_id`.
///
/// Returns the number of rows touched. Unknown or already settled transaction
/// identifiers touch zero rows and are not an error.
pub async fn reconcile_payment(
    db: &DatabaseConnection,
    tran_id: &str,
    outcome: PaymentOutcome,
) -> Result<u64> {
    let affected = match outcome {
        PaymentOutcome::Success => mark_order_group_paid(db, tran_id).await?,
        PaymentOutcome::Fail | PaymentOutcome::Cancel => delete_order_group(db, tran_id).await?,
    };

    tracing::info!(
        tran_id,
        outcome = outcome.as_str(),
        affected,
        "payment reconciled"
    );
    Ok(affected)
}
