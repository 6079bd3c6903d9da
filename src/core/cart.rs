//! Cart business logic - Handles adding, stepping, listing, and removing cart lines.
//!
//! A cart line is keyed by (`user_email`, `product_id`). Adding a product that is
//! already in the cart merges the quantity into the existing line instead of creating
//! a second one. Quantity changes are expressed as single conditional `UPDATE`
//! statements so concurrent requests for the same line never lose an update.

use crate::{
    entities::{Cart, cart},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*, sea_query::Expr};
use serde::Deserialize;

/// Fields of an add-to-cart request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineInput {
    /// Cart owner
    pub user_email: String,
    /// Product being added
    #[serde(rename = "productID")]
    pub product_id: i64,
    /// Quantity delta; the starting quantity when the line is new
    pub quantity: i64,
    /// Product name snapshot
    #[serde(default)]
    pub name: Option<String>,
    /// Unit price snapshot
    #[serde(default)]
    pub price: Option<f64>,
    /// Product image snapshot
    #[serde(default)]
    pub image: Option<String>,
}

/// Result of [`add_or_merge_cart_line`].
#[derive(Debug, Clone, PartialEq)]
pub enum MergeOutcome {
    /// No line existed for the key; a new one was inserted
    Created(cart::Model),
    /// The quantity delta was added to the existing line
    Merged(cart::Model),
}

impl MergeOutcome {
    /// The line as stored after the operation.
    #[must_use]
    pub const fn line(&self) -> &cart::Model {
        match self {
            Self::Created(line) | Self::Merged(line) => line,
        }
    }
}

/// Direction of a single-unit quantity step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    /// Add one unit
    Increment,
    /// Remove one unit, subject to the decrement floor
    Decrement,
}

impl StepDirection {
    /// Interprets the `quantity` query parameter: any numeric form of one (`1`,
    /// `1.0`) increments, anything else (including a missing value) decrements.
    #[must_use]
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw.map(str::trim).and_then(|value| value.parse::<f64>().ok()) {
            Some(value) if (value - 1.0).abs() < f64::EPSILON => Self::Increment,
            _ => Self::Decrement,
        }
    }
}

/// Result of [`step_cart_line_quantity`].
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    /// The line as stored after the operation
    pub line: cart::Model,
    /// False when a decrement was refused by the floor
    pub modified: bool,
}

/// Retrieves all cart lines belonging to a user, oldest first.
pub async fn get_cart_lines_for_user(
    db: &DatabaseConnection,
    user_email: &str,
) -> Result<Vec<cart::Model>> {
    Cart::find()
        .filter(cart::Column::UserEmail.eq(user_email))
        .order_by_asc(cart::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a cart line by its unique ID.
pub async fn get_cart_line_by_id(
    db: &DatabaseConnection,
    cart_line_id: i64,
) -> Result<Option<cart::Model>> {
    Cart::find_by_id(cart_line_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Adds a product to a user's cart, merging into the existing line when there is one.
///
/// An existing line is incremented by `input.quantity` with a single conditional
/// update that refuses to take the quantity below zero. A new line is inserted with
/// `input.quantity` as its starting quantity. The lookup and the write share one
/// database transaction so two concurrent adds cannot both insert.
///
/// # Errors
/// Returns an error if:
/// - A new line would start with a negative quantity
/// - The merge would leave the existing line negative
/// - The database operation fails
pub async fn add_or_merge_cart_line(
    db: &DatabaseConnection,
    input: CartLineInput,
) -> Result<MergeOutcome> {
    let txn = db.begin().await?;

    let existing = Cart::find()
        .filter(cart::Column::UserEmail.eq(input.user_email.as_str()))
        .filter(cart::Column::ProductId.eq(input.product_id))
        .one(&txn)
        .await?;

    let outcome = if let Some(line) = existing {
        // quantity + delta >= 0  <=>  quantity >= -delta
        let result = Cart::update_many()
            .col_expr(
                cart::Column::Quantity,
                Expr::col(cart::Column::Quantity).add(input.quantity),
            )
            .filter(cart::Column::Id.eq(line.id))
            .filter(cart::Column::Quantity.gte(input.quantity.saturating_neg()))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            return Err(Error::InvalidQuantity {
                quantity: line.quantity.saturating_add(input.quantity),
            });
        }

        let merged = Cart::find_by_id(line.id)
            .one(&txn)
            .await?
            .ok_or(Error::CartLineNotFound { id: line.id })?;
        MergeOutcome::Merged(merged)
    } else {
        if input.quantity < 0 {
            return Err(Error::InvalidQuantity {
                quantity: input.quantity,
            });
        }

        let line = cart::ActiveModel {
            user_email: Set(input.user_email),
            product_id: Set(input.product_id),
            quantity: Set(input.quantity),
            name: Set(input.name),
            price: Set(input.price),
            image: Set(input.image),
            ..Default::default()
        };
        MergeOutcome::Created(line.insert(&txn).await?)
    };

    txn.commit().await?;

    tracing::debug!(
        cart_line_id = outcome.line().id,
        quantity = outcome.line().quantity,
        "cart line stored"
    );
    Ok(outcome)
}

/// Moves a cart line's quantity one unit up or down.
///
/// Increments always apply. A decrement applies only while the stored quantity is
/// strictly greater than `decrement_floor` (negative floors are treated as zero, so a
/// line can never go negative). The check and the write are one `UPDATE ... WHERE`,
/// so there is no window between reading and writing the quantity.
///
/// # Errors
/// Returns an error if the cart line does not exist or the database operation fails.
pub async fn step_cart_line_quantity(
    db: &DatabaseConnection,
    cart_line_id: i64,
    direction: StepDirection,
    decrement_floor: i64,
) -> Result<StepOutcome> {
    let update = Cart::update_many().filter(cart::Column::Id.eq(cart_line_id));

    let result = match direction {
        StepDirection::Increment => {
            update
                .col_expr(
                    cart::Column::Quantity,
                    Expr::col(cart::Column::Quantity).add(1),
                )
                .exec(db)
                .await?
        }
        StepDirection::Decrement => {
            update
                .col_expr(
                    cart::Column::Quantity,
                    Expr::col(cart::Column::Quantity).sub(1),
                )
                .filter(cart::Column::Quantity.gt(decrement_floor.max(0)))
                .exec(db)
                .await?
        }
    };

    let line = get_cart_line_by_id(db, cart_line_id)
        .await?
        .ok_or(Error::CartLineNotFound { id: cart_line_id })?;

    Ok(StepOutcome {
        line,
        modified: result.rows_affected > 0,
    })
}

/// Deletes a cart line by ID. Returns the number of rows removed (0 if absent).
pub async fn remove_cart_line(db: &DatabaseConnection, cart_line_id: i64) -> Result<u64> {
    let result = Cart::delete_by_id(cart_line_id).exec(db).await?;
    Ok(result.rows_affected)
}
