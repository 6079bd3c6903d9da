//! Cart routes.

use crate::{
    api::{
        AppState,
        extract::{AuthUser, Json, Path, Query},
        responses::{DeleteResult, InsertResult, UpdateResult},
    },
    core::cart::{self, CartLineInput, MergeOutcome, StepDirection},
    entities::CartModel,
    errors::Result,
};
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Query of `PATCH /carts/:id`
#[derive(Debug, Deserialize)]
pub struct StepQuery {
    /// `1` to increment, anything else to decrement
    pub quantity: Option<String>,
}

/// Reply of `PATCH /carts/:id`: the stored line plus whether it changed
#[derive(Debug, Serialize)]
pub struct StepResponse {
    /// The line after the step
    #[serde(flatten)]
    pub line: CartModel,
    /// False when a decrement was refused by the floor
    pub modified: bool,
}

/// `GET /allCarts/:email`
pub async fn list_cart(
    State(state): State<AppState>,
    _caller: AuthUser,
    Path(email): Path<String>,
) -> Result<Json<Vec<CartModel>>> {
    Ok(Json(
        cart::get_cart_lines_for_user(&state.database, &email).await?,
    ))
}

/// `PUT /carts` - add a product or merge into the existing line
pub async fn add_to_cart(
    State(state): State<AppState>,
    _caller: AuthUser,
    Json(input): Json<CartLineInput>,
) -> Result<Response> {
    let response = match cart::add_or_merge_cart_line(&state.database, input).await? {
        MergeOutcome::Created(line) => Json(InsertResult::inserted(line.id)).into_response(),
        MergeOutcome::Merged(_) => Json(UpdateResult::single(true)).into_response(),
    };
    Ok(response)
}

/// `PATCH /carts/:id?quantity=`
pub async fn step_quantity(
    State(state): State<AppState>,
    _caller: AuthUser,
    Path(id): Path<i64>,
    Query(query): Query<StepQuery>,
) -> Result<Json<StepResponse>> {
    let direction = StepDirection::from_param(query.quantity.as_deref());
    let outcome = cart::step_cart_line_quantity(
        &state.database,
        id,
        direction,
        state.config.cart.decrement_floor,
    )
    .await?;

    Ok(Json(StepResponse {
        line: outcome.line,
        modified: outcome.modified,
    }))
}

/// `DELETE /carts/:id`
pub async fn remove_line(
    State(state): State<AppState>,
    _caller: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResult>> {
    let deleted = cart::remove_cart_line(&state.database, id).await?;
    Ok(Json(DeleteResult::deleted(deleted)))
}
