//! Checkout routes.

use crate::{
    api::{
        AppState,
        extract::{AuthUser, Json},
    },
    core::order::{self, CheckoutRequest, DirectOrderRequest, PaymentOutcome},
    errors::Result,
};
use axum::{extract::State, response::Redirect};
use serde::Serialize;

/// Reply of `POST /orders`
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    /// Payment page the storefront must send the buyer to
    pub url: String,
}

/// `POST /orders` - store the order group, then open a hosted checkout
pub async fn checkout(
    State(state): State<AppState>,
    Json(request): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>> {
    let session = order::initiate_checkout(
        &state.database,
        state.gateway.as_ref(),
        &state.config,
        request,
    )
    .await?;
    Ok(Json(CheckoutResponse { url: session.url }))
}

/// `POST /orders/stripe` - record a card-paid order and send the buyer to the success page
pub async fn direct_order(
    State(state): State<AppState>,
    _caller: AuthUser,
    Json(request): Json<DirectOrderRequest>,
) -> Result<Redirect> {
    let tran_id = request.tran_id.clone();
    order::place_direct_order(&state.database, request).await?;
    Ok(Redirect::to(&state.config.client_redirect_url(
        PaymentOutcome::Success.as_str(),
        &tran_id,
    )))
}
