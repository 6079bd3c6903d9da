//! Payment provider callbacks and card payment intents.
//!
//! Callbacks settle the order group first and redirect the buyer afterwards. A
//! repeated callback touches nothing and still redirects.

use crate::{
    api::{
        AppState,
        extract::{AuthUser, Json, Path},
    },
    core::order::{self, PaymentOutcome},
    errors::{Error, Result},
    payment,
};
use axum::{extract::State, response::Redirect};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /create-payment-intent`; `price` may be a number or a numeric string
#[derive(Debug, Deserialize)]
pub struct PaymentIntentRequest {
    /// Price in major currency units
    #[serde(default)]
    pub price: Option<Value>,
}

/// Reply of `POST /create-payment-intent`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    /// Secret the storefront uses to confirm the card payment
    pub client_secret: String,
}

fn parse_price(raw: Option<&Value>) -> Result<f64> {
    let price = match raw {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse().ok(),
        _ => None,
    };
    price.ok_or(Error::InvalidAmount { amount: f64::NAN })
}

async fn settle(state: &AppState, tran_id: &str, outcome: PaymentOutcome) -> Result<Redirect> {
    order::reconcile_payment(&state.database, tran_id, outcome).await?;
    Ok(Redirect::to(
        &state.config.client_redirect_url(outcome.as_str(), tran_id),
    ))
}

/// `POST /payment/success/:tran_id`
pub async fn payment_success(
    State(state): State<AppState>,
    Path(tran_id): Path<String>,
) -> Result<Redirect> {
    settle(&state, &tran_id, PaymentOutcome::Success).await
}

/// `POST /payment/fail/:tran_id`
pub async fn payment_fail(
    State(state): State<AppState>,
    Path(tran_id): Path<String>,
) -> Result<Redirect> {
    settle(&state, &tran_id, PaymentOutcome::Fail).await
}

/// `POST /payment/cancel/:tran_id`
pub async fn payment_cancel(
    State(state): State<AppState>,
    Path(tran_id): Path<String>,
) -> Result<Redirect> {
    settle(&state, &tran_id, PaymentOutcome::Cancel).await
}

/// `POST /create-payment-intent`
pub async fn create_payment_intent(
    State(state): State<AppState>,
    _caller: AuthUser,
    Json(request): Json<PaymentIntentRequest>,
) -> Result<Json<PaymentIntentResponse>> {
    let price = parse_price(request.price.as_ref())?;
    let amount_cents = payment::to_minor_units(price)?;

    let client_secret = state
        .cards
        .create_payment_intent(amount_cents, &state.config.gateway.currency)
        .await?;
    Ok(Json(PaymentIntentResponse { client_secret }))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_price_number_and_string() {
        assert_eq!(parse_price(Some(&json!(12.5))).unwrap(), 12.5);
        assert_eq!(parse_price(Some(&json!(" 40 "))).unwrap(), 40.0);
    }

    #[test]
    fn test_parse_price_rejects_missing_or_garbage() {
        assert!(parse_price(None).is_err());
        assert!(parse_price(Some(&json!("ten"))).is_err());
        assert!(parse_price(Some(&json!(null))).is_err());
    }
}
