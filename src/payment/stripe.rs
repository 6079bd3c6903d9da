//! Card payment client for Stripe payment intents.

use super::CardPayments;
use crate::errors::{Error, Result};
use async_trait::async_trait;
use serde::Deserialize;

const PAYMENT_INTENTS_URL: &str = "https://api.stripe.com/v1/payment_intents";

#[derive(Debug, Deserialize)]
struct PaymentIntent {
    client_secret: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

/// Stripe client
#[derive(Debug, Clone)]
pub struct StripeClient {
    http: reqwest::Client,
    secret_key: String,
}

impl StripeClient {
    /// Creates a client authenticating with `secret_key`.
    #[must_use]
    pub fn new(secret_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            secret_key,
        }
    }
}

#[async_trait]
impl CardPayments for StripeClient {
    async fn create_payment_intent(&self, amount_cents: i64, currency: &str) -> Result<String> {
        if self.secret_key.is_empty() {
            return Err(Error::Gateway {
                message: "card payment key is not configured".to_string(),
            });
        }

        let form = [
            ("amount", amount_cents.to_string()),
            ("currency", currency.to_lowercase()),
            ("payment_method_types[]", "card".to_string()),
        ];

        let response = self
            .http
            .post(PAYMENT_INTENTS_URL)
            .bearer_auth(&self.secret_key)
            .form(&form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error.message)
                .unwrap_or_else(|| format!("payment intent request failed with {status}"));
            return Err(Error::Gateway { message });
        }

        let intent: PaymentIntent = response.json().await?;
        Ok(intent.client_secret)
    }
}
