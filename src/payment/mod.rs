//! Payment provider clients.
//!
//! Two providers are supported behind traits so the rest of the crate never depends
//! on a concrete HTTP client:
//! - [`PaymentGateway`]: hosted checkout. The buyer is redirected to the provider's
//!   page, and the provider later calls back `/payment/{outcome}/{tran_id}`.
//! - [`CardPayments`]: card collection in the storefront. The provider hands out a
//!   client secret for a payment intent.

/// Card payment intents over the provider's form API
pub mod stripe;
/// Hosted checkout sessions over the provider's form API
pub mod sslcommerz;

use crate::errors::Result;
use async_trait::async_trait;

pub use sslcommerz::SslCommerzClient;
pub use stripe::StripeClient;

/// Everything the hosted gateway needs to open a checkout session.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutSessionRequest {
    /// Shared transaction identifier of the order group
    pub tran_id: String,
    /// Amount to charge
    pub total_amount: f64,
    /// Currency code
    pub currency: String,
    /// Callback for a completed payment
    pub success_url: String,
    /// Callback for a failed payment
    pub fail_url: String,
    /// Callback for a payment the buyer abandoned
    pub cancel_url: String,
    /// Instant payment notification URL
    pub ipn_url: Option<String>,
    /// Summary of what is being bought
    pub product_name: String,
    /// Number of order lines in the session
    pub num_of_item: usize,
    /// Buyer name
    pub cus_name: String,
    /// Buyer email
    pub cus_email: String,
    /// Delivery address
    pub cus_address: String,
    /// District
    pub cus_city: String,
    /// City
    pub cus_state: String,
    /// Phone number
    pub cus_phone: String,
}

/// Hosted checkout provider.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Opens a checkout session and returns the URL the buyer must be sent to.
    async fn init_session(&self, request: &CheckoutSessionRequest) -> Result<String>;
}

/// Card payment provider.
#[async_trait]
pub trait CardPayments: Send + Sync {
    /// Creates a card payment intent and returns its client secret.
    async fn create_payment_intent(&self, amount_cents: i64, currency: &str) -> Result<String>;
}

/// Converts a price in major units to the smallest currency unit.
///
/// # Errors
/// Returns `InvalidAmount` for prices that are not finite or not positive.
pub fn to_minor_units(price: f64) -> Result<i64> {
    if !price.is_finite() || price <= 0.0 {
        return Err(crate::errors::Error::InvalidAmount { amount: price });
    }
    #[allow(clippy::cast_possible_truncation)]
    Ok((price * 100.0).round() as i64)
}
