//! Hosted checkout client for SSLCommerz.
//!
//! A session is opened by posting a form to the provider's `api.php`. The JSON reply
//! carries `status` and, on success, the `GatewayPageURL` the buyer is redirected to.

use super::{CheckoutSessionRequest, PaymentGateway};
use crate::errors::{Error, Result};
use async_trait::async_trait;
use serde::Deserialize;

const SANDBOX_URL: &str = "https://sandbox.sslcommerz.com/gwprocess/v4/api.php";
const LIVE_URL: &str = "https://securepay.sslcommerz.com/gwprocess/v4/api.php";

/// Session reply from the provider
#[derive(Debug, Deserialize)]
struct SessionResponse {
    status: String,
    #[serde(rename = "GatewayPageURL", default)]
    gateway_page_url: Option<String>,
    #[serde(default)]
    failedreason: Option<String>,
}

/// SSLCommerz client
#[derive(Debug, Clone)]
pub struct SslCommerzClient {
    http: reqwest::Client,
    endpoint: String,
    store_id: String,
    store_passwd: String,
}

impl SslCommerzClient {
    /// Creates a client for the sandbox or live endpoint.
    #[must_use]
    pub fn new(store_id: String, store_passwd: String, is_live: bool) -> Self {
        let endpoint = if is_live { LIVE_URL } else { SANDBOX_URL };
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.to_string(),
            store_id,
            store_passwd,
        }
    }

    fn session_form(&self, request: &CheckoutSessionRequest) -> Vec<(&'static str, String)> {
        let mut form = vec![
            ("store_id", self.store_id.clone()),
            ("store_passwd", self.store_passwd.clone()),
            ("total_amount", format!("{:.2}", request.total_amount)),
            ("currency", request.currency.clone()),
            ("tran_id", request.tran_id.clone()),
            ("success_url", request.success_url.clone()),
            ("fail_url", request.fail_url.clone()),
            ("cancel_url", request.cancel_url.clone()),
            ("shipping_method", "Courier".to_string()),
            ("num_of_item", request.num_of_item.to_string()),
            ("product_name", request.product_name.clone()),
            ("product_category", "Electronic".to_string()),
            ("product_profile", "general".to_string()),
            ("cus_name", request.cus_name.clone()),
            ("cus_email", request.cus_email.clone()),
            ("cus_add1", request.cus_address.clone()),
            ("cus_city", request.cus_city.clone()),
            ("cus_state", request.cus_state.clone()),
            ("cus_postcode", "1000".to_string()),
            ("cus_country", "Bangladesh".to_string()),
            ("cus_phone", request.cus_phone.clone()),
            ("ship_name", request.cus_name.clone()),
            ("ship_add1", request.cus_address.clone()),
            ("ship_city", request.cus_city.clone()),
            ("ship_state", request.cus_state.clone()),
            ("ship_postcode", "1000".to_string()),
            ("ship_country", "Bangladesh".to_string()),
        ];
        if let Some(ipn_url) = &request.ipn_url {
            form.push(("ipn_url", ipn_url.clone()));
        }
        form
    }
}

fn gateway_url_from(response: SessionResponse) -> Result<String> {
    match response.gateway_page_url {
        Some(url) if response.status.eq_ignore_ascii_case("SUCCESS") && !url.is_empty() => {
            Ok(url)
        }
        _ => Err(Error::Gateway {
            message: response
                .failedreason
                .filter(|reason| !reason.is_empty())
                .unwrap_or_else(|| format!("session status {}", response.status)),
        }),
    }
}

#[async_trait]
impl PaymentGateway for SslCommerzClient {
    async fn init_session(&self, request: &CheckoutSessionRequest) -> Result<String> {
        if self.store_id.is_empty() || self.store_passwd.is_empty() {
            return Err(Error::Gateway {
                message: "store credentials are not configured".to_string(),
            });
        }

        tracing::debug!(tran_id = %request.tran_id, "opening checkout session");
        let response: SessionResponse = self
            .http
            .post(&self.endpoint)
            .form(&self.session_form(request))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        gateway_url_from(response)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn sample_request() -> CheckoutSessionRequest {
        CheckoutSessionRequest {
            tran_id: "trxabc".to_string(),
            total_amount: 120.5,
            currency: "USD".to_string(),
            success_url: "http://localhost:5000/payment/success/trxabc".to_string(),
            fail_url: "http://localhost:5000/payment/fail/trxabc".to_string(),
            cancel_url: "http://localhost:5000/payment/cancel/trxabc".to_string(),
            ipn_url: None,
            product_name: "2 items".to_string(),
            num_of_item: 2,
            cus_name: "Rahim".to_string(),
            cus_email: "rahim@example.com".to_string(),
            cus_address: "House 1".to_string(),
            cus_city: "Dhaka".to_string(),
            cus_state: "Dhaka".to_string(),
            cus_phone: "01700000000".to_string(),
        }
    }

    #[test]
    fn test_session_form_contains_callbacks() {
        let client = SslCommerzClient::new("store".to_string(), "pass".to_string(), false);
        let form = client.session_form(&sample_request());

        let get = |key: &str| {
            form.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("store_id"), Some("store"));
        assert_eq!(get("tran_id"), Some("trxabc"));
        assert_eq!(get("total_amount"), Some("120.50"));
        assert_eq!(
            get("fail_url"),
            Some("http://localhost:5000/payment/fail/trxabc")
        );
        assert_eq!(get("ipn_url"), None);
    }

    #[test]
    fn test_endpoint_selection() {
        let sandbox = SslCommerzClient::new(String::new(), String::new(), false);
        let live = SslCommerzClient::new(String::new(), String::new(), true);
        assert_eq!(sandbox.endpoint, SANDBOX_URL);
        assert_eq!(live.endpoint, LIVE_URL);
    }

    #[test]
    fn test_gateway_url_from_success() {
        let response: SessionResponse = serde_json::from_str(
            r#"{"status":"SUCCESS","GatewayPageURL":"https://pay.example.com/s/1","failedreason":""}"#,
        )
        .unwrap();
        assert_eq!(
            gateway_url_from(response).unwrap(),
            "https://pay.example.com/s/1"
        );
    }

    #[test]
    fn test_gateway_url_from_failure_uses_reason() {
        let response: SessionResponse =
            serde_json::from_str(r#"{"status":"FAILED","failedreason":"Store Credential Error"}"#)
                .unwrap();
        match gateway_url_from(response).unwrap_err() {
            Error::Gateway { message } => assert_eq!(message, "Store Credential Error"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_credentials_rejected_without_network() {
        let client = SslCommerzClient::new(String::new(), String::new(), false);
        let result = client.init_session(&sample_request()).await;
        assert!(matches!(result.unwrap_err(), Error::Gateway { message: _ }));
    }
}
