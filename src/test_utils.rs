//! Shared test utilities for Gadget Trove.
//!
//! This module provides common helper functions for setting up test databases,
//! creating test records with sensible defaults, and stand-ins for the payment
//! providers that record what they were asked to do.

#![allow(clippy::unwrap_used)]

use crate::{
    api::AppState,
    config::{AppConfig, Secrets},
    core::{
        cart::CartLineInput,
        order::{self, CheckoutLine, CheckoutRequest, CustomerForm},
        product::{self, NewProduct},
        user::{self, NewUser, RegisterOutcome},
    },
    entities::{self, cart},
    errors::{Error, Result},
    payment::{CardPayments, CheckoutSessionRequest, PaymentGateway},
};
use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use std::sync::{Arc, Mutex};

/// Secret used to sign tokens in tests
pub const TEST_SECRET: &str = "test-secret";

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Builds an add-to-cart request without snapshot fields.
pub fn cart_input(user_email: &str, product_id: i64, quantity: i64) -> CartLineInput {
    CartLineInput {
        user_email: user_email.to_string(),
        product_id,
        quantity,
        name: None,
        price: None,
        image: None,
    }
}

/// Inserts a cart line with an exact quantity, bypassing merge rules.
pub async fn create_test_cart_line(
    db: &DatabaseConnection,
    user_email: &str,
    product_id: i64,
    quantity: i64,
) -> Result<entities::cart::Model> {
    let line = cart::ActiveModel {
        user_email: Set(user_email.to_string()),
        product_id: Set(product_id),
        quantity: Set(quantity),
        name: Set(Some(format!("Product {product_id}"))),
        price: Set(Some(10.0)),
        image: Set(None),
        ..Default::default()
    };
    line.insert(db).await.map_err(Into::into)
}

/// Builds a product listing request.
pub fn new_product(name: &str, category: &str, price: f64) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        category: category.to_string(),
        price,
        description: None,
        image: None,
    }
}

/// Creates a pending product priced at 10.0.
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
    category: &str,
    seller_email: &str,
) -> Result<entities::product::Model> {
    product::create_product(db, seller_email, new_product(name, category, 10.0)).await
}

/// Builds a sign-up request without profile fields.
pub fn new_user(email: &str) -> NewUser {
    NewUser {
        email: email.to_string(),
        name: None,
        photo: None,
    }
}

/// Registers a user with the default role.
pub async fn create_test_user(
    db: &DatabaseConnection,
    email: &str,
) -> Result<entities::user::Model> {
    match user::register_user(db, new_user(email)).await? {
        RegisterOutcome::Created(model) | RegisterOutcome::AlreadyExists(model) => Ok(model),
    }
}

/// Checkout form for `buyer@example.com`.
pub fn sample_form() -> CustomerForm {
    CustomerForm {
        name: "Test Buyer".to_string(),
        email: "buyer@example.com".to_string(),
        delivery_address: "12 Test Road".to_string(),
        number: "01700000000".to_string(),
        district_name: "Dhaka".to_string(),
        city_name: "Dhaka".to_string(),
    }
}

/// Checkout lines with the given cart line ids, one unit each.
pub fn checkout_lines(ids: &[i64]) -> Vec<CheckoutLine> {
    ids.iter()
        .map(|&id| CheckoutLine {
            id,
            user_email: Some("buyer@example.com".to_string()),
            name: Some(format!("Product {id}")),
            price: Some(10.0),
            image: None,
            quantity: 1,
        })
        .collect()
}

/// Hosted checkout request for the given cart line ids.
pub fn checkout_request(ids: Vec<i64>, total_price: f64) -> CheckoutRequest {
    CheckoutRequest {
        total_price,
        all_carts: checkout_lines(&ids),
        form_data: sample_form(),
    }
}

/// Stores an unpaid order group under `tran_id`.
pub async fn create_test_order_group(
    db: &DatabaseConnection,
    tran_id: &str,
    ids: &[i64],
) -> Result<Vec<entities::order::Model>> {
    order::create_order_group(
        db,
        checkout_lines(ids),
        &sample_form(),
        tran_id,
        chrono::Utc::now(),
    )
    .await
}

/// Hosted gateway stand-in that records every session request.
pub struct MockGateway {
    result: std::result::Result<String, String>,
    requests: Mutex<Vec<CheckoutSessionRequest>>,
}

impl MockGateway {
    /// Every session opens and returns `url`.
    pub fn succeeding(url: &str) -> Self {
        Self {
            result: Ok(url.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every session is refused with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Session requests received so far.
    pub fn requests(&self) -> Vec<CheckoutSessionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn init_session(&self, request: &CheckoutSessionRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request.clone());
        self.result
            .clone()
            .map_err(|message| Error::Gateway { message })
    }
}

/// Card provider stand-in returning a secret derived from the amount.
pub struct MockCards;

#[async_trait]
impl CardPayments for MockCards {
    async fn create_payment_intent(&self, amount_cents: i64, currency: &str) -> Result<String> {
        Ok(format!("secret_{amount_cents}_{currency}"))
    }
}

/// Application state over `db` with test doubles for both providers.
pub fn test_state(db: DatabaseConnection, gateway: Arc<MockGateway>) -> AppState {
    AppState {
        database: db,
        config: Arc::new(AppConfig::default()),
        secrets: Arc::new(Secrets {
            access_token_secret: TEST_SECRET.to_string(),
            ..Default::default()
        }),
        gateway,
        cards: Arc::new(MockCards),
    }
}

/// `Authorization` header value for `email`.
pub fn bearer_for(email: &str) -> String {
    let token = crate::auth::issue_token(TEST_SECRET, email, 1).unwrap();
    format!("Bearer {token}")
}
