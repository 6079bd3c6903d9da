//! HTTP layer - axum routes, extractors, and response mapping
//!
//! This module exposes the storefront over REST. Handlers stay thin: they extract
//! the request, call into [`crate::core`], and shape the reply. Every route is
//! registered once in [`router`].

/// Error to HTTP response mapping
pub mod error;
/// Authentication extractors
pub mod extract;
/// Route handlers grouped by resource
pub mod handlers;
/// Write-result response bodies
pub mod responses;


use crate::{
    config::{AppConfig, Secrets},
    payment::{CardPayments, PaymentGateway, SslCommerzClient, StripeClient},
};
use axum::{
    Router,
    routing::{get, patch, post, put},
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared data available to all handlers.
/// Holds the database connection, settings, and payment clients.
#[derive(Clone)]
pub struct AppState {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Non-secret settings
    pub config: Arc<AppConfig>,
    /// Token and provider secrets
    pub secrets: Arc<Secrets>,
    /// Hosted checkout provider
    pub gateway: Arc<dyn PaymentGateway>,
    /// Card payment provider
    pub cards: Arc<dyn CardPayments>,
}

impl AppState {
    /// Creates the state with the real payment provider clients.
    #[must_use]
    pub fn new(database: DatabaseConnection, config: AppConfig, secrets: Secrets) -> Self {
        let gateway = SslCommerzClient::new(
            secrets.store_id.clone(),
            secrets.store_passwd.clone(),
            config.gateway.is_live,
        );
        let cards = StripeClient::new(secrets.payment_secret_key.clone());

        Self {
            database,
            config: Arc::new(config),
            secrets: Arc::new(secrets),
            gateway: Arc::new(gateway),
            cards: Arc::new(cards),
        }
    }
}

/// Builds the route table.
pub fn router(state: AppState) -> Router {
    use handlers::{carts, categories, orders, payments, products, tokens, users};

    Router::new()
        .route("/", get(health))
        .route("/jwt", post(tokens::issue_token))
        // Catalogue
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/products/:id",
            get(products::products_by_category)
                .patch(products::update_product)
                .delete(products::delete_product),
        )
        .route("/singleProducts/:id", get(products::single_product))
        .route("/newProducts", get(products::new_products))
        .route("/sellerProducts/:email", get(products::seller_products))
        .route(
            "/changeProductStatus/:id",
            patch(products::change_product_status),
        )
        .route("/category", get(categories::list_categories))
        // Cart
        .route("/allCarts/:email", get(carts::list_cart))
        .route("/carts", put(carts::add_to_cart))
        .route(
            "/carts/:id",
            patch(carts::step_quantity).delete(carts::remove_line),
        )
        // Users
        .route("/users", get(users::list_users).post(users::register_user))
        .route(
            "/users/:id",
            patch(users::change_role).delete(users::delete_user),
        )
        // Orders and payments
        .route("/orders", post(orders::checkout))
        .route("/orders/stripe", post(orders::direct_order))
        .route(
            "/payment/success/:tran_id",
            post(payments::payment_success),
        )
        .route("/payment/fail/:tran_id", post(payments::payment_fail))
        .route("/payment/cancel/:tran_id", post(payments::payment_cancel))
        .route(
            "/create-payment-intent",
            post(payments::create_payment_intent),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "Gadget Trove server is running"
}
