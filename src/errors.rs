//! Unified error type for the storefront.
//!
//! Every fallible operation in `core`, `auth`, and `payment` returns [`Result`].
//! The HTTP layer turns each variant into a status code and a JSON body, see
//! [`crate::api::error`].

use thiserror::Error;

/// All errors the service can produce.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or is inconsistent
    #[error("Configuration error: {message}")]
    Config {
        /// Description of what went wrong
        message: String,
    },

    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Missing or invalid bearer token
    #[error("Unauthorized access")]
    Unauthorized,

    /// Authenticated caller lacks the required role
    #[error("Forbidden access")]
    Forbidden,

    /// A cart quantity change that would leave the line negative
    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity {
        /// The offending quantity or delta
        quantity: i64,
    },

    /// Price that cannot be charged (missing, negative, or not finite)
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The offending amount
        amount: f64,
    },

    /// Checkout request with no cart lines
    #[error("Checkout requires at least one cart line")]
    EmptyCheckout,

    /// Cart line does not exist
    #[error("Cart line not found: {id}")]
    CartLineNotFound {
        /// Identifier that was looked up
        id: i64,
    },

    /// Unknown product status or role value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue {
        /// Field being set
        field: &'static str,
        /// Rejected value
        value: String,
    },

    /// Request body, path, or query string could not be parsed
    #[error("Bad request: {message}")]
    BadRequest {
        /// Parser description of the problem
        message: String,
    },

    /// Payment provider rejected or failed the request
    #[error("Payment gateway error: {message}")]
    Gateway {
        /// Provider-supplied or transport failure description
        message: String,
    },

    /// HTTP transport failure talking to a payment provider
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Token encoding or decoding failure
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// I/O failure (config file, socket bind)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Required environment variable is missing
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
