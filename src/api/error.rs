//! Maps [`Error`] onto HTTP responses.
//!
//! Every failure produces a JSON body `{"error": true, "message": ...}`. Authentication
//! failures always carry the fixed message `Unauthorized access`, whatever the cause.
//! Database and configuration failures are logged and reported without details.

use crate::errors::Error;
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl Error {
    /// Status code the error is reported with.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized | Self::Token(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::InvalidQuantity { .. }
            | Self::InvalidAmount { .. }
            | Self::InvalidValue { .. }
            | Self::EmptyCheckout
            | Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::CartLineNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Gateway { .. } | Self::Http(_) => StatusCode::BAD_GATEWAY,
            Self::Config { .. } | Self::Database(_) | Self::Io(_) | Self::EnvVar(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match status {
            StatusCode::UNAUTHORIZED => "Unauthorized access".to_string(),
            StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!("Request failed: {}", self);
                "Internal server error".to_string()
            }
            StatusCode::BAD_GATEWAY => {
                tracing::warn!("Payment provider failure: {}", self);
                self.to_string()
            }
            _ => self.to_string(),
        };

        (status, Json(json!({ "error": true, "message": message }))).into_response()
    }
}
