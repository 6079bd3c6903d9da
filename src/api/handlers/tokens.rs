//! `POST /jwt` - token issuance.

use crate::{
    api::{AppState, extract::Json},
    auth,
    errors::{Error, Result},
};
use axum::extract::State;
use serde::Deserialize;

/// Payload identifying who the token is for
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    /// Email to embed in the token
    pub email: String,
}

/// Issues a signed token; the body is the bare token string.
pub async fn issue_token(
    State(state): State<AppState>,
    Json(request): Json<TokenRequest>,
) -> Result<String> {
    if request.email.trim().is_empty() {
        return Err(Error::InvalidValue {
            field: "email",
            value: request.email,
        });
    }

    auth::issue_token(
        &state.secrets.access_token_secret,
        &request.email,
        state.config.auth.token_ttl_hours,
    )
}
