//! Request extractors.
//!
//! Add [`AuthUser`] to a handler's arguments to require a valid bearer token, or
//! [`AdminUser`] to additionally require the admin role.
//!
//! [`Json`], [`Path`], and [`Query`] wrap the axum extractors of the same name and
//! reject malformed input with [`Error::BadRequest`], so parse failures get the
//! same JSON error body as every other failure.

use super::AppState;
use crate::{auth, core::user, errors::Error};
use async_trait::async_trait;
use axum::{
    extract::{FromRequest, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// JSON request body, also usable as a JSON response
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Typed path parameters
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(Error))]
pub struct Path<T>(pub T);

/// Typed query string
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(Error))]
pub struct Query<T>(pub T);

/// Caller authenticated by bearer token
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Email from the token claims
    pub email: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Error> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(Error::Unauthorized)?;
        let token = auth::bearer_token(header).ok_or(Error::Unauthorized)?;

        let claims = auth::verify_token(&state.secrets.access_token_secret, token)
            .inspect_err(|e| tracing::debug!("Rejected bearer token: {}", e))
            .map_err(|_| Error::Unauthorized)?;

        Ok(Self {
            email: claims.email,
        })
    }
}

/// Caller authenticated by bearer token whose account has the admin role
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Error> {
        let caller = AuthUser::from_request_parts(parts, state).await?;

        if !user::is_admin(&state.database, &caller.email).await? {
            tracing::warn!(email = %caller.email, "non-admin attempted an admin action");
            return Err(Error::Forbidden);
        }

        Ok(Self(caller))
    }
}
