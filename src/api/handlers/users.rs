//! User routes.

use crate::{
    api::{
        AppState,
        extract::{AdminUser, AuthUser, Json, Path},
        responses::{DeleteResult, InsertResult, UpdateResult},
    },
    core::user::{self, NewUser, RegisterOutcome},
    entities::{Role, UserModel},
    errors::Result,
};
use axum::extract::State;
use serde::Deserialize;

/// Body of `PATCH /users/:id`
#[derive(Debug, Deserialize)]
pub struct RoleChange {
    /// New role
    pub role: Role,
}

/// `GET /users`
pub async fn list_users(
    State(state): State<AppState>,
    _caller: AuthUser,
) -> Result<Json<Vec<UserModel>>> {
    Ok(Json(user::get_all_users(&state.database).await?))
}

/// `POST /users` - idempotent by email
pub async fn register_user(
    State(state): State<AppState>,
    Json(input): Json<NewUser>,
) -> Result<Json<InsertResult>> {
    let result = match user::register_user(&state.database, input).await? {
        RegisterOutcome::Created(created) => InsertResult::inserted(created.id),
        RegisterOutcome::AlreadyExists(_) => InsertResult::skipped(),
    };
    Ok(Json(result))
}

/// `PATCH /users/:id` - admin only
pub async fn change_role(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i64>,
    Json(change): Json<RoleChange>,
) -> Result<Json<UpdateResult>> {
    let updated = user::change_role(&state.database, id, change.role).await?;
    Ok(Json(UpdateResult::single(updated.is_some())))
}

/// `DELETE /users/:id`
pub async fn delete_user(
    State(state): State<AppState>,
    _caller: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResult>> {
    let deleted = user::delete_user(&state.database, id).await?;
    Ok(Json(DeleteResult::deleted(deleted)))
}
