//! User business logic - Registration, roles, and admin seeding.
//!
//! Registration is idempotent by email: registering an address that already exists
//! returns the stored account and writes nothing.

use crate::{
    entities::{Role, User, user},
    errors::Result,
};
use sea_orm::{QueryOrder, Set, SqlErr, prelude::*};
use serde::Deserialize;

/// Fields supplied when a user signs up.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    /// Login email
    pub email: String,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Avatar URL
    #[serde(default)]
    pub photo: Option<String>,
}

/// Result of [`register_user`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// A new account was stored
    Created(user::Model),
    /// An account with this email already existed; nothing was written
    AlreadyExists(user::Model),
}

/// Retrieves every user, in registration order.
pub async fn get_all_users(db: &DatabaseConnection) -> Result<Vec<user::Model>> {
    User::find()
        .order_by_asc(user::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a user by email.
pub async fn get_user_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<user::Model>> {
    User::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Whether `email` belongs to an admin account.
pub async fn is_admin(db: &DatabaseConnection, email: &str) -> Result<bool> {
    Ok(get_user_by_email(db, email)
        .await?
        .is_some_and(|user| user.role == Role::Admin))
}

/// Registers a new account with the `user` role, or returns the existing one.
///
/// The unique index on `email` settles the race between two concurrent sign-ups:
/// the loser's insert fails with a constraint violation and it returns the winner.
pub async fn register_user(db: &DatabaseConnection, input: NewUser) -> Result<RegisterOutcome> {
    if let Some(existing) = get_user_by_email(db, &input.email).await? {
        return Ok(RegisterOutcome::AlreadyExists(existing));
    }

    let email = input.email.clone();
    let user = user::ActiveModel {
        email: Set(input.email),
        name: Set(input.name),
        photo: Set(input.photo),
        role: Set(Role::User),
        ..Default::default()
    };

    match user.insert(db).await {
        Ok(created) => {
            tracing::info!(user_id = created.id, "user registered");
            Ok(RegisterOutcome::Created(created))
        }
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            let existing = get_user_by_email(db, &email).await?.ok_or(e)?;
            Ok(RegisterOutcome::AlreadyExists(existing))
        }
        Err(e) => Err(e.into()),
    }
}

/// Sets a user's role. Returns `None` when the user does not exist.
pub async fn change_role(
    db: &DatabaseConnection,
    user_id: i64,
    role: Role,
) -> Result<Option<user::Model>> {
    let Some(existing) = User::find_by_id(user_id).one(db).await? else {
        return Ok(None);
    };

    let mut user: user::ActiveModel = existing.into();
    user.role = Set(role);

    let updated = user.update(db).await?;
    tracing::info!(user_id, role = ?updated.role, "user role changed");
    Ok(Some(updated))
}

/// Deletes a user. Returns the number of rows removed (0 if absent).
pub async fn delete_user(db: &DatabaseConnection, user_id: i64) -> Result<u64> {
    let result = User::delete_by_id(user_id).exec(db).await?;
    Ok(result.rows_affected)
}

/// Ensures every listed email has an admin account, creating accounts as needed.
///
/// Returns the number of accounts created or promoted.
pub async fn seed_admins(db: &DatabaseConnection, emails: &[String]) -> Result<usize> {
    let mut changed = 0;

    for email in emails {
        match get_user_by_email(db, email).await? {
            Some(existing) if existing.role == Role::Admin => {}
            Some(existing) => {
                change_role(db, existing.id, Role::Admin).await?;
                changed += 1;
            }
            None => {
                user::ActiveModel {
                    email: Set(email.clone()),
                    name: Set(None),
                    photo: Set(None),
                    role: Set(Role::Admin),
                    ..Default::default()
                }
                .insert(db)
                .await?;
                changed += 1;
            }
        }
    }

    Ok(changed)
}
