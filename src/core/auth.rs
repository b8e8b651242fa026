//! Credential store - Registers users and verifies their passwords.
//!
//! Passwords are reduced to a deterministic SHA-256 digest before they touch the store,
//! and authentication compares digests by equality inside the query. A failed login never
//! reveals whether the username or the password was wrong.

use crate::{
    entities::{User, user},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, Set, SqlErr, prelude::*};
use sha2::{Digest, Sha256};
use tracing::{info, instrument, warn};

/// Hashes a password into a lowercase hex SHA-256 digest.
///
/// The digest is unsalted, so equal passwords always produce equal digests; this is what
/// lets [`authenticate`] re-derive and compare it.
#[must_use]
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Registers a new user and returns the assigned ID.
///
/// The password is hashed before insertion. The unique constraints on `username` and
/// `email` are enforced by the store, so a conflicting insert leaves the table untouched.
///
/// # Errors
/// * `Error::DuplicateIdentity` - the username or email is already registered
/// * `Error::Database` - any other store failure
#[instrument(skip(db, email, password))]
pub async fn create_user<C>(db: &C, username: &str, email: &str, password: &str) -> Result<i64>
where
    C: ConnectionTrait,
{
    let new_user = user::ActiveModel {
        username: Set(username.to_string()),
        email: Set(email.to_string()),
        password: Set(hash_password(password)),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    match User::insert(new_user).exec(db).await {
        Ok(result) => {
            info!("Registered user_id {}", result.last_insert_id);
            Ok(result.last_insert_id)
        }
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            warn!("Registration rejected: username or email already taken");
            Err(Error::DuplicateIdentity)
        }
        Err(e) => Err(e.into()),
    }
}

/// Looks up the user matching both `username` and the digest of `password`.
///
/// Returns `None` when no such user exists; an unknown username and a wrong password are
/// indistinguishable to the caller.
#[instrument(skip(db, password))]
pub async fn authenticate<C>(db: &C, username: &str, password: &str) -> Result<Option<user::Model>>
where
    C: ConnectionTrait,
{
    let found = User::find()
        .filter(user::Column::Username.eq(username))
        .filter(user::Column::Password.eq(hash_password(password)))
        .one(db)
        .await?;

    if found.is_none() {
        info!("Authentication failed");
    }

    Ok(found)
}

/// Finds a user by ID. IDs are global, so no ownership scoping applies.
pub async fn get_user_by_id<C>(db: &C, user_id: i64) -> Result<Option<user::Model>>
where
    C: ConnectionTrait,
{
    User::find_by_id(user_id).one(db).await.map_err(Into::into)
}

/// Counts registered users.
pub async fn count_users<C>(db: &C) -> Result<u64>
where
    C: ConnectionTrait,
{
    User::find().count(db).await.map_err(Into::into)
}
