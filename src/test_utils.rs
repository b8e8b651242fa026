//! Shared test utilities for the expense tracker.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{auth, expense},
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use tempfile::TempDir;

/// Password given to every user made by [`create_test_user`].
pub const TEST_PASSWORD: &str = "password123";

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a file-backed `SQLite` database in a temporary directory, pooled with up to
/// `max_connections` connections, with all tables initialized.
///
/// Keep the returned `TempDir` alive for as long as the connection is used.
pub async fn setup_file_test_db(max_connections: u32) -> Result<(TempDir, DatabaseConnection)> {
    let dir = tempfile::tempdir()?;
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("tracker.db").display());
    let db = crate::config::database::connect_url(&url, max_connections).await?;
    crate::config::database::create_tables(&db).await?;
    Ok((dir, db))
}

/// Builds a date from literal parts.
///
/// # Panics
/// Panics if the parts do not form a real calendar date.
#[must_use]
#[allow(clippy::panic)]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_else(|| {
        panic!("invalid test date {year}-{month}-{day}");
    })
}

/// Registers a user with sensible defaults and returns its ID.
///
/// # Defaults
/// * `email`: `"<username>@example.com"`
/// * `password`: [`TEST_PASSWORD`]
pub async fn create_test_user(db: &DatabaseConnection, username: &str) -> Result<i64> {
    auth::create_user(db, username, &format!("{username}@example.com"), TEST_PASSWORD).await
}

/// Creates an expense with the description `"Test expense"` and returns its ID.
pub async fn create_test_expense(
    db: &DatabaseConnection,
    user_id: i64,
    date: NaiveDate,
    category: &str,
    amount: f64,
) -> Result<i64> {
    expense::create_expense(db, user_id, date, category, "Test expense", amount).await
}

/// Sets up a complete test environment with one registered user.
/// Returns (db, `user_id`) for common test scenarios.
pub async fn setup_with_user() -> Result<(DatabaseConnection, i64)> {
    let db = setup_test_db().await?;
    let user_id = create_test_user(&db, "test_user").await?;
    Ok((db, user_id))
}
