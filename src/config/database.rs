//! Database configuration module.
//!
//! This module handles `SQLite` connection pooling and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust models.

use crate::config::settings::Settings;
use crate::entities::{Expense, User};
use crate::errors::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema, Statement};
use tracing::info;

/// Database used when neither `DATABASE_URL` nor the settings file name one.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://database.db?mode=rwc";

/// Resolves the database URL.
///
/// `DATABASE_URL` in the environment wins, then `database_url` from the settings file,
/// then [`DEFAULT_DATABASE_URL`].
#[must_use]
pub fn get_database_url(settings: &Settings) -> String {
    std::env::var("DATABASE_URL")
        .ok()
        .or_else(|| settings.database_url.clone())
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
}

/// Rewrites a `SQLite` URL so the connection can only read.
///
/// Any existing `mode=` parameter is replaced with `mode=ro`, which also stops `SQLite`
/// from creating a missing file. In-memory URLs are returned unchanged.
#[must_use]
pub fn read_only_url(url: &str) -> String {
    if url.contains(":memory:") {
        return url.to_string();
    }

    let (base, query) = url.split_once('?').unwrap_or((url, ""));
    let mut params: Vec<&str> = query
        .split('&')
        .filter(|p| !p.is_empty() && !p.starts_with("mode="))
        .collect();
    params.push("mode=ro");

    format!("{base}?{}", params.join("&"))
}

/// Opens a pool of at most `max_connections` connections to `url`.
///
/// Each query checks a connection out of the pool and returns it when the query finishes,
/// whether it succeeded or not.
pub async fn connect_url(url: &str, max_connections: u32) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(url);
    options.max_connections(max_connections).sqlx_logging(false);

    Database::connect(options).await.map_err(Into::into)
}

/// Opens a pooled read-write connection to the configured database.
pub async fn create_connection(settings: &Settings) -> Result<DatabaseConnection> {
    let url = get_database_url(settings);
    info!("Connecting to database (max {} connections)", settings.max_connections);
    connect_url(&url, settings.max_connections).await
}

/// Opens a pooled connection that cannot write, for read-only consumers such as the
/// diagnostic report. A missing database file is an error rather than being created.
pub async fn create_read_only_connection(settings: &Settings) -> Result<DatabaseConnection> {
    let url = read_only_url(&get_database_url(settings));
    info!("Connecting to database read-only");
    connect_url(&url, settings.max_connections).await
}

/// Checks whether `table` exists in the `SQLite` catalog without touching the schema.
pub async fn table_exists<C>(db: &C, table: &str) -> Result<bool>
where
    C: ConnectionTrait,
{
    let backend = db.get_database_backend();
    let row = db
        .query_one(Statement::from_sql_and_values(
            backend,
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?",
            [table.into()],
        ))
        .await?;

    Ok(row.is_some())
}

/// Creates the `users` and `expenses` tables if they do not exist yet.
///
/// Safe to call on every startup. `users` is created first because `expenses`
/// references it.
pub async fn create_tables<C>(db: &C) -> Result<()>
where
    C: ConnectionTrait,
{
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut user_table = schema.create_table_from_entity(User);
    user_table.if_not_exists();
    let mut expense_table = schema.create_table_from_entity(Expense);
    expense_table.if_not_exists();

    db.execute(builder.build(&user_table)).await?;
    db.execute(builder.build(&expense_table)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{ExpenseModel, UserModel};
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<UserModel> = User::find().limit(1).all(&db).await?;
        let _: Vec<ExpenseModel> = Expense::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;

        let _: Vec<UserModel> = User::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_table_exists() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        assert!(!table_exists(&db, "expenses").await?);

        create_tables(&db).await?;
        assert!(table_exists(&db, "expenses").await?);
        assert!(table_exists(&db, "users").await?);
        assert!(!table_exists(&db, "envelopes").await?);
        Ok(())
    }

    #[test]
    fn test_read_only_url() {
        assert_eq!(
            read_only_url("sqlite://database.db?mode=rwc"),
            "sqlite://database.db?mode=ro"
        );
        assert_eq!(read_only_url("sqlite://x.db"), "sqlite://x.db?mode=ro");
        assert_eq!(
            read_only_url("sqlite://x.db?cache=shared&mode=rwc"),
            "sqlite://x.db?cache=shared&mode=ro"
        );
        assert_eq!(read_only_url("sqlite::memory:"), "sqlite::memory:");
    }

    #[tokio::test]
    async fn test_read_only_connection_does_not_create_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("missing.db");
        let url = read_only_url(&format!("sqlite://{}?mode=rwc", path.display()));

        assert!(connect_url(&url, 1).await.is_err());
        assert!(!path.exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_read_only_connection_cannot_write_schema() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("empty.db");
        let writable = connect_url(&format!("sqlite://{}?mode=rwc", path.display()), 1).await?;
        assert!(!table_exists(&writable, "expenses").await?);
        writable.close().await?;

        let reader = connect_url(&read_only_url(&format!("sqlite://{}", path.display())), 1).await?;
        assert!(!table_exists(&reader, "expenses").await?);
        assert!(create_tables(&reader).await.is_err());
        assert!(!table_exists(&reader, "expenses").await?);
        Ok(())
    }

    #[test]
    fn test_settings_url_used_when_env_missing() {
        if std::env::var("DATABASE_URL").is_ok() {
            return;
        }
        let settings = Settings {
            database_url: Some("sqlite://custom.sqlite".to_string()),
            ..Settings::default()
        };
        assert_eq!(get_database_url(&settings), "sqlite://custom.sqlite");
        assert_eq!(get_database_url(&Settings::default()), DEFAULT_DATABASE_URL);
    }
}
