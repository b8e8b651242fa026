//! Unified error type for the expense tracker.
//!
//! Expected absence (an unknown expense, a failed login) is modelled as `Ok(None)` or
//! `Ok(false)` by the operations themselves. The variants here cover everything the
//! caller has to treat as a failure.

use thiserror::Error;

/// Message returned to clients in place of internal failure detail.
pub const GENERIC_FAILURE_MESSAGE: &str = "Internal server error";

/// All failures produced by the expense tracker core.
#[derive(Debug, Error)]
pub enum Error {
    /// A username or email is already registered.
    #[error("Username or email already exists")]
    DuplicateIdentity,

    /// A lookup or mutation target is absent or not owned by the caller.
    #[error("{entity} not found")]
    NotFound {
        /// Kind of record that was looked up (e.g. "Expense")
        entity: &'static str,
    },

    /// Request-shaped input failed validation before reaching the store.
    #[error("{message}")]
    Validation {
        /// Client-facing description of the problem
        message: String,
    },

    /// Connection, transaction, or query failure in the store.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Filesystem failure outside the store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Text rendering failed.
    #[error("Formatting error: {0}")]
    Format(#[from] std::fmt::Error),

    /// Settings could not be read or parsed.
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong while loading configuration
        message: String,
    },
}

impl Error {
    /// Builds a [`Error::Validation`] from any message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// HTTP status a transport layer should answer with for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::DuplicateIdentity | Self::Validation { .. } => 400,
            Self::NotFound { .. } => 404,
            Self::Database(_) | Self::Io(_) | Self::Format(_) | Self::Config { .. } => 500,
        }
    }

    /// Message that is safe to show a client.
    ///
    /// Store, I/O, formatting, and configuration failures are redacted to
    /// [`GENERIC_FAILURE_MESSAGE`]; their detail belongs in server-side logs only.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Database(_) | Self::Io(_) | Self::Format(_) | Self::Config { .. } => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
