/// Database connection pooling and table creation
pub mod database;

/// Settings loading from `expense_tracker.toml`
pub mod settings;
