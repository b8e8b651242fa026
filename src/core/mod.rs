//! Core business logic - framework-agnostic persistence, authentication, aggregation,
//! and input validation for the expense tracker.

/// User registration, password hashing, and authentication
pub mod auth;
/// Owner-scoped expense CRUD
pub mod expense;
/// Operator-facing report across all users
pub mod report;
/// Monthly and per-category totals
pub mod summary;
/// Validation of request-shaped input before it reaches the repositories
pub mod validation;
