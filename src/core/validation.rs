//! Input validation for request-shaped data.
//!
//! The repositories trust their arguments, so whatever sits in front of them (an HTTP
//! handler, a CLI) runs these checks first and turns the raw strings into typed values.

use crate::errors::{Error, Result};
use chrono::NaiveDate;

/// Date format accepted for expenses.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// An expense that passed validation and is ready for
/// [`create_expense`](crate::core::expense::create_expense).
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    /// Parsed calendar date
    pub date: NaiveDate,
    /// Category label, stored exactly as given
    pub category: String,
    /// Description, stored exactly as given
    pub description: String,
    /// Strictly positive, finite amount
    pub amount: f64,
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
/// Returns `Error::Validation` if the text is not a real calendar date in that format.
pub fn parse_expense_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| Error::validation("Invalid date format. Use YYYY-MM-DD"))
}

/// Parses a positive amount.
///
/// # Errors
/// Returns `Error::Validation` if the text is not a number, or the number is not finite
/// and greater than zero.
pub fn parse_expense_amount(raw: &str) -> Result<f64> {
    let amount: f64 = raw
        .trim()
        .parse()
        .map_err(|_| Error::validation("Invalid amount format"))?;

    if !amount.is_finite() {
        return Err(Error::validation("Invalid amount format"));
    }
    if amount <= 0.0 {
        return Err(Error::validation("Amount must be greater than 0"));
    }

    Ok(amount)
}

/// Validates the four fields of a new expense.
///
/// # Errors
/// Returns `Error::Validation` when a field is missing or blank, the date is malformed,
/// or the amount is not a positive number.
pub fn validate_new_expense(
    date: Option<&str>,
    category: Option<&str>,
    description: Option<&str>,
    amount: Option<&str>,
) -> Result<NewExpense> {
    let (Some(date), Some(category), Some(description), Some(amount)) =
        (date, category, description, amount)
    else {
        return Err(Error::validation("Missing required fields"));
    };

    if category.trim().is_empty() || description.trim().is_empty() {
        return Err(Error::validation("Missing required fields"));
    }

    Ok(NewExpense {
        date: parse_expense_date(date)?,
        category: category.to_string(),
        description: description.to_string(),
        amount: parse_expense_amount(amount)?,
    })
}

/// Validates registration input before [`create_user`](crate::core::auth::create_user).
///
/// # Errors
/// Returns `Error::Validation` when a field is missing or blank, or the password is
/// shorter than `min_password_length` characters.
pub fn validate_registration(
    username: Option<&str>,
    email: Option<&str>,
    password: Option<&str>,
    min_password_length: usize,
) -> Result<()> {
    if is_blank(username) || is_blank(email) || password.is_none_or(str::is_empty) {
        return Err(Error::validation("All fields are required"));
    }

    if password.is_some_and(|p| p.chars().count() < min_password_length) {
        return Err(Error::validation(format!(
            "Password must be at least {min_password_length} characters"
        )));
    }

    Ok(())
}
