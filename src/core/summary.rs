//! Aggregated views over a user's expenses.
//!
//! Grouping and summing run inside the store. Totals keep full precision until the
//! final step, where [`round_currency`] rounds them to cents for presentation.

use crate::{
    entities::{Expense, expense},
    errors::Result,
};
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use sea_orm::{FromQueryResult, QueryOrder, QuerySelect, Select, prelude::*, sea_query::Expr};
use serde::Serialize;

/// Total spent in one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotal {
    /// Human-readable month label such as "January 2024"
    pub month: String,
    /// Sum of amounts, rounded to 2 decimal places
    pub total: f64,
}

/// Number of expenses and total spent under one category label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// Category label exactly as stored
    pub category: String,
    /// Number of expenses in the category
    pub count: i64,
    /// Sum of amounts, rounded to 2 decimal places
    pub total: f64,
}

#[derive(Debug, FromQueryResult)]
struct MonthRow {
    year: i32,
    month: i32,
    total: f64,
}

#[derive(Debug, FromQueryResult)]
struct CategoryRow {
    category: String,
    count: i64,
    total: f64,
}

/// Rounds an aggregated amount to 2 decimal places, halves away from zero.
///
/// The value is first snapped to 8 decimal places so that binary noise (10.00 + 5.005
/// summing to 15.00499999...) does not flip the decision at the half-cent.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn round_currency(value: f64) -> f64 {
    let Some(exact) = Decimal::from_f64_retain(value) else {
        return value;
    };

    let cents = exact
        .round_dp(8)
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|d| d.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_i64());

    // Dividing an exact integer by 100.0 lands on the f64 closest to the 2-decimal value.
    cents.map_or(value, |c| c as f64 / 100.0)
}

/// Formats a year and month as "Month YYYY".
#[must_use]
pub fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1).map_or_else(
        || format!("{year:04}-{month:02}"),
        |d| d.format("%B %Y").to_string(),
    )
}

/// Sums `user_id`'s expenses per calendar month, oldest month first.
///
/// Months without expenses are not listed; a user with no expenses gets an empty list.
pub async fn monthly_summary<C>(db: &C, user_id: i64) -> Result<Vec<MonthlyTotal>>
where
    C: ConnectionTrait,
{
    let rows = Expense::find()
        .select_only()
        .column_as(Expr::cust("CAST(strftime('%Y', \"date\") AS INTEGER)"), "year")
        .column_as(Expr::cust("CAST(strftime('%m', \"date\") AS INTEGER)"), "month")
        .column_as(Expr::col(expense::Column::Amount).sum(), "total")
        .filter(expense::Column::UserId.eq(user_id))
        .group_by(Expr::cust("year"))
        .group_by(Expr::cust("month"))
        .order_by_asc(Expr::cust("year"))
        .order_by_asc(Expr::cust("month"))
        .into_model::<MonthRow>()
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|row| MonthlyTotal {
            month: month_label(row.year, u32::try_from(row.month).unwrap_or_default()),
            total: round_currency(row.total),
        })
        .collect())
}

fn category_totals_query() -> Select<Expense> {
    Expense::find()
        .select_only()
        .column(expense::Column::Category)
        .column_as(Expr::col(expense::Column::Id).count(), "count")
        .column_as(Expr::col(expense::Column::Amount).sum(), "total")
        .group_by(expense::Column::Category)
        .order_by_desc(Expr::cust("total"))
        .order_by_asc(expense::Column::Category)
}

async fn collect_category_totals<C>(db: &C, query: Select<Expense>) -> Result<Vec<CategoryTotal>>
where
    C: ConnectionTrait,
{
    let rows = query.into_model::<CategoryRow>().all(db).await?;

    Ok(rows
        .into_iter()
        .map(|row| CategoryTotal {
            category: row.category,
            count: row.count,
            total: round_currency(row.total),
        })
        .collect())
}

/// Counts and sums `user_id`'s expenses per category, largest total first.
///
/// Categories are grouped by exact string match, so "Food" and "food " are different
/// groups. Equal totals are ordered by category name.
pub async fn category_summary<C>(db: &C, user_id: i64) -> Result<Vec<CategoryTotal>>
where
    C: ConnectionTrait,
{
    let query = category_totals_query().filter(expense::Column::UserId.eq(user_id));
    collect_category_totals(db, query).await
}

/// Category totals across every user. Only the diagnostic report uses this.
pub async fn category_summary_all<C>(db: &C) -> Result<Vec<CategoryTotal>>
where
    C: ConnectionTrait,
{
    collect_category_totals(db, category_totals_query()).await
}
