//! Diagnostic report over the whole database.
//!
//! This is a read-only view across every user, meant for an operator at the terminal.
//! It never goes through the owner-scoped repository functions and must not be exposed
//! to end users.

use crate::{
    config::database::table_exists,
    core::summary::{CategoryTotal, category_summary_all},
    entities::{Expense, expense},
    errors::Result,
};
use sea_orm::{QueryOrder, prelude::*};
use std::fmt::Write as _;

/// Printed instead of a report when the schema has never been created.
pub const MISSING_TABLE_MESSAGE: &str =
    "No 'expenses' table found. Run the expense tracker first to create it.";

/// Printed instead of a report when the `expenses` table has no rows.
pub const EMPTY_DATABASE_MESSAGE: &str = "Database is empty. No expenses found.";

const WIDE_RULE: usize = 80;
const NARROW_RULE: usize = 50;

/// Snapshot of every stored expense plus global category totals.
#[derive(Debug, Clone)]
pub struct DatabaseReport {
    /// All expenses, newest date first
    pub expenses: Vec<expense::Model>,
    /// Unrounded sum of every amount
    pub total: f64,
    /// Totals per category across all users, largest first
    pub categories: Vec<CategoryTotal>,
}

/// Collects the data for [`format_report`].
pub async fn generate_database_report<C>(db: &C) -> Result<DatabaseReport>
where
    C: ConnectionTrait,
{
    let expenses = Expense::find()
        .order_by_desc(expense::Column::Date)
        .order_by_desc(expense::Column::Id)
        .all(db)
        .await?;
    let total: f64 = expenses.iter().map(|e| e.amount).sum();
    let categories = category_summary_all(db).await?;

    Ok(DatabaseReport {
        expenses,
        total,
        categories,
    })
}

/// Renders the report for whatever `db` holds without writing to it.
///
/// A database whose `expenses` table was never created yields [`MISSING_TABLE_MESSAGE`].
pub async fn render_database_report<C>(db: &C) -> Result<String>
where
    C: ConnectionTrait,
{
    if !table_exists(db, "expenses").await? {
        return Ok(format!("{MISSING_TABLE_MESSAGE}\n"));
    }

    let report = generate_database_report(db).await?;
    format_report(&report)
}

/// Cuts `text` to at most `width` characters so table columns stay aligned.
fn fit(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

/// Formats the expense listing with a grand total line.
pub fn format_expense_table(report: &DatabaseReport) -> Result<String> {
    let mut out = String::new();
    writeln!(&mut out, "{}", "=".repeat(WIDE_RULE))?;
    writeln!(&mut out, "EXPENSE DATABASE - Total Records: {}", report.expenses.len())?;
    writeln!(&mut out, "{}", "=".repeat(WIDE_RULE))?;
    writeln!(
        &mut out,
        "{:<5} {:<12} {:<15} {:<25} {:>10}",
        "ID", "Date", "Category", "Description", "Amount"
    )?;
    writeln!(&mut out, "{}", "-".repeat(WIDE_RULE))?;

    for e in &report.expenses {
        writeln!(
            &mut out,
            "{:<5} {:<12} {:<15} {:<25} ${:>9.2}",
            e.id,
            e.date.format("%Y-%m-%d").to_string(),
            fit(&e.category, 15),
            fit(&e.description, 25),
            e.amount
        )?;
    }

    writeln!(&mut out, "{}", "-".repeat(WIDE_RULE))?;
    writeln!(&mut out, "{:<57} ${:>9.2}", "TOTAL:", report.total)?;
    writeln!(&mut out, "{}", "=".repeat(WIDE_RULE))?;
    Ok(out)
}

/// Formats the per-category table.
pub fn format_category_table(categories: &[CategoryTotal]) -> Result<String> {
    let mut out = String::new();
    writeln!(&mut out, "CATEGORY SUMMARY:")?;
    writeln!(&mut out, "{}", "-".repeat(NARROW_RULE))?;
    writeln!(&mut out, "{:<20} {:>10} {:>15}", "Category", "Count", "Total")?;
    writeln!(&mut out, "{}", "-".repeat(NARROW_RULE))?;

    for c in categories {
        writeln!(
            &mut out,
            "{:<20} {:>10} ${:>14.2}",
            fit(&c.category, 20),
            c.count,
            c.total
        )?;
    }

    writeln!(&mut out, "{}", "-".repeat(NARROW_RULE))?;
    Ok(out)
}

/// Renders the full report, or a short notice when there is nothing stored.
pub fn format_report(report: &DatabaseReport) -> Result<String> {
    if report.expenses.is_empty() {
        return Ok(format!("{EMPTY_DATABASE_MESSAGE}\n"));
    }

    Ok(format!(
        "{}\n{}",
        format_expense_table(report)?,
        format_category_table(&report.categories)?
    ))
}
