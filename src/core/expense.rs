//! Expense repository - Owner-scoped CRUD over the `expenses` table.
//!
//! Every read and mutation takes the caller's `user_id` and filters on it, so an expense
//! is invisible to any other identity. Input is trusted: callers validate dates and
//! amounts (see [`crate::core::validation`]) before calling [`create_expense`].

use crate::{
    entities::{Expense, expense},
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, info, instrument};

/// Fields to overwrite on an existing expense. `None` leaves the stored value as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseChanges {
    /// New calendar date
    pub date: Option<NaiveDate>,
    /// New category label
    pub category: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New amount
    pub amount: Option<f64>,
}

/// Inserts an expense owned by `user_id` and returns its ID.
#[instrument(skip(db, description))]
pub async fn create_expense<C>(
    db: &C,
    user_id: i64,
    date: NaiveDate,
    category: &str,
    description: &str,
    amount: f64,
) -> Result<i64>
where
    C: ConnectionTrait,
{
    let new_expense = expense::ActiveModel {
        user_id: Set(user_id),
        date: Set(date),
        category: Set(category.to_string()),
        description: Set(description.to_string()),
        amount: Set(amount),
        ..Default::default()
    };

    let expense_id = Expense::insert(new_expense).exec(db).await?.last_insert_id;
    info!("Created expense_id {} for user_id {}", expense_id, user_id);
    Ok(expense_id)
}

/// Retrieves every expense owned by `user_id`, newest date first.
///
/// Expenses sharing a date are ordered by descending ID, so the most recently inserted
/// one comes first.
pub async fn get_all_expenses<C>(db: &C, user_id: i64) -> Result<Vec<expense::Model>>
where
    C: ConnectionTrait,
{
    Expense::find()
        .filter(expense::Column::UserId.eq(user_id))
        .order_by_desc(expense::Column::Date)
        .order_by_desc(expense::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds an expense by ID, but only if it belongs to `user_id`.
///
/// An expense owned by someone else is reported exactly like a missing one.
pub async fn get_expense_by_id<C>(
    db: &C,
    expense_id: i64,
    user_id: i64,
) -> Result<Option<expense::Model>>
where
    C: ConnectionTrait,
{
    Expense::find_by_id(expense_id)
        .filter(expense::Column::UserId.eq(user_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Applies `changes` to an expense owned by `user_id`.
///
/// The write itself is filtered on both ID and owner, so an expense deleted or owned by
/// someone else is never touched. Returns the updated row, or `None` if no owned expense
/// matched.
#[instrument(skip(db, changes))]
pub async fn update_expense<C>(
    db: &C,
    expense_id: i64,
    user_id: i64,
    changes: ExpenseChanges,
) -> Result<Option<expense::Model>>
where
    C: ConnectionTrait,
{
    let mut active = <expense::ActiveModel as Default>::default();
    if let Some(date) = changes.date {
        active.date = Set(date);
    }
    if let Some(category) = changes.category {
        active.category = Set(category);
    }
    if let Some(description) = changes.description {
        active.description = Set(description);
    }
    if let Some(amount) = changes.amount {
        active.amount = Set(amount);
    }

    // Nothing to write; report the current state of the owned row
    if !active.is_changed() {
        return get_expense_by_id(db, expense_id, user_id).await;
    }

    let result = Expense::update_many()
        .set(active)
        .filter(expense::Column::Id.eq(expense_id))
        .filter(expense::Column::UserId.eq(user_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        debug!("Expense {} not found for user_id {}", expense_id, user_id);
        return Ok(None);
    }

    info!("Updated expense_id {} for user_id {}", expense_id, user_id);
    get_expense_by_id(db, expense_id, user_id).await
}

/// Hard-deletes an expense owned by `user_id`.
///
/// Returns `true` if a row was removed. A missing or foreign expense yields `false`, which
/// the caller may surface as "not found".
#[instrument(skip(db))]
pub async fn delete_expense<C>(db: &C, expense_id: i64, user_id: i64) -> Result<bool>
where
    C: ConnectionTrait,
{
    let result = Expense::delete_many()
        .filter(expense::Column::Id.eq(expense_id))
        .filter(expense::Column::UserId.eq(user_id))
        .exec(db)
        .await?;

    let deleted = result.rows_affected > 0;
    if deleted {
        info!("Deleted expense_id {} for user_id {}", expense_id, user_id);
    }
    Ok(deleted)
}
