//! Expense entity - A single dated, categorized amount spent by a user.
//!
//! Every expense belongs to exactly one user through `user_id`. Amounts are stored at
//! full precision; rounding happens only when summaries are presented.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Expense database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    /// Unique identifier for the expense
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the user who owns this expense
    pub user_id: i64,
    /// Calendar day the money was spent, stored as `YYYY-MM-DD`
    pub date: Date,
    /// Free-form label; grouping is exact-match
    pub category: String,
    /// What the money was spent on
    pub description: String,
    /// Amount spent, currency-agnostic
    pub amount: f64,
}

/// Defines relationships between Expense and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each expense belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
