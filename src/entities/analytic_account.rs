//! Analytic account entity - A node of the analytic accounting tree.
//!
//! Accounts without a parent are analytic roots. Product templates select at most one
//! account per root, and generated timesheet works point back to the account.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Analytic account database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "analytic_accounts")]
pub struct Model {
    /// Unique identifier for the account
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Account name, one segment of the full hierarchical name
    pub name: String,
    /// Optional accounting code
    pub code: Option<String>,
    /// Parent account, `None` for an analytic root
    pub parent_id: Option<i64>,
    /// Inactive accounts are kept for history
    pub active: bool,
}

/// Defines relationships between `AnalyticAccount` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each account may belong to a parent account
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentId",
        to = "Column::Id"
    )]
    Parent,
    /// One account has many timesheet works
    #[sea_orm(has_many = "super::timesheet_work::Entity")]
    Works,
}

impl Related<super::timesheet_work::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Works.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
