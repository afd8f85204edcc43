//! Timesheet work entity - Trackable work that timesheet lines are logged against.
//!
//! Works generated for a kit component carry both `product_id` and `account_id`;
//! their display name is then derived rather than taken from `name`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Timesheet work database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "timesheet_works")]
pub struct Model {
    /// Unique identifier for the work
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Entered name, used as display name unless product and account are set
    pub name: String,
    /// Company the work was created for
    pub company_id: Option<i64>,
    /// Whether hours can be logged against this work
    pub timesheet_available: bool,
    /// Product the work was generated for
    pub product_id: Option<i64>,
    /// Analytic account the work was generated for
    pub account_id: Option<i64>,
}

/// Defines relationships between `TimesheetWork` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each work may belong to one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
    /// Each work may belong to one analytic account
    #[sea_orm(
        belongs_to = "super::analytic_account::Entity",
        from = "Column::AccountId",
        to = "super::analytic_account::Column::Id"
    )]
    Account,
    /// One work has many timesheet lines
    #[sea_orm(has_many = "super::timesheet_line::Entity")]
    TimesheetLines,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::analytic_account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl Related<super::timesheet_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TimesheetLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
