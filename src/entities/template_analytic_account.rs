//! Template analytic account entity - The account a template selected under one analytic root.
//!
//! Written through the `analytic_account_<root id>` template fields.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Template analytic account database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "template_analytic_accounts")]
pub struct Model {
    /// Unique identifier for the selection row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Template making the selection
    pub template_id: i64,
    /// Analytic root the selection is made under
    pub root_id: i64,
    /// Selected account, the root itself or one of its descendants
    pub account_id: i64,
}

/// Defines relationships between `TemplateAnalyticAccount` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each selection belongs to one template
    #[sea_orm(
        belongs_to = "super::product_template::Entity",
        from = "Column::TemplateId",
        to = "super::product_template::Column::Id"
    )]
    Template,
    /// Each selection points to one account
    #[sea_orm(
        belongs_to = "super::analytic_account::Entity",
        from = "Column::AccountId",
        to = "super::analytic_account::Column::Id"
    )]
    Account,
}

impl Related<super::product_template::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Template.def()
    }
}

impl Related<super::analytic_account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
