//! Product template entity - Groups variant products sharing name and type.
//!
//! The template owns the product type and the analytic account selection; every
//! product of the template reads them from here.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind of product, stored as its lowercase name
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    /// Stockable goods
    #[sea_orm(string_value = "goods")]
    Goods,
    /// Fixed assets
    #[sea_orm(string_value = "assets")]
    Assets,
    /// Services, the only type that can carry timesheet work
    #[sea_orm(string_value = "service")]
    Service,
}

/// Product template database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_templates")]
pub struct Model {
    /// Unique identifier for the template
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name shared by every product of the template
    pub name: String,
    /// Product type
    #[sea_orm(column_name = "type")]
    pub product_type: ProductType,
    /// Inactive templates are hidden but preserved
    pub active: bool,
}

/// Defines relationships between `ProductTemplate` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One template has many products
    #[sea_orm(has_many = "super::product::Entity")]
    Products,
    /// One template has one analytic account selection per root
    #[sea_orm(has_many = "super::template_analytic_account::Entity")]
    AnalyticAccounts,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl Related<super::template_analytic_account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AnalyticAccounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
