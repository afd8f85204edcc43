//! Product entity - A variant of a product template.
//!
//! Name, type and analytic accounts come from the template. A product can be the
//! component of kit lines and carry generated timesheet works.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Template this product is a variant of
    pub template_id: i64,
    /// Optional variant code, shown as `[code]` in the display name
    pub code: Option<String>,
    /// Inactive products are hidden but preserved
    pub active: bool,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each product belongs to one template
    #[sea_orm(
        belongs_to = "super::product_template::Entity",
        from = "Column::TemplateId",
        to = "super::product_template::Column::Id"
    )]
    Template,
    /// One product has many timesheet works
    #[sea_orm(has_many = "super::timesheet_work::Entity")]
    Works,
}

impl Related<super::product_template::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Template.def()
    }
}

impl Related<super::timesheet_work::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Works.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
