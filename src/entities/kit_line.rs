//! Kit line entity - Associates a kit product with one of its component products.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Kit line database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "kit_lines")]
pub struct Model {
    /// Unique identifier for the line
    #[sea_orm(primary_key)]
    pub id: i64,
    /// The kit product this line belongs to
    pub parent_id: i64,
    /// The component product
    pub product_id: i64,
    /// Quantity of the component per kit
    pub quantity: f64,
    /// Optional ordering inside the kit
    pub sequence: Option<i32>,
}

/// Defines relationships between `KitLine` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each line belongs to one kit product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ParentId",
        to = "super::product::Column::Id"
    )]
    Kit,
    /// Each line points to one component product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Component,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Component.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
