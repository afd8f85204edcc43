//! Timesheet line entity - Hours logged against a timesheet work.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Timesheet line database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "timesheet_lines")]
pub struct Model {
    /// Unique identifier for the line
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Work the hours were spent on
    pub work_id: i64,
    /// Day the hours were spent
    pub date: Date,
    /// Number of hours
    pub hours: f64,
    /// Optional note
    pub description: Option<String>,
    /// When the line was logged
    pub created_at: DateTime,
}

/// Defines relationships between `TimesheetLine` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each line belongs to one work and is deleted with it
    #[sea_orm(
        belongs_to = "super::timesheet_work::Entity",
        from = "Column::WorkId",
        to = "super::timesheet_work::Column::Id",
        on_delete = "Cascade"
    )]
    Work,
}

impl Related<super::timesheet_work::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Work.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
