//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod analytic_account;
pub mod kit_line;
pub mod product;
pub mod product_template;
pub mod template_analytic_account;
pub mod timesheet_line;
pub mod timesheet_work;

// Re-export specific types to avoid conflicts
pub use analytic_account::{
    Column as AnalyticAccountColumn, Entity as AnalyticAccount, Model as AnalyticAccountModel,
};
pub use kit_line::{Column as KitLineColumn, Entity as KitLine, Model as KitLineModel};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
pub use product_template::{
    Column as ProductTemplateColumn, Entity as ProductTemplate, Model as ProductTemplateModel,
    ProductType,
};
pub use template_analytic_account::{
    Column as TemplateAnalyticAccountColumn, Entity as TemplateAnalyticAccount,
    Model as TemplateAnalyticAccountModel,
};
pub use timesheet_line::{
    Column as TimesheetLineColumn, Entity as TimesheetLine, Model as TimesheetLineModel,
};
pub use timesheet_work::{
    Column as TimesheetWorkColumn, Entity as TimesheetWork, Model as TimesheetWorkModel,
};
