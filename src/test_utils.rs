//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test records with sensible defaults. Helpers named `insert_*` and
//! `set_*` write rows directly, skipping the business hooks.

use crate::{
    core::{account, context::Context, kit, product, template, timesheet},
    entities::{ProductType, analytic_account, kit_line, product_template, template_analytic_account},
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates an analytic account, a root when `parent_id` is `None`.
pub async fn create_test_account(
    db: &DatabaseConnection,
    name: &str,
    parent_id: Option<i64>,
) -> Result<analytic_account::Model> {
    account::create_account(db, name.to_string(), None, parent_id).await
}

/// Creates a product template.
pub async fn create_test_template(
    db: &DatabaseConnection,
    name: &str,
    product_type: ProductType,
) -> Result<product_template::Model> {
    template::create_template(db, name.to_string(), product_type).await
}

/// Creates a template and its single product, without code.
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
    product_type: ProductType,
) -> Result<crate::entities::product::Model> {
    let template = create_test_template(db, name, product_type).await?;
    product::create_product(db, template.id, None).await
}

/// Creates a kit line of quantity 1 through [`kit::create_kit_lines`], generating works.
pub async fn create_test_kit_line(
    db: &DatabaseConnection,
    kit_id: i64,
    product_id: i64,
) -> Result<kit_line::Model> {
    let mut lines = kit::create_kit_lines(
        db,
        &Context::default(),
        vec![kit::NewKitLine {
            kit_id,
            product_id,
            quantity: 1.0,
            sequence: None,
        }],
    )
    .await?;
    Ok(lines.remove(0))
}

/// Inserts a kit line of quantity 1 without generating works.
pub async fn insert_test_kit_line(
    db: &DatabaseConnection,
    kit_id: i64,
    product_id: i64,
) -> Result<kit_line::Model> {
    let line = kit_line::ActiveModel {
        parent_id: Set(kit_id),
        product_id: Set(product_id),
        quantity: Set(1.0),
        sequence: Set(None),
        ..Default::default()
    };
    Ok(line.insert(db).await?)
}

/// Selects `account_id` under `root_id` for a template without generating works.
pub async fn select_test_account(
    db: &DatabaseConnection,
    template_id: i64,
    root_id: i64,
    account_id: i64,
) -> Result<()> {
    let selection = template_analytic_account::ActiveModel {
        template_id: Set(template_id),
        root_id: Set(root_id),
        account_id: Set(account_id),
        ..Default::default()
    };
    selection.insert(db).await?;
    Ok(())
}

/// Changes a template's type without validation or work generation.
pub async fn set_test_template_type(
    db: &DatabaseConnection,
    template_id: i64,
    product_type: ProductType,
) -> Result<()> {
    let mut template: product_template::ActiveModel =
        template::get_template(db, template_id).await?.into();
    template.product_type = Set(product_type);
    template.update(db).await?;
    Ok(())
}

/// Logs hours on 2024-01-15 against a work.
pub async fn log_test_hours(db: &DatabaseConnection, work_id: i64, hours: f64) -> Result<()> {
    let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap_or_default();
    timesheet::log_timesheet_line(db, work_id, date, hours, None).await?;
    Ok(())
}

/// A service component with two analytic accounts, not yet part of any kit.
pub struct ComponentSetup {
    /// Goods product named "Kit"
    pub kit: crate::entities::product::Model,
    /// Service product named "Assembly"
    pub component: crate::entities::product::Model,
    /// `Projects\Internal` then `Departments`, in analytic root order
    pub accounts: Vec<analytic_account::Model>,
}

/// Sets up the kit, the component and its accounts: `Projects\Internal` under the
/// `Projects` root and the `Departments` root itself.
pub async fn setup_component_with_accounts(db: &DatabaseConnection) -> Result<ComponentSetup> {
    let projects = create_test_account(db, "Projects", None).await?;
    let internal = create_test_account(db, "Internal", Some(projects.id)).await?;
    let departments = create_test_account(db, "Departments", None).await?;

    let kit = create_test_product(db, "Kit", ProductType::Goods).await?;
    let component = create_test_product(db, "Assembly", ProductType::Service).await?;
    select_test_account(db, component.template_id, projects.id, internal.id).await?;
    select_test_account(db, component.template_id, departments.id, departments.id).await?;

    Ok(ComponentSetup {
        kit,
        component,
        accounts: vec![internal, departments],
    })
}

/// A component made eligible by a kit line, with its two generated works.
pub struct EligibleSetup {
    /// Goods product named "Kit"
    pub kit: crate::entities::product::Model,
    /// Service product named "Assembly"
    pub component: crate::entities::product::Model,
    /// `Projects\Internal` then `Departments`
    pub accounts: Vec<analytic_account::Model>,
    /// The kit line linking both
    pub line: kit_line::Model,
}

/// Sets up [`setup_component_with_accounts`] and adds the component to the kit through
/// [`kit::create_kit_lines`], which generates one work per account.
pub async fn setup_eligible_component(db: &DatabaseConnection) -> Result<EligibleSetup> {
    let ComponentSetup {
        kit,
        component,
        accounts,
    } = setup_component_with_accounts(db).await?;
    let line = create_test_kit_line(db, kit.id, component.id).await?;
    Ok(EligibleSetup {
        kit,
        component,
        accounts,
        line,
    })
}
