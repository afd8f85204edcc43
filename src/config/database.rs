//! Database configuration module.
//!
//! This module handles the `SQLite` connection and table creation using `SeaORM`.
//! Tables are generated with `Schema::create_table_from_entity` from the entity models,
//! so the database schema always matches the Rust struct definitions.

use crate::config::settings::Settings;
use crate::entities::{
    AnalyticAccount, KitLine, Product, ProductTemplate, TemplateAnalyticAccount, TimesheetLine,
    TimesheetWork,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use tracing::{debug, info};

/// Fallback used when neither the environment nor the settings name a database.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://kit_timesheet.sqlite?mode=rwc";

/// Resolves the database URL.
///
/// `DATABASE_URL` in the environment wins over the settings file, which wins over
/// [`DEFAULT_DATABASE_URL`].
#[must_use]
pub fn get_database_url(settings: &Settings) -> String {
    std::env::var("DATABASE_URL")
        .ok()
        .or_else(|| settings.database_url.clone())
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database at `url`.
pub async fn create_connection(url: &str) -> Result<DatabaseConnection> {
    debug!("Connecting to database at {}", url);
    Database::connect(url).await.map_err(Into::into)
}

async fn create_table<E>(db: &DatabaseConnection, schema: &Schema, entity: E) -> Result<()>
where
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(builder.build(&statement)).await?;
    Ok(())
}

/// Creates every table that does not exist yet.
///
/// Tables are created parents first: accounts, templates and products before the
/// kit lines, works and timesheet lines that reference them.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, AnalyticAccount).await?;
    create_table(db, &schema, ProductTemplate).await?;
    create_table(db, &schema, TemplateAnalyticAccount).await?;
    create_table(db, &schema, Product).await?;
    create_table(db, &schema, KitLine).await?;
    create_table(db, &schema, TimesheetWork).await?;
    create_table(db, &schema, TimesheetLine).await?;

    info!("Database tables ensured");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{AnalyticAccountModel, KitLineModel, TimesheetWorkModel};
    use sea_orm::QuerySelect;

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<AnalyticAccountModel> = AnalyticAccount::find().limit(1).all(&db).await?;
        let _: Vec<KitLineModel> = KitLine::find().limit(1).all(&db).await?;
        let _: Vec<TimesheetWorkModel> = TimesheetWork::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_repeatable() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }

    #[test]
    fn test_settings_url_used_as_fallback() {
        let settings = Settings {
            database_url: Some("sqlite::memory:".to_string()),
            ..Settings::default()
        };
        // DATABASE_URL may be set in the test environment, in which case it wins
        let expected = std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string());
        assert_eq!(get_database_url(&settings), expected);
    }
}
