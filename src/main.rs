use dotenvy::dotenv;
use kit_timesheet::{
    config::{database, settings},
    core::{context::Context, product},
    errors::Result,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, env vars can also be set externally
    dotenv().ok();

    // 3. Load settings and the execution context
    let settings = settings::load_default_config()
        .inspect_err(|e| error!("Failed to load settings: {}", e))?;
    let ctx = Context::from_settings(&settings);
    info!(company = ?ctx.company_id, "Settings loaded.");

    // 4. Connect and ensure the schema
    let url = database::get_database_url(&settings);
    let db = database::create_connection(&url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db).await?;

    // 5. Audit products whose works disagree with their eligibility
    let inconsistent = product::find_inconsistent_products(&db).await?;
    if inconsistent.is_empty() {
        info!("All products are consistent with their timesheet works.");
    }
    for p in &inconsistent {
        let name = product::rec_name(&db, p).await?;
        warn!(product_id = p.id, %name, "Product has timesheet works but is no longer eligible");
    }

    Ok(())
}
