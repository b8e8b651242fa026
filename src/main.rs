use dotenvy::dotenv;
use expense_tracker::{
    config::{database, settings},
    core::report,
    errors::Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Settings file is optional
    let settings = settings::load_default_settings()
        .inspect_err(|e| error!("Failed to load settings: {}", e))?;

    // 4. Connect read-only; the report never creates files or tables
    let db = database::create_read_only_connection(&settings)
        .await
        .inspect_err(|e| error!("Failed to open database: {}", e))?;
    info!("Database opened read-only");

    // 5. Print the report to stdout
    print!("{}", report::render_database_report(&db).await?);

    db.close().await?;
    Ok(())
}
