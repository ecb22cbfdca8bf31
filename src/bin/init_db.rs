//! Applies `db/init.sql` to a running database.
//!
//! The MySQL container runs the script itself on a fresh volume; this is for
//! databases created some other way. The script is idempotent.

use anyhow::Context;
use tracing::info;
use web_scaffold::infrastructure::{database::DatabaseManager, logger::Logger, schema};
use web_scaffold::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    Logger::init("info");

    let config = AppConfig::from_env().context("failed to load configuration")?;
    let database = DatabaseManager::connect(&config.database)
        .await
        .with_context(|| format!("failed to connect to {}", config.database.display_url()))?;

    let count = schema::apply(database.get_pool(), schema::INIT_SCRIPT)
        .await
        .context("failed to apply initialization script")?;

    info!(statements = count, "Database initialized");
    database.get_pool().close().await;
    Ok(())
}
