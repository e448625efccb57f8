use anyhow::Context;

use crate::config::AppConfig;
use crate::database::Database;

pub async fn handle(config: AppConfig) -> anyhow::Result<()> {
    let db = Database::connect(&config.database)
        .await
        .context("failed to connect to database")?;

    db.migrate().await.context("failed to apply migrations")?;
    db.close().await;

    println!("Migrations applied to {}", config.database_url());
    Ok(())
}
