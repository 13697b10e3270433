use anyhow::Context;
use sqlx_postgres::repository::Repository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    shared_kernel::tracing::config_telemetry("itinerary-migrations");

    let repo = Repository::new().await?;
    sqlx::migrate!()
        .run(repo.pool())
        .await
        .context("Failed to run migration")?;

    tracing::info!("Migrations applied");
    Ok(())
}
