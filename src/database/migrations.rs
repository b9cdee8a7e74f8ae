//! Database Migrations
//!
//! Embedded refinery migrations, applied at startup before the server
//! accepts traffic.

use anyhow::{Context, Result};
use deadpool_postgres::Pool;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("./migrations");
}

/// Run all pending migrations
pub async fn run_migrations(pool: &Pool) -> Result<()> {
    tracing::info!("🔄 Running database migrations...");

    let mut conn = pool
        .get()
        .await
        .context("Failed to get connection for migrations")?;
    let report = embedded::migrations::runner()
        .run_async(&mut **conn)
        .await
        .context("Failed to apply migrations")?;

    tracing::info!(
        "✅ Database migrations completed, {} applied",
        report.applied_migrations().len()
    );
    Ok(())
}
