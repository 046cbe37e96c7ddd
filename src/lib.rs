pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repositories;
pub mod search;
pub mod seed;

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::config::AppConfig;

pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Connects to Postgres and applies pending migrations when configured to.
pub async fn connect(config: &AppConfig) -> Result<PgPool> {
    info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    info!("Database connected");

    if config.run_migrations {
        MIGRATOR.run(&pool).await?;
        info!("Migrations applied");
    }

    Ok(pool)
}
