//! # auth-seed
//!
//! Wires configuration, the connection pool and the seed routine together.
//! The binary in `main.rs` is a thin wrapper around [`run`].

use auth_common::AppConfig;
use auth_db::{apply_schema, create_pool, PgPool};
use auth_service::{SeedFailure, SeedOptions, SeedReport, SeedRoutine, ServiceContext};
use tracing::{info, instrument};

/// Errors that end a seed invocation
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Database unavailable: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Seed(#[from] SeedFailure),
}

/// Connect, optionally bootstrap the schema, and run the seed routine once
#[instrument(skip(config), fields(app = %config.app.name))]
pub async fn run(config: &AppConfig) -> Result<SeedReport, SeedError> {
    let pool = create_pool(&config.database).await?;
    run_on(pool, config).await
}

/// Seed through an existing pool, closing it whether or not seeding succeeds
pub async fn run_on(pool: PgPool, config: &AppConfig) -> Result<SeedReport, SeedError> {
    let result = seed_with(&pool, config).await;
    pool.close().await;
    result
}

async fn seed_with(pool: &PgPool, config: &AppConfig) -> Result<SeedReport, SeedError> {
    if config.seed.apply_schema {
        apply_schema(pool).await?;
    } else {
        info!("Skipping schema bootstrap (SEED_APPLY_SCHEMA not set)");
    }

    let ctx = ServiceContext::postgres(pool.clone());
    let options = SeedOptions::from(&config.seed);
    Ok(SeedRoutine::new(&ctx, options).run().await?)
}
