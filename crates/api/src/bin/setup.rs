//! One-shot setup step: apply migrations and optionally load sample artworks.
//!
//! Run before the first server start and after every upgrade. Both steps are
//! idempotent.
//!
//! | Env Var            | Default    |
//! |--------------------|------------|
//! | `DATABASE_URL`     | (required) |
//! | `SEED_SAMPLE_DATA` | `false`    |

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gallery_setup=info,gallery_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let seed_samples = std::env::var("SEED_SAMPLE_DATA")
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false);

    let pool = gallery_db::create_pool(&database_url, 1)
        .await
        .context("Failed to connect to database")?;

    gallery_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    if seed_samples {
        let inserted = gallery_db::seed::seed_sample_artworks(&pool)
            .await
            .context("Failed to insert sample artworks")?;
        tracing::info!(inserted, "Sample data step finished");
    }

    pool.close().await;
    Ok(())
}
