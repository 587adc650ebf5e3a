//! Reset the rooms database and fill it with generated data.
//!
//! **Destructive**: all rows in the schema's tables are deleted first.
//! Development and test databases only.
//!
//! Run with:
//! ```
//! DATABASE_URL=postgres://... cargo run -p test-data --bin seed
//! ```

use anyhow::Context;
use test_data::config::{DbConfig, SeedConfig};
use test_data::db::Database;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout only carries the result line.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let db_config = DbConfig::from_env()?;
    let seed_config = SeedConfig::from_env()?;
    let plan = seed_config.plan().context("failed to load seed plan")?;

    let db = Database::connect(&db_config, rooms::schema())
        .await
        .context("failed to connect to database")?;

    let summary = test_data::run(db, &plan, &seed_config)
        .await
        .context("failed to seed database")?;

    for (table, rows) in summary.tables() {
        tracing::info!("  {table}: {rows}");
    }

    println!("Database seeded successfully.");

    Ok(())
}
