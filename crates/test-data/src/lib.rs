//! Development seeding for the agents rooms database.
//!
//! **WARNING**: seeding is destructive. Every table in the schema is
//! truncated before new rows are generated, so only point this at a local
//! or test database.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use test_data::prelude::*;
//!
//! let db = Database::connect(&DbConfig::from_env()?, rooms::schema()).await?;
//! let plan = SeedPlan::new().table(
//!     "rooms",
//!     TableRefinement::new(5)
//!         .column("name", ColumnGenerator::CompanyName)
//!         .column("description", ColumnGenerator::lorem_ipsum())
//!         .with_relation("questions", 3),
//! );
//! let summary = test_data::run(db, &plan, &SeedConfig::default()).await?;
//! ```

pub mod config;
pub mod db;
pub mod generators;

use tracing::warn;

use crate::config::{SeedConfig, SeedPlan};
use crate::db::{Database, SeedError, SeedSummary, Seeder};

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::{DbConfig, SeedConfig, SeedPlan, TableRefinement};
    pub use crate::db::{Database, SeedError, SeedSummary, Seeder};
    pub use crate::generators::{ColumnGenerator, GeneratedRow, RowGenerator, Value};
    pub use crate::run;
}

/// Resets every table in `db`'s schema, seeds it per `plan`, then closes the
/// connection.
///
/// The plan is checked against the schema before anything is deleted. The
/// pool is closed whether or not seeding succeeded.
pub async fn run(
    db: Database,
    plan: &SeedPlan,
    config: &SeedConfig,
) -> Result<SeedSummary, SeedError> {
    let result = reset_and_seed(&db, plan, config).await;
    db.close().await;
    result
}

async fn reset_and_seed(
    db: &Database,
    plan: &SeedPlan,
    config: &SeedConfig,
) -> Result<SeedSummary, SeedError> {
    plan.validate(db.schema())?;

    for table in plan.dead_generators(db.schema()) {
        warn!(
            table,
            "Column generators are registered but count is 0, no rows will be generated"
        );
    }

    let seeder = Seeder::new(db)
        .with_batch_size(config.batch_size)
        .with_rng_seed(config.rng_seed);

    seeder.reset().await?;
    seeder.seed(plan).await
}
