use rooms::Schema;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use super::SeedError;
use crate::config::DbConfig;

/// Connection handle plus the schema whose tables it seeds.
pub struct Database {
    pool: PgPool,
    schema: Schema,
}

impl Database {
    /// Opens a pool for `config`.
    pub async fn connect(config: &DbConfig, schema: Schema) -> Result<Self, SeedError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout)
            .connect(&config.url)
            .await?;

        info!("Connected to database");
        Ok(Self::new(pool, schema))
    }

    pub fn new(pool: PgPool, schema: Schema) -> Self {
        Self { pool, schema }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Closes the pool, waiting for checked-out connections to be returned.
    pub async fn close(self) {
        self.pool.close().await;
        info!("Database connection closed");
    }
}
