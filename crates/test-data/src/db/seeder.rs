//! Database seeding utilities.

use std::collections::{BTreeMap, HashMap};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rooms::{ColumnKind, Table};
use sqlx::{Postgres, QueryBuilder};
use thiserror::Error;
use tracing::{debug, info};

use super::Database;
use crate::config::SeedPlan;
use crate::generators::{GeneratedRow, RowGenerator, Value};

/// Postgres caps a statement at this many bind parameters.
const MAX_BIND_PARAMS: usize = u16::MAX as usize;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Failed to read seed plan: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid seed plan: {0}")]
    Plan(#[from] serde_json::Error),
    #[error("Table `{0}` is not part of the schema")]
    UnknownTable(String),
    #[error("Table `{table}` has no column `{column}`")]
    UnknownColumn { table: String, column: String },
    #[error("Table `{table}` has no relation `{relation}`")]
    UnknownRelation { table: String, relation: String },
    #[error("Generator for `{table}.{column}` cannot produce {kind:?} values")]
    GeneratorMismatch {
        table: String,
        column: String,
        kind: ColumnKind,
    },
    #[error("Cannot seed `{table}` without `{parent}` rows to reference")]
    MissingParent { table: String, parent: String },
}

/// Rows inserted per table by a seeding run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedSummary {
    rows: BTreeMap<String, usize>,
}

impl SeedSummary {
    fn record(&mut self, table: &str, count: usize) {
        *self.rows.entry(table.to_string()).or_default() += count;
    }

    /// Rows inserted into `table`, zero if the plan never touched it.
    pub fn rows(&self, table: &str) -> usize {
        self.rows.get(table).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.rows.values().sum()
    }

    pub fn tables(&self) -> impl Iterator<Item = (&str, usize)> {
        self.rows.iter().map(|(name, count)| (name.as_str(), *count))
    }
}

/// Resets and seeds the tables of a [`Database`]'s schema.
pub struct Seeder<'a> {
    db: &'a Database,
    batch_size: usize,
    rng_seed: u64,
}

impl<'a> Seeder<'a> {
    /// Creates a new seeder over `db`.
    pub fn new(db: &'a Database) -> Self {
        Self {
            db,
            batch_size: 50,
            rng_seed: 0,
        }
    }

    /// Sets the number of rows per `INSERT` statement.
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// Sets the seed for value generation. Equal seeds give equal data.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self
    }

    /// Clears every table in the schema.
    ///
    /// **WARNING**: This deletes all data from the tables. Use with caution.
    pub async fn reset(&self) -> Result<(), SeedError> {
        let tables: Vec<String> = self
            .db
            .schema()
            .reset_order()
            .iter()
            .map(|t| quote_ident(t.name))
            .collect();

        if tables.is_empty() {
            return Ok(());
        }

        info!("Resetting {} tables...", tables.len());

        // CASCADE takes care of foreign keys, including ones from tables
        // outside the schema.
        let sql = format!(
            "TRUNCATE TABLE {} RESTART IDENTITY CASCADE",
            tables.join(", ")
        );
        sqlx::query(&sql).execute(self.db.pool()).await?;

        info!("All tables reset");
        Ok(())
    }

    /// Generates and inserts rows according to `plan`.
    ///
    /// Tables are seeded parents first. Related rows named in a table's
    /// `with` map are attached to each freshly generated parent row. Rows a
    /// table gets on its own pick a random existing parent for each foreign
    /// key.
    pub async fn seed(&self, plan: &SeedPlan) -> Result<SeedSummary, SeedError> {
        let schema = self.db.schema();
        plan.validate(schema)?;

        let mut rng = StdRng::seed_from_u64(self.rng_seed);
        let mut inserted: HashMap<&'static str, Vec<GeneratedRow>> = HashMap::new();
        let mut summary = SeedSummary::default();
        let no_columns = BTreeMap::new();

        for table in schema.insert_order() {
            let Some(refinement) = plan.tables.get(table.name) else {
                continue;
            };

            info!("Seeding {} {}...", refinement.count, table.name);

            let generator = RowGenerator::new(table, &refinement.columns);
            let mut rows = Vec::new();
            for _ in 0..refinement.count {
                let fixed = self.pick_parents(table, None, &inserted, &mut rng)?;
                rows.push(generator.generate(&fixed, &mut rng));
            }

            self.insert_rows(table, &rows).await?;
            summary.record(table.name, rows.len());
            info!("Seeded {} {}", rows.len(), table.name);

            for (relation_name, &per_parent) in &refinement.with {
                let relation =
                    table
                        .relation(relation_name)
                        .ok_or_else(|| SeedError::UnknownRelation {
                            table: table.name.to_string(),
                            relation: relation_name.clone(),
                        })?;
                let child = schema
                    .table(relation.table)
                    .ok_or_else(|| SeedError::UnknownTable(relation.table.to_string()))?;
                let child_columns = plan
                    .tables
                    .get(child.name)
                    .map(|r| &r.columns)
                    .unwrap_or(&no_columns);
                let child_generator = RowGenerator::new(child, child_columns);

                let mut children = Vec::new();
                if per_parent > 0 {
                    for parent in &rows {
                        let key = parent.get(relation.references).cloned().ok_or_else(|| {
                            SeedError::UnknownColumn {
                                table: table.name.to_string(),
                                column: relation.references.to_string(),
                            }
                        })?;

                        let mut fixed = self.pick_parents(
                            child,
                            Some(relation.foreign_key),
                            &inserted,
                            &mut rng,
                        )?;
                        fixed.push((relation.foreign_key, key));
                        children.extend(child_generator.generate_batch(
                            per_parent,
                            &fixed,
                            &mut rng,
                        ));
                    }
                }

                self.insert_rows(child, &children).await?;
                summary.record(child.name, children.len());
                info!(
                    "Seeded {} {} ({} per {})",
                    children.len(),
                    child.name,
                    per_parent,
                    table.name
                );

                inserted.entry(child.name).or_default().extend(children);
            }

            inserted.entry(table.name).or_default().extend(rows);
        }

        Ok(summary)
    }

    /// Picks a random already-inserted parent for every foreign key of
    /// `table` except `skip`.
    fn pick_parents(
        &self,
        table: &Table,
        skip: Option<&str>,
        inserted: &HashMap<&'static str, Vec<GeneratedRow>>,
        rng: &mut impl Rng,
    ) -> Result<Vec<(&'static str, Value)>, SeedError> {
        let mut fixed = Vec::new();

        for (parent, relation) in self.db.schema().foreign_keys(table.name) {
            if skip == Some(relation.foreign_key) {
                continue;
            }

            let candidates = inserted
                .get(parent.name)
                .map(Vec::as_slice)
                .unwrap_or_default();
            if candidates.is_empty() {
                return Err(SeedError::MissingParent {
                    table: table.name.to_string(),
                    parent: parent.name.to_string(),
                });
            }

            let row = &candidates[rng.gen_range(0..candidates.len())];
            let key = row
                .get(relation.references)
                .cloned()
                .ok_or_else(|| SeedError::UnknownColumn {
                    table: parent.name.to_string(),
                    column: relation.references.to_string(),
                })?;
            fixed.push((relation.foreign_key, key));
        }

        Ok(fixed)
    }

    /// Inserts rows with multi-row `INSERT` statements.
    async fn insert_rows(&self, table: &Table, rows: &[GeneratedRow]) -> Result<(), SeedError> {
        if rows.is_empty() {
            return Ok(());
        }

        let columns = table
            .columns
            .iter()
            .map(|c| quote_ident(c.name))
            .collect::<Vec<_>>()
            .join(", ");
        let per_statement = self
            .batch_size
            .min(MAX_BIND_PARAMS / table.columns.len().max(1))
            .max(1);

        for chunk in rows.chunks(per_statement) {
            debug!("Inserting {} rows into {}", chunk.len(), table.name);

            let mut builder: QueryBuilder<Postgres> =
                QueryBuilder::new(format!("INSERT INTO {} ({columns}) ", quote_ident(table.name)));
            builder.push_values(chunk, |mut b, row| {
                for (_, value) in &row.values {
                    match value {
                        Value::Uuid(id) => {
                            b.push_bind(*id);
                        }
                        Value::Text(text) => {
                            b.push_bind(text.clone());
                        }
                        Value::Timestamp(at) => {
                            b.push_bind(*at);
                        }
                    }
                }
            });
            builder.build().execute(self.db.pool()).await?;
        }

        Ok(())
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
