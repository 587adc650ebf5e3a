//! Row generation for a single table.

use std::collections::BTreeMap;

use rand::Rng;
use rooms::Table;
use time::OffsetDateTime;
use uuid::Uuid;

use super::column::ColumnGenerator;

/// A generated column value ready to be bound into a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Uuid(Uuid),
    Text(String),
    Timestamp(OffsetDateTime),
}

/// Generated row ready for database insertion.
///
/// Values are stored in the table's column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedRow {
    pub table: &'static str,
    pub values: Vec<(&'static str, Value)>,
}

impl GeneratedRow {
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| value)
    }
}

/// Generates rows for one table from the plan's column generators.
pub struct RowGenerator<'a> {
    table: &'a Table,
    columns: &'a BTreeMap<String, ColumnGenerator>,
}

impl<'a> RowGenerator<'a> {
    pub fn new(table: &'a Table, columns: &'a BTreeMap<String, ColumnGenerator>) -> Self {
        Self { table, columns }
    }

    /// Generates a single row. `fixed` values win over any generator, which is
    /// how foreign keys get their parent's key.
    pub fn generate(&self, fixed: &[(&str, Value)], rng: &mut impl Rng) -> GeneratedRow {
        let values = self
            .table
            .columns
            .iter()
            .map(|column| {
                let value = match fixed.iter().find(|(name, _)| *name == column.name) {
                    Some((_, value)) => value.clone(),
                    None => match self.columns.get(column.name) {
                        Some(generator) => generator.generate(rng),
                        None => ColumnGenerator::default_for(column.kind).generate(rng),
                    },
                };
                (column.name, value)
            })
            .collect();

        GeneratedRow {
            table: self.table.name,
            values,
        }
    }

    /// Generates `count` rows sharing the same fixed values.
    pub fn generate_batch(
        &self,
        count: usize,
        fixed: &[(&str, Value)],
        rng: &mut impl Rng,
    ) -> Vec<GeneratedRow> {
        (0..count).map(|_| self.generate(fixed, rng)).collect()
    }
}
