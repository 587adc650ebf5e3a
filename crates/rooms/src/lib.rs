//! Data model for the agents rooms database.
//!
//! [`models`] holds the row types read back from Postgres, and [`schema`]
//! describes the tables, columns, and relations that tooling such as the
//! seeder operates on.

pub mod models;
pub mod schema;

pub use schema::{Column, ColumnKind, Relation, Schema, Table, schema};
