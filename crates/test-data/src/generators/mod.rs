//! Value and row generators for seeding.
//!
//! - [`ColumnGenerator`]: produce a fake value for a single column
//! - [`RowGenerator`]: assemble full rows for a table from its column generators

pub mod column;
pub mod row;

pub use column::ColumnGenerator;
pub use row::{GeneratedRow, RowGenerator, Value};
