//! Database integration for seeding.
//!
//! [`Database`] carries the connection pool together with the schema it
//! governs. The [`Seeder`] resets those tables and inserts generated rows.

mod database;
mod seeder;

pub use database::Database;
pub use seeder::{SeedError, SeedSummary, Seeder};
