//! Record schemas and record-level SQLite data access.
//!
//! # Responsibility
//! - Define one flat record type per table group.
//! - Hold all SQL: upserts, deletes, and the derived finder queries.
//!
//! # Invariants
//! - Stores are constructed only over migrated connections.
//! - Saves are upserts keyed by the primary key.
//! - Stores know nothing about aggregates; mapping happens in `mapper`.

pub mod experience_store;
pub(crate) mod schema;
pub mod strong_point_store;
pub mod tag_store;
pub mod user_store;
