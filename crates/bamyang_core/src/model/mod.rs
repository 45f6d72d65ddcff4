//! Domain aggregates persisted by the storage core.
//!
//! # Responsibility
//! - Define the in-memory shapes callers work with.
//! - Keep storage concerns (column encodings, epoch-ms timestamps) out.
//!
//! # Invariants
//! - Every aggregate is identified by a UUID that never changes once set.

pub mod experience;
pub mod strong_point;
pub mod tag;
pub mod timestamp;
pub mod user;
