//! Pure aggregate <-> record translation.
//!
//! # Invariants
//! - Mappers have no side effects and run no business validation.
//! - `to_record(x)` followed by `to_domain` yields a value equal to `x`.
//! - Record -> aggregate fails only on data the aggregate cannot hold
//!   (out-of-range timestamps, unknown enum text).

pub mod experience_mapper;
pub mod strong_point_mapper;
pub mod tag_mapper;
pub mod user_mapper;

use crate::model::timestamp;
use crate::repo::{RepoError, RepoResult};
use chrono::NaiveDateTime;

pub(crate) fn timestamp_from_record(millis: i64, column: &'static str) -> RepoResult<NaiveDateTime> {
    timestamp::from_epoch_ms(millis).ok_or_else(|| {
        RepoError::InvalidData(format!("timestamp `{millis}` out of range in {column}"))
    })
}
