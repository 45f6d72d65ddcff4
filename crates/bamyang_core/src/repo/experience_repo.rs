//! Experience repository contract and SQLite adapter.
//!
//! # Responsibility
//! - Expose experience persistence in domain terms.
//! - Translate the year filters into a created-at range on the store.
//! - Report which years hold experiences, by `started_at`.
//!
//! # Invariants
//! - Write paths call `Experience::validate()` before touching storage.
//! - The year range is `[YYYY-01-01 00:00:00, YYYY-12-31 23:59:00]`, inclusive
//!   at both ends. The upper bound stops at 23:59:00; rows created during
//!   the last minute of the year are not included.

use crate::mapper::{experience_mapper, timestamp_from_record};
use crate::model::experience::{Experience, ExperienceId};
use crate::model::tag::TagId;
use crate::model::timestamp;
use crate::model::user::UserId;
use crate::repo::{Entity, RepoError, RepoResult};
use crate::store::experience_store::{ExperienceRecord, ExperienceStore};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rusqlite::Connection;
use std::collections::BTreeSet;

pub trait ExperienceRepository {
    /// Upserts by `experience_id`.
    fn save(&self, experience: &Experience) -> RepoResult<()>;
    /// Deletes by key; deleting an unknown id succeeds.
    fn delete_by_experience_id(&self, experience_id: ExperienceId) -> RepoResult<()>;
    /// Fails with `RepoError::NotFound` when no row matches.
    fn find_by_experience_id(&self, experience_id: ExperienceId) -> RepoResult<Experience>;
    /// Order is unspecified.
    fn find_all_by_user_id(&self, user_id: UserId) -> RepoResult<Vec<Experience>>;
    /// Experiences created within `year`, newest first.
    fn find_by_user_id_and_year_desc(&self, year: i32, user_id: UserId)
        -> RepoResult<Vec<Experience>>;
    /// Year filter narrowed to experiences filed under `parent_tag_id`.
    fn find_by_user_id_and_year_and_parent_tag_id_desc(
        &self,
        year: i32,
        user_id: UserId,
        parent_tag_id: TagId,
    ) -> RepoResult<Vec<Experience>>;
    /// Year filter narrowed to experiences filed under `child_tag_id`.
    fn find_by_user_id_and_year_and_child_tag_id_desc(
        &self,
        year: i32,
        user_id: UserId,
        child_tag_id: TagId,
    ) -> RepoResult<Vec<Experience>>;
    /// Distinct years of `started_at` across the user's experiences, ascending.
    fn find_distinct_years_by_user_id(&self, user_id: UserId) -> RepoResult<Vec<i32>>;
}

pub struct SqliteExperienceRepository<'conn> {
    store: ExperienceStore<'conn>,
}

impl<'conn> SqliteExperienceRepository<'conn> {
    pub fn new(store: ExperienceStore<'conn>) -> Self {
        Self { store }
    }

    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        Ok(Self::new(ExperienceStore::try_new(conn)?))
    }
}

impl ExperienceRepository for SqliteExperienceRepository<'_> {
    fn save(&self, experience: &Experience) -> RepoResult<()> {
        experience.validate()?;
        self.store.save(&experience_mapper::to_record(experience))
    }

    fn delete_by_experience_id(&self, experience_id: ExperienceId) -> RepoResult<()> {
        self.store.delete_by_id(experience_id)
    }

    fn find_by_experience_id(&self, experience_id: ExperienceId) -> RepoResult<Experience> {
        let record = self
            .store
            .find_by_id(experience_id)?
            .ok_or(RepoError::NotFound {
                entity: Entity::Experience,
                id: experience_id,
            })?;
        experience_mapper::to_domain(record)
    }

    fn find_all_by_user_id(&self, user_id: UserId) -> RepoResult<Vec<Experience>> {
        to_domain_all(self.store.find_all_by_user_id(user_id)?)
    }

    fn find_by_user_id_and_year_desc(
        &self,
        year: i32,
        user_id: UserId,
    ) -> RepoResult<Vec<Experience>> {
        let (start, end) = year_range_ms(year)?;
        to_domain_all(
            self.store
                .find_by_user_id_and_created_at_between_order_by_created_at_desc(
                    user_id, start, end,
                )?,
        )
    }

    fn find_by_user_id_and_year_and_parent_tag_id_desc(
        &self,
        year: i32,
        user_id: UserId,
        parent_tag_id: TagId,
    ) -> RepoResult<Vec<Experience>> {
        let (start, end) = year_range_ms(year)?;
        to_domain_all(
            self.store
                .find_by_user_id_and_parent_tag_id_and_created_at_between_order_by_created_at_desc(
                    user_id,
                    parent_tag_id,
                    start,
                    end,
                )?,
        )
    }

    fn find_by_user_id_and_year_and_child_tag_id_desc(
        &self,
        year: i32,
        user_id: UserId,
        child_tag_id: TagId,
    ) -> RepoResult<Vec<Experience>> {
        let (start, end) = year_range_ms(year)?;
        to_domain_all(
            self.store
                .find_by_user_id_and_child_tag_id_and_created_at_between_order_by_created_at_desc(
                    user_id,
                    child_tag_id,
                    start,
                    end,
                )?,
        )
    }

    fn find_distinct_years_by_user_id(&self, user_id: UserId) -> RepoResult<Vec<i32>> {
        let mut years = BTreeSet::new();
        for millis in self.store.find_started_at_by_user_id(user_id)? {
            let started_at = timestamp_from_record(millis, "experience.started_at")?;
            years.insert(started_at.year());
        }
        Ok(years.into_iter().collect())
    }
}

fn to_domain_all(records: Vec<ExperienceRecord>) -> RepoResult<Vec<Experience>> {
    records.into_iter().map(experience_mapper::to_domain).collect()
}

fn year_range_ms(year: i32) -> RepoResult<(i64, i64)> {
    let (start, end) = year_bounds(year)?;
    Ok((timestamp::to_epoch_ms(start), timestamp::to_epoch_ms(end)))
}

/// First and last instants (inclusive) matched by the year filter.
pub fn year_bounds(year: i32) -> RepoResult<(NaiveDateTime, NaiveDateTime)> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1).and_then(|day| day.and_hms_opt(0, 0, 0));
    let end = NaiveDate::from_ymd_opt(year, 12, 31).and_then(|day| day.and_hms_opt(23, 59, 0));
    match (start, end) {
        (Some(start), Some(end)) => Ok((start, end)),
        _ => Err(RepoError::InvalidArgument(format!(
            "year {year} is out of supported range"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::year_bounds;
    use crate::repo::RepoError;

    #[test]
    fn year_bounds_stop_at_23_59_00() {
        let (start, end) = year_bounds(2024).unwrap();
        assert_eq!(start.to_string(), "2024-01-01 00:00:00");
        assert_eq!(end.to_string(), "2024-12-31 23:59:00");
    }

    #[test]
    fn unrepresentable_year_is_invalid_argument() {
        let err = year_bounds(i32::MAX).unwrap_err();
        assert!(matches!(err, RepoError::InvalidArgument(_)));
    }
}
