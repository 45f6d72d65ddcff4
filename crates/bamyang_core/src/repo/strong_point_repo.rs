//! StrongPoint repository contract and SQLite adapter.
//!
//! # Invariants
//! - `save` returns the id the row is stored under: the aggregate's own id
//!   when present, otherwise the one the store generated.

use crate::mapper::strong_point_mapper;
use crate::model::strong_point::{StrongPoint, StrongPointId};
use crate::model::user::UserId;
use crate::repo::{Entity, RepoError, RepoResult};
use crate::store::strong_point_store::StrongPointStore;
use rusqlite::Connection;

pub trait StrongPointRepository {
    fn save(&self, strong_point: &StrongPoint) -> RepoResult<StrongPointId>;
    fn find_by_strong_point_id(&self, strong_point_id: StrongPointId) -> RepoResult<StrongPoint>;
    /// Order is unspecified.
    fn find_all_by_user_id(&self, user_id: UserId) -> RepoResult<Vec<StrongPoint>>;
}

pub struct SqliteStrongPointRepository<'conn> {
    store: StrongPointStore<'conn>,
}

impl<'conn> SqliteStrongPointRepository<'conn> {
    pub fn new(store: StrongPointStore<'conn>) -> Self {
        Self { store }
    }

    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        Ok(Self::new(StrongPointStore::try_new(conn)?))
    }
}

impl StrongPointRepository for SqliteStrongPointRepository<'_> {
    fn save(&self, strong_point: &StrongPoint) -> RepoResult<StrongPointId> {
        self.store
            .save(&strong_point_mapper::to_record(strong_point))
    }

    fn find_by_strong_point_id(&self, strong_point_id: StrongPointId) -> RepoResult<StrongPoint> {
        self.store
            .find_by_id(strong_point_id)?
            .map(strong_point_mapper::to_domain)
            .ok_or(RepoError::NotFound {
                entity: Entity::StrongPoint,
                id: strong_point_id,
            })
    }

    fn find_all_by_user_id(&self, user_id: UserId) -> RepoResult<Vec<StrongPoint>> {
        Ok(self
            .store
            .find_all_by_user_id(user_id)?
            .into_iter()
            .map(strong_point_mapper::to_domain)
            .collect())
    }
}
