//! StrongPoint use-case service.

use crate::model::strong_point::{StrongPoint, StrongPointId};
use crate::model::user::UserId;
use crate::repo::strong_point_repo::StrongPointRepository;
use crate::repo::RepoResult;
use log::info;

pub struct StrongPointService<R: StrongPointRepository> {
    repo: R,
}

impl<R: StrongPointRepository> StrongPointService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a new strong point and returns the storage-assigned id.
    pub fn create_strong_point(
        &self,
        user_id: UserId,
        name: impl Into<String>,
    ) -> RepoResult<StrongPointId> {
        let id = self.repo.save(&StrongPoint::new(name, user_id))?;
        info!("event=strong_point_create module=service status=ok");
        Ok(id)
    }

    pub fn list_strong_points(&self, user_id: UserId) -> RepoResult<Vec<StrongPoint>> {
        self.repo.find_all_by_user_id(user_id)
    }
}
