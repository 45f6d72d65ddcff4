//! Experience use-case service.
//!
//! # Responsibility
//! - Create, edit, read, delete and list experiences for one user, by year
//!   and optionally by tag.
//! - Check that the owning user exists before creating rows for it.
//!
//! # Invariants
//! - Edits keep `experience_id`, `user_id` and `created_at`.
//! - Service layer remains storage-agnostic.

use crate::model::experience::{
    Experience, ExperienceDraft, ExperienceId, ExperienceValidationError,
};
use crate::model::tag::TagId;
use crate::model::user::UserId;
use crate::repo::experience_repo::ExperienceRepository;
use crate::repo::user_repo::UserLookup;
use crate::repo::{Entity, RepoError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum ExperienceServiceError {
    /// Draft violates experience write rules.
    Validation(ExperienceValidationError),
    /// Owning user does not exist.
    UserNotFound(UserId),
    /// Target experience does not exist.
    ExperienceNotFound(ExperienceId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ExperienceServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::UserNotFound(id) => write!(f, "user not found: {id}"),
            Self::ExperienceNotFound(id) => write!(f, "experience not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ExperienceServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ExperienceValidationError> for ExperienceServiceError {
    fn from(value: ExperienceValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ExperienceServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound {
                entity: Entity::Experience,
                id,
            } => Self::ExperienceNotFound(id),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

pub type ExperienceServiceResult<T> = Result<T, ExperienceServiceError>;

pub struct ExperienceService<R: ExperienceRepository, U: UserLookup> {
    repo: R,
    users: U,
}

impl<R: ExperienceRepository, U: UserLookup> ExperienceService<R, U> {
    pub fn new(repo: R, users: U) -> Self {
        Self { repo, users }
    }

    /// Creates one experience for an existing user and returns its id.
    pub fn create_experience(
        &self,
        user_id: UserId,
        draft: ExperienceDraft,
    ) -> ExperienceServiceResult<ExperienceId> {
        if !self.users.exists_by_user_id(user_id)? {
            return Err(ExperienceServiceError::UserNotFound(user_id));
        }

        let experience = Experience::create(user_id, draft)?;
        self.repo.save(&experience)?;
        info!(
            "event=experience_create module=service status=ok contents={} strong_points={}",
            experience.contents.len(),
            experience.strong_point_ids.len()
        );
        Ok(experience.experience_id)
    }

    /// Replaces editable fields of an existing experience.
    pub fn edit_experience(
        &self,
        experience_id: ExperienceId,
        draft: ExperienceDraft,
    ) -> ExperienceServiceResult<Experience> {
        let current = self.repo.find_by_experience_id(experience_id)?;
        let edited = current.edit(draft)?;
        self.repo.save(&edited)?;
        info!("event=experience_edit module=service status=ok");
        Ok(edited)
    }

    pub fn get_experience(&self, experience_id: ExperienceId) -> ExperienceServiceResult<Experience> {
        Ok(self.repo.find_by_experience_id(experience_id)?)
    }

    /// Deletes one experience. Unknown ids are not an error.
    pub fn delete_experience(&self, experience_id: ExperienceId) -> ExperienceServiceResult<()> {
        self.repo.delete_by_experience_id(experience_id)?;
        info!("event=experience_delete module=service status=ok");
        Ok(())
    }

    pub fn list_experiences(&self, user_id: UserId) -> ExperienceServiceResult<Vec<Experience>> {
        Ok(self.repo.find_all_by_user_id(user_id)?)
    }

    /// Experiences created in `year`, newest first.
    pub fn list_experiences_by_year(
        &self,
        user_id: UserId,
        year: i32,
    ) -> ExperienceServiceResult<Vec<Experience>> {
        Ok(self.repo.find_by_user_id_and_year_desc(year, user_id)?)
    }

    /// Experiences created in `year` and filed under `parent_tag_id`, newest first.
    pub fn list_experiences_by_year_and_parent_tag(
        &self,
        user_id: UserId,
        year: i32,
        parent_tag_id: TagId,
    ) -> ExperienceServiceResult<Vec<Experience>> {
        Ok(self
            .repo
            .find_by_user_id_and_year_and_parent_tag_id_desc(year, user_id, parent_tag_id)?)
    }

    /// Experiences created in `year` and filed under `child_tag_id`, newest first.
    pub fn list_experiences_by_year_and_child_tag(
        &self,
        user_id: UserId,
        year: i32,
        child_tag_id: TagId,
    ) -> ExperienceServiceResult<Vec<Experience>> {
        Ok(self
            .repo
            .find_by_user_id_and_year_and_child_tag_id_desc(year, user_id, child_tag_id)?)
    }

    /// Years in which the user started at least one experience, ascending.
    pub fn list_experience_years(&self, user_id: UserId) -> ExperienceServiceResult<Vec<i32>> {
        Ok(self.repo.find_distinct_years_by_user_id(user_id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::ExperienceServiceError;
    use crate::repo::{Entity, RepoError};
    use uuid::Uuid;

    #[test]
    fn only_experience_not_found_maps_to_experience_not_found() {
        let id = Uuid::new_v4();
        let mapped = ExperienceServiceError::from(RepoError::NotFound {
            entity: Entity::Experience,
            id,
        });
        assert!(matches!(mapped, ExperienceServiceError::ExperienceNotFound(found) if found == id));

        let other = ExperienceServiceError::from(RepoError::NotFound {
            entity: Entity::Tag,
            id,
        });
        assert!(matches!(
            other,
            ExperienceServiceError::Repo(RepoError::NotFound {
                entity: Entity::Tag,
                ..
            })
        ));
    }
}
