//! Tag use-case service.
//!
//! # Responsibility
//! - Create parent (root) and child tags with the per-level unique-name rule.
//! - List and delete tags.
//!
//! # Invariants
//! - Names are trimmed; blank names are rejected.
//! - Among one user's tags sharing a parent (or sharing the root level),
//!   names are unique.
//! - A child tag's parent must exist and belong to the same user.
//! - Cycle detection is out of scope: a tag is only ever created under an
//!   already-existing parent, and nothing here re-parents tags.

use crate::model::tag::{Tag, TagId};
use crate::model::user::UserId;
use crate::repo::tag_repo::TagRepository;
use crate::repo::{Entity, RepoError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum TagServiceError {
    /// Tag name is blank after trim.
    InvalidTagName,
    /// A sibling tag with the same name already exists.
    DuplicatedTagName,
    /// Referenced parent tag does not exist for this user.
    ParentTagNotFound(TagId),
    /// Target tag does not exist.
    TagNotFound(TagId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for TagServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTagName => write!(f, "tag name must not be blank"),
            Self::DuplicatedTagName => write!(f, "tag name already exists at this level"),
            Self::ParentTagNotFound(id) => write!(f, "parent tag not found: {id}"),
            Self::TagNotFound(id) => write!(f, "tag not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TagServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for TagServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound {
                entity: Entity::Tag,
                id,
            } => Self::TagNotFound(id),
            other => Self::Repo(other),
        }
    }
}

pub type TagServiceResult<T> = Result<T, TagServiceError>;

pub struct TagService<R: TagRepository> {
    repo: R,
}

impl<R: TagRepository> TagService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a tag under `parent_tag_id`, or at the root level when `None`.
    pub fn create_tag(
        &self,
        user_id: UserId,
        parent_tag_id: Option<TagId>,
        name: &str,
    ) -> TagServiceResult<TagId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TagServiceError::InvalidTagName);
        }

        if let Some(parent_id) = parent_tag_id {
            let parent = self
                .repo
                .find_by_tag_id(parent_id)
                .map_err(|err| match err {
                    RepoError::NotFound { .. } => TagServiceError::ParentTagNotFound(parent_id),
                    other => TagServiceError::Repo(other),
                })?;
            if parent.user_id != user_id {
                return Err(TagServiceError::ParentTagNotFound(parent_id));
            }
        }

        if self
            .repo
            .exists_by_user_id_and_parent_and_name(user_id, parent_tag_id, name)?
        {
            return Err(TagServiceError::DuplicatedTagName);
        }

        let tag = match parent_tag_id {
            Some(parent_id) => Tag::child(name, parent_id, user_id),
            None => Tag::parent(name, user_id),
        };
        let tag_id = self.repo.save(&tag)?;
        info!(
            "event=tag_create module=service status=ok level={}",
            if tag.is_parent() { "parent" } else { "child" }
        );
        Ok(tag_id)
    }

    pub fn get_tag(&self, tag_id: TagId) -> TagServiceResult<Tag> {
        Ok(self.repo.find_by_tag_id(tag_id)?)
    }

    pub fn list_parent_tags(&self, user_id: UserId) -> TagServiceResult<Vec<Tag>> {
        Ok(self.repo.find_all_parent_tags_by_user_id(user_id)?)
    }

    pub fn list_child_tags(&self, parent_tag_id: TagId) -> TagServiceResult<Vec<Tag>> {
        Ok(self.repo.find_all_child_tags(parent_tag_id)?)
    }

    /// Deletes one tag (parent or child). Child tags of a deleted parent are
    /// left in place.
    pub fn delete_tag(&self, tag_id: TagId) -> TagServiceResult<()> {
        self.repo.delete_by_tag_id(tag_id)?;
        info!("event=tag_delete module=service status=ok");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::TagServiceError;
    use crate::repo::{Entity, RepoError};
    use uuid::Uuid;

    #[test]
    fn tag_not_found_is_typed_and_renders_entity_name() {
        let id = Uuid::new_v4();
        let err = RepoError::NotFound {
            entity: Entity::Tag,
            id,
        };
        assert_eq!(err.to_string(), format!("tag not found: {id}"));
        assert!(matches!(TagServiceError::from(err), TagServiceError::TagNotFound(found) if found == id));

        let user_missing = TagServiceError::from(RepoError::NotFound {
            entity: Entity::User,
            id,
        });
        assert!(matches!(user_missing, TagServiceError::Repo(_)));
    }
}
