//! Tag repository contract and SQLite adapter.
//!
//! # Invariants
//! - Parent references are persisted as given. Nothing here checks that a
//!   parent exists, belongs to the same user, or that the tree is acyclic.

use crate::mapper::tag_mapper;
use crate::model::tag::{Tag, TagId};
use crate::model::user::UserId;
use crate::repo::{Entity, RepoError, RepoResult};
use crate::store::tag_store::TagStore;
use rusqlite::Connection;

pub trait TagRepository {
    /// Upserts by `tag_id` and returns it.
    fn save(&self, tag: &Tag) -> RepoResult<TagId>;
    fn find_by_tag_id(&self, tag_id: TagId) -> RepoResult<Tag>;
    fn find_all_by_user_id(&self, user_id: UserId) -> RepoResult<Vec<Tag>>;
    fn find_all_parent_tags_by_user_id(&self, user_id: UserId) -> RepoResult<Vec<Tag>>;
    fn find_all_child_tags(&self, parent_tag_id: TagId) -> RepoResult<Vec<Tag>>;
    fn exists_by_user_id_and_parent_and_name(
        &self,
        user_id: UserId,
        parent_tag_id: Option<TagId>,
        name: &str,
    ) -> RepoResult<bool>;
    /// Removes only this tag; unknown ids are ignored.
    fn delete_by_tag_id(&self, tag_id: TagId) -> RepoResult<()>;
}

pub struct SqliteTagRepository<'conn> {
    store: TagStore<'conn>,
}

impl<'conn> SqliteTagRepository<'conn> {
    pub fn new(store: TagStore<'conn>) -> Self {
        Self { store }
    }

    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        Ok(Self::new(TagStore::try_new(conn)?))
    }
}

impl TagRepository for SqliteTagRepository<'_> {
    fn save(&self, tag: &Tag) -> RepoResult<TagId> {
        self.store.save(&tag_mapper::to_record(tag))?;
        Ok(tag.tag_id)
    }

    fn find_by_tag_id(&self, tag_id: TagId) -> RepoResult<Tag> {
        self.store
            .find_by_id(tag_id)?
            .map(tag_mapper::to_domain)
            .ok_or(RepoError::NotFound {
                entity: Entity::Tag,
                id: tag_id,
            })
    }

    fn find_all_by_user_id(&self, user_id: UserId) -> RepoResult<Vec<Tag>> {
        Ok(self
            .store
            .find_all_by_user_id(user_id)?
            .into_iter()
            .map(tag_mapper::to_domain)
            .collect())
    }

    fn find_all_parent_tags_by_user_id(&self, user_id: UserId) -> RepoResult<Vec<Tag>> {
        Ok(self
            .store
            .find_all_by_user_id_and_parent_tag_id_is_null(user_id)?
            .into_iter()
            .map(tag_mapper::to_domain)
            .collect())
    }

    fn find_all_child_tags(&self, parent_tag_id: TagId) -> RepoResult<Vec<Tag>> {
        Ok(self
            .store
            .find_all_by_parent_tag_id(parent_tag_id)?
            .into_iter()
            .map(tag_mapper::to_domain)
            .collect())
    }

    fn exists_by_user_id_and_parent_and_name(
        &self,
        user_id: UserId,
        parent_tag_id: Option<TagId>,
        name: &str,
    ) -> RepoResult<bool> {
        self.store
            .exists_by_user_id_and_parent_tag_id_and_name(user_id, parent_tag_id, name)
    }

    fn delete_by_tag_id(&self, tag_id: TagId) -> RepoResult<()> {
        self.store.delete_by_id(tag_id)
    }
}
