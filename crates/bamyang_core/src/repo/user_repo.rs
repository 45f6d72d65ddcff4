//! User repository contract, the narrower `UserLookup` port, and the SQLite
//! adapter implementing both.

use crate::mapper::user_mapper;
use crate::model::user::{SocialLoginProvider, User, UserId};
use crate::repo::{Entity, RepoError, RepoResult};
use crate::store::user_store::UserStore;
use rusqlite::Connection;

/// Existence check used by other slices before associating rows to a user.
pub trait UserLookup {
    fn exists_by_user_id(&self, user_id: UserId) -> RepoResult<bool>;
}

pub trait UserRepository: UserLookup {
    fn save(&self, user: &User) -> RepoResult<()>;
    fn find_by_user_id(&self, user_id: UserId) -> RepoResult<User>;
    fn find_by_social_id(
        &self,
        provider: SocialLoginProvider,
        social_id: &str,
    ) -> RepoResult<Option<User>>;
}

pub struct SqliteUserRepository<'conn> {
    store: UserStore<'conn>,
}

impl<'conn> SqliteUserRepository<'conn> {
    pub fn new(store: UserStore<'conn>) -> Self {
        Self { store }
    }

    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        Ok(Self::new(UserStore::try_new(conn)?))
    }
}

impl UserLookup for SqliteUserRepository<'_> {
    fn exists_by_user_id(&self, user_id: UserId) -> RepoResult<bool> {
        self.store.exists_by_id(user_id)
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn save(&self, user: &User) -> RepoResult<()> {
        self.store.save(&user_mapper::to_record(user))
    }

    fn find_by_user_id(&self, user_id: UserId) -> RepoResult<User> {
        let record = self.store.find_by_id(user_id)?.ok_or(RepoError::NotFound {
            entity: Entity::User,
            id: user_id,
        })?;
        user_mapper::to_domain(record)
    }

    fn find_by_social_id(
        &self,
        provider: SocialLoginProvider,
        social_id: &str,
    ) -> RepoResult<Option<User>> {
        self.store
            .find_by_provider_and_social_id(provider.as_str(), social_id)?
            .map(user_mapper::to_domain)
            .transpose()
    }
}
