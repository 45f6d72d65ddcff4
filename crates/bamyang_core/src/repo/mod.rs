//! Domain-facing repository contracts and their SQLite adapters.
//!
//! # Responsibility
//! - Expose one repository trait per aggregate, in domain terms.
//! - Compose a record store and a mapper into each SQLite adapter.
//!
//! # Invariants
//! - Point lookups by key fail with [`RepoError::NotFound`] when no row
//!   matches; list lookups return an empty `Vec` instead.
//! - Storage failures pass through as [`RepoError::Db`] untranslated; nothing
//!   here retries.

use crate::db::DbError;
use crate::model::experience::ExperienceValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod experience_repo;
pub mod strong_point_repo;
pub mod tag_repo;
pub mod user_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Aggregate kind named by [`RepoError::NotFound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Experience,
    StrongPoint,
    Tag,
    User,
}

impl Display for Entity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Experience => "experience",
            Self::StrongPoint => "strong point",
            Self::Tag => "tag",
            Self::User => "user",
        })
    }
}

/// Errors from stores, mappers and repository adapters.
#[derive(Debug)]
pub enum RepoError {
    /// Aggregate failed its write-time rules.
    Validation(ExperienceValidationError),
    /// Underlying SQLite/bootstrap error, passed through as-is.
    Db(DbError),
    /// Single-row lookup by key matched nothing.
    NotFound { entity: Entity, id: Uuid },
    /// Persisted data cannot be converted to a valid record or aggregate.
    InvalidData(String),
    /// Caller input cannot be turned into a query.
    InvalidArgument(String),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl RepoError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::InvalidArgument(message) => write!(f, "invalid argument: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "repository requires column `{column}` in table `{table}`"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ExperienceValidationError> for RepoError {
    fn from(value: ExperienceValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
