//! Storage core for experiences, strong points and tags.
//!
//! Each aggregate is persisted through the same four layers: a flat record
//! (`store`), record-level SQL (`store`), pure mapping (`mapper`) and a
//! domain-facing repository adapter (`repo`).

pub mod config;
pub mod db;
pub mod logging;
pub mod mapper;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use config::{ConfigError, StoreConfig};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::experience::{
    Experience, ExperienceContent, ExperienceDraft, ExperienceId, ExperienceValidationError,
};
pub use model::strong_point::{StrongPoint, StrongPointId};
pub use model::tag::{Tag, TagId};
pub use model::user::{SocialLoginProvider, User, UserId};
pub use repo::experience_repo::{ExperienceRepository, SqliteExperienceRepository};
pub use repo::strong_point_repo::{SqliteStrongPointRepository, StrongPointRepository};
pub use repo::tag_repo::{SqliteTagRepository, TagRepository};
pub use repo::user_repo::{SqliteUserRepository, UserLookup, UserRepository};
pub use repo::{Entity, RepoError, RepoResult};
pub use service::experience_service::{ExperienceService, ExperienceServiceError};
pub use service::strong_point_service::StrongPointService;
pub use service::tag_service::{TagService, TagServiceError};

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
