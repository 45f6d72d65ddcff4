//! StrongPoint aggregate: a named competency keyword owned by one user.
//!
//! # Invariants
//! - `strong_point_id` is `None` until the storage layer assigns one.
//! - Once assigned, the id is stable across re-saves.

use crate::model::user::UserId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type StrongPointId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrongPoint {
    /// Assigned on first save when absent.
    pub strong_point_id: Option<StrongPointId>,
    pub name: String,
    pub user_id: UserId,
}

impl StrongPoint {
    /// Creates an unsaved strong point without an id.
    pub fn new(name: impl Into<String>, user_id: UserId) -> Self {
        Self {
            strong_point_id: None,
            name: name.into(),
            user_id,
        }
    }

    /// Returns a copy carrying the storage-assigned id.
    pub fn with_id(mut self, strong_point_id: StrongPointId) -> Self {
        self.strong_point_id = Some(strong_point_id);
        self
    }
}
