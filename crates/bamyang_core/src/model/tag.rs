//! Tag aggregate.
//!
//! # Responsibility
//! - Model a user's two-level tag tree: parent tags with `parent_tag_id =
//!   None`, child tags pointing at their parent.
//!
//! # Invariants
//! - `tag_id` is stable for the tag lifetime.
//! - `parent_tag_id` should reference a tag of the same user. This is not
//!   checked by storage; orphaned or cyclic references are possible.

use crate::model::user::UserId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type TagId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub tag_id: TagId,
    pub name: String,
    pub parent_tag_id: Option<TagId>,
    pub user_id: UserId,
}

impl Tag {
    /// Creates a root-level (parent) tag.
    pub fn parent(name: impl Into<String>, user_id: UserId) -> Self {
        Self {
            tag_id: Uuid::new_v4(),
            name: name.into(),
            parent_tag_id: None,
            user_id,
        }
    }

    /// Creates a tag nested under `parent_tag_id`.
    pub fn child(name: impl Into<String>, parent_tag_id: TagId, user_id: UserId) -> Self {
        Self {
            tag_id: Uuid::new_v4(),
            name: name.into(),
            parent_tag_id: Some(parent_tag_id),
            user_id,
        }
    }

    pub fn is_parent(&self) -> bool {
        self.parent_tag_id.is_none()
    }
}
