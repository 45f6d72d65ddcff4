//! Experience aggregate.
//!
//! # Responsibility
//! - Hold one user's recorded experience: title, question/answer contents,
//!   linked strong points, tag placement, and the period it covers.
//! - Enforce the write-time limits shared by create and edit flows.
//!
//! # Invariants
//! - `experience_id` never changes after creation.
//! - `created_at` is fixed at creation; edits only move `updated_at`.
//! - `title` is at most [`TITLE_MAX_CHARS`] characters.
//! - At most [`STRONG_POINT_MAX_COUNT`] strong points are linked.
//! - Every timestamp has millisecond precision; `create`/`edit` truncate
//!   draft values and `validate` rejects anything finer.

use crate::model::strong_point::StrongPointId;
use crate::model::tag::TagId;
use crate::model::timestamp;
use crate::model::user::UserId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type ExperienceId = Uuid;

pub const TITLE_MAX_CHARS: usize = 50;
pub const STRONG_POINT_MAX_COUNT: usize = 5;

/// Rule violations raised by [`Experience::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExperienceValidationError {
    TitleTooLong { chars: usize },
    TooManyStrongPoints { count: usize },
    EndedBeforeStarted,
    SubMillisecondTimestamp { field: &'static str },
}

impl Display for ExperienceValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TitleTooLong { chars } => write!(
                f,
                "title is limited to {TITLE_MAX_CHARS} characters, got {chars}"
            ),
            Self::TooManyStrongPoints { count } => write!(
                f,
                "at most {STRONG_POINT_MAX_COUNT} strong points can be linked, got {count}"
            ),
            Self::EndedBeforeStarted => write!(f, "ended_at must not be earlier than started_at"),
            Self::SubMillisecondTimestamp { field } => {
                write!(f, "{field} must not carry sub-millisecond precision")
            }
        }
    }
}

impl Error for ExperienceValidationError {}

/// One question/answer pair inside an experience.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceContent {
    pub question: String,
    pub answer: String,
}

impl ExperienceContent {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub experience_id: ExperienceId,
    pub user_id: UserId,
    pub title: String,
    /// Ordered as entered by the user.
    pub contents: Vec<ExperienceContent>,
    /// Ordered as entered by the user.
    pub strong_point_ids: Vec<StrongPointId>,
    pub parent_tag_id: Option<TagId>,
    pub child_tag_id: Option<TagId>,
    pub started_at: NaiveDateTime,
    pub ended_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Editable experience fields, shared by create and edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceDraft {
    pub title: String,
    pub contents: Vec<ExperienceContent>,
    pub strong_point_ids: Vec<StrongPointId>,
    pub parent_tag_id: Option<TagId>,
    pub child_tag_id: Option<TagId>,
    pub started_at: NaiveDateTime,
    pub ended_at: NaiveDateTime,
}

impl Experience {
    /// Creates a new experience with a generated id and current timestamps.
    ///
    /// Runs [`Experience::validate`] before returning.
    pub fn create(user_id: UserId, draft: ExperienceDraft) -> Result<Self, ExperienceValidationError> {
        let now = timestamp::now();
        let experience = Self {
            experience_id: Uuid::new_v4(),
            user_id,
            title: draft.title,
            contents: draft.contents,
            strong_point_ids: draft.strong_point_ids,
            parent_tag_id: draft.parent_tag_id,
            child_tag_id: draft.child_tag_id,
            started_at: timestamp::truncate_to_millis(draft.started_at),
            ended_at: timestamp::truncate_to_millis(draft.ended_at),
            created_at: now,
            updated_at: now,
        };
        experience.validate()?;
        Ok(experience)
    }

    /// Replaces editable fields, keeping identity, owner and `created_at`.
    pub fn edit(&self, draft: ExperienceDraft) -> Result<Self, ExperienceValidationError> {
        let edited = Self {
            experience_id: self.experience_id,
            user_id: self.user_id,
            title: draft.title,
            contents: draft.contents,
            strong_point_ids: draft.strong_point_ids,
            parent_tag_id: draft.parent_tag_id,
            child_tag_id: draft.child_tag_id,
            started_at: timestamp::truncate_to_millis(draft.started_at),
            ended_at: timestamp::truncate_to_millis(draft.ended_at),
            created_at: self.created_at,
            updated_at: timestamp::now(),
        };
        edited.validate()?;
        Ok(edited)
    }

    pub fn validate(&self) -> Result<(), ExperienceValidationError> {
        let chars = self.title.chars().count();
        if chars > TITLE_MAX_CHARS {
            return Err(ExperienceValidationError::TitleTooLong { chars });
        }

        let count = self.strong_point_ids.len();
        if count > STRONG_POINT_MAX_COUNT {
            return Err(ExperienceValidationError::TooManyStrongPoints { count });
        }

        if self.ended_at < self.started_at {
            return Err(ExperienceValidationError::EndedBeforeStarted);
        }

        for (field, value) in [
            ("started_at", self.started_at),
            ("ended_at", self.ended_at),
            ("created_at", self.created_at),
            ("updated_at", self.updated_at),
        ] {
            if !timestamp::is_millisecond_precise(value) {
                return Err(ExperienceValidationError::SubMillisecondTimestamp { field });
            }
        }

        Ok(())
    }
}
