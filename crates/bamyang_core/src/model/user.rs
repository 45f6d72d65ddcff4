//! User aggregate, persisted so other slices can check ownership.
//!
//! # Invariants
//! - `(provider, social_id)` identifies one user.
//! - `created_at` is fixed at creation.

use crate::model::timestamp;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type UserId = Uuid;

/// Social login provider that issued `social_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SocialLoginProvider {
    Kakao,
    Google,
}

impl SocialLoginProvider {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Kakao => "kakao",
            Self::Google => "google",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "kakao" => Some(Self::Kakao),
            "google" => Some(Self::Google),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: UserId,
    pub social_id: String,
    pub provider: SocialLoginProvider,
    pub profile_img_url: String,
    pub nick_name: String,
    pub job_search_status: Option<String>,
    pub desired_job: Option<String>,
    pub goal: Option<String>,
    pub dream: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl User {
    /// Creates a freshly signed-up user with only the required profile fields.
    pub fn create(
        social_id: impl Into<String>,
        provider: SocialLoginProvider,
        profile_img_url: impl Into<String>,
        nick_name: impl Into<String>,
    ) -> Self {
        let now = timestamp::now();
        Self {
            user_id: Uuid::new_v4(),
            social_id: social_id.into(),
            provider,
            profile_img_url: profile_img_url.into(),
            nick_name: nick_name.into(),
            job_search_status: None,
            desired_job: None,
            goal: None,
            dream: None,
            created_at: now,
            updated_at: now,
        }
    }
}
