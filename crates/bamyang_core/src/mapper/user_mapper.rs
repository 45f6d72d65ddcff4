use super::timestamp_from_record;
use crate::model::timestamp::to_epoch_ms;
use crate::model::user::{SocialLoginProvider, User};
use crate::repo::{RepoError, RepoResult};
use crate::store::user_store::UserRecord;

pub fn to_record(user: &User) -> UserRecord {
    UserRecord {
        user_id: user.user_id,
        social_id: user.social_id.clone(),
        provider: user.provider.as_str().to_string(),
        profile_img_url: user.profile_img_url.clone(),
        nick_name: user.nick_name.clone(),
        job_search_status: user.job_search_status.clone(),
        desired_job: user.desired_job.clone(),
        goal: user.goal.clone(),
        dream: user.dream.clone(),
        created_at: to_epoch_ms(user.created_at),
        updated_at: to_epoch_ms(user.updated_at),
    }
}

pub fn to_domain(record: UserRecord) -> RepoResult<User> {
    let provider = SocialLoginProvider::parse(&record.provider).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid provider `{}` in users.provider",
            record.provider
        ))
    })?;

    Ok(User {
        user_id: record.user_id,
        social_id: record.social_id,
        provider,
        profile_img_url: record.profile_img_url,
        nick_name: record.nick_name,
        job_search_status: record.job_search_status,
        desired_job: record.desired_job,
        goal: record.goal,
        dream: record.dream,
        created_at: timestamp_from_record(record.created_at, "users.created_at")?,
        updated_at: timestamp_from_record(record.updated_at, "users.updated_at")?,
    })
}
