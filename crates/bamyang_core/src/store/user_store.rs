//! User records and their SQLite data access.

use crate::repo::RepoResult;
use crate::store::schema::{ensure_ready, parse_uuid, RequiredTable};
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

const USER_SELECT_SQL: &str = "SELECT
    user_id,
    social_id,
    provider,
    profile_img_url,
    nick_name,
    job_search_status,
    desired_job,
    goal,
    dream,
    created_at,
    updated_at
FROM users";

const REQUIRED_TABLES: &[RequiredTable] = &[RequiredTable {
    name: "users",
    columns: &[
        "user_id",
        "social_id",
        "provider",
        "profile_img_url",
        "nick_name",
        "job_search_status",
        "desired_job",
        "goal",
        "dream",
        "created_at",
        "updated_at",
    ],
}];

/// Flat `users` row. `provider` keeps its stored text form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub user_id: Uuid,
    pub social_id: String,
    pub provider: String,
    pub profile_img_url: String,
    pub nick_name: String,
    pub job_search_status: Option<String>,
    pub desired_job: Option<String>,
    pub goal: Option<String>,
    pub dream: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

pub struct UserStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> UserStore<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_ready(conn, REQUIRED_TABLES)?;
        Ok(Self { conn })
    }

    /// Upserts by `user_id`; `created_at` is kept from the first insert.
    pub fn save(&self, record: &UserRecord) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO users (
                user_id,
                social_id,
                provider,
                profile_img_url,
                nick_name,
                job_search_status,
                desired_job,
                goal,
                dream,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            ON CONFLICT(user_id) DO UPDATE SET
                social_id = excluded.social_id,
                provider = excluded.provider,
                profile_img_url = excluded.profile_img_url,
                nick_name = excluded.nick_name,
                job_search_status = excluded.job_search_status,
                desired_job = excluded.desired_job,
                goal = excluded.goal,
                dream = excluded.dream,
                updated_at = excluded.updated_at;",
            params![
                record.user_id.to_string(),
                record.social_id.as_str(),
                record.provider.as_str(),
                record.profile_img_url.as_str(),
                record.nick_name.as_str(),
                record.job_search_status.as_deref(),
                record.desired_job.as_deref(),
                record.goal.as_deref(),
                record.dream.as_deref(),
                record.created_at,
                record.updated_at,
            ],
        )?;
        Ok(())
    }

    pub fn find_by_id(&self, user_id: Uuid) -> RepoResult<Option<UserRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} WHERE user_id = ?1;"))?;
        let mut rows = stmt.query([user_id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_user_row(row)?));
        }
        Ok(None)
    }

    pub fn find_by_provider_and_social_id(
        &self,
        provider: &str,
        social_id: &str,
    ) -> RepoResult<Option<UserRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{USER_SELECT_SQL} WHERE provider = ?1 AND social_id = ?2;"
        ))?;
        let mut rows = stmt.query(params![provider, social_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_user_row(row)?));
        }
        Ok(None)
    }

    pub fn exists_by_id(&self, user_id: Uuid) -> RepoResult<bool> {
        let found: Option<i64> = self
            .conn
            .query_row(
                "SELECT 1 FROM users WHERE user_id = ?1;",
                [user_id.to_string()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<UserRecord> {
    let id_text: String = row.get("user_id")?;
    Ok(UserRecord {
        user_id: parse_uuid(&id_text, "users.user_id")?,
        social_id: row.get("social_id")?,
        provider: row.get("provider")?,
        profile_img_url: row.get("profile_img_url")?,
        nick_name: row.get("nick_name")?,
        job_search_status: row.get("job_search_status")?,
        desired_job: row.get("desired_job")?,
        goal: row.get("goal")?,
        dream: row.get("dream")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
