//! Experience records and their SQLite data access.
//!
//! # Responsibility
//! - Define the flat `experience` row plus its ordered child rows
//!   (`experience_content`, `experience_strong_point`).
//! - Provide record-level upsert/delete/finders; no domain rules here.
//!
//! # Invariants
//! - `save` overwrites by `experience_id` but never rewrites `created_at`.
//! - Child rows are replaced as a whole inside the same IMMEDIATE
//!   transaction as the parent row.
//! - `delete_by_id` on an absent key is a no-op.
//! - Only the created-at range finders have a defined order
//!   (`created_at DESC`); other lists come back in storage order.

use crate::repo::RepoResult;
use crate::store::schema::{ensure_ready, parse_optional_uuid, parse_uuid, RequiredTable};
use rusqlite::{params, Connection, Row, ToSql, Transaction, TransactionBehavior};
use uuid::Uuid;

const EXPERIENCE_SELECT_SQL: &str = "SELECT
    experience_id,
    user_id,
    title,
    parent_tag_id,
    child_tag_id,
    started_at,
    ended_at,
    created_at,
    updated_at
FROM experience";

const REQUIRED_TABLES: &[RequiredTable] = &[
    RequiredTable {
        name: "experience",
        columns: &[
            "experience_id",
            "user_id",
            "title",
            "parent_tag_id",
            "child_tag_id",
            "started_at",
            "ended_at",
            "created_at",
            "updated_at",
        ],
    },
    RequiredTable {
        name: "experience_content",
        columns: &["experience_id", "position", "question", "answer"],
    },
    RequiredTable {
        name: "experience_strong_point",
        columns: &["experience_id", "strong_point_id", "position"],
    },
];

/// Flat storage shape of one experience. Timestamps are epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceRecord {
    pub experience_id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub parent_tag_id: Option<Uuid>,
    pub child_tag_id: Option<Uuid>,
    pub started_at: i64,
    pub ended_at: i64,
    pub created_at: i64,
    pub updated_at: i64,
    pub contents: Vec<ExperienceContentRecord>,
    pub strong_points: Vec<ExperienceStrongPointRecord>,
}

/// One `experience_content` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceContentRecord {
    pub position: i64,
    pub question: String,
    pub answer: String,
}

/// One `experience_strong_point` link row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceStrongPointRecord {
    pub strong_point_id: Uuid,
    pub position: i64,
}

/// Record-level data access for experiences.
pub struct ExperienceStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> ExperienceStore<'conn> {
    /// Creates a store over a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_ready(conn, REQUIRED_TABLES)?;
        Ok(Self { conn })
    }

    /// Inserts the record or overwrites the row with the same key.
    pub fn save(&self, record: &ExperienceRecord) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let id = record.experience_id.to_string();

        tx.execute(
            "INSERT INTO experience (
                experience_id,
                user_id,
                title,
                parent_tag_id,
                child_tag_id,
                started_at,
                ended_at,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ON CONFLICT(experience_id) DO UPDATE SET
                user_id = excluded.user_id,
                title = excluded.title,
                parent_tag_id = excluded.parent_tag_id,
                child_tag_id = excluded.child_tag_id,
                started_at = excluded.started_at,
                ended_at = excluded.ended_at,
                updated_at = excluded.updated_at;",
            params![
                id.as_str(),
                record.user_id.to_string(),
                record.title.as_str(),
                record.parent_tag_id.map(|value| value.to_string()),
                record.child_tag_id.map(|value| value.to_string()),
                record.started_at,
                record.ended_at,
                record.created_at,
                record.updated_at,
            ],
        )?;

        delete_children(&tx, id.as_str())?;
        for content in &record.contents {
            tx.execute(
                "INSERT INTO experience_content (experience_id, position, question, answer)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    id.as_str(),
                    content.position,
                    content.question.as_str(),
                    content.answer.as_str(),
                ],
            )?;
        }
        for link in &record.strong_points {
            tx.execute(
                "INSERT INTO experience_strong_point (experience_id, strong_point_id, position)
                 VALUES (?1, ?2, ?3);",
                params![id.as_str(), link.strong_point_id.to_string(), link.position],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    /// Removes the row and its children. Absent keys are ignored.
    pub fn delete_by_id(&self, experience_id: Uuid) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let id = experience_id.to_string();
        delete_children(&tx, id.as_str())?;
        tx.execute(
            "DELETE FROM experience WHERE experience_id = ?1;",
            [id.as_str()],
        )?;
        tx.commit()?;
        Ok(())
    }

    pub fn find_by_id(&self, experience_id: Uuid) -> RepoResult<Option<ExperienceRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EXPERIENCE_SELECT_SQL} WHERE experience_id = ?1;"))?;
        let mut rows = stmt.query([experience_id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(self.load_record(row)?));
        }
        Ok(None)
    }

    pub fn find_all_by_user_id(&self, user_id: Uuid) -> RepoResult<Vec<ExperienceRecord>> {
        self.query_records(
            &format!("{EXPERIENCE_SELECT_SQL} WHERE user_id = ?1;"),
            params![user_id.to_string()],
        )
    }

    /// Rows of `user_id` with `start_ms <= created_at <= end_ms`, newest first.
    pub fn find_by_user_id_and_created_at_between_order_by_created_at_desc(
        &self,
        user_id: Uuid,
        start_ms: i64,
        end_ms: i64,
    ) -> RepoResult<Vec<ExperienceRecord>> {
        self.query_records(
            &format!(
                "{EXPERIENCE_SELECT_SQL}
                 WHERE user_id = ?1
                   AND created_at BETWEEN ?2 AND ?3
                 ORDER BY created_at DESC;"
            ),
            params![user_id.to_string(), start_ms, end_ms],
        )
    }

    /// Same range as the created-at finder, narrowed to one parent tag.
    pub fn find_by_user_id_and_parent_tag_id_and_created_at_between_order_by_created_at_desc(
        &self,
        user_id: Uuid,
        parent_tag_id: Uuid,
        start_ms: i64,
        end_ms: i64,
    ) -> RepoResult<Vec<ExperienceRecord>> {
        self.query_records(
            &format!(
                "{EXPERIENCE_SELECT_SQL}
                 WHERE user_id = ?1
                   AND parent_tag_id = ?2
                   AND created_at BETWEEN ?3 AND ?4
                 ORDER BY created_at DESC;"
            ),
            params![user_id.to_string(), parent_tag_id.to_string(), start_ms, end_ms],
        )
    }

    /// Same range as the created-at finder, narrowed to one child tag.
    pub fn find_by_user_id_and_child_tag_id_and_created_at_between_order_by_created_at_desc(
        &self,
        user_id: Uuid,
        child_tag_id: Uuid,
        start_ms: i64,
        end_ms: i64,
    ) -> RepoResult<Vec<ExperienceRecord>> {
        self.query_records(
            &format!(
                "{EXPERIENCE_SELECT_SQL}
                 WHERE user_id = ?1
                   AND child_tag_id = ?2
                   AND created_at BETWEEN ?3 AND ?4
                 ORDER BY created_at DESC;"
            ),
            params![user_id.to_string(), child_tag_id.to_string(), start_ms, end_ms],
        )
    }

    /// `started_at` of every row owned by `user_id`, ascending.
    pub fn find_started_at_by_user_id(&self, user_id: Uuid) -> RepoResult<Vec<i64>> {
        let mut stmt = self.conn.prepare(
            "SELECT started_at
             FROM experience
             WHERE user_id = ?1
             ORDER BY started_at ASC;",
        )?;
        let mut rows = stmt.query([user_id.to_string()])?;
        let mut values = Vec::new();
        while let Some(row) = rows.next()? {
            values.push(row.get("started_at")?);
        }
        Ok(values)
    }

    fn query_records(&self, sql: &str, args: &[&dyn ToSql]) -> RepoResult<Vec<ExperienceRecord>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(args)?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(self.load_record(row)?);
        }
        Ok(records)
    }

    fn load_record(&self, row: &Row<'_>) -> RepoResult<ExperienceRecord> {
        let id_text: String = row.get("experience_id")?;
        let user_text: String = row.get("user_id")?;

        Ok(ExperienceRecord {
            experience_id: parse_uuid(&id_text, "experience.experience_id")?,
            user_id: parse_uuid(&user_text, "experience.user_id")?,
            title: row.get("title")?,
            parent_tag_id: parse_optional_uuid(
                row.get("parent_tag_id")?,
                "experience.parent_tag_id",
            )?,
            child_tag_id: parse_optional_uuid(row.get("child_tag_id")?, "experience.child_tag_id")?,
            started_at: row.get("started_at")?,
            ended_at: row.get("ended_at")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
            contents: load_contents(self.conn, &id_text)?,
            strong_points: load_strong_points(self.conn, &id_text)?,
        })
    }
}

fn delete_children(tx: &Transaction<'_>, experience_id: &str) -> RepoResult<()> {
    tx.execute(
        "DELETE FROM experience_content WHERE experience_id = ?1;",
        [experience_id],
    )?;
    tx.execute(
        "DELETE FROM experience_strong_point WHERE experience_id = ?1;",
        [experience_id],
    )?;
    Ok(())
}

fn load_contents(conn: &Connection, experience_id: &str) -> RepoResult<Vec<ExperienceContentRecord>> {
    let mut stmt = conn.prepare(
        "SELECT position, question, answer
         FROM experience_content
         WHERE experience_id = ?1
         ORDER BY position ASC;",
    )?;
    let mut rows = stmt.query([experience_id])?;
    let mut contents = Vec::new();
    while let Some(row) = rows.next()? {
        contents.push(ExperienceContentRecord {
            position: row.get("position")?,
            question: row.get("question")?,
            answer: row.get("answer")?,
        });
    }
    Ok(contents)
}

fn load_strong_points(
    conn: &Connection,
    experience_id: &str,
) -> RepoResult<Vec<ExperienceStrongPointRecord>> {
    let mut stmt = conn.prepare(
        "SELECT strong_point_id, position
         FROM experience_strong_point
         WHERE experience_id = ?1
         ORDER BY position ASC;",
    )?;
    let mut rows = stmt.query([experience_id])?;
    let mut links = Vec::new();
    while let Some(row) = rows.next()? {
        let value: String = row.get("strong_point_id")?;
        links.push(ExperienceStrongPointRecord {
            strong_point_id: parse_uuid(&value, "experience_strong_point.strong_point_id")?,
            position: row.get("position")?,
        });
    }
    Ok(links)
}
