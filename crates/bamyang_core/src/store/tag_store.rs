//! Tag records and their SQLite data access.
//!
//! # Invariants
//! - The primary key column is `tag_id` in table `tag`.
//! - `parent_tag_id` is stored as given; no existence, ownership or cycle
//!   check is made.
//! - `delete_by_id` removes exactly one row; children keep their
//!   `parent_tag_id`.

use crate::repo::RepoResult;
use crate::store::schema::{ensure_ready, parse_optional_uuid, parse_uuid, RequiredTable};
use rusqlite::{params, Connection, Row, ToSql};
use uuid::Uuid;

const TAG_SELECT_SQL: &str = "SELECT tag_id, name, parent_tag_id, user_id FROM tag";

const REQUIRED_TABLES: &[RequiredTable] = &[RequiredTable {
    name: "tag",
    columns: &["tag_id", "name", "parent_tag_id", "user_id"],
}];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
    pub tag_id: Uuid,
    pub name: String,
    pub parent_tag_id: Option<Uuid>,
    pub user_id: Uuid,
}

pub struct TagStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> TagStore<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_ready(conn, REQUIRED_TABLES)?;
        Ok(Self { conn })
    }

    pub fn save(&self, record: &TagRecord) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO tag (tag_id, name, parent_tag_id, user_id)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(tag_id) DO UPDATE SET
                name = excluded.name,
                parent_tag_id = excluded.parent_tag_id,
                user_id = excluded.user_id;",
            params![
                record.tag_id.to_string(),
                record.name.as_str(),
                record.parent_tag_id.map(|value| value.to_string()),
                record.user_id.to_string(),
            ],
        )?;
        Ok(())
    }

    pub fn delete_by_id(&self, tag_id: Uuid) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM tag WHERE tag_id = ?1;", [tag_id.to_string()])?;
        Ok(())
    }

    pub fn find_by_id(&self, tag_id: Uuid) -> RepoResult<Option<TagRecord>> {
        let id = tag_id.to_string();
        let mut records = self.query(&format!("{TAG_SELECT_SQL} WHERE tag_id = ?1;"), &[&id])?;
        Ok(records.pop())
    }

    pub fn find_all_by_user_id(&self, user_id: Uuid) -> RepoResult<Vec<TagRecord>> {
        let user = user_id.to_string();
        self.query(&format!("{TAG_SELECT_SQL} WHERE user_id = ?1;"), &[&user])
    }

    pub fn find_all_by_user_id_and_parent_tag_id_is_null(
        &self,
        user_id: Uuid,
    ) -> RepoResult<Vec<TagRecord>> {
        let user = user_id.to_string();
        self.query(
            &format!("{TAG_SELECT_SQL} WHERE user_id = ?1 AND parent_tag_id IS NULL;"),
            &[&user],
        )
    }

    pub fn find_all_by_parent_tag_id(&self, parent_tag_id: Uuid) -> RepoResult<Vec<TagRecord>> {
        let parent = parent_tag_id.to_string();
        self.query(
            &format!("{TAG_SELECT_SQL} WHERE parent_tag_id = ?1;"),
            &[&parent],
        )
    }

    /// Whether `user_id` already has a tag called `name` under `parent_tag_id`
    /// (`None` meaning the root level).
    pub fn exists_by_user_id_and_parent_tag_id_and_name(
        &self,
        user_id: Uuid,
        parent_tag_id: Option<Uuid>,
        name: &str,
    ) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM tag
                WHERE user_id = ?1
                  AND parent_tag_id IS ?2
                  AND name = ?3
            );",
            params![
                user_id.to_string(),
                parent_tag_id.map(|value| value.to_string()),
                name,
            ],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn query(&self, sql: &str, args: &[&dyn ToSql]) -> RepoResult<Vec<TagRecord>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(args)?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(parse_tag_row(row)?);
        }
        Ok(records)
    }
}

fn parse_tag_row(row: &Row<'_>) -> RepoResult<TagRecord> {
    let id_text: String = row.get("tag_id")?;
    let user_text: String = row.get("user_id")?;
    Ok(TagRecord {
        tag_id: parse_uuid(&id_text, "tag.tag_id")?,
        name: row.get("name")?,
        parent_tag_id: parse_optional_uuid(row.get("parent_tag_id")?, "tag.parent_tag_id")?,
        user_id: parse_uuid(&user_text, "tag.user_id")?,
    })
}
