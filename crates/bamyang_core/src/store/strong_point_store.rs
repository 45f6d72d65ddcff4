//! StrongPoint records and their SQLite data access.
//!
//! # Invariants
//! - A record saved without `strong_point_id` gets a fresh UUID v4 assigned
//!   here, at insert time, and the assigned id is returned.
//! - Saving with an existing id overwrites that row in place.

use crate::repo::RepoResult;
use crate::store::schema::{ensure_ready, parse_uuid, RequiredTable};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const REQUIRED_TABLES: &[RequiredTable] = &[RequiredTable {
    name: "strong_point",
    columns: &["strong_point_id", "user_id", "name"],
}];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrongPointRecord {
    pub strong_point_id: Option<Uuid>,
    pub user_id: Uuid,
    pub name: String,
}

pub struct StrongPointStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> StrongPointStore<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_ready(conn, REQUIRED_TABLES)?;
        Ok(Self { conn })
    }

    /// Upserts the record and returns its (possibly newly generated) id.
    pub fn save(&self, record: &StrongPointRecord) -> RepoResult<Uuid> {
        let strong_point_id = record.strong_point_id.unwrap_or_else(Uuid::new_v4);
        self.conn.execute(
            "INSERT INTO strong_point (strong_point_id, user_id, name)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(strong_point_id) DO UPDATE SET
                user_id = excluded.user_id,
                name = excluded.name;",
            params![
                strong_point_id.to_string(),
                record.user_id.to_string(),
                record.name.as_str(),
            ],
        )?;
        Ok(strong_point_id)
    }

    pub fn find_by_id(&self, strong_point_id: Uuid) -> RepoResult<Option<StrongPointRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT strong_point_id, user_id, name
             FROM strong_point
             WHERE strong_point_id = ?1;",
        )?;
        let mut rows = stmt.query([strong_point_id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_strong_point_row(row)?));
        }
        Ok(None)
    }

    pub fn find_all_by_user_id(&self, user_id: Uuid) -> RepoResult<Vec<StrongPointRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT strong_point_id, user_id, name
             FROM strong_point
             WHERE user_id = ?1;",
        )?;
        let mut rows = stmt.query([user_id.to_string()])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(parse_strong_point_row(row)?);
        }
        Ok(records)
    }
}

fn parse_strong_point_row(row: &Row<'_>) -> RepoResult<StrongPointRecord> {
    let id_text: String = row.get("strong_point_id")?;
    let user_text: String = row.get("user_id")?;
    Ok(StrongPointRecord {
        strong_point_id: Some(parse_uuid(&id_text, "strong_point.strong_point_id")?),
        user_id: parse_uuid(&user_text, "strong_point.user_id")?,
        name: row.get("name")?,
    })
}
