//! Capture storage — append, lookup, bounded recent listing, bulk delete.

use crate::db::{Database, StorageError};
use crate::models::{Capture, CaptureSummary, NewCapture};

pub const DEFAULT_LIST_LIMIT: i64 = 50;
pub const MAX_LIST_LIMIT: i64 = 200;

/// Parses a raw `limit` query value, falling back to the default on garbage
/// and clamping the result into `[1, MAX_LIST_LIMIT]`.
pub fn clamp_limit(raw: Option<&str>) -> i64 {
    raw.and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(DEFAULT_LIST_LIMIT)
        .max(1)
        .min(MAX_LIST_LIMIT)
}

/// Appends a capture and returns its assigned id. Ids grow monotonically
/// and are never reused, even after `delete_all`.
pub fn insert_capture(db: &Database, new: &NewCapture) -> Result<i64, StorageError> {
    let conn = db.get()?;
    conn.execute(
        "INSERT INTO captures (received_at, source_ip, headers_json, body_json, raw_body)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        rusqlite::params![
            new.received_at,
            new.source_ip,
            new.headers_json,
            new.body_json,
            new.raw_body,
        ],
    )
    .map_err(StorageError::Write)?;
    Ok(conn.last_insert_rowid())
}

/// Exact lookup by id, returning the full field set including headers.
pub fn get_capture(db: &Database, id: i64) -> Result<Option<Capture>, StorageError> {
    let conn = db.get()?;
    let capture = conn.query_row(
        "SELECT id, received_at, source_ip, headers_json, body_json, raw_body
         FROM captures WHERE id = ?1",
        [id],
        |row| {
            Ok(Capture {
                id: row.get(0)?,
                received_at: row.get(1)?,
                source_ip: row.get(2)?,
                headers_json: row.get(3)?,
                body_json: row.get(4)?,
                raw_body: row.get(5)?,
            })
        },
    );

    match capture {
        Ok(c) => Ok(Some(c)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(StorageError::Query(e)),
    }
}

/// Most-recent-first listing, truncated to `limit` entries. Callers clamp
/// the limit with `clamp_limit`; a non-positive value is still raised to 1
/// here rather than handed to SQLite.
pub fn list_recent(db: &Database, limit: i64) -> Result<Vec<CaptureSummary>, StorageError> {
    let limit = limit.max(1);
    let conn = db.get()?;
    let mut stmt = conn
        .prepare(
            "SELECT id, received_at, source_ip, body_json, raw_body
             FROM captures ORDER BY id DESC LIMIT ?1",
        )
        .map_err(StorageError::Query)?;

    let items = stmt
        .query_map([limit], |row| {
            Ok(CaptureSummary {
                id: row.get(0)?,
                received_at: row.get(1)?,
                source_ip: row.get(2)?,
                body_json: row.get(3)?,
                raw_body: row.get(4)?,
            })
        })
        .map_err(StorageError::Query)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(StorageError::Query)?;

    Ok(items)
}

/// Removes every capture and returns how many rows went away. The id
/// sequence is not reset; later inserts continue past the prior maximum.
pub fn delete_all(db: &Database) -> Result<usize, StorageError> {
    let conn = db.get()?;
    conn.execute("DELETE FROM captures", [])
        .map_err(StorageError::Write)
}

pub fn count_captures(db: &Database) -> Result<i64, StorageError> {
    let conn = db.get()?;
    conn.query_row("SELECT COUNT(*) FROM captures", [], |row| row.get(0))
        .map_err(StorageError::Query)
}
