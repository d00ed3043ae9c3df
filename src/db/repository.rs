use std::str::FromStr;

use chrono::NaiveDateTime;
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

use super::DatabaseError;
use crate::models::{Fragment, ShapeKey};

const FRAGMENT_COLUMNS: &str =
    "id, text, shape, token_length, source_doc_id, token_offset, mapping_version, ingested_at";

/// Insert a fragment. Returns `false` when an identical
/// `(text, source_doc_id, token_offset)` row already exists; the dedup
/// invariant makes that a silent no-op, not an error.
pub fn insert_fragment(conn: &Connection, fragment: &Fragment) -> Result<bool, DatabaseError> {
    let changed = conn.execute(
        "INSERT OR IGNORE INTO fragments
         (id, text, shape, token_length, source_doc_id, token_offset, mapping_version, ingested_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            fragment.id.to_string(),
            fragment.text,
            fragment.shape.to_string(),
            fragment.token_length as i64,
            fragment.source_doc_id,
            fragment.token_offset as i64,
            fragment.mapping_version,
            fragment.ingested_at.to_string(),
        ],
    )?;
    Ok(changed > 0)
}

pub fn fragments_by_shape(conn: &Connection, shape: &ShapeKey) -> Result<Vec<Fragment>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {FRAGMENT_COLUMNS} FROM fragments WHERE shape = ?1
         ORDER BY source_doc_id, token_offset, text"
    ))?;
    let rows = stmt.query_map(params![shape.to_string()], fragment_row)?;
    collect_fragments(rows)
}

pub fn fragments_by_length(conn: &Connection, token_length: usize) -> Result<Vec<Fragment>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {FRAGMENT_COLUMNS} FROM fragments WHERE token_length = ?1
         ORDER BY source_doc_id, token_offset, text"
    ))?;
    let rows = stmt.query_map(params![token_length as i64], fragment_row)?;
    collect_fragments(rows)
}

pub fn all_fragments(conn: &Connection) -> Result<Vec<Fragment>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {FRAGMENT_COLUMNS} FROM fragments
         ORDER BY source_doc_id, token_offset, text"
    ))?;
    let rows = stmt.query_map([], fragment_row)?;
    collect_fragments(rows)
}

pub fn count_fragments(conn: &Connection) -> Result<usize, DatabaseError> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM fragments", [], |row| row.get(0))?;
    Ok(count as usize)
}

/// Fragment counts per source document, for audit of corpus balance.
pub fn count_by_source(conn: &Connection) -> Result<Vec<(String, usize)>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT source_doc_id, COUNT(*) FROM fragments
         GROUP BY source_doc_id ORDER BY source_doc_id",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as usize))
    })?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

struct FragmentRow {
    id: String,
    text: String,
    shape: String,
    token_length: i64,
    source_doc_id: String,
    token_offset: i64,
    mapping_version: i64,
    ingested_at: String,
}

fn fragment_row(row: &Row<'_>) -> rusqlite::Result<FragmentRow> {
    Ok(FragmentRow {
        id: row.get(0)?,
        text: row.get(1)?,
        shape: row.get(2)?,
        token_length: row.get(3)?,
        source_doc_id: row.get(4)?,
        token_offset: row.get(5)?,
        mapping_version: row.get(6)?,
        ingested_at: row.get(7)?,
    })
}

fn collect_fragments(
    rows: impl Iterator<Item = rusqlite::Result<FragmentRow>>,
) -> Result<Vec<Fragment>, DatabaseError> {
    let mut fragments = Vec::new();
    for row in rows {
        fragments.push(fragment_from_row(row?)?);
    }
    Ok(fragments)
}

fn fragment_from_row(row: FragmentRow) -> Result<Fragment, DatabaseError> {
    let shape = ShapeKey::parse(&row.shape).map_err(|_| DatabaseError::InvalidShape {
        value: row.shape.clone(),
    })?;
    let id = Uuid::from_str(&row.id).map_err(|_| DatabaseError::InvalidId {
        value: row.id.clone(),
    })?;
    let ingested_at = NaiveDateTime::from_str(&row.ingested_at)
        .or_else(|_| NaiveDateTime::parse_from_str(&row.ingested_at, "%Y-%m-%d %H:%M:%S%.f"))
        .unwrap_or_default();

    Ok(Fragment {
        id,
        text: row.text,
        shape,
        token_length: row.token_length as usize,
        source_doc_id: row.source_doc_id,
        token_offset: row.token_offset as usize,
        mapping_version: row.mapping_version,
        ingested_at,
    })
}
