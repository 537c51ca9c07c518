use crate::errors::{AppError, AppResult};
use crate::models::recent_search::RecentSearch;
use chrono::NaiveDateTime;
use rusqlite::{Connection, params};

/// How many submitted queries are kept.
pub const MAX_RECENT_SEARCHES: usize = 20;

const SEARCHED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Record an explicitly submitted query: the previous entry with the same
/// text is replaced and the history is trimmed to the most recent entries.
pub fn save_recent_search(conn: &Connection, query: &str, at: NaiveDateTime) -> AppResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute("DELETE FROM recent_searches WHERE query = ?1", [query])?;
    tx.execute(
        "INSERT INTO recent_searches (query, searched_at) VALUES (?1, ?2)",
        params![query, at.format(SEARCHED_AT_FORMAT).to_string()],
    )?;
    tx.execute(
        "DELETE FROM recent_searches
         WHERE id NOT IN (
             SELECT id FROM recent_searches
             ORDER BY searched_at DESC, id DESC
             LIMIT ?1
         )",
        [MAX_RECENT_SEARCHES as i64],
    )?;

    tx.commit()?;
    Ok(())
}

/// Most recent first.
pub fn list_recent_searches(conn: &Connection) -> AppResult<Vec<RecentSearch>> {
    let mut stmt = conn.prepare(
        "SELECT id, query, searched_at FROM recent_searches
         ORDER BY searched_at DESC, id DESC",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
        ))
    })?;

    let mut out = Vec::new();
    for r in rows {
        let (id, query, raw) = r?;
        let searched_at = NaiveDateTime::parse_from_str(&raw, SEARCHED_AT_FORMAT)
            .map_err(|_| AppError::InvalidDate(raw.clone()))?;
        out.push(RecentSearch {
            id,
            query,
            searched_at,
        });
    }
    Ok(out)
}

pub fn clear_recent_searches(conn: &Connection) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM recent_searches", [])?)
}
