//! Key-value preference store (`preferences` table).

use crate::errors::AppResult;
use crate::models::preferences::{SortMode, SortOrder, UserPreferences};
use rusqlite::{Connection, OptionalExtension, params};

pub const KEY_SORT_MODE: &str = "sort_mode";
pub const KEY_SORT_ORDER: &str = "sort_order";

pub fn get_pref(conn: &Connection, key: &str) -> AppResult<Option<String>> {
    let v = conn
        .query_row(
            "SELECT value FROM preferences WHERE key = ?1",
            [key],
            |row| row.get(0),
        )
        .optional()?;
    Ok(v)
}

pub fn set_pref(conn: &Connection, key: &str, value: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO preferences (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn load_preferences(conn: &Connection) -> AppResult<UserPreferences> {
    let mode = get_pref(conn, KEY_SORT_MODE)?;
    let order = get_pref(conn, KEY_SORT_ORDER)?;
    Ok(UserPreferences::from_raw(mode.as_deref(), order.as_deref()))
}

pub fn save_sort_mode(conn: &Connection, mode: SortMode) -> AppResult<()> {
    set_pref(conn, KEY_SORT_MODE, mode.as_str())
}

pub fn save_sort_order(conn: &Connection, order: SortOrder) -> AppResult<()> {
    set_pref(conn, KEY_SORT_ORDER, order.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrate::run_pending_migrations;

    #[test]
    fn round_trip_and_fallback() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();

        assert_eq!(load_preferences(&conn).unwrap(), UserPreferences::default());

        save_sort_mode(&conn, SortMode::Restaurant).unwrap();
        save_sort_order(&conn, SortOrder::Asc).unwrap();
        let p = load_preferences(&conn).unwrap();
        assert_eq!(p.sort_mode, SortMode::Restaurant);
        assert_eq!(p.sort_order, SortOrder::Asc);

        set_pref(&conn, KEY_SORT_MODE, "by-vibes").unwrap();
        assert_eq!(load_preferences(&conn).unwrap().sort_mode, SortMode::Date);
    }
}
