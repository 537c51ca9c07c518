use crate::errors::{AppError, AppResult};
use crate::utils::formatting::truncate;
use ansi_term::Colour;
use regex::Regex;
use rusqlite::Connection;

const OP_WIDTH: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

/// Colour of an audit operation in `log --print`.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "del" => Colour::Red,
        "edit" => Colour::Yellow,
        "search" => Colour::Cyan,
        "prefs" => Colour::Blue,
        "migration_applied" => Colour::Purple,
        "backup" | "export" => Colour::Blue,
        "init" => Colour::RGB(255, 153, 51),
        other if other.starts_with("config_") => Colour::Purple,
        _ => Colour::White,
    }
}

pub fn load_entries(conn: &Connection) -> AppResult<Vec<LogEntry>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, date, operation, target, message FROM log ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        let raw_date: String = row.get(1)?;
        let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
            .map(|dt| dt.format("%F %T").to_string())
            .unwrap_or(raw_date);

        Ok(LogEntry {
            id: row.get(0)?,
            date,
            operation: row.get(2)?,
            target: row.get(3)?,
            message: row.get(4)?,
        })
    })?;

    let mut entries = Vec::new();
    for r in rows {
        entries.push(r?);
    }
    Ok(entries)
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(conn: &Connection) -> AppResult<()> {
        let entries = load_entries(conn)?;
        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let ansi = Regex::new(r"\x1B\[[0-9;]*[mK]").map_err(|e| AppError::Other(e.to_string()))?;

        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);

        println!("📜 Internal log:\n");

        for e in &entries {
            // Only the operation word is coloured; the target is truncated plain text.
            let plain = if e.target.is_empty() {
                e.operation.clone()
            } else {
                format!("{} ({})", e.operation, e.target)
            };
            let plain = truncate(&plain, OP_WIDTH);
            let colored = match plain.split_once(' ') {
                Some((op, rest)) => {
                    format!("{} {}", color_for_operation(&e.operation).paint(op), rest)
                }
                None => color_for_operation(&e.operation)
                    .paint(plain.as_str())
                    .to_string(),
            };

            let visible = ansi.replace_all(&colored, "");
            let padding = " ".repeat(OP_WIDTH.saturating_sub(visible.chars().count()));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                e.id,
                e.date,
                colored,
                padding,
                e.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::log::ttlog;
    use crate::db::migrate::run_pending_migrations;

    #[test]
    fn entries_come_back_in_insertion_order() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        ttlog(&conn, "add", "meal #1", "Lunch").unwrap();
        ttlog(&conn, "del", "meal #1", "Lunch").unwrap();

        let ops: Vec<String> = load_entries(&conn)
            .unwrap()
            .into_iter()
            .filter(|e| e.operation != "migration_applied")
            .map(|e| e.operation)
            .collect();
        assert_eq!(ops, vec!["add", "del"]);
        LogLogic::print_log(&conn).unwrap();
    }
}
