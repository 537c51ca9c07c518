use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use rusqlite::Connection;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped with `--test`)
///  - the SQLite database, its schema and the city list
pub fn handle(cli: &Cli) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.as_deref(), cli.test)?;
    let db_path = db_path.to_string_lossy().to_string();

    info("Initializing rMealLog…");
    if !cli.test {
        info(format!("Config file : {}", Config::config_file().display()));
    }
    info(format!("Database    : {}", db_path));

    let conn = Connection::open(&db_path)?;
    for m in init_db(&conn)? {
        success(format!("Migration applied: {} → {}", m.version, m.description));
    }

    ttlog_quiet(
        &conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", db_path),
    );

    success(format!("Database initialized at {}", db_path));
    Ok(())
}
