pub mod add;
pub mod backup;
pub mod config;
pub mod db;
pub mod del;
pub mod directory;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod prefs;
pub mod search;
pub mod show;
pub mod stats;

use crate::config::Config;
use crate::core::journal::Journal;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::date;

/// Open the configured database, bring its schema up to date and load the
/// journal state.
pub(crate) fn open_journal(cfg: &Config) -> AppResult<Journal> {
    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;
    Journal::open(pool, date::today())
}
