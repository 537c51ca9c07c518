use crate::cli::commands::open_journal;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Prefs { sort, order, print } = cmd {
        let journal = open_journal(cfg)?;

        if let Some(mode) = sort {
            journal.set_sort_mode(*mode)?;
            ttlog_quiet(journal.conn(), "prefs", "sort_mode", mode.as_str());
            success(format!("Sort mode set to {}", mode.as_str()));
        }
        if let Some(order) = order {
            journal.set_sort_order(*order)?;
            ttlog_quiet(journal.conn(), "prefs", "sort_order", order.as_str());
            success(format!("Sort order set to {}", order.as_str()));
        }

        if *print || (sort.is_none() && order.is_none()) {
            let prefs = journal.preferences();
            info(format!("sort_mode  = {}", prefs.sort_mode.as_str()));
            info(format!("sort_order = {}", prefs.sort_order.as_str()));
        }
    }
    Ok(())
}
