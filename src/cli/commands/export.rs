use crate::cli::commands::open_journal;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        force,
    } = cmd
    {
        let journal = open_journal(cfg)?;
        ExportLogic::export(&journal, *format, file, range.as_deref(), *force)?;
    }
    Ok(())
}
