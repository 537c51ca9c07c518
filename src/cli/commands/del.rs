use crate::cli::commands::open_journal;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::del::DeleteLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, force } = cmd {
        let journal = open_journal(cfg)?;

        // Fails with "not found" before asking anything.
        let meal = journal.meal(*id)?;

        if !*force {
            let prompt = format!(
                "Delete meal #{} '{}' at {} with its {} dish(es)? This action is irreversible.",
                id,
                meal.meal.name,
                meal.restaurant_name,
                meal.meal.dishes.len()
            );
            if !ask_confirmation(&prompt) {
                info("Operation cancelled.");
                return Ok(());
            }
        }

        DeleteLogic::apply(&journal, *id)?;
        success(format!("Meal #{} has been deleted.", id));
    }

    Ok(())
}
