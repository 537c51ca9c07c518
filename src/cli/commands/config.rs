use crate::cli::parser::Commands;
use crate::config::Config;
use crate::config::migrate::{check_missing_fields, migrate_config_file};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{error, info, success, warning};
use std::fs;
use std::process::Command;

fn default_editor() -> String {
    std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        })
}

fn run_editor(editor: &str, path: &std::path::Path) -> bool {
    matches!(Command::new(editor).arg(path).status(), Ok(s) if s.success())
}

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        migrate,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        if *print_config {
            println!("📄 Current configuration:\n");
            let yaml = serde_yaml::to_string(cfg).map_err(|e| AppError::Config(e.to_string()))?;
            println!("{}", yaml);
        }

        if *check {
            if !path.exists() {
                warning(format!(
                    "No configuration file at {} (defaults in use)",
                    path.display()
                ));
            } else {
                let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
                let missing = check_missing_fields(&content)?;
                if missing.is_empty() {
                    success("Configuration file is complete.");
                } else {
                    warning(format!(
                        "Missing fields: {} (run `rmeallog config --migrate`)",
                        missing.join(", ")
                    ));
                }
            }
        }

        if *migrate {
            if path.exists() {
                migrate_config_file(&path)?;
            } else {
                warning("No configuration file to migrate; run `rmeallog init` first.");
            }
        }

        if *edit_config {
            let fallback = default_editor();
            let requested = editor.clone().unwrap_or_else(|| fallback.clone());

            if run_editor(&requested, &path) {
                success(format!("Configuration file edited using '{}'", requested));
            } else if requested != fallback {
                warning(format!(
                    "Editor '{}' not available, falling back to '{}'",
                    requested, fallback
                ));
                if run_editor(&fallback, &path) {
                    success(format!("Configuration file edited using '{}'", fallback));
                } else {
                    error(format!("Failed to edit configuration file using '{}'", fallback));
                }
            } else {
                error(format!("Failed to edit configuration file using '{}'", requested));
            }
        }

        if !(*print_config || *check || *migrate || *edit_config) {
            info("Nothing to do: use --print, --check, --migrate or --edit.");
        }
    }

    Ok(())
}
