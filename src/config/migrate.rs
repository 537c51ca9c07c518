//! Configuration file upgrades: fields added in later versions are reported
//! by `config --check` and written with their defaults by `config --migrate`.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

fn defaults_mapping(cfg_db: &str) -> AppResult<Mapping> {
    let defaults = Config::with_database(cfg_db);
    match serde_yaml::to_value(&defaults).map_err(|e| AppError::Config(e.to_string()))? {
        Value::Mapping(m) => Ok(m),
        _ => Err(AppError::Config("default configuration is not a mapping".into())),
    }
}

fn parse_mapping(content: &str) -> AppResult<Mapping> {
    match serde_yaml::from_str::<Value>(content).map_err(|e| AppError::Config(e.to_string()))? {
        Value::Mapping(m) => Ok(m),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::Config("configuration root must be a mapping".into())),
    }
}

/// Keys known to this version that `content` does not define.
pub fn check_missing_fields(content: &str) -> AppResult<Vec<String>> {
    let current = parse_mapping(content)?;
    let defaults = defaults_mapping(&Config::database_file().to_string_lossy())?;

    Ok(defaults
        .keys()
        .filter(|k| !current.contains_key(*k))
        .filter_map(|k| k.as_str().map(str::to_string))
        .collect())
}

/// Add every missing key with its default value. Existing values and
/// unknown keys are left untouched. Returns the added keys.
pub fn migrate_content(content: &str) -> AppResult<(String, Vec<String>)> {
    let mut current = parse_mapping(content)?;
    let db = current
        .get(Value::String("database".into()))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| Config::database_file().to_string_lossy().to_string());

    let mut added = Vec::new();
    for (k, v) in defaults_mapping(&db)? {
        if !current.contains_key(&k) {
            if let Some(name) = k.as_str() {
                added.push(name.to_string());
            }
            current.insert(k, v);
        }
    }

    let yaml = serde_yaml::to_string(&Value::Mapping(current))
        .map_err(|e| AppError::Config(e.to_string()))?;
    Ok((yaml, added))
}

pub fn migrate_config_file(path: &Path) -> AppResult<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    let (yaml, added) = migrate_content(&content)?;

    if added.is_empty() {
        info("Configuration is up to date.");
    } else {
        fs::write(path, yaml)?;
        success(format!("Configuration updated, added: {}", added.join(", ")));
    }
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;

    const OLD: &str = "database: /data/meals.sqlite\ncurrency: CHF\nextra: kept\n";

    #[test]
    fn reports_missing_fields() {
        let missing = check_missing_fields(OLD).unwrap();
        assert_eq!(
            missing,
            vec!["top_restaurants", "search_debounce_ms", "date_format", "separator_char"]
        );
        assert!(check_missing_fields("").unwrap().contains(&"database".to_string()));
    }

    #[test]
    fn migration_keeps_existing_values() {
        let (yaml, added) = migrate_content(OLD).unwrap();
        assert_eq!(added.len(), 4);

        let cfg = Config::from_yaml(&yaml).unwrap();
        assert_eq!(cfg.database, "/data/meals.sqlite");
        assert_eq!(cfg.currency, "CHF");
        assert_eq!(cfg.top_restaurants, 5);
        assert!(yaml.contains("extra: kept"));

        let (_, again) = migrate_content(&yaml).unwrap();
        assert!(again.is_empty());
    }
}
