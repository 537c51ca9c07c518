use crate::errors::{AppError, AppResult};
use crate::export::{MealExport, notify_export_success};
use crate::ui::messages::info;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Export JSON pretty-printed.
pub(crate) fn export_json(meals: &[MealExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(meals)?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path, meals.len());
    Ok(())
}

/// Export CSV, one row per dish (header from serde).
pub(crate) fn export_csv(meals: &[MealExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::Writer::from_path(path)?;

    for meal in meals {
        for row in meal.rows() {
            wtr.serialize(row)?;
        }
    }

    wtr.flush()
        .map_err(|e| AppError::Export(format!("CSV flush error: {e}")))?;

    notify_export_success("CSV", path, meals.len());
    Ok(())
}
