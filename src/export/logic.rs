use crate::core::journal::Journal;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::MealExport;
use crate::export::range::parse_range;
use crate::ui::messages::warning;
use crate::utils::path::{ensure_parent_dir, expand_tilde};
use chrono::NaiveDate;

pub struct ExportLogic;

/// Meals inside the inclusive bounds (all meals for `None`), oldest first.
pub fn collect_meals(journal: &Journal, bounds: Option<(NaiveDate, NaiveDate)>) -> Vec<MealExport> {
    let snapshot = journal.snapshot();
    let mut out: Vec<MealExport> = snapshot
        .iter()
        .filter(|m| match bounds {
            Some((start, end)) => {
                let d = m.meal.timestamp.date();
                d >= start && d <= end
            }
            None => true,
        })
        .map(MealExport::from)
        .collect();
    out.reverse();
    out
}

impl ExportLogic {
    /// `range`: `None`, `"all"` or anything [`parse_range`] accepts.
    /// Returns the number of exported meals.
    pub fn export(
        journal: &Journal,
        format: ExportFormat,
        file: &str,
        range: Option<&str>,
        force: bool,
    ) -> AppResult<usize> {
        let path = expand_tilde(file);

        let bounds = match range {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(parse_range(r)?),
        };

        let meals = collect_meals(journal, bounds);
        if meals.is_empty() {
            warning("No meals found for the selected range.");
            return Ok(0);
        }

        ensure_writable(&path, force)?;
        ensure_parent_dir(&path)?;

        match format {
            ExportFormat::Csv => export_csv(&meals, &path)?,
            ExportFormat::Json => export_json(&meals, &path)?,
        }

        ttlog_quiet(
            journal.conn(),
            "export",
            &path.to_string_lossy(),
            &format!(
                "{} meal(s) as {} ({})",
                meals.len(),
                format.as_str(),
                range.unwrap_or("all")
            ),
        );
        Ok(meals.len())
    }
}
