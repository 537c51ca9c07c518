use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ValueEnum)]
pub enum SortMode {
    #[default]
    Date,
    Restaurant,
    Rating,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Date => "date",
            SortMode::Restaurant => "restaurant",
            SortMode::Rating => "rating",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "date" => Some(SortMode::Date),
            "restaurant" => Some(SortMode::Restaurant),
            "rating" => Some(SortMode::Rating),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ValueEnum)]
pub enum SortOrder {
    #[value(alias = "ascending")]
    Asc,
    #[default]
    #[value(alias = "descending")]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Some(SortOrder::Asc),
            "desc" | "descending" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

/// List presentation settings persisted in the `preferences` table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UserPreferences {
    pub sort_mode: SortMode,
    pub sort_order: SortOrder,
}

impl UserPreferences {
    /// Build from raw stored values; anything missing or unparseable falls
    /// back to its default.
    pub fn from_raw(sort_mode: Option<&str>, sort_order: Option<&str>) -> Self {
        Self {
            sort_mode: sort_mode.and_then(SortMode::parse).unwrap_or_default(),
            sort_order: sort_order.and_then(SortOrder::parse).unwrap_or_default(),
        }
    }
}
