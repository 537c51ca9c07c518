pub mod dish;
pub mod meal;
pub mod money;
pub mod month;
pub mod preferences;
pub mod recent_search;
pub mod restaurant;
