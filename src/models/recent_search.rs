use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentSearch {
    pub id: i64,
    pub query: String,
    pub searched_at: NaiveDateTime,
}
