//! Search merger: restaurant and meal/dish matches in one ranked list, plus
//! the debounced, last-query-wins driver used by interactive search.

use crate::db::directory;
use crate::db::queries;
use crate::errors::AppResult;
use crate::models::meal::{Meal, MealWithPlace};
use crate::models::restaurant::RestaurantWithCity;
use rusqlite::Connection;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::mpsc::{Receiver, RecvTimeoutError, TryRecvError};
use std::time::Duration;

/// Queries shorter than this never reach storage.
pub const MIN_QUERY_CHARS: usize = 2;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Storage operations the merger needs.
pub trait SearchSource {
    fn restaurants_containing(&self, needle: &str) -> AppResult<Vec<RestaurantWithCity>>;

    /// One id per matching meal/dish row; duplicates are expected.
    fn meal_ids_matching(&self, needle: &str) -> AppResult<Vec<i64>>;

    fn meal(&self, id: i64) -> AppResult<Option<Meal>>;

    fn place_names(&self, restaurant_id: i64) -> AppResult<(String, String)>;
}

/// SQLite-backed source.
pub struct SqliteSource<'a> {
    pub conn: &'a Connection,
}

impl SearchSource for SqliteSource<'_> {
    fn restaurants_containing(&self, needle: &str) -> AppResult<Vec<RestaurantWithCity>> {
        directory::restaurants_containing(self.conn, needle)
    }

    fn meal_ids_matching(&self, needle: &str) -> AppResult<Vec<i64>> {
        queries::meal_ids_matching(self.conn, needle)
    }

    fn meal(&self, id: i64) -> AppResult<Option<Meal>> {
        queries::load_meal(self.conn, id)
    }

    fn place_names(&self, restaurant_id: i64) -> AppResult<(String, String)> {
        directory::place_names(self.conn, restaurant_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SearchResult {
    Restaurant {
        id: i64,
        name: String,
        city_name: String,
    },
    Meal(MealWithPlace),
}

impl SearchResult {
    pub fn title(&self) -> &str {
        match self {
            SearchResult::Restaurant { name, .. } => name,
            SearchResult::Meal(m) => &m.meal.name,
        }
    }
}

pub fn is_searchable(query: &str) -> bool {
    query.trim().chars().count() >= MIN_QUERY_CHARS
}

/// Restaurants first, then meals (each meal once). Missing place names turn
/// into "Unknown" instead of failing the search.
pub fn search<S: SearchSource + ?Sized>(source: &S, query: &str) -> AppResult<Vec<SearchResult>> {
    if !is_searchable(query) {
        return Ok(Vec::new());
    }
    let needle = query.trim();

    let mut results: Vec<SearchResult> = source
        .restaurants_containing(needle)?
        .into_iter()
        .map(|r| SearchResult::Restaurant {
            id: r.restaurant.id,
            name: r.restaurant.name,
            city_name: r.city_name,
        })
        .collect();

    let mut seen = HashSet::new();
    for id in source.meal_ids_matching(needle)? {
        if !seen.insert(id) {
            continue;
        }
        // deleted between the two reads
        let Some(meal) = source.meal(id)? else {
            continue;
        };
        let (restaurant_name, city_name) = source.place_names(meal.restaurant_id).unwrap_or_else(|_| {
            (
                directory::UNKNOWN.to_string(),
                directory::UNKNOWN.to_string(),
            )
        });
        results.push(SearchResult::Meal(MealWithPlace {
            meal,
            restaurant_name,
            city_name,
        }));
    }

    Ok(results)
}

/// Results of one settled query.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchUpdate {
    pub generation: u64,
    pub query: String,
    pub results: Vec<SearchResult>,
}

pub struct Debouncer {
    window: Duration,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self { window }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Wait for the next query and keep replacing it with newer ones until
    /// the input stays quiet for the whole window. `None` once the sender is
    /// gone and nothing is pending.
    pub fn next_settled(&self, rx: &Receiver<String>) -> Option<String> {
        let first = rx.recv().ok()?;
        Some(self.settle(first, rx))
    }

    fn settle(&self, mut pending: String, rx: &Receiver<String>) -> String {
        loop {
            match rx.recv_timeout(self.window) {
                Ok(newer) => pending = newer,
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    return pending;
                }
            }
        }
    }

    /// Drive `search` from a stream of query edits. Results of a query are
    /// dropped if a newer edit arrived while it was running; `emit` only ever
    /// sees results of the latest settled query.
    pub fn run<S, F>(&self, rx: &Receiver<String>, source: &S, mut emit: F) -> AppResult<()>
    where
        S: SearchSource + ?Sized,
        F: FnMut(SearchUpdate),
    {
        let mut generation = 0;
        let mut next = self.next_settled(rx);

        while let Some(query) = next.take() {
            generation += 1;
            let results = search(source, &query)?;

            match rx.try_recv() {
                Ok(newer) => {
                    next = Some(self.settle(newer, rx));
                    continue;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => {}
            }

            emit(SearchUpdate {
                generation,
                query,
                results,
            });
            next = self.next_settled(rx);
        }

        Ok(())
    }
}
