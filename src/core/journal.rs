//! Journal application state.
//!
//! The journal owns the database handle and publishes a fresh meal snapshot
//! after every write. List and profile views are derived observables over
//! that snapshot, so they never need manual invalidation.

use crate::core::calculator::aggregation::{MonthBounds, MonthlyStats, first_meal_month};
use crate::core::calculator::grouping::{MealGroup, group_meals};
use crate::core::editor::ValidMeal;
use crate::core::observable::Observable;
use crate::core::search::{SearchResult, SqliteSource, search};
use crate::db::directory::{UNKNOWN, get_or_create_city, get_or_create_restaurant, list_restaurants};
use crate::db::pool::DbPool;
use crate::db::prefs::{load_preferences, save_sort_mode, save_sort_order};
use crate::db::queries::{delete_meal, load_all_meals, save_meal};
use crate::db::searches::{list_recent_searches, save_recent_search};
use crate::errors::{AppError, AppResult};
use crate::models::meal::MealWithPlace;
use crate::models::money::Money;
use crate::models::month::YearMonth;
use crate::models::preferences::{SortMode, SortOrder, UserPreferences};
use crate::models::recent_search::RecentSearch;
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::Connection;
use serde::Serialize;
use std::collections::HashMap;
use std::rc::Rc;

pub type Snapshot = Rc<Vec<MealWithPlace>>;

/// Every meal, newest first, with restaurant and city names resolved.
pub fn load_snapshot(conn: &Connection) -> AppResult<Vec<MealWithPlace>> {
    let places: HashMap<i64, (String, String)> = list_restaurants(conn)?
        .into_iter()
        .map(|r| (r.restaurant.id, (r.restaurant.name, r.city_name)))
        .collect();

    Ok(load_all_meals(conn)?
        .into_iter()
        .map(|meal| {
            let (restaurant_name, city_name) = places
                .get(&meal.restaurant_id)
                .cloned()
                .unwrap_or_else(|| (UNKNOWN.to_string(), UNKNOWN.to_string()));
            MealWithPlace {
                meal,
                restaurant_name,
                city_name,
            }
        })
        .collect())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopRestaurant {
    pub restaurant_id: i64,
    pub name: String,
    pub city_name: String,
    pub total: Money,
    pub meal_count: usize,
}

/// Profile screen content for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileView {
    pub stats: MonthlyStats,
    pub top_restaurants: Vec<TopRestaurant>,
    pub has_previous: bool,
    pub has_next: bool,
}

impl ProfileView {
    fn build(meals: &[MealWithPlace], month: YearMonth, bounds: MonthBounds, top_n: usize) -> Self {
        let stats = MonthlyStats::compute(meals, month, top_n);
        let top_restaurants = stats
            .top_restaurants
            .iter()
            .map(|spend| {
                let place = meals
                    .iter()
                    .find(|m| m.meal.restaurant_id == spend.restaurant_id);
                TopRestaurant {
                    restaurant_id: spend.restaurant_id,
                    name: place.map_or(UNKNOWN.to_string(), |m| m.restaurant_name.clone()),
                    city_name: place.map_or(UNKNOWN.to_string(), |m| m.city_name.clone()),
                    total: spend.total,
                    meal_count: spend.meal_count,
                }
            })
            .collect();

        Self {
            stats,
            top_restaurants,
            has_previous: bounds.previous(month).is_some(),
            has_next: bounds.next(month).is_some(),
        }
    }
}

pub struct Journal {
    pool: DbPool,
    meals: Observable<Snapshot>,
    preferences: Observable<UserPreferences>,
    month: Observable<YearMonth>,
    current_month: YearMonth,
    query: String,
}

impl Journal {
    /// Load the first snapshot and preferences. The selected month starts at
    /// the month of `today`.
    pub fn open(pool: DbPool, today: NaiveDate) -> AppResult<Self> {
        let current_month = YearMonth::of(today);
        let meals = Observable::with_value(Rc::new(load_snapshot(&pool.conn)?));
        let preferences = Observable::with_value(load_preferences(&pool.conn)?);

        Ok(Self {
            pool,
            meals,
            preferences,
            month: Observable::with_value(current_month),
            current_month,
            query: String::new(),
        })
    }

    pub fn conn(&self) -> &Connection {
        &self.pool.conn
    }

    pub fn meals(&self) -> &Observable<Snapshot> {
        &self.meals
    }

    pub fn snapshot(&self) -> Snapshot {
        self.meals.latest().unwrap_or_default()
    }

    pub fn refresh(&self) -> AppResult<()> {
        self.meals.publish(Rc::new(load_snapshot(self.conn())?));
        Ok(())
    }

    /// Resolve (or create) the city and restaurant, then upsert the meal.
    pub fn save(&self, valid: ValidMeal) -> AppResult<i64> {
        let city = get_or_create_city(self.conn(), &valid.city)?;
        let restaurant = get_or_create_restaurant(self.conn(), &valid.restaurant, city.id)?;

        let mut meal = valid.meal;
        meal.restaurant_id = restaurant.id;
        let id = save_meal(self.conn(), &meal)?;

        self.refresh()?;
        Ok(id)
    }

    pub fn delete(&self, id: i64) -> AppResult<()> {
        delete_meal(self.conn(), id)?;
        self.refresh()
    }

    pub fn meal(&self, id: i64) -> AppResult<MealWithPlace> {
        self.snapshot()
            .iter()
            .find(|m| m.meal.id == id)
            .cloned()
            .ok_or(AppError::MealNotFound(id))
    }

    // ---------------------------
    // List
    // ---------------------------

    pub fn preferences(&self) -> UserPreferences {
        self.preferences.latest().unwrap_or_default()
    }

    pub fn set_sort_mode(&self, mode: SortMode) -> AppResult<()> {
        save_sort_mode(self.conn(), mode)?;
        self.preferences.publish(UserPreferences {
            sort_mode: mode,
            ..self.preferences()
        });
        Ok(())
    }

    pub fn set_sort_order(&self, order: SortOrder) -> AppResult<()> {
        save_sort_order(self.conn(), order)?;
        self.preferences.publish(UserPreferences {
            sort_order: order,
            ..self.preferences()
        });
        Ok(())
    }

    /// Grouped meal list, recomputed on every snapshot or preference change.
    pub fn list_view(&self, now: NaiveDateTime) -> Observable<Vec<MealGroup>> {
        self.meals
            .combine(&self.preferences, move |meals: &Snapshot, prefs: &UserPreferences| {
                group_meals(meals, now, *prefs)
            })
    }

    pub fn grouped(&self, now: NaiveDateTime) -> Vec<MealGroup> {
        self.list_view(now).latest().unwrap_or_default()
    }

    // ---------------------------
    // Profile
    // ---------------------------

    pub fn month(&self) -> YearMonth {
        self.month.latest().unwrap_or(self.current_month)
    }

    pub fn month_bounds(&self) -> MonthBounds {
        MonthBounds::new(first_meal_month(&self.snapshot()), self.current_month)
    }

    /// Select a month; it is clamped to the navigable range.
    pub fn set_month(&self, month: YearMonth) {
        self.month.publish(self.month_bounds().clamp(month));
    }

    /// Step one month back. Returns false when already at the first month.
    pub fn previous_month(&self) -> bool {
        match self.month_bounds().previous(self.month()) {
            Some(m) => {
                self.month.publish(m);
                true
            }
            None => false,
        }
    }

    pub fn next_month(&self) -> bool {
        match self.month_bounds().next(self.month()) {
            Some(m) => {
                self.month.publish(m);
                true
            }
            None => false,
        }
    }

    pub fn profile_view(&self, top_n: usize) -> Observable<ProfileView> {
        let current = self.current_month;
        self.meals
            .combine(&self.month, move |meals: &Snapshot, month: &YearMonth| {
                let bounds = MonthBounds::new(first_meal_month(meals), current);
                ProfileView::build(meals, *month, bounds, top_n)
            })
    }

    pub fn profile(&self, top_n: usize) -> ProfileView {
        let meals = self.snapshot();
        ProfileView::build(&meals, self.month(), self.month_bounds(), top_n)
    }

    // ---------------------------
    // Search
    // ---------------------------

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn search(&mut self, query: &str) -> AppResult<Vec<SearchResult>> {
        self.query = query.to_string();
        search(&SqliteSource { conn: self.conn() }, query)
    }

    /// Explicit submission: run the search and remember the query.
    pub fn submit_search(&mut self, query: &str, at: NaiveDateTime) -> AppResult<Vec<SearchResult>> {
        let results = self.search(query)?;
        if !query.trim().is_empty() {
            save_recent_search(self.conn(), query.trim(), at)?;
        }
        Ok(results)
    }

    pub fn recent_searches(&self) -> AppResult<Vec<RecentSearch>> {
        list_recent_searches(self.conn())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::calculator::grouping::{DateCategory, GroupKey};
    use crate::core::editor::{DishDraft, MealDraft};
    use chrono::Duration;
    use std::cell::RefCell;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 15)
            .unwrap()
            .and_hms_opt(20, 0, 0)
            .unwrap()
    }

    fn journal() -> Journal {
        let pool = DbPool::in_memory().unwrap();
        crate::db::initialize::init_db(&pool.conn).unwrap();
        Journal::open(pool, now().date()).unwrap()
    }

    fn add(j: &Journal, restaurant: &str, city: &str, at: NaiveDateTime, dishes: &[&str]) -> i64 {
        let draft = MealDraft {
            restaurant: restaurant.into(),
            city: city.into(),
            name: format!("Dinner at {}", restaurant),
            date: at.format("%Y-%m-%d").to_string(),
            time: at.format("%H:%M").to_string(),
            dishes: dishes.iter().map(|s| DishDraft::parse_spec(s).unwrap()).collect(),
            ..Default::default()
        };
        j.save(draft.validate(now()).unwrap()).unwrap()
    }

    #[test]
    fn writes_publish_new_snapshots() {
        let j = journal();
        let sizes = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&sizes);
        j.meals().subscribe(move |m: &Snapshot| s.borrow_mut().push(m.len()));

        let id = add(&j, "Chez Paul", "Lyon", now(), &["Soup;starter;6"]);
        j.delete(id).unwrap();

        assert_eq!(*sizes.borrow(), vec![0, 1, 0]);
    }

    #[test]
    fn list_view_follows_preferences() {
        let j = journal();
        add(&j, "Chez Paul", "Lyon", now(), &["Soup;starter;6"]);
        add(&j, "Bouchon", "Lyon", now() - Duration::days(1), &["Tablier;main;18"]);

        let view = j.list_view(now());
        let keys = |v: &Observable<Vec<MealGroup>>| {
            v.latest().unwrap().into_iter().map(|g| g.key).collect::<Vec<_>>()
        };
        assert_eq!(
            keys(&view),
            vec![
                GroupKey::Date(DateCategory::Today),
                GroupKey::Date(DateCategory::Yesterday)
            ]
        );

        j.set_sort_mode(SortMode::Restaurant).unwrap();
        let titles = |v: &Observable<Vec<MealGroup>>| {
            v.latest().unwrap().into_iter().map(|g| g.title).collect::<Vec<_>>()
        };
        assert_eq!(titles(&view), vec!["Chez Paul (Lyon)", "Bouchon (Lyon)"]);

        j.set_sort_order(SortOrder::Asc).unwrap();
        assert_eq!(titles(&view), vec!["Bouchon (Lyon)", "Chez Paul (Lyon)"]);

        assert_eq!(load_preferences(j.conn()).unwrap().sort_mode, SortMode::Restaurant);
    }

    #[test]
    fn profile_and_month_navigation() {
        let j = journal();
        add(&j, "Chez Paul", "Lyon", now(), &["Terrine;starter;7", "Quenelle;main;18.50", "Fromage;cheese;8.50"]);
        add(&j, "Chez Paul", "Lyon", now() - Duration::days(40), &["Soup;starter;6"]);

        let view = j.profile_view(3);
        let p = view.latest().unwrap();
        assert_eq!(p.stats.spending.to_string(), "34.00");
        assert_eq!(p.stats.new_restaurants, 0);
        assert_eq!(p.top_restaurants[0].name, "Chez Paul");
        assert!(p.has_previous);
        assert!(!p.has_next);

        assert!(j.previous_month());
        assert!(!j.previous_month());
        let p = view.latest().unwrap();
        assert_eq!(p.stats.month.to_string(), "2025-05");
        assert_eq!(p.stats.new_restaurants, 1);

        j.set_month(YearMonth::parse("2030-01").unwrap());
        assert_eq!(j.month().to_string(), "2025-06");
    }

    #[test]
    fn submitted_searches_are_remembered() {
        let mut j = journal();
        add(&j, "Pizza Palace", "Paris", now(), &["Margherita;main;11"]);

        // The restaurant matches by name and so does its meal ("Dinner at Pizza Palace").
        let results = j.submit_search("pizza", now()).unwrap();
        assert_eq!(results.len(), 2);
        assert!(matches!(results[0], SearchResult::Restaurant { .. }));
        assert!(matches!(results[1], SearchResult::Meal(_)));
        assert_eq!(j.query(), "pizza");

        j.search("marg").unwrap();
        let recent = j.recent_searches().unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].query, "pizza");
    }

    #[test]
    fn missing_meal_is_an_error() {
        let j = journal();
        assert!(matches!(j.meal(42), Err(AppError::MealNotFound(42))));
        assert!(matches!(j.delete(42), Err(AppError::MealNotFound(42))));
    }
}
