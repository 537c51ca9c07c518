//! Monthly statistics over a meal snapshot.
//!
//! Every function is a pure projection: it takes the whole collection and
//! the target month and recomputes from scratch.

use crate::models::meal::Meal;
use crate::models::money::Money;
use crate::models::month::YearMonth;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

fn in_month<M: AsRef<Meal>>(meals: &[M], month: YearMonth) -> impl Iterator<Item = &Meal> {
    meals
        .iter()
        .map(<M as AsRef<Meal>>::as_ref)
        .filter(move |m| month.contains(&m.timestamp))
}

/// Sum of dish prices of the month's meals.
pub fn monthly_spending<M: AsRef<Meal>>(meals: &[M], month: YearMonth) -> Money {
    in_month(meals, month).map(Meal::dishes_total).sum()
}

pub fn meal_count<M: AsRef<Meal>>(meals: &[M], month: YearMonth) -> usize {
    in_month(meals, month).count()
}

pub fn unique_restaurant_count<M: AsRef<Meal>>(meals: &[M], month: YearMonth) -> usize {
    in_month(meals, month)
        .map(|m| m.restaurant_id)
        .collect::<HashSet<_>>()
        .len()
}

/// Mean of each meal's average dish rating. Meals without dishes count as 0;
/// an empty month is 0.
pub fn average_rating<M: AsRef<Meal>>(meals: &[M], month: YearMonth) -> f64 {
    let (sum, n) = in_month(meals, month).fold((0.0_f64, 0_usize), |(sum, n), m| {
        (sum + m.average_dish_rating(), n + 1)
    });
    if n == 0 { 0.0 } else { sum / n as f64 }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestaurantSpend {
    pub restaurant_id: i64,
    pub total: Money,
    pub meal_count: usize,
}

/// Restaurants ranked by the month's dish spend, highest first. Ties keep the
/// order in which the restaurants were first met in `meals`.
pub fn top_restaurants<M: AsRef<Meal>>(
    meals: &[M],
    month: YearMonth,
    n: usize,
) -> Vec<RestaurantSpend> {
    let mut ranked: Vec<RestaurantSpend> = Vec::new();
    let mut index: HashMap<i64, usize> = HashMap::new();

    for m in in_month(meals, month) {
        let idx = *index.entry(m.restaurant_id).or_insert_with(|| {
            ranked.push(RestaurantSpend {
                restaurant_id: m.restaurant_id,
                total: Money::ZERO,
                meal_count: 0,
            });
            ranked.len() - 1
        });
        ranked[idx].total += m.dishes_total();
        ranked[idx].meal_count += 1;
    }

    // sort_by is stable
    ranked.sort_by(|a, b| b.total.cmp(&a.total));
    ranked.truncate(n);
    ranked
}

/// Restaurants visited in `month` that never appear in a meal dated before
/// the first day of `month`.
pub fn new_restaurants_count<M: AsRef<Meal>>(meals: &[M], month: YearMonth) -> usize {
    let start = month.first_day();

    let seen_before: HashSet<i64> = meals
        .iter()
        .map(<M as AsRef<Meal>>::as_ref)
        .filter(|m| m.timestamp.date() < start)
        .map(|m| m.restaurant_id)
        .collect();

    in_month(meals, month)
        .map(|m| m.restaurant_id)
        .filter(|id| !seen_before.contains(id))
        .collect::<HashSet<_>>()
        .len()
}

/// Month of the earliest meal in the collection.
pub fn first_meal_month<M: AsRef<Meal>>(meals: &[M]) -> Option<YearMonth> {
    meals
        .iter()
        .map(|m| <M as AsRef<Meal>>::as_ref(m).timestamp)
        .min()
        .map(|ts| YearMonth::of(ts.date()))
}

/// All profile figures for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyStats {
    pub month: YearMonth,
    pub spending: Money,
    pub meal_count: usize,
    pub unique_restaurants: usize,
    pub average_rating: f64,
    pub top_restaurants: Vec<RestaurantSpend>,
    pub new_restaurants: usize,
}

impl MonthlyStats {
    pub fn compute<M: AsRef<Meal>>(meals: &[M], month: YearMonth, top_n: usize) -> Self {
        Self {
            month,
            spending: monthly_spending(meals, month),
            meal_count: meal_count(meals, month),
            unique_restaurants: unique_restaurant_count(meals, month),
            average_rating: average_rating(meals, month),
            top_restaurants: top_restaurants(meals, month, top_n),
            new_restaurants: new_restaurants_count(meals, month),
        }
    }
}

/// Range the profile's month picker may move in: from the first meal's
/// month (or the current month on an empty journal) up to the current month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthBounds {
    pub first: YearMonth,
    pub current: YearMonth,
}

impl MonthBounds {
    pub fn new(first_meal: Option<YearMonth>, current: YearMonth) -> Self {
        Self {
            first: first_meal.map_or(current, |f| f.min(current)),
            current,
        }
    }

    pub fn clamp(&self, month: YearMonth) -> YearMonth {
        month.clamp(self.first, self.current)
    }

    pub fn previous(&self, month: YearMonth) -> Option<YearMonth> {
        let p = month.previous();
        (p >= self.first).then_some(p)
    }

    pub fn next(&self, month: YearMonth) -> Option<YearMonth> {
        let n = month.next();
        (n <= self.current).then_some(n)
    }
}
