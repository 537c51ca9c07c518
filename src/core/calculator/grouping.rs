//! Grouping engine behind the meal list.
//!
//! Default mode buckets meals by recency; the restaurant and rating modes
//! replace the buckets with one group per restaurant / per whole star.

use crate::models::meal::MealWithPlace;
use crate::models::preferences::{SortMode, SortOrder, UserPreferences};
use chrono::{NaiveDate, NaiveDateTime};
use std::cmp::Ordering;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DateCategory {
    Today,
    Yesterday,
    ThisWeek,
    ThisMonth,
    Older,
}

impl DateCategory {
    pub const ORDER: [DateCategory; 5] = [
        DateCategory::Today,
        DateCategory::Yesterday,
        DateCategory::ThisWeek,
        DateCategory::ThisMonth,
        DateCategory::Older,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DateCategory::Today => "Today",
            DateCategory::Yesterday => "Yesterday",
            DateCategory::ThisWeek => "This Week",
            DateCategory::ThisMonth => "This Month",
            DateCategory::Older => "Older",
        }
    }

    /// Today/Yesterday compare calendar days; the other buckets count days
    /// (≤7, ≤30) rather than following calendar weeks or months.
    pub fn of(ts: &NaiveDateTime, today: NaiveDate) -> Self {
        let day = ts.date();
        if day == today {
            return DateCategory::Today;
        }
        if today.pred_opt() == Some(day) {
            return DateCategory::Yesterday;
        }

        let age = (today - day).num_days();
        if age <= 7 {
            DateCategory::ThisWeek
        } else if age <= 30 {
            DateCategory::ThisMonth
        } else {
            DateCategory::Older
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupKey {
    Date(DateCategory),
    Restaurant(i64),
    Rating(u8),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MealGroup {
    pub key: GroupKey,
    pub title: String,
    pub meals: Vec<MealWithPlace>,
}

fn newest_first(a: &MealWithPlace, b: &MealWithPlace) -> Ordering {
    b.meal
        .timestamp
        .cmp(&a.meal.timestamp)
        .then_with(|| b.meal.id.cmp(&a.meal.id))
}

/// Recency buckets in fixed order; empty buckets are left out. `order`
/// only flips the meal order inside each bucket.
pub fn group_by_date(
    meals: &[MealWithPlace],
    now: NaiveDateTime,
    order: SortOrder,
) -> Vec<MealGroup> {
    let today = now.date();
    let mut buckets: HashMap<DateCategory, Vec<MealWithPlace>> = HashMap::new();

    for m in meals {
        buckets
            .entry(DateCategory::of(&m.meal.timestamp, today))
            .or_default()
            .push(m.clone());
    }

    DateCategory::ORDER
        .iter()
        .filter_map(|cat| {
            let mut list = buckets.remove(cat)?;
            list.sort_by(newest_first);
            if order == SortOrder::Asc {
                list.reverse();
            }
            Some(MealGroup {
                key: GroupKey::Date(*cat),
                title: cat.label().to_string(),
                meals: list,
            })
        })
        .collect()
}

/// One group per restaurant, ordered by restaurant name (then city).
pub fn group_by_restaurant(meals: &[MealWithPlace], order: SortOrder) -> Vec<MealGroup> {
    let mut groups: Vec<MealGroup> = Vec::new();
    let mut index: HashMap<i64, usize> = HashMap::new();

    for m in meals {
        let idx = *index.entry(m.meal.restaurant_id).or_insert_with(|| {
            groups.push(MealGroup {
                key: GroupKey::Restaurant(m.meal.restaurant_id),
                title: format!("{} ({})", m.restaurant_name, m.city_name),
                meals: Vec::new(),
            });
            groups.len() - 1
        });
        groups[idx].meals.push(m.clone());
    }

    let sort_key = |g: &MealGroup| {
        let first = &g.meals[0];
        (
            first.restaurant_name.to_lowercase(),
            first.city_name.to_lowercase(),
            first.meal.restaurant_id,
        )
    };

    groups.sort_by_key(sort_key);
    if order == SortOrder::Desc {
        groups.reverse();
    }
    for g in &mut groups {
        g.meals.sort_by(newest_first);
    }
    groups
}

/// One group per whole-star rating.
pub fn group_by_rating(meals: &[MealWithPlace], order: SortOrder) -> Vec<MealGroup> {
    let mut buckets: HashMap<u8, Vec<MealWithPlace>> = HashMap::new();
    for m in meals {
        buckets
            .entry(m.meal.rounded_rating())
            .or_default()
            .push(m.clone());
    }

    let mut keys: Vec<u8> = buckets.keys().copied().collect();
    keys.sort_unstable();
    if order == SortOrder::Desc {
        keys.reverse();
    }

    keys.into_iter()
        .filter_map(|stars| {
            let mut list = buckets.remove(&stars)?;
            list.sort_by(newest_first);
            Some(MealGroup {
                key: GroupKey::Rating(stars),
                title: format!("{} star{}", stars, if stars == 1 { "" } else { "s" }),
                meals: list,
            })
        })
        .collect()
}

pub fn group_meals(
    meals: &[MealWithPlace],
    now: NaiveDateTime,
    prefs: UserPreferences,
) -> Vec<MealGroup> {
    match prefs.sort_mode {
        SortMode::Date => group_by_date(meals, now, prefs.sort_order),
        SortMode::Restaurant => group_by_restaurant(meals, prefs.sort_order),
        SortMode::Rating => group_by_rating(meals, prefs.sort_order),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::meal::Meal;
    use crate::models::money::Money;
    use chrono::Duration;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 15)
            .unwrap()
            .and_hms_opt(13, 0, 0)
            .unwrap()
    }

    fn meal(id: i64, restaurant: (i64, &str), days_ago: i64, rating: f32) -> MealWithPlace {
        MealWithPlace {
            meal: Meal {
                id,
                restaurant_id: restaurant.0,
                name: format!("meal {id}"),
                comment: String::new(),
                price: Money::ZERO,
                timestamp: now() - Duration::days(days_ago),
                rating,
                photos: vec![],
                dishes: vec![],
            },
            restaurant_name: restaurant.1.to_string(),
            city_name: "Paris".to_string(),
        }
    }

    #[test]
    fn buckets_follow_fixed_order() {
        let meals = vec![
            meal(5, (1, "A"), 40, 3.0),
            meal(3, (1, "A"), 3, 3.0),
            meal(1, (1, "A"), 0, 3.0),
            meal(4, (1, "A"), 10, 3.0),
            meal(2, (1, "A"), 1, 3.0),
        ];

        let groups = group_by_date(&meals, now(), SortOrder::Desc);
        let titles: Vec<&str> = groups.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Today", "Yesterday", "This Week", "This Month", "Older"]
        );
        let ids: Vec<i64> = groups.iter().map(|g| g.meals[0].meal.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert!(groups.iter().all(|g| g.meals.len() == 1));
    }

    #[test]
    fn yesterday_is_a_calendar_day_not_24_hours() {
        // 23:30 the day before is less than 24h ago but still "Yesterday".
        let late = now().date().pred_opt().unwrap().and_hms_opt(23, 30, 0).unwrap();
        assert_eq!(DateCategory::of(&late, now().date()), DateCategory::Yesterday);

        let early = now().date().and_hms_opt(0, 5, 0).unwrap();
        assert_eq!(DateCategory::of(&early, now().date()), DateCategory::Today);
    }

    #[test]
    fn thresholds_are_inclusive_day_counts() {
        let today = now().date();
        let at = |d: i64| now() - Duration::days(d);
        assert_eq!(DateCategory::of(&at(7), today), DateCategory::ThisWeek);
        assert_eq!(DateCategory::of(&at(8), today), DateCategory::ThisMonth);
        assert_eq!(DateCategory::of(&at(30), today), DateCategory::ThisMonth);
        assert_eq!(DateCategory::of(&at(31), today), DateCategory::Older);
    }

    #[test]
    fn grouping_partitions_input() {
        let meals: Vec<MealWithPlace> = (0..60)
            .map(|i| meal(i, (i % 3, "R"), i * 2, (i % 6) as f32))
            .collect();

        for mode in [SortMode::Date, SortMode::Restaurant, SortMode::Rating] {
            let prefs = UserPreferences {
                sort_mode: mode,
                sort_order: SortOrder::Desc,
            };
            let groups = group_meals(&meals, now(), prefs);
            let mut ids: Vec<i64> = groups
                .iter()
                .flat_map(|g| g.meals.iter().map(|m| m.meal.id))
                .collect();
            ids.sort_unstable();
            assert_eq!(ids, (0..60).collect::<Vec<_>>(), "mode {mode:?}");
            assert!(groups.iter().all(|g| !g.meals.is_empty()));
        }
    }

    #[test]
    fn ascending_date_order_flips_inside_buckets() {
        let meals = vec![meal(1, (1, "A"), 2, 3.0), meal(2, (1, "A"), 4, 3.0)];
        let groups = group_by_date(&meals, now(), SortOrder::Asc);
        assert_eq!(groups.len(), 1);
        let ids: Vec<i64> = groups[0].meals.iter().map(|m| m.meal.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn restaurant_groups_sort_by_name() {
        let meals = vec![
            meal(1, (1, "bistro"), 1, 3.0),
            meal(2, (2, "Amici"), 2, 3.0),
            meal(3, (1, "bistro"), 0, 3.0),
        ];

        let asc = group_by_restaurant(&meals, SortOrder::Asc);
        assert_eq!(asc[0].title, "Amici (Paris)");
        assert_eq!(asc[1].meals.iter().map(|m| m.meal.id).collect::<Vec<_>>(), vec![3, 1]);

        let desc = group_by_restaurant(&meals, SortOrder::Desc);
        assert_eq!(desc[0].title, "bistro (Paris)");
    }

    #[test]
    fn rating_groups_use_rounded_stars() {
        let meals = vec![
            meal(1, (1, "A"), 1, 4.5),
            meal(2, (1, "A"), 2, 4.4),
            meal(3, (1, "A"), 3, 1.0),
        ];
        let groups = group_by_rating(&meals, SortOrder::Desc);
        let keys: Vec<GroupKey> = groups.iter().map(|g| g.key.clone()).collect();
        assert_eq!(
            keys,
            vec![GroupKey::Rating(5), GroupKey::Rating(4), GroupKey::Rating(1)]
        );
        assert_eq!(groups[2].title, "1 star");
    }
}
