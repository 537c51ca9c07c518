use super::dish::Dish;
use super::money::Money;
use super::month::YearMonth;
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Meal {
    pub id: i64,
    pub restaurant_id: i64,
    pub name: String,
    pub comment: String,
    pub price: Money, // ⇔ meals.price, the amount typed in the editor
    pub timestamp: NaiveDateTime,
    pub rating: f32,  // 0.0..=5.0 stars, half stars allowed
    pub photos: Vec<String>,
    pub dishes: Vec<Dish>,
}

impl Meal {
    pub fn month(&self) -> YearMonth {
        YearMonth::of(self.timestamp.date())
    }

    /// Sum of the dish prices. Statistics are based on this, not on `price`.
    pub fn dishes_total(&self) -> Money {
        self.dishes.iter().map(|d| d.price).sum()
    }

    /// Mean dish rating; a meal without dishes rates 0.
    pub fn average_dish_rating(&self) -> f64 {
        if self.dishes.is_empty() {
            return 0.0;
        }
        let total: f64 = self.dishes.iter().map(|d| d.rating as f64).sum();
        total / self.dishes.len() as f64
    }

    /// Star rating rounded to whole stars, the key of the "by rating" list.
    pub fn rounded_rating(&self) -> u8 {
        self.rating.round().clamp(0.0, 5.0) as u8
    }

    pub fn date_str(&self) -> String {
        self.timestamp.format("%Y-%m-%d").to_string()
    }

    pub fn time_str(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}

/// A meal joined with the display names of its restaurant and city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealWithPlace {
    pub meal: Meal,
    pub restaurant_name: String,
    pub city_name: String,
}

impl AsRef<Meal> for Meal {
    fn as_ref(&self) -> &Meal {
        self
    }
}

impl AsRef<Meal> for MealWithPlace {
    fn as_ref(&self) -> &Meal {
        &self.meal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::dish::DishType;

    fn meal_with(dishes: Vec<Dish>) -> Meal {
        Meal {
            id: 1,
            restaurant_id: 1,
            name: "Lunch".into(),
            comment: String::new(),
            price: Money::ZERO,
            timestamp: NaiveDateTime::parse_from_str("2025-03-04 12:30", "%Y-%m-%d %H:%M")
                .unwrap(),
            rating: 4.0,
            photos: vec![],
            dishes,
        }
    }

    #[test]
    fn zero_dish_meal_rates_zero() {
        assert_eq!(meal_with(vec![]).average_dish_rating(), 0.0);
        assert_eq!(meal_with(vec![]).dishes_total(), Money::ZERO);
    }

    #[test]
    fn totals_and_average_follow_dishes() {
        let meal = meal_with(vec![
            Dish::new("Soup", DishType::Starter, Money::from_cents(700), 3.0),
            Dish::new("Steak", DishType::Main, Money::from_cents(1850), 5.0),
        ]);
        assert_eq!(meal.dishes_total().to_string(), "25.50");
        assert_eq!(meal.average_dish_rating(), 4.0);
        assert_eq!(meal.month().to_string(), "2025-03");
    }
}
