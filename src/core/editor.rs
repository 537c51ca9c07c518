//! Meal editor drafts: raw user input, validated field by field before save.

use crate::errors::{AppError, AppResult, FieldError};
use crate::models::dish::{Dish, DishType};
use crate::models::meal::Meal;
use crate::models::money::Money;
use crate::utils::date::parse_date;
use crate::utils::time::parse_time;
use chrono::NaiveDateTime;

const MAX_RATING: f32 = 5.0;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DishDraft {
    pub name: String,
    pub kind: String,
    pub price: String,
    pub rating: String,
    pub description: String,
}

impl DishDraft {
    /// Split a `name;type;price[;rating[;description]]` command line spec.
    /// Values are checked later by [`MealDraft::validate`].
    pub fn parse_spec(spec: &str) -> AppResult<Self> {
        let mut parts = spec.splitn(5, ';').map(str::trim);
        let name = parts.next().unwrap_or_default();
        let (Some(kind), Some(price)) = (parts.next(), parts.next()) else {
            return Err(AppError::InvalidDishSpec(format!(
                "'{}' (expected name;type;price[;rating[;description]])",
                spec
            )));
        };

        Ok(Self {
            name: name.to_string(),
            kind: kind.to_string(),
            price: price.to_string(),
            rating: parts.next().unwrap_or_default().to_string(),
            description: parts.next().unwrap_or_default().to_string(),
        })
    }

    pub fn from_dish(d: &Dish) -> Self {
        Self {
            name: d.name.clone(),
            kind: d.kind.to_db_str().to_string(),
            price: d.price.to_string(),
            rating: d.rating.to_string(),
            description: d.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MealDraft {
    /// 0 for a new meal, the id of the meal being replaced otherwise.
    pub id: i64,
    pub restaurant: String,
    pub city: String,
    pub name: String,
    pub comment: String,
    /// Blank means "sum of the dishes".
    pub price: String,
    /// Blank means today.
    pub date: String,
    /// Blank means now.
    pub time: String,
    pub rating: String,
    pub photos: Vec<String>,
    pub dishes: Vec<DishDraft>,
}

/// A draft that passed validation. The restaurant is still referenced by
/// name; it is resolved (or created) at save time.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidMeal {
    pub restaurant: String,
    pub city: String,
    pub meal: Meal,
}

fn parse_rating(raw: &str) -> Option<f32> {
    if raw.trim().is_empty() {
        return Some(0.0);
    }
    let v: f32 = raw.trim().replace(',', ".").parse().ok()?;
    (v.is_finite() && (0.0..=MAX_RATING).contains(&v)).then_some(v)
}

fn required(errors: &mut Vec<FieldError>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, "must not be blank"));
    }
}

impl MealDraft {
    pub fn from_meal(meal: &Meal, restaurant: &str, city: &str) -> Self {
        Self {
            id: meal.id,
            restaurant: restaurant.to_string(),
            city: city.to_string(),
            name: meal.name.clone(),
            comment: meal.comment.clone(),
            price: meal.price.to_string(),
            date: meal.date_str(),
            time: meal.time_str(),
            rating: meal.rating.to_string(),
            photos: meal.photos.clone(),
            dishes: meal.dishes.iter().map(DishDraft::from_dish).collect(),
        }
    }

    /// Collect every field problem at once; the save is blocked if any.
    pub fn validate(&self, now: NaiveDateTime) -> Result<ValidMeal, Vec<FieldError>> {
        let mut errors = Vec::new();

        required(&mut errors, "restaurant", &self.restaurant);
        required(&mut errors, "city", &self.city);
        required(&mut errors, "name", &self.name);

        let date = if self.date.trim().is_empty() {
            Some(now.date())
        } else {
            parse_date(self.date.trim())
        };
        let date = match date {
            None => {
                errors.push(FieldError::new("date", "expected YYYY-MM-DD"));
                None
            }
            Some(d) if d > now.date() => {
                errors.push(FieldError::new("date", "must not be in the future"));
                None
            }
            d => d,
        };

        let time = if self.time.trim().is_empty() {
            parse_time(&now.format("%H:%M").to_string())
        } else {
            parse_time(self.time.trim())
        };
        if time.is_none() {
            errors.push(FieldError::new("time", "expected HH:MM"));
        }

        let rating = parse_rating(&self.rating);
        if rating.is_none() {
            errors.push(FieldError::new("rating", "expected a number between 0 and 5"));
        }

        if self.dishes.is_empty() {
            errors.push(FieldError::new("dishes", "add at least one dish"));
        }

        let mut dishes = Vec::with_capacity(self.dishes.len());
        for (i, d) in self.dishes.iter().enumerate() {
            let field = |name: &str| format!("dishes[{}].{}", i + 1, name);

            required(&mut errors, &field("name"), &d.name);

            let kind = DishType::from_code(&d.kind);
            if kind.is_none() {
                errors.push(FieldError::new(
                    field("type"),
                    format!("unknown dish type '{}'", d.kind),
                ));
            }

            let price = Money::parse(&d.price).ok();
            if price.is_none() {
                errors.push(FieldError::new(field("price"), "expected an amount like 12.50"));
            }

            let rating = parse_rating(&d.rating);
            if rating.is_none() {
                errors.push(FieldError::new(
                    field("rating"),
                    "expected a number between 0 and 5",
                ));
            }

            if let (Some(kind), Some(price), Some(rating)) = (kind, price, rating) {
                dishes.push(
                    Dish::new(d.name.trim(), kind, price, rating)
                        .with_description(d.description.trim()),
                );
            }
        }

        let price = if self.price.trim().is_empty() {
            Some(dishes.iter().map(|d| d.price).sum::<Money>())
        } else {
            Money::parse(&self.price).ok()
        };
        if price.is_none() {
            errors.push(FieldError::new("price", "expected an amount like 12.50"));
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        match (date, time, rating, price) {
            (Some(date), Some(time), Some(rating), Some(price)) => Ok(ValidMeal {
                restaurant: self.restaurant.trim().to_string(),
                city: self.city.trim().to_string(),
                meal: Meal {
                    id: self.id,
                    restaurant_id: 0,
                    name: self.name.trim().to_string(),
                    comment: self.comment.trim().to_string(),
                    price,
                    timestamp: date.and_time(time),
                    rating,
                    photos: self
                        .photos
                        .iter()
                        .map(|p| p.trim())
                        .filter(|p| !p.is_empty())
                        .map(str::to_string)
                        .collect(),
                    dishes,
                },
            }),
            _ => Err(errors),
        }
    }
}
