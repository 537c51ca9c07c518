use crate::models::meal::MealWithPlace;
use serde::Serialize;

/// Nested export shape used for JSON.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct MealExport {
    pub id: i64,
    pub date: String,
    pub time: String,
    pub restaurant: String,
    pub city: String,
    pub name: String,
    pub comment: String,
    pub price: String,
    pub rating: f32,
    pub photos: Vec<String>,
    pub dishes: Vec<DishExport>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct DishExport {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub price: String,
    pub rating: f32,
    pub description: String,
}

/// Flat CSV row: one per dish, meal columns repeated. A meal without dishes
/// still gets one row with empty dish columns.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct DishRow {
    pub meal_id: i64,
    pub date: String,
    pub time: String,
    pub restaurant: String,
    pub city: String,
    pub meal: String,
    pub meal_price: String,
    pub meal_rating: f32,
    pub dish: String,
    pub dish_type: String,
    pub dish_price: String,
    pub dish_rating: Option<f32>,
    pub description: String,
}

impl From<&MealWithPlace> for MealExport {
    fn from(m: &MealWithPlace) -> Self {
        Self {
            id: m.meal.id,
            date: m.meal.date_str(),
            time: m.meal.time_str(),
            restaurant: m.restaurant_name.clone(),
            city: m.city_name.clone(),
            name: m.meal.name.clone(),
            comment: m.meal.comment.clone(),
            price: m.meal.price.to_string(),
            rating: m.meal.rating,
            photos: m.meal.photos.clone(),
            dishes: m
                .meal
                .dishes
                .iter()
                .map(|d| DishExport {
                    name: d.name.clone(),
                    kind: d.kind.to_db_str().to_string(),
                    price: d.price.to_string(),
                    rating: d.rating,
                    description: d.description.clone(),
                })
                .collect(),
        }
    }
}

impl MealExport {
    pub fn rows(&self) -> Vec<DishRow> {
        let base = |dish: Option<&DishExport>| DishRow {
            meal_id: self.id,
            date: self.date.clone(),
            time: self.time.clone(),
            restaurant: self.restaurant.clone(),
            city: self.city.clone(),
            meal: self.name.clone(),
            meal_price: self.price.clone(),
            meal_rating: self.rating,
            dish: dish.map(|d| d.name.clone()).unwrap_or_default(),
            dish_type: dish.map(|d| d.kind.clone()).unwrap_or_default(),
            dish_price: dish.map(|d| d.price.clone()).unwrap_or_default(),
            dish_rating: dish.map(|d| d.rating),
            description: dish.map(|d| d.description.clone()).unwrap_or_default(),
        };

        if self.dishes.is_empty() {
            vec![base(None)]
        } else {
            self.dishes.iter().map(|d| base(Some(d))).collect()
        }
    }
}
