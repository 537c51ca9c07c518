use super::money::Money;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DishType {
    Aperitif,
    Starter,
    Main,
    Side,
    Cheese,
    Dessert,
    Drink,
}

impl DishType {
    pub const ALL: [DishType; 7] = [
        DishType::Aperitif,
        DishType::Starter,
        DishType::Main,
        DishType::Side,
        DishType::Cheese,
        DishType::Dessert,
        DishType::Drink,
    ];

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            DishType::Aperitif => "aperitif",
            DishType::Starter => "starter",
            DishType::Main => "main",
            DishType::Side => "side",
            DishType::Cheese => "cheese",
            DishType::Dessert => "dessert",
            DishType::Drink => "drink",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.to_db_str() == s)
    }

    /// Helper: accept user input in any case
    pub fn from_code(code: &str) -> Option<Self> {
        Self::from_db_str(&code.trim().to_lowercase())
    }

    pub fn label(&self) -> &'static str {
        match self {
            DishType::Aperitif => "Aperitif",
            DishType::Starter => "Starter",
            DishType::Main => "Main",
            DishType::Side => "Side",
            DishType::Cheese => "Cheese",
            DishType::Dessert => "Dessert",
            DishType::Drink => "Drink",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dish {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub rating: f32,
    pub kind: DishType,
}

impl Dish {
    pub fn new(name: &str, kind: DishType, price: Money, rating: f32) -> Self {
        Self {
            id: 0,
            name: name.to_string(),
            description: String::new(),
            price,
            rating,
            kind,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dish_type_codes_are_case_insensitive() {
        assert_eq!(DishType::from_code("Cheese"), Some(DishType::Cheese));
        assert_eq!(DishType::from_code(" MAIN "), Some(DishType::Main));
        assert_eq!(DishType::from_code("snack"), None);
    }
}
