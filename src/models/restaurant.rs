use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct City {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub city_id: i64,
}

/// Restaurant row joined with its city name (directory listings).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestaurantWithCity {
    pub restaurant: Restaurant,
    pub city_name: String,
}
