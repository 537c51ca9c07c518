//! Restaurant / city directory: exact lookups, get-or-create, prefix
//! autocomplete backed by the FTS5 side indexes.

use crate::errors::AppResult;
use crate::models::restaurant::{City, Restaurant, RestaurantWithCity};
use rusqlite::{Connection, OptionalExtension, Row, params};

/// Display name used whenever a reference cannot be resolved.
pub const UNKNOWN: &str = "Unknown";

fn map_city(row: &Row) -> rusqlite::Result<City> {
    Ok(City {
        id: row.get("id")?,
        name: row.get("name")?,
    })
}

fn map_restaurant_with_city(row: &Row) -> rusqlite::Result<RestaurantWithCity> {
    let city_name: Option<String> = row.get("city_name")?;
    Ok(RestaurantWithCity {
        restaurant: Restaurant {
            id: row.get("id")?,
            name: row.get("name")?,
            city_id: row.get("city_id")?,
        },
        city_name: city_name.unwrap_or_else(|| UNKNOWN.to_string()),
    })
}

/// Turn free user input into an FTS5 prefix query: every token becomes a
/// quoted prefix term. Returns `None` when nothing searchable is left.
pub fn fts_prefix_query(input: &str) -> Option<String> {
    let terms: Vec<String> = input
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| format!("\"{}\"*", t.replace('"', "\"\"")))
        .collect();

    if terms.is_empty() {
        None
    } else {
        Some(terms.join(" "))
    }
}

// ---------------------------
// Cities
// ---------------------------

/// Case-sensitive exact lookup.
pub fn find_city_by_name(conn: &Connection, name: &str) -> AppResult<Option<City>> {
    let city = conn
        .query_row(
            "SELECT id, name FROM cities WHERE name = ?1",
            [name],
            map_city,
        )
        .optional()?;
    Ok(city)
}

pub fn get_city(conn: &Connection, id: i64) -> AppResult<Option<City>> {
    let city = conn
        .query_row("SELECT id, name FROM cities WHERE id = ?1", [id], map_city)
        .optional()?;
    Ok(city)
}

pub fn get_or_create_city(conn: &Connection, name: &str) -> AppResult<City> {
    if let Some(city) = find_city_by_name(conn, name)? {
        return Ok(city);
    }
    conn.execute("INSERT INTO cities (name) VALUES (?1)", [name])?;
    Ok(City {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
    })
}

/// Autocomplete over city names (case-insensitive, any word prefix).
/// An empty prefix lists every city.
pub fn search_cities(conn: &Connection, prefix: &str, limit: usize) -> AppResult<Vec<City>> {
    let limit = limit as i64;
    let mut out = Vec::new();

    if prefix.trim().is_empty() {
        let mut stmt = conn.prepare(
            "SELECT id, name FROM cities ORDER BY name COLLATE NOCASE ASC LIMIT ?1",
        )?;
        for r in stmt.query_map([limit], map_city)? {
            out.push(r?);
        }
        return Ok(out);
    }

    let Some(query) = fts_prefix_query(prefix) else {
        return Ok(out);
    };

    let mut stmt = conn.prepare(
        "SELECT c.id, c.name
         FROM cities_fts f
         JOIN cities c ON c.id = f.rowid
         WHERE cities_fts MATCH ?1
         ORDER BY c.name COLLATE NOCASE ASC
         LIMIT ?2",
    )?;
    for r in stmt.query_map(params![query, limit], map_city)? {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------
// Restaurants
// ---------------------------

const RESTAURANT_SELECT: &str = "SELECT r.id, r.name, r.city_id, c.name AS city_name
     FROM restaurants r
     LEFT JOIN cities c ON c.id = r.city_id";

pub fn find_restaurant(conn: &Connection, name: &str, city_id: i64) -> AppResult<Option<Restaurant>> {
    let r = conn
        .query_row(
            "SELECT id, name, city_id FROM restaurants WHERE name = ?1 AND city_id = ?2",
            params![name, city_id],
            |row| {
                Ok(Restaurant {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    city_id: row.get(2)?,
                })
            },
        )
        .optional()?;
    Ok(r)
}

pub fn get_or_create_restaurant(conn: &Connection, name: &str, city_id: i64) -> AppResult<Restaurant> {
    if let Some(r) = find_restaurant(conn, name, city_id)? {
        return Ok(r);
    }
    conn.execute(
        "INSERT INTO restaurants (name, city_id) VALUES (?1, ?2)",
        params![name, city_id],
    )?;
    Ok(Restaurant {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
        city_id,
    })
}

pub fn get_restaurant(conn: &Connection, id: i64) -> AppResult<Option<RestaurantWithCity>> {
    let sql = format!("{RESTAURANT_SELECT} WHERE r.id = ?1");
    let r = conn
        .query_row(&sql, [id], map_restaurant_with_city)
        .optional()?;
    Ok(r)
}

pub fn list_restaurants(conn: &Connection) -> AppResult<Vec<RestaurantWithCity>> {
    let sql = format!("{RESTAURANT_SELECT} ORDER BY r.name COLLATE NOCASE ASC, r.id ASC");
    let mut stmt = conn.prepare(&sql)?;
    let mut out = Vec::new();
    for r in stmt.query_map([], map_restaurant_with_city)? {
        out.push(r?);
    }
    Ok(out)
}

/// Restaurants whose name contains `needle`, case-insensitively (Unicode
/// aware, so the comparison is done here rather than with SQL `LIKE`).
pub fn restaurants_containing(conn: &Connection, needle: &str) -> AppResult<Vec<RestaurantWithCity>> {
    let needle = needle.to_lowercase();
    Ok(list_restaurants(conn)?
        .into_iter()
        .filter(|r| r.restaurant.name.to_lowercase().contains(&needle))
        .collect())
}

/// Autocomplete over restaurant names, optionally limited to one city.
pub fn search_restaurants(
    conn: &Connection,
    prefix: &str,
    city_id: Option<i64>,
    limit: usize,
) -> AppResult<Vec<RestaurantWithCity>> {
    let limit = limit as i64;
    let mut out = Vec::new();

    if prefix.trim().is_empty() {
        let sql = format!(
            "{RESTAURANT_SELECT}
             WHERE (?1 IS NULL OR r.city_id = ?1)
             ORDER BY r.name COLLATE NOCASE ASC
             LIMIT ?2"
        );
        let mut stmt = conn.prepare(&sql)?;
        for r in stmt.query_map(params![city_id, limit], map_restaurant_with_city)? {
            out.push(r?);
        }
        return Ok(out);
    }

    let Some(query) = fts_prefix_query(prefix) else {
        return Ok(out);
    };

    let mut stmt = conn.prepare(
        "SELECT r.id, r.name, r.city_id, c.name AS city_name
         FROM restaurants_fts f
         JOIN restaurants r ON r.id = f.rowid
         LEFT JOIN cities c ON c.id = r.city_id
         WHERE restaurants_fts MATCH ?1
           AND (?2 IS NULL OR r.city_id = ?2)
         ORDER BY r.name COLLATE NOCASE ASC
         LIMIT ?3",
    )?;
    for r in stmt.query_map(params![query, city_id, limit], map_restaurant_with_city)? {
        out.push(r?);
    }
    Ok(out)
}

/// Restaurant and city display names for a restaurant id, "Unknown" for
/// whatever cannot be resolved.
pub fn place_names(conn: &Connection, restaurant_id: i64) -> AppResult<(String, String)> {
    Ok(match get_restaurant(conn, restaurant_id)? {
        Some(r) => (r.restaurant.name, r.city_name),
        None => (UNKNOWN.to_string(), UNKNOWN.to_string()),
    })
}
