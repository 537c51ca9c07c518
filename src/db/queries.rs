use crate::errors::{AppError, AppResult};
use crate::models::dish::{Dish, DishType};
use crate::models::meal::Meal;
use crate::models::money::Money;
use chrono::{Local, NaiveDateTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};
use std::collections::HashMap;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

fn conversion_error(err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(err))
}

/// Map a `meals` row; dishes are attached afterwards.
pub fn map_meal_row(row: &Row) -> Result<Meal> {
    let ts_str: String = row.get("timestamp")?;
    let timestamp = NaiveDateTime::parse_from_str(&ts_str, TIMESTAMP_FORMAT)
        .map_err(|_| conversion_error(AppError::InvalidDate(ts_str.clone())))?;

    let photos_str: String = row.get("photos")?;
    let photos: Vec<String> = serde_json::from_str(&photos_str)
        .map_err(|e| conversion_error(AppError::Json(e)))?;

    Ok(Meal {
        id: row.get("id")?,
        restaurant_id: row.get("restaurant_id")?,
        name: row.get("name")?,
        comment: row.get("comment")?,
        price: Money::from_cents(row.get("price")?),
        timestamp,
        rating: row.get::<_, f64>("rating")? as f32,
        photos,
        dishes: Vec::new(),
    })
}

pub fn map_dish_row(row: &Row) -> Result<Dish> {
    let kind_str: String = row.get("kind")?;
    let kind = DishType::from_db_str(&kind_str)
        .ok_or_else(|| conversion_error(AppError::InvalidDishType(kind_str.clone())))?;

    Ok(Dish {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        price: Money::from_cents(row.get("price")?),
        rating: row.get::<_, f64>("rating")? as f32,
        kind,
    })
}

fn load_dishes_by_meal(conn: &Connection) -> AppResult<HashMap<i64, Vec<Dish>>> {
    let mut stmt = conn.prepare(
        "SELECT id, meal_id, name, description, price, rating, kind
         FROM dishes
         ORDER BY meal_id ASC, position ASC, id ASC",
    )?;
    let rows = stmt.query_map([], |row| Ok((row.get::<_, i64>("meal_id")?, map_dish_row(row)?)))?;

    let mut out: HashMap<i64, Vec<Dish>> = HashMap::new();
    for r in rows {
        let (meal_id, dish) = r?;
        out.entry(meal_id).or_default().push(dish);
    }
    Ok(out)
}

fn load_dishes_for(conn: &Connection, meal_id: i64) -> AppResult<Vec<Dish>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, description, price, rating, kind
         FROM dishes
         WHERE meal_id = ?1
         ORDER BY position ASC, id ASC",
    )?;
    let rows = stmt.query_map([meal_id], map_dish_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Every meal with its dishes, newest first.
pub fn load_all_meals(conn: &Connection) -> AppResult<Vec<Meal>> {
    let mut dishes = load_dishes_by_meal(conn)?;

    let mut stmt = conn.prepare("SELECT * FROM meals ORDER BY timestamp DESC, id DESC")?;
    let rows = stmt.query_map([], map_meal_row)?;

    let mut out = Vec::new();
    for r in rows {
        let mut meal = r?;
        meal.dishes = dishes.remove(&meal.id).unwrap_or_default();
        out.push(meal);
    }
    Ok(out)
}

pub fn load_meal(conn: &Connection, id: i64) -> AppResult<Option<Meal>> {
    let meal = conn
        .query_row("SELECT * FROM meals WHERE id = ?1", [id], map_meal_row)
        .optional()?;

    match meal {
        Some(mut m) => {
            m.dishes = load_dishes_for(conn, m.id)?;
            Ok(Some(m))
        }
        None => Ok(None),
    }
}

pub fn meal_exists(conn: &Connection, id: i64) -> AppResult<bool> {
    let mut stmt = conn.prepare("SELECT 1 FROM meals WHERE id = ?1")?;
    Ok(stmt.exists([id])?)
}

/// Insert (`id == 0`) or fully replace a meal and its dishes in one
/// transaction. Returns the meal id.
pub fn save_meal(conn: &Connection, meal: &Meal) -> AppResult<i64> {
    let photos = serde_json::to_string(&meal.photos)?;
    let ts = meal.timestamp.format(TIMESTAMP_FORMAT).to_string();

    let tx = conn.unchecked_transaction()?;

    let meal_id = if meal.id == 0 {
        tx.execute(
            "INSERT INTO meals (restaurant_id, name, comment, price, timestamp, rating, photos, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                meal.restaurant_id,
                meal.name,
                meal.comment,
                meal.price.cents(),
                ts,
                meal.rating as f64,
                photos,
                Local::now().to_rfc3339(),
            ],
        )?;
        tx.last_insert_rowid()
    } else {
        let changed = tx.execute(
            "UPDATE meals
             SET restaurant_id = ?1, name = ?2, comment = ?3, price = ?4,
                 timestamp = ?5, rating = ?6, photos = ?7
             WHERE id = ?8",
            params![
                meal.restaurant_id,
                meal.name,
                meal.comment,
                meal.price.cents(),
                ts,
                meal.rating as f64,
                photos,
                meal.id,
            ],
        )?;
        if changed == 0 {
            return Err(AppError::MealNotFound(meal.id));
        }
        tx.execute("DELETE FROM dishes WHERE meal_id = ?1", [meal.id])?;
        meal.id
    };

    {
        let mut stmt = tx.prepare(
            "INSERT INTO dishes (meal_id, position, name, description, price, rating, kind)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )?;
        for (pos, d) in meal.dishes.iter().enumerate() {
            stmt.execute(params![
                meal_id,
                pos as i64,
                d.name,
                d.description,
                d.price.cents(),
                d.rating as f64,
                d.kind.to_db_str(),
            ])?;
        }
    }

    tx.commit()?;
    Ok(meal_id)
}

/// Delete a meal; its dishes go with it (ON DELETE CASCADE).
pub fn delete_meal(conn: &Connection, id: i64) -> AppResult<()> {
    let changed = conn.execute("DELETE FROM meals WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(AppError::MealNotFound(id));
    }
    Ok(())
}

/// Ids of meals whose name, or one of whose dishes' name or description,
/// contains `needle` (case-insensitive). One entry per matching row, so a
/// meal matching on several dishes shows up several times.
pub fn meal_ids_matching(conn: &Connection, needle: &str) -> AppResult<Vec<i64>> {
    let needle = needle.to_lowercase();
    let mut stmt = conn.prepare(
        "SELECT m.id, m.name, d.name, d.description
         FROM meals m
         LEFT JOIN dishes d ON d.meal_id = m.id
         ORDER BY m.timestamp DESC, m.id DESC, d.position ASC",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, Option<String>>(2)?,
            row.get::<_, Option<String>>(3)?,
        ))
    })?;

    let contains = |s: &str| s.to_lowercase().contains(&needle);

    let mut out = Vec::new();
    for r in rows {
        let (id, meal_name, dish_name, dish_desc) = r?;
        let hit = contains(&meal_name)
            || dish_name.as_deref().is_some_and(contains)
            || dish_desc.as_deref().is_some_and(contains);
        if hit {
            out.push(id);
        }
    }
    Ok(out)
}

pub fn count_meals(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM meals", [], |row| row.get(0))
}
