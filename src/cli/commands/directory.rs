use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::directory::{find_city_by_name, search_cities, search_restaurants};
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, warning};

/// `restaurants` and `cities` autocomplete.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;

    match cmd {
        Commands::Restaurants {
            prefix,
            city,
            limit,
        } => {
            let city_id = match city {
                Some(name) => match find_city_by_name(&pool.conn, name.trim())? {
                    Some(c) => Some(c.id),
                    None => {
                        warning(format!("Unknown city '{}'", name));
                        return Ok(());
                    }
                },
                None => None,
            };

            let found = search_restaurants(&pool.conn, prefix, city_id, *limit)?;
            if found.is_empty() {
                info("No matching restaurants.");
            }
            for r in found {
                println!("{} ({})", r.restaurant.name, r.city_name);
            }
        }
        Commands::Cities { prefix, limit } => {
            let found = search_cities(&pool.conn, prefix, *limit)?;
            if found.is_empty() {
                info("No matching cities.");
            }
            for c in found {
                println!("{}", c.name);
            }
        }
        _ => {}
    }
    Ok(())
}
