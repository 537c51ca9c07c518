use crate::cli::commands::open_journal;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::add::AddLogic;
use crate::core::editor::{DishDraft, MealDraft};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::field_errors;
use crate::utils::date;

/// Add a meal, or fully replace one with `--edit ID`.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        restaurant,
        city,
        name,
        comment,
        date: meal_date,
        time,
        rating,
        price,
        photos,
        dishes,
        edit,
    } = cmd
    {
        let dishes = dishes
            .iter()
            .map(|spec| DishDraft::parse_spec(spec))
            .collect::<AppResult<Vec<_>>>()?;

        let draft = MealDraft {
            id: edit.unwrap_or(0),
            restaurant: restaurant.clone(),
            city: city.clone(),
            name: name.clone(),
            comment: comment.clone(),
            price: price.clone().unwrap_or_default(),
            date: meal_date.clone().unwrap_or_default(),
            time: time.clone().unwrap_or_default(),
            rating: rating.clone().unwrap_or_default(),
            photos: photos.clone(),
            dishes,
        };

        let journal = open_journal(cfg)?;

        match AddLogic::apply(&journal, &draft, date::now()) {
            Ok(_) => {}
            Err(AppError::Validation(errors)) => {
                field_errors(&errors);
                return Err(AppError::Validation(errors));
            }
            Err(e) => return Err(e),
        }
    }

    Ok(())
}
