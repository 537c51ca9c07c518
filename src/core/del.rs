use crate::core::journal::Journal;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::ui::messages::info;

pub struct DeleteLogic;

impl DeleteLogic {
    /// Delete a meal and, through the foreign key cascade, its dishes.
    pub fn apply(journal: &Journal, id: i64) -> AppResult<()> {
        let meal = journal.meal(id)?;
        let dish_count = meal.meal.dishes.len();

        journal.delete(id)?;

        ttlog_quiet(
            journal.conn(),
            "del",
            &format!("meal #{}", id),
            &format!(
                "{} @ {} ({} dish(es))",
                meal.meal.name, meal.restaurant_name, dish_count
            ),
        );
        info(format!(
            "Deleted meal #{} '{}' and {} dish(es)",
            id, meal.meal.name, dish_count
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::editor::{DishDraft, MealDraft};
    use crate::db::pool::DbPool;
    use crate::errors::AppError;
    use chrono::NaiveDate;

    #[test]
    fn delete_cascades_to_dishes() {
        let now = NaiveDate::from_ymd_opt(2025, 3, 2)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        let pool = DbPool::in_memory().unwrap();
        crate::db::initialize::init_db(&pool.conn).unwrap();
        let j = Journal::open(pool, now.date()).unwrap();

        let draft = MealDraft {
            restaurant: "Le Nord".into(),
            city: "Lyon".into(),
            name: "Lunch".into(),
            dishes: vec![
                DishDraft::parse_spec("Salade;starter;9").unwrap(),
                DishDraft::parse_spec("Poulet;main;19").unwrap(),
            ],
            ..Default::default()
        };
        let id = j.save(draft.validate(now).unwrap()).unwrap();

        DeleteLogic::apply(&j, id).unwrap();

        let dishes: i64 = j
            .conn()
            .query_row("SELECT COUNT(*) FROM dishes", [], |r| r.get(0))
            .unwrap();
        assert_eq!(dishes, 0);
        assert!(matches!(
            DeleteLogic::apply(&j, id),
            Err(AppError::MealNotFound(_))
        ));
    }
}
