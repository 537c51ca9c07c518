use crate::core::editor::MealDraft;
use crate::core::journal::Journal;
use crate::db::log::ttlog_quiet;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use chrono::NaiveDateTime;

/// High-level business logic for the `add` command.
pub struct AddLogic;

impl AddLogic {
    /// Validate the draft and save it. `draft.id == 0` inserts a new meal,
    /// any other id fully replaces the stored one.
    pub fn apply(journal: &Journal, draft: &MealDraft, now: NaiveDateTime) -> AppResult<i64> {
        let editing = draft.id != 0;
        if editing && !crate::db::queries::meal_exists(journal.conn(), draft.id)? {
            return Err(AppError::MealNotFound(draft.id));
        }

        let valid = draft.validate(now).map_err(AppError::Validation)?;
        let summary = format!(
            "{} @ {} ({}), {} dish(es), {}",
            valid.meal.name,
            valid.restaurant,
            valid.city,
            valid.meal.dishes.len(),
            valid.meal.price
        );

        let id = journal.save(valid)?;

        let op = if editing { "edit" } else { "add" };
        ttlog_quiet(journal.conn(), op, &format!("meal #{}", id), &summary);

        if editing {
            success(format!("Meal #{} updated: {}", id, summary));
        } else {
            success(format!("Meal #{} added: {}", id, summary));
        }
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::editor::DishDraft;
    use crate::db::pool::DbPool;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 2)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap()
    }

    fn journal() -> Journal {
        let pool = DbPool::in_memory().unwrap();
        crate::db::initialize::init_db(&pool.conn).unwrap();
        Journal::open(pool, now().date()).unwrap()
    }

    fn draft() -> MealDraft {
        MealDraft {
            restaurant: "Le Nord".into(),
            city: "Lyon".into(),
            name: "Lunch".into(),
            dishes: vec![DishDraft::parse_spec("Pot-au-feu;main;21").unwrap()],
            ..Default::default()
        }
    }

    #[test]
    fn add_then_edit_replaces_the_meal() {
        let j = journal();
        let id = AddLogic::apply(&j, &draft(), now()).unwrap();

        let mut edit = draft();
        edit.id = id;
        edit.name = "Sunday lunch".into();
        edit.dishes.push(DishDraft::parse_spec("Tarte;dessert;7").unwrap());
        assert_eq!(AddLogic::apply(&j, &edit, now()).unwrap(), id);

        let stored = j.meal(id).unwrap();
        assert_eq!(stored.meal.name, "Sunday lunch");
        assert_eq!(stored.meal.dishes.len(), 2);
        assert_eq!(j.snapshot().len(), 1);

        let ops: Vec<String> = j
            .conn()
            .prepare("SELECT operation FROM log WHERE operation IN ('add', 'edit') ORDER BY id")
            .unwrap()
            .query_map([], |r| r.get(0))
            .unwrap()
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(ops, vec!["add", "edit"]);
    }

    #[test]
    fn invalid_draft_is_not_saved() {
        let j = journal();
        let mut d = draft();
        d.restaurant.clear();

        let err = AddLogic::apply(&j, &d, now()).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref f) if f[0].field == "restaurant"));
        assert!(j.snapshot().is_empty());
    }

    #[test]
    fn editing_a_missing_meal_fails() {
        let j = journal();
        let mut d = draft();
        d.id = 99;
        assert!(matches!(
            AddLogic::apply(&j, &d, now()),
            Err(AppError::MealNotFound(99))
        ));
    }
}
