use crate::cli::commands::open_journal;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::grouping::MealGroup;
use crate::errors::AppResult;
use crate::ui::messages::{header, info, separator};
use crate::utils::colors::{color_for_rating, paint};
use crate::utils::date;
use crate::utils::formatting::{money, stars};
use crate::utils::table::{Column, Table};

fn render_group(group: &MealGroup, cfg: &Config) -> String {
    let mut table = Table::new(vec![
        Column::right("ID", 6),
        Column::left("Date", 16),
        Column::left("Meal", 28),
        Column::left("Restaurant", 32),
        Column::right("Price", 12),
        Column::left("Rating", 6),
    ]);

    for m in &group.meals {
        table.add_row(vec![
            m.meal.id.to_string(),
            m.meal
                .timestamp
                .format(&format!("{} %H:%M", cfg.date_format))
                .to_string(),
            m.meal.name.clone(),
            format!("{} ({})", m.restaurant_name, m.city_name),
            money(m.meal.price, &cfg.currency),
            stars(m.meal.rating),
        ]);
    }

    // colour after layout
    let mut out = String::new();
    for (i, line) in table.render().lines().enumerate() {
        if i > 0
            && let Some(m) = group.meals.get(i - 1)
        {
            let s = stars(m.meal.rating);
            out.push_str(&line.replacen(&s, &paint(color_for_rating(m.meal.rating), &s), 1));
        } else {
            out.push_str(line);
        }
        out.push('\n');
    }
    out
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { sort, order } = cmd {
        let journal = open_journal(cfg)?;

        if let Some(mode) = sort {
            journal.set_sort_mode(*mode)?;
        }
        if let Some(order) = order {
            journal.set_sort_order(*order)?;
        }

        let groups = journal.grouped(date::now());
        if groups.is_empty() {
            info("No meals yet. Add one with `rmeallog add`.");
            return Ok(());
        }

        let prefs = journal.preferences();
        info(format!(
            "Grouped by {} ({})",
            prefs.sort_mode.as_str(),
            prefs.sort_order.as_str()
        ));

        for g in &groups {
            println!();
            header(format!("{} · {} meal(s)", g.title, g.meals.len()));
            separator(&cfg.separator_char, 40);
            print!("{}", render_group(g, cfg));
        }
    }
    Ok(())
}
