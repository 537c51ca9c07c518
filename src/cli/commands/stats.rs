use crate::cli::commands::open_journal;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::journal::ProfileView;
use crate::errors::AppResult;
use crate::models::month::YearMonth;
use crate::ui::messages::{header, warning};
use crate::utils::colors::{CYAN, GREEN, GREY, RESET};
use crate::utils::formatting::{money, rating};
use crate::utils::table::{Column, Table};

fn print_profile(p: &ProfileView, cfg: &Config) {
    let s = &p.stats;

    header(format!("📅 {}", s.month));
    println!("{}• Spending:{} {}{}{}", CYAN, RESET, GREEN, money(s.spending, &cfg.currency), RESET);
    println!("{}• Meals:{} {}", CYAN, RESET, s.meal_count);
    println!("{}• Restaurants:{} {}", CYAN, RESET, s.unique_restaurants);
    println!("{}• New restaurants:{} {}", CYAN, RESET, s.new_restaurants);
    println!(
        "{}• Average rating:{} {}",
        CYAN,
        RESET,
        rating(s.average_rating as f32)
    );

    if !p.top_restaurants.is_empty() {
        println!("\n{}Top restaurants{}", CYAN, RESET);
        let mut t = Table::new(vec![
            Column::right("#", 3),
            Column::left("Restaurant", 36),
            Column::right("Meals", 5),
            Column::right("Spent", 14),
        ]);
        for (i, r) in p.top_restaurants.iter().enumerate() {
            t.add_row(vec![
                (i + 1).to_string(),
                format!("{} ({})", r.name, r.city_name),
                r.meal_count.to_string(),
                money(r.total, &cfg.currency),
            ]);
        }
        print!("{}", t.render());
    }

    let prev = if p.has_previous {
        format!("◀ {}", s.month.previous())
    } else {
        format!("{GREY}◀{RESET}")
    };
    let next = if p.has_next {
        format!("{} ▶", s.month.next())
    } else {
        format!("{GREY}▶{RESET}")
    };
    println!("\n{}   {}", prev, next);
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stats { month, top, json } = cmd {
        let journal = open_journal(cfg)?;

        if let Some(raw) = month {
            let requested = YearMonth::parse(raw)?;
            journal.set_month(requested);
            // JSON consumers read the effective month from `stats.month`.
            if journal.month() != requested && !*json {
                warning(format!(
                    "{} is outside the journal ({} to {}), showing {}",
                    requested,
                    journal.month_bounds().first,
                    journal.month_bounds().current,
                    journal.month()
                ));
            }
        }

        let profile = journal.profile(top.unwrap_or(cfg.top_restaurants));

        if *json {
            println!("{}", serde_json::to_string_pretty(&profile)?);
        } else {
            print_profile(&profile, cfg);
        }
    }
    Ok(())
}
