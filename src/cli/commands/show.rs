use crate::cli::commands::open_journal;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::meal::MealWithPlace;
use crate::ui::messages::header;
use crate::utils::colors::{color_for_rating, colorize_optional, paint};
use crate::utils::formatting::{bold, money, rating};
use crate::utils::table::{Column, Table};

const TEXT_WIDTH: usize = 72;

fn print_meal(m: &MealWithPlace, cfg: &Config) {
    let meal = &m.meal;

    header(format!("#{}  {}", meal.id, meal.name));
    println!(
        "{}  {} ({})",
        meal.timestamp.format(&format!("{} %H:%M", cfg.date_format)),
        bold(&m.restaurant_name),
        m.city_name
    );
    println!(
        "Price: {}   Rating: {}",
        money(meal.price, &cfg.currency),
        paint(color_for_rating(meal.rating), &rating(meal.rating))
    );

    if meal.comment.trim().is_empty() {
        println!("{}", colorize_optional("-"));
    } else {
        println!();
        for line in textwrap::wrap(&meal.comment, TEXT_WIDTH) {
            println!("  {}", line);
        }
    }

    if !meal.photos.is_empty() {
        println!("\nPhotos:");
        for p in &meal.photos {
            println!("  📷 {}", p);
        }
    }

    println!();
    let mut table = Table::new(vec![
        Column::left("Dish", 32),
        Column::left("Type", 10),
        Column::right("Price", 12),
        Column::left("Rating", 11),
    ]);
    for d in &meal.dishes {
        table.add_row(vec![
            d.name.clone(),
            d.kind.label().to_string(),
            money(d.price, &cfg.currency),
            rating(d.rating),
        ]);
    }
    print!("{}", table.render());

    for d in meal.dishes.iter().filter(|d| !d.description.trim().is_empty()) {
        let wrapped = textwrap::fill(
            &d.description,
            textwrap::Options::new(TEXT_WIDTH)
                .initial_indent("  ")
                .subsequent_indent("  "),
        );
        println!("\n{}:\n{}", bold(&d.name), wrapped);
    }

    println!(
        "\nDishes total: {}",
        money(meal.dishes_total(), &cfg.currency)
    );
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Show { id, json } = cmd {
        let journal = open_journal(cfg)?;
        let meal = journal.meal(*id)?;

        if *json {
            println!("{}", serde_json::to_string_pretty(&meal)?);
        } else {
            print_meal(&meal, cfg);
        }
    }
    Ok(())
}
