use crate::cli::commands::open_journal;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::search::{Debouncer, MIN_QUERY_CHARS, SearchResult, SqliteSource, is_searchable};
use crate::db::log::ttlog_quiet;
use crate::db::searches::clear_recent_searches;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

fn print_results(results: &[SearchResult]) {
    if results.is_empty() {
        info("No results.");
        return;
    }
    for r in results {
        match r {
            SearchResult::Restaurant { name, city_name, .. } => {
                println!("🏠 {} ({})", name, city_name);
            }
            SearchResult::Meal(m) => {
                println!(
                    "🍽  #{} {} {} @ {} ({})",
                    m.meal.id,
                    m.meal.date_str(),
                    m.meal.name,
                    m.restaurant_name,
                    m.city_name
                );
            }
        }
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Search {
        query,
        save,
        recent,
        clear_recent,
        interactive,
    } = cmd
    {
        let mut journal = open_journal(cfg)?;

        if *clear_recent {
            let n = clear_recent_searches(journal.conn())?;
            success(format!("Cleared {} recent search(es).", n));
        }

        if *recent {
            let list = journal.recent_searches()?;
            if list.is_empty() {
                info("No recent searches.");
            }
            for s in list {
                println!("{}  {}", s.searched_at.format("%Y-%m-%d %H:%M"), s.query);
            }
        }

        if *interactive {
            let (tx, rx) = mpsc::channel::<String>();
            thread::spawn(move || {
                for line in io::stdin().lock().lines() {
                    match line {
                        Ok(l) => {
                            if tx.send(l).is_err() {
                                break;
                            }
                        }
                        Err(_) => break,
                    }
                }
            });

            info(format!(
                "Type to search (at least {} characters), Ctrl-D to quit.",
                MIN_QUERY_CHARS
            ));
            let debouncer = Debouncer::new(Duration::from_millis(cfg.search_debounce_ms));
            let source = SqliteSource { conn: journal.conn() };
            debouncer.run(&rx, &source, |update| {
                println!("\n🔎 {}", update.query.trim());
                print_results(&update.results);
            })?;
            return Ok(());
        }

        if let Some(q) = query {
            if !is_searchable(q) {
                info(format!("Type at least {} characters to search.", MIN_QUERY_CHARS));
                return Ok(());
            }

            let results = if *save {
                let r = journal.submit_search(q, chrono::Local::now().naive_local())?;
                ttlog_quiet(journal.conn(), "search", q.trim(), &format!("{} result(s)", r.len()));
                r
            } else {
                journal.search(q)?
            };
            print_results(&results);
        } else if !*recent && !*clear_recent {
            info("Nothing to search: give a QUERY, --recent or --interactive.");
        }
    }
    Ok(())
}
