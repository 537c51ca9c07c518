#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rml() -> Command {
    cargo_bin_cmd!("rmeallog")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rmeallog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// `rmeallog --db <db> --test <args…>`
pub fn rml_db(db_path: &str, args: &[&str]) -> Command {
    let mut cmd = rml();
    cmd.args(["--db", db_path, "--test"]).args(args);
    cmd
}

pub fn init(db_path: &str) {
    rml_db(db_path, &["init"]).assert().success();
}

/// Add a meal through the CLI; `extra` carries dates, ratings and dishes.
pub fn add_meal(db_path: &str, restaurant: &str, city: &str, name: &str, extra: &[&str]) {
    let mut args = vec![
        "add",
        "--restaurant",
        restaurant,
        "--city",
        city,
        "--name",
        name,
    ];
    args.extend_from_slice(extra);
    rml_db(db_path, &args).assert().success();
}

/// Local date `days` days ago, as YYYY-MM-DD.
pub fn days_ago(days: i64) -> String {
    (chrono::Local::now().date_naive() - chrono::Duration::days(days))
        .format("%Y-%m-%d")
        .to_string()
}

/// Init a DB with the lunch from the statistics example (7.00 + 18.50 + 8.50)
/// today and a pizza dinner ten days ago.
pub fn init_db_with_data(db_path: &str) {
    init(db_path);

    add_meal(
        db_path,
        "Chez Paul",
        "Lyon",
        "Sunday lunch",
        &[
            "--time",
            "00:01",
            "--rating",
            "4",
            "--dish",
            "Terrine;starter;7",
            "--dish",
            "Quenelle;main;18.50;4.5;pike quenelle, sauce Nantua",
            "--dish",
            "Saint-Marcellin;cheese;8.50;4",
        ],
    );

    let ten_days_ago = days_ago(10);
    add_meal(
        db_path,
        "Pizza Palace",
        "Paris",
        "Friday night",
        &[
            "--date",
            &ten_days_ago,
            "--time",
            "21:00",
            "--rating",
            "3",
            "--dish",
            "Margherita;main;11",
        ],
    );
}

pub fn count_rows(db_path: &str, table: &str) -> i64 {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))
        .expect("count")
}
