use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{add_meal, init, rml_db, setup_test_db};

fn init_march(db_path: &str) {
    init(db_path);
    add_meal(
        db_path,
        "Chez Paul",
        "Lyon",
        "Sunday lunch",
        &[
            "--date",
            "2025-03-02",
            "--time",
            "12:30",
            "--dish",
            "Terrine;starter;7",
            "--dish",
            "Quenelle;main;18.50;4",
            "--dish",
            "Saint-Marcellin;cheese;8.50;5",
        ],
    );
}

#[test]
fn test_monthly_spending_example() {
    let db_path = setup_test_db("stats_monthly_spending");
    init_march(&db_path);

    rml_db(&db_path, &["stats", "--month", "2025-03"])
        .assert()
        .success()
        .stdout(contains("2025-03"))
        .stdout(contains("34.00"))
        .stdout(contains("Chez Paul (Lyon)"));

    let out = rml_db(&db_path, &["stats", "--month", "2025-03", "--json"])
        .output()
        .expect("run stats");
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).expect("json output");

    assert_eq!(json["stats"]["spending"], "34.00");
    assert_eq!(json["stats"]["meal_count"], 1);
    assert_eq!(json["stats"]["unique_restaurants"], 1);
    assert_eq!(json["stats"]["new_restaurants"], 1);
    assert_eq!(json["top_restaurants"][0]["name"], "Chez Paul");
    assert_eq!(json["has_previous"], false);
}

#[test]
fn test_new_restaurants_exclude_earlier_visits() {
    let db_path = setup_test_db("stats_new_restaurants");
    init_march(&db_path);
    add_meal(
        &db_path,
        "Chez Paul",
        "Lyon",
        "Back again",
        &["--date", "2025-04-10", "--dish", "Tablier;main;17"],
    );
    add_meal(
        &db_path,
        "Bouchon",
        "Lyon",
        "First time",
        &["--date", "2025-04-20", "--dish", "Cervelle;main;15"],
    );

    let out = rml_db(&db_path, &["stats", "--month", "2025-04", "--json", "--top", "1"])
        .output()
        .expect("run stats");
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).expect("json output");

    assert_eq!(json["stats"]["meal_count"], 2);
    assert_eq!(json["stats"]["new_restaurants"], 1);
    assert_eq!(json["top_restaurants"].as_array().map(Vec::len), Some(1));
    assert_eq!(json["top_restaurants"][0]["name"], "Chez Paul");
    assert_eq!(json["has_previous"], true);
}

#[test]
fn test_month_before_first_meal_is_clamped() {
    let db_path = setup_test_db("stats_clamped");
    init_march(&db_path);

    rml_db(&db_path, &["stats", "--month", "2024-12"])
        .assert()
        .success()
        .stdout(contains("outside the journal"))
        .stdout(contains("2025-03"));
}

#[test]
fn test_invalid_month_fails() {
    let db_path = setup_test_db("stats_invalid_month");
    init(&db_path);

    rml_db(&db_path, &["stats", "--month", "March"])
        .assert()
        .failure()
        .stderr(contains("Invalid month"));
}

#[test]
fn test_empty_journal_stats_are_zero() {
    let db_path = setup_test_db("stats_empty");
    init(&db_path);

    rml_db(&db_path, &["stats"])
        .assert()
        .success()
        .stdout(contains("0.00"))
        .stdout(contains("Top restaurants").not());
}

#[test]
fn test_stats_json_on_fresh_database_is_clean() {
    let db_path = setup_test_db("stats_fresh_json");

    let out = rml_db(&db_path, &["stats", "--json"])
        .output()
        .expect("run stats");
    assert!(out.status.success());

    let json: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("stdout is a single JSON document");
    assert_eq!(json["stats"]["meal_count"], 0);
    assert_eq!(json["stats"]["spending"], "0.00");
}
