use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{add_meal, count_rows, init, init_db_with_data, rml, rml_db, setup_test_db};

#[test]
fn test_init_seeds_cities() {
    let db_path = setup_test_db("init_seeds_cities");

    rml_db(&db_path, &["init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(count_rows(&db_path, "cities") >= 20);

    rml_db(&db_path, &["cities", "--prefix", "saint"])
        .assert()
        .success()
        .stdout(contains("Saint-Étienne"));
}

#[test]
fn test_add_and_list_by_date() {
    let db_path = setup_test_db("add_and_list_by_date");
    init_db_with_data(&db_path);

    rml_db(&db_path, &["list"])
        .assert()
        .success()
        .stdout(contains("Today · 1 meal(s)"))
        .stdout(contains("This Month · 1 meal(s)"))
        .stdout(contains("Chez Paul (Lyon)"))
        .stdout(contains("Yesterday").not());
}

#[test]
fn test_list_by_restaurant_is_persisted() {
    let db_path = setup_test_db("list_by_restaurant");
    init_db_with_data(&db_path);

    rml_db(&db_path, &["list", "--sort", "restaurant", "--order", "asc"])
        .assert()
        .success()
        .stdout(contains("Chez Paul (Lyon) · 1 meal(s)"))
        .stdout(contains("Pizza Palace (Paris) · 1 meal(s)"));

    rml_db(&db_path, &["prefs", "--print"])
        .assert()
        .success()
        .stdout(contains("sort_mode  = restaurant"))
        .stdout(contains("sort_order = asc"));
}

#[test]
fn test_list_by_rating() {
    let db_path = setup_test_db("list_by_rating");
    init_db_with_data(&db_path);

    rml_db(&db_path, &["prefs", "--sort", "rating"])
        .assert()
        .success();

    let out = rml_db(&db_path, &["list"]).output().expect("run list");
    let stdout = String::from_utf8_lossy(&out.stdout);

    let four = stdout.find("4 stars").expect("4 stars group");
    let three = stdout.find("3 stars").expect("3 stars group");
    assert!(four < three, "descending order puts 4 stars first");
}

#[test]
fn test_add_reports_every_invalid_field() {
    let db_path = setup_test_db("add_invalid_fields");
    init(&db_path);

    rml_db(
        &db_path,
        &[
            "add",
            "--restaurant",
            "",
            "--city",
            "Lyon",
            "--name",
            "Lunch",
            "--rating",
            "9",
            "--dish",
            "Soup;snack;abc",
        ],
    )
    .assert()
    .failure()
    .stderr(contains("restaurant: must not be blank"))
    .stderr(contains("rating: expected a number between 0 and 5"))
    .stderr(contains("dishes[1].type"))
    .stderr(contains("dishes[1].price"));

    assert_eq!(count_rows(&db_path, "meals"), 0);
}

#[test]
fn test_add_requires_a_dish() {
    let db_path = setup_test_db("add_requires_dish");
    init(&db_path);

    rml_db(
        &db_path,
        &["add", "--restaurant", "Le Nord", "--city", "Lyon", "--name", "Coffee"],
    )
    .assert()
    .failure()
    .stderr(contains("add at least one dish"));
}

#[test]
fn test_add_rejects_future_date() {
    let db_path = setup_test_db("add_future_date");
    init(&db_path);

    rml_db(
        &db_path,
        &[
            "add", "--restaurant", "Le Nord", "--city", "Lyon", "--name", "Someday",
            "--date", "2099-01-01", "--dish", "Soup;starter;6",
        ],
    )
    .assert()
    .failure()
    .stderr(contains("date: must not be in the future"));

    assert_eq!(count_rows(&db_path, "meals"), 0);
}

#[test]
fn test_list_rating_header_is_not_truncated() {
    let db_path = setup_test_db("list_rating_header");
    init_db_with_data(&db_path);

    rml_db(&db_path, &["list"])
        .assert()
        .success()
        .stdout(contains("Rating"))
        .stdout(contains("Rati…").not());
}

#[test]
fn test_malformed_dish_spec() {
    let db_path = setup_test_db("malformed_dish_spec");
    init(&db_path);

    rml_db(
        &db_path,
        &[
            "add",
            "--restaurant",
            "Le Nord",
            "--city",
            "Lyon",
            "--name",
            "Lunch",
            "--dish",
            "Soup only",
        ],
    )
    .assert()
    .failure()
    .stderr(contains("Invalid dish specification"));
}

#[test]
fn test_show_meal_details() {
    let db_path = setup_test_db("show_meal_details");
    init_db_with_data(&db_path);

    rml_db(&db_path, &["show", "1"])
        .assert()
        .success()
        .stdout(contains("Sunday lunch"))
        .stdout(contains("Quenelle"))
        .stdout(contains("sauce Nantua"))
        .stdout(contains("Dishes total: 34.00"));

    rml_db(&db_path, &["show", "1", "--json"])
        .assert()
        .success()
        .stdout(contains("\"restaurant_name\": \"Chez Paul\""));
}

#[test]
fn test_show_missing_meal_fails() {
    let db_path = setup_test_db("show_missing_meal");
    init(&db_path);

    rml_db(&db_path, &["show", "42"])
        .assert()
        .failure()
        .stderr(contains("Meal #42 not found"));
}

#[test]
fn test_edit_replaces_meal_and_dishes() {
    let db_path = setup_test_db("edit_replaces_meal");
    init_db_with_data(&db_path);

    add_meal(
        &db_path,
        "Chez Paul",
        "Lyon",
        "Light lunch",
        &["--edit", "1", "--dish", "Salade;starter;9.50"],
    );

    assert_eq!(count_rows(&db_path, "meals"), 2);
    assert_eq!(count_rows(&db_path, "dishes"), 2);
    assert_eq!(count_rows(&db_path, "restaurants"), 2);

    rml_db(&db_path, &["show", "1"])
        .assert()
        .success()
        .stdout(contains("Light lunch"))
        .stdout(contains("Quenelle").not());

    rml_db(
        &db_path,
        &[
            "add",
            "--restaurant",
            "X",
            "--city",
            "Y",
            "--name",
            "Z",
            "--dish",
            "A;main;1",
            "--edit",
            "99",
        ],
    )
    .assert()
    .failure()
    .stderr(contains("Meal #99 not found"));
}

#[test]
fn test_delete_cascades_to_dishes() {
    let db_path = setup_test_db("delete_cascades");
    init_db_with_data(&db_path);
    assert_eq!(count_rows(&db_path, "dishes"), 4);

    rml_db(&db_path, &["del", "1", "--force"])
        .assert()
        .success()
        .stdout(contains("Meal #1 has been deleted"));

    assert_eq!(count_rows(&db_path, "meals"), 1);
    assert_eq!(count_rows(&db_path, "dishes"), 1);
    // restaurants are never deleted
    assert_eq!(count_rows(&db_path, "restaurants"), 2);

    rml_db(&db_path, &["del", "1", "--force"])
        .assert()
        .failure()
        .stderr(contains("Meal #1 not found"));
}

#[test]
fn test_delete_without_confirmation_is_cancelled() {
    let db_path = setup_test_db("delete_cancelled");
    init_db_with_data(&db_path);

    rml_db(&db_path, &["del", "2"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Operation cancelled"));

    assert_eq!(count_rows(&db_path, "meals"), 2);
}

#[test]
fn test_restaurant_autocomplete() {
    let db_path = setup_test_db("restaurant_autocomplete");
    init_db_with_data(&db_path);

    rml_db(&db_path, &["restaurants", "--prefix", "piz"])
        .assert()
        .success()
        .stdout(contains("Pizza Palace (Paris)"))
        .stdout(contains("Chez Paul").not());

    rml_db(&db_path, &["restaurants", "--city", "Lyon"])
        .assert()
        .success()
        .stdout(contains("Chez Paul (Lyon)"))
        .stdout(contains("Pizza Palace").not());
}

#[test]
fn test_log_records_operations() {
    let db_path = setup_test_db("log_records_operations");
    init_db_with_data(&db_path);

    rml_db(&db_path, &["del", "2", "--force"]).assert().success();

    rml_db(&db_path, &["log", "--print"])
        .assert()
        .success()
        .stdout(contains("migration_applied"))
        .stdout(contains("meal #1"))
        .stdout(contains("meal #2"));
}

#[test]
fn test_db_maintenance() {
    let db_path = setup_test_db("db_maintenance");
    init_db_with_data(&db_path);

    rml_db(&db_path, &["db", "--check", "--vacuum", "--info"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed"))
        .stdout(contains("Vacuum completed"))
        .stdout(contains("Meals:"));
}

#[test]
fn test_version_flag() {
    rml()
        .arg("--version")
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
}
