use rusqlite::{Connection, OptionalExtension, Result};

/// Cities available right after `init`. Any other city is created the first
/// time a meal is saved with it.
pub const SEED_CITIES: &[&str] = &[
    "Paris",
    "Marseille",
    "Lyon",
    "Toulouse",
    "Nice",
    "Nantes",
    "Montpellier",
    "Strasbourg",
    "Bordeaux",
    "Lille",
    "Rennes",
    "Reims",
    "Toulon",
    "Saint-Étienne",
    "Le Havre",
    "Grenoble",
    "Dijon",
    "Angers",
    "Nîmes",
    "Annecy",
];

struct Migration {
    version: &'static str,
    description: &'static str,
    apply: fn(&Connection) -> Result<()>,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250301_0001_create_journal_tables",
        description: "Created cities, restaurants, meals, dishes, recent_searches and preferences",
        apply: create_journal_tables,
    },
    Migration {
        version: "20250301_0002_add_directory_fts",
        description: "Added full-text name indexes for restaurants and cities",
        apply: create_directory_fts,
    },
    Migration {
        version: "20250301_0003_seed_cities",
        description: "Seeded reference city list",
        apply: seed_cities,
    },
];

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn create_journal_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS cities (
            id    INTEGER PRIMARY KEY AUTOINCREMENT,
            name  TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS restaurants (
            id       INTEGER PRIMARY KEY AUTOINCREMENT,
            name     TEXT NOT NULL,
            city_id  INTEGER NOT NULL REFERENCES cities(id),
            UNIQUE (name, city_id)
        );

        CREATE TABLE IF NOT EXISTS meals (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            restaurant_id  INTEGER NOT NULL REFERENCES restaurants(id),
            name           TEXT NOT NULL,
            comment        TEXT NOT NULL DEFAULT '',
            price          INTEGER NOT NULL DEFAULT 0,
            timestamp      TEXT NOT NULL,
            rating         REAL NOT NULL DEFAULT 0 CHECK(rating BETWEEN 0 AND 5),
            photos         TEXT NOT NULL DEFAULT '[]',
            created_at     TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS dishes (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            meal_id      INTEGER NOT NULL REFERENCES meals(id) ON DELETE CASCADE,
            position     INTEGER NOT NULL DEFAULT 0,
            name         TEXT NOT NULL,
            description  TEXT NOT NULL DEFAULT '',
            price        INTEGER NOT NULL DEFAULT 0,
            rating       REAL NOT NULL DEFAULT 0 CHECK(rating BETWEEN 0 AND 5),
            kind         TEXT NOT NULL CHECK(kind IN
                ('aperitif','starter','main','side','cheese','dessert','drink'))
        );

        CREATE TABLE IF NOT EXISTS recent_searches (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            query        TEXT NOT NULL UNIQUE,
            searched_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS preferences (
            key    TEXT PRIMARY KEY,
            value  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_meals_timestamp ON meals(timestamp);
        CREATE INDEX IF NOT EXISTS idx_meals_restaurant ON meals(restaurant_id);
        CREATE INDEX IF NOT EXISTS idx_dishes_meal ON dishes(meal_id, position);
        "#,
    )?;
    Ok(())
}

/// External-content FTS5 tables mirroring the `name` columns, kept in sync by
/// triggers. Used only for prefix autocomplete.
fn create_directory_fts(conn: &Connection) -> Result<()> {
    for table in ["restaurants", "cities"] {
        conn.execute_batch(&format!(
            r#"
            CREATE VIRTUAL TABLE IF NOT EXISTS {t}_fts
                USING fts5(name, content='{t}', content_rowid='id');

            CREATE TRIGGER IF NOT EXISTS {t}_fts_ai AFTER INSERT ON {t} BEGIN
                INSERT INTO {t}_fts(rowid, name) VALUES (new.id, new.name);
            END;

            CREATE TRIGGER IF NOT EXISTS {t}_fts_ad AFTER DELETE ON {t} BEGIN
                INSERT INTO {t}_fts({t}_fts, rowid, name) VALUES ('delete', old.id, old.name);
            END;

            CREATE TRIGGER IF NOT EXISTS {t}_fts_au AFTER UPDATE OF name ON {t} BEGIN
                INSERT INTO {t}_fts({t}_fts, rowid, name) VALUES ('delete', old.id, old.name);
                INSERT INTO {t}_fts(rowid, name) VALUES (new.id, new.name);
            END;

            INSERT INTO {t}_fts({t}_fts) VALUES ('rebuild');
            "#,
            t = table
        ))?;
    }
    Ok(())
}

fn seed_cities(conn: &Connection) -> Result<()> {
    let mut stmt = conn.prepare("INSERT OR IGNORE INTO cities (name) VALUES (?1)")?;
    for city in SEED_CITIES {
        stmt.execute([city])?;
    }
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Versions already recorded in the `log` table, oldest first.
pub fn applied_migrations(conn: &Connection) -> Result<Vec<String>> {
    ensure_log_table(conn)?;
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// A migration applied by the current run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMigration {
    pub version: &'static str,
    pub description: &'static str,
}

/// Public entry point: run all pending migrations.
///
/// Each migration runs in its own transaction together with the log row that
/// marks it as applied. Nothing is printed; callers that talk to the user
/// report the returned list.
pub fn run_pending_migrations(conn: &Connection) -> Result<Vec<AppliedMigration>> {
    ensure_log_table(conn)?;

    let mut applied = Vec::new();
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }

        let tx = conn.unchecked_transaction()?;
        (m.apply)(&tx)?;
        tx.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
            [m.version, m.description],
        )?;
        tx.commit()?;

        applied.push(AppliedMigration {
            version: m.version,
            description: m.description,
        });
    }

    Ok(applied)
}
