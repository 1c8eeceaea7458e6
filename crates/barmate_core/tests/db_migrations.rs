use barmate_core::db::migrations::{
    apply_migrations_to, current_user_version, latest_version, DRINKAPP_SCHEMA_VERSION,
};
use barmate_core::db::{open_db, open_db_in_memory, DbError};
use barmate_core::{DrinkRepository, RepoError, SqliteDrinkRepository};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "drinks");
    for column in ["image", "is_favourite"] {
        assert!(column_exists(&conn, "drinks", column), "missing {column}");
    }
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("barmate.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "drinks");
}

#[test]
fn open_db_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("barmate.db");

    open_db(&path).unwrap();
    assert!(path.exists());
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn drinkapp_database_upgrades_with_default_favourite_flag() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("drinkapp.db");

    let mut legacy = Connection::open(&path).unwrap();
    apply_migrations_to(&mut legacy, DRINKAPP_SCHEMA_VERSION).unwrap();
    assert_eq!(current_user_version(&legacy).unwrap(), 2);
    assert!(!column_exists(&legacy, "drinks", "is_favourite"));
    legacy
        .execute(
            "INSERT INTO drinks (name, ingredients, description, shaking_time, image)
             VALUES ('Negroni', '30ml Gin, 30ml Campari', 'Stir.', 15, 'negroni');",
            [],
        )
        .unwrap();
    drop(legacy);

    let mut conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());

    let repo = SqliteDrinkRepository::try_new(&mut conn).unwrap();
    let drink = repo.get_drink_by_name("Negroni").unwrap().unwrap();
    assert!(!drink.is_favourite);
    assert_eq!(drink.image, "negroni");
    assert_eq!(drink.shaking_time_secs, 15);
}

#[test]
fn version_one_rows_get_empty_image_reference() {
    let mut conn = Connection::open_in_memory().unwrap();
    apply_migrations_to(&mut conn, 1).unwrap();
    conn.execute(
        "INSERT INTO drinks (name, ingredients, description, shaking_time)
         VALUES ('Mojito', '40ml Rum', 'Muddle.', 20);",
        [],
    )
    .unwrap();

    apply_migrations_to(&mut conn, latest_version()).unwrap();
    let repo = SqliteDrinkRepository::try_new(&mut conn).unwrap();
    let drink = repo.get_drink_by_name("Mojito").unwrap().unwrap();
    assert_eq!(drink.image, "");
    assert!(!drink.is_favourite);
}

#[test]
fn repository_rejects_unmigrated_connection() {
    let mut conn = Connection::open_in_memory().unwrap();
    let err = SqliteDrinkRepository::try_new(&mut conn).err().unwrap();
    assert!(matches!(err, RepoError::MissingRequiredTable("drinks")));

    apply_migrations_to(&mut conn, DRINKAPP_SCHEMA_VERSION).unwrap();
    let err = SqliteDrinkRepository::try_new(&mut conn).err().unwrap();
    assert!(matches!(
        err,
        RepoError::MissingRequiredColumn {
            table: "drinks",
            column: "is_favourite"
        }
    ));
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> bool {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table});"))
        .unwrap();
    let names = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    names.iter().any(|name| name == column)
}
