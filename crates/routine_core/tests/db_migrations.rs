use routine_core::db::migrations::latest_version;
use routine_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "routine_tasks");
    assert_table_exists(&conn, "task_completions");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("routine.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "routine_tasks");
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
fn completions_are_not_tied_to_task_rows() {
    let conn = open_db_in_memory().unwrap();

    let foreign_keys: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM pragma_foreign_key_list('task_completions');",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(foreign_keys, 0);

    let task_id = "11111111-2222-4333-8444-555555555555";
    conn.execute(
        "INSERT INTO routine_tasks (id, title, time_of_day, duration_minutes, priority, days_mask)
         VALUES (?1, 'Stretch', '07:30', 10, 'medium', 62);",
        [task_id],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO task_completions (day_key, task_id) VALUES ('2024-06-05', ?1);",
        [task_id],
    )
    .unwrap();
    conn.execute("DELETE FROM routine_tasks WHERE id = ?1;", [task_id])
        .unwrap();

    let remaining: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM task_completions WHERE task_id = ?1;",
            [task_id],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(remaining, 1);
}

#[test]
fn task_table_enforces_field_constraints() {
    let conn = open_db_in_memory().unwrap();
    let insert = |days_mask: i64, priority: &str| {
        conn.execute(
            "INSERT INTO routine_tasks (id, title, time_of_day, duration_minutes, priority, days_mask)
             VALUES (lower(hex(randomblob(16))), 'Any', '08:00', 5, ?1, ?2);",
            rusqlite::params![priority, days_mask],
        )
    };

    assert!(insert(0, "low").is_err());
    assert!(insert(128, "low").is_err());
    assert!(insert(1, "urgent").is_err());
    assert!(insert(127, "high").is_ok());
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
