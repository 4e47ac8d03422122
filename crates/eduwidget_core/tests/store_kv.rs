use eduwidget_core::store::migrations::latest_version;
use eduwidget_core::store::{open_store, open_store_in_memory, KeyValueStore, StoreError};
use eduwidget_core::SqliteKeyValueStore;
use rusqlite::Connection;

#[test]
fn open_store_in_memory_applies_all_migrations() {
    let conn = open_store_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "documents");
}

#[test]
fn opening_same_store_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("eduwidget.db");

    let conn_first = open_store(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_store(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "documents");
}

#[test]
fn opening_store_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_store(&path).unwrap_err();
    match err {
        StoreError::UnsupportedSchemaVersion {
            store_version,
            latest_supported,
        } => {
            assert_eq!(store_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn put_get_roundtrip_and_overwrite() {
    let conn = open_store_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);

    assert_eq!(store.get("doc").unwrap(), None);

    store.put("doc", "first").unwrap();
    assert_eq!(store.get("doc").unwrap().as_deref(), Some("first"));

    store.put("doc", "second").unwrap();
    assert_eq!(store.get("doc").unwrap().as_deref(), Some("second"));
}

#[test]
fn remove_deletes_the_key() {
    let conn = open_store_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);

    store.put("doc", "value").unwrap();
    store.remove("doc").unwrap();
    assert_eq!(store.get("doc").unwrap(), None);

    // Removing an absent key is a no-op.
    store.remove("doc").unwrap();
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
