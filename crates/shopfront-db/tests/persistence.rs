//! On-disk behaviour of the cart database: idempotent init, rows surviving a
//! reopen, and dropping the file.

use shopfront_db::{Database, DbConfig};
use tempfile::TempDir;

async fn open(dir: &TempDir) -> Database {
    Database::new(DbConfig::new(dir.path().join("shopfront.db")))
        .await
        .unwrap()
}

#[tokio::test]
async fn reopening_keeps_existing_rows() {
    let dir = TempDir::new().unwrap();

    let db = open(&dir).await;
    db.checkout().add(1).await.unwrap();
    db.checkout().add(1).await.unwrap();
    db.checkout().add(2).await.unwrap();
    db.close().await;

    let db = open(&dir).await;
    // Migrations ran a second time without touching the data
    db.run_migrations().await.unwrap();

    let rows = db.checkout().list_all().await.unwrap();
    let pairs: Vec<_> = rows.iter().map(|r| (r.item_id, r.count)).collect();
    assert_eq!(pairs, vec![(1, 2), (2, 1)]);
}

#[tokio::test]
async fn table_created_outside_migrations_is_adopted() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("shopfront.db");

    let db = Database::new(DbConfig::new(&path).run_migrations(false))
        .await
        .unwrap();
    sqlx::query(
        "CREATE TABLE checkout (id INTEGER PRIMARY KEY NOT NULL, \
         item_id INTEGER UNIQUE NOT NULL, count INTEGER NOT NULL)",
    )
    .execute(db.pool())
    .await
    .unwrap();
    sqlx::query("INSERT INTO checkout (item_id, count) VALUES (4, 3)")
        .execute(db.pool())
        .await
        .unwrap();

    db.run_migrations().await.unwrap();

    assert_eq!(db.checkout().count(4).await.unwrap(), 3);
}

#[tokio::test]
async fn drop_database_removes_files() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("shopfront.db");

    let db = open(&dir).await;
    db.checkout().add(9).await.unwrap();
    db.drop_database().await.unwrap();

    assert!(!path.exists());
    assert!(!dir.path().join("shopfront.db-wal").exists());
    assert!(!dir.path().join("shopfront.db-shm").exists());
    assert!(!db.health_check().await);

    // A fresh open starts with an empty cart
    let db = open(&dir).await;
    assert!(db.checkout().list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn drop_database_twice_is_fine() {
    let dir = TempDir::new().unwrap();
    let db = open(&dir).await;

    db.drop_database().await.unwrap();
    db.drop_database().await.unwrap();
}
