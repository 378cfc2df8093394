//! Database access layer
//!
//! Two SQLite databases: the feedback database holds the employee directory
//! and the encrypted envelopes; the attendance database holds only the
//! submission ledger. Schemas are created idempotently at startup.

pub mod directory;
pub mod envelopes;
pub mod ledger;

use sqlx::SqlitePool;

pub async fn init_feedback(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS employees (
            username        TEXT PRIMARY KEY,
            hashed_password TEXT NOT NULL,
            manager         TEXT,
            status          TEXT NOT NULL DEFAULT 'pending',
            created_at      INTEGER NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS envelopes (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            manager    TEXT NOT NULL,
            distance   TEXT NOT NULL,
            blob       BLOB NOT NULL,
            approved   INTEGER NOT NULL,
            created_at INTEGER NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_envelopes_manager ON envelopes (manager)")
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn init_attendance(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS submissions (
            username   TEXT NOT NULL,
            period     TEXT NOT NULL,
            created_at INTEGER NOT NULL,
            PRIMARY KEY (username, period)
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}
