//! Employee directory operations

use pulse_core::OrgTree;
use sqlx::SqlitePool;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_APPROVED: &str = "approved";

#[derive(sqlx::FromRow)]
pub struct EmployeeRow {
    pub username: String,
    pub hashed_password: String,
    pub manager: Option<String>,
    pub status: String,
    pub created_at: i64,
}

impl EmployeeRow {
    pub fn is_approved(&self) -> bool {
        self.status == STATUS_APPROVED
    }
}

pub async fn create(
    pool: &SqlitePool,
    username: &str,
    hashed_password: &str,
    manager: Option<&str>,
    now: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO employees (username, hashed_password, manager, status, created_at)
         VALUES (?1, ?2, ?3, 'pending', ?4)",
    )
    .bind(username)
    .bind(hashed_password)
    .bind(manager)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn find(pool: &SqlitePool, username: &str) -> Result<Option<EmployeeRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM employees WHERE username = ?1")
        .bind(username)
        .fetch_optional(pool)
        .await
}

pub async fn set_status(
    pool: &SqlitePool,
    username: &str,
    status: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE employees SET status = ?1 WHERE username = ?2")
        .bind(status)
        .bind(username)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() == 1)
}

pub async fn list_all(pool: &SqlitePool) -> Result<Vec<EmployeeRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM employees ORDER BY username")
        .fetch_all(pool)
        .await
}

/// Snapshot the current (employee, manager) relation as an `OrgTree`.
pub async fn org_tree(pool: &SqlitePool) -> Result<OrgTree, sqlx::Error> {
    let rows = list_all(pool).await?;
    OrgTree::from_pairs(rows.into_iter().map(|r| (r.username, r.manager)))
        // Duplicates cannot happen behind the PRIMARY KEY; treat as corruption.
        .map_err(|e| sqlx::Error::Protocol(e.to_string()))
}
