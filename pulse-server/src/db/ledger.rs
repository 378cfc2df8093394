//! Submission attendance ledger.
//!
//! One row per (employee, period). The uniqueness constraint is the throttle:
//! the first insert wins, every later attempt for the same key is a no-op and
//! reports "already submitted".

use sqlx::SqlitePool;

/// Record a submission attempt. Returns `true` exactly once per
/// (username, period); `false` means the employee already submitted.
pub async fn try_mark(
    pool: &SqlitePool,
    username: &str,
    period: &str,
    now: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO submissions (username, period, created_at) VALUES (?1, ?2, ?3)
         ON CONFLICT DO NOTHING",
    )
    .bind(username)
    .bind(period)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() == 1)
}

pub async fn has_submitted(
    pool: &SqlitePool,
    username: &str,
    period: &str,
) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM submissions WHERE username = ?1 AND period = ?2",
    )
    .bind(username)
    .bind(period)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}
