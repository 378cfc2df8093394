//! Encrypted envelope persistence (append-only).

use sqlx::SqlitePool;

/// A sealed envelope awaiting insertion.
pub struct NewEnvelope {
    pub manager: String,
    pub distance: String,
    pub blob: Vec<u8>,
    pub approved: bool,
    pub created_at: i64,
}

#[derive(sqlx::FromRow)]
pub struct EnvelopeRow {
    pub id: i64,
    pub manager: String,
    pub distance: String,
    pub blob: Vec<u8>,
    pub approved: bool,
    pub created_at: i64,
}

/// Insert every envelope of one submission in a single transaction; either
/// all recipient rows land or none do.
pub async fn insert_all(pool: &SqlitePool, envelopes: &[NewEnvelope]) -> Result<(), sqlx::Error> {
    if envelopes.is_empty() {
        return Ok(());
    }

    let mut tx = pool.begin().await?;
    for env in envelopes {
        sqlx::query(
            "INSERT INTO envelopes (manager, distance, blob, approved, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&env.manager)
        .bind(&env.distance)
        .bind(&env.blob)
        .bind(env.approved)
        .bind(env.created_at)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}

/// Rows addressed to `manager`, newest first. Unapproved submitters are
/// filtered out unless `include_unapproved` is set.
pub async fn fetch_for_manager(
    pool: &SqlitePool,
    manager: &str,
    include_unapproved: bool,
) -> Result<Vec<EnvelopeRow>, sqlx::Error> {
    if include_unapproved {
        sqlx::query_as(
            "SELECT * FROM envelopes WHERE manager = ?1 ORDER BY created_at DESC, id DESC",
        )
        .bind(manager)
        .fetch_all(pool)
        .await
    } else {
        sqlx::query_as(
            "SELECT * FROM envelopes WHERE manager = ?1 AND approved = 1
             ORDER BY created_at DESC, id DESC",
        )
        .bind(manager)
        .fetch_all(pool)
        .await
    }
}

pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM envelopes")
        .fetch_one(pool)
        .await
}
