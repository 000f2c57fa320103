//! Moment-window schedule repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use glimpse_core::error::{AppError, ErrorKind};
use glimpse_core::result::AppResult;
use glimpse_entity::schedule::model::MomentWindow;

/// Repository for moment-window schedule rows.
///
/// Status transitions are expressed as status-guarded UPDATEs so that the
/// affected-row count doubles as a compare-and-swap signal; this is the
/// mutual-exclusion mechanism between overlapping dispatcher invocations.
#[derive(Debug, Clone)]
pub struct ScheduleRepository {
    pool: PgPool,
}

impl ScheduleRepository {
    /// Create a new schedule repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch due pending windows, earliest due first.
    ///
    /// Ascending order keeps old schedules from starving when volume
    /// spikes past the batch ceiling.
    pub async fn find_due(&self, now: DateTime<Utc>, limit: i64) -> AppResult<Vec<MomentWindow>> {
        sqlx::query_as::<_, MomentWindow>(
            "SELECT * FROM moment_windows \
             WHERE status = 'pending' AND notify_at <= $1 \
             ORDER BY notify_at ASC \
             LIMIT $2",
        )
        .bind(now)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to query due windows", e))
    }

    /// Claim a pending window for dispatch (`pending → processing`).
    ///
    /// Returns `false` when the row was already claimed or completed by a
    /// concurrent invocation.
    pub async fn claim(&self, id: Uuid, now: DateTime<Utc>) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE moment_windows \
             SET status = 'processing', claimed_at = $2, updated_at = NOW() \
             WHERE id = $1 AND status = 'pending'",
        )
        .bind(id)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to claim window", e))?;
        Ok(result.rows_affected() == 1)
    }

    /// Release a claimed window back to `pending` after a failure.
    pub async fn release(&self, id: Uuid) -> AppResult<()> {
        sqlx::query(
            "UPDATE moment_windows \
             SET status = 'pending', claimed_at = NULL, updated_at = NOW() \
             WHERE id = $1 AND status = 'processing'",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to release window", e))?;
        Ok(())
    }

    /// Mark a claimed window as sent.
    pub async fn mark_sent(&self, id: Uuid, sent_at: DateTime<Utc>) -> AppResult<()> {
        sqlx::query(
            "UPDATE moment_windows \
             SET status = 'sent', sent_at = $2, claimed_at = NULL, updated_at = NOW() \
             WHERE id = $1 AND status = 'processing'",
        )
        .bind(id)
        .bind(sent_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark window sent", e))?;
        Ok(())
    }

    /// Return stale claims to `pending`.
    ///
    /// A claim whose `claimed_at` predates the cutoff belongs to an
    /// invocation that crashed mid-record; requeueing it restores the
    /// at-least-once contract.
    pub async fn requeue_stale(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE moment_windows \
             SET status = 'pending', claimed_at = NULL, updated_at = NOW() \
             WHERE status = 'processing' AND claimed_at < $1",
        )
        .bind(cutoff)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to requeue stale claims", e)
        })?;
        Ok(result.rows_affected())
    }

    /// Count all pending windows.
    pub async fn count_pending(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM moment_windows WHERE status = 'pending'")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count pending windows", e)
            })
    }

    /// Count pending windows that are due at the given instant.
    pub async fn count_due(&self, now: DateTime<Utc>) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM moment_windows WHERE status = 'pending' AND notify_at <= $1",
        )
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count due windows", e))
    }
}
