//! Device registration repository.

use sqlx::PgPool;
use uuid::Uuid;

use glimpse_core::error::{AppError, ErrorKind};
use glimpse_core::result::AppResult;
use glimpse_entity::device::model::DeviceRegistration;

/// Repository for device registration rows.
#[derive(Debug, Clone)]
pub struct DeviceRepository {
    pool: PgPool,
}

impl DeviceRepository {
    /// Create a new device repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch all active registrations for a user.
    pub async fn find_active_for_user(&self, user_id: Uuid) -> AppResult<Vec<DeviceRegistration>> {
        sqlx::query_as::<_, DeviceRegistration>(
            "SELECT * FROM device_registrations \
             WHERE user_id = $1 AND active = TRUE \
             ORDER BY created_at ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to query device registrations", e)
        })
    }

    /// Deactivate a registration (dead token reported by the gateway).
    pub async fn deactivate(&self, id: Uuid) -> AppResult<()> {
        sqlx::query(
            "UPDATE device_registrations SET active = FALSE, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to deactivate registration", e)
        })?;
        Ok(())
    }
}
