//! Storage trait seams for the dispatcher.
//!
//! The dispatcher only needs a narrow slice of the repository surface;
//! expressing that slice as traits keeps the dispatch logic testable
//! without a live database. The concrete sqlx repositories implement
//! both traits by delegation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use glimpse_core::result::AppResult;
use glimpse_database::repositories::{DeviceRepository, ScheduleRepository};
use glimpse_entity::device::model::DeviceRegistration;
use glimpse_entity::schedule::model::MomentWindow;

/// Schedule-record operations required by the dispatcher.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Fetch due pending windows, earliest due first, up to `limit`.
    async fn find_due(&self, now: DateTime<Utc>, limit: i64) -> AppResult<Vec<MomentWindow>>;

    /// Claim a pending window (`pending → processing`); `false` means a
    /// concurrent invocation already owns it.
    async fn claim(&self, id: Uuid, now: DateTime<Utc>) -> AppResult<bool>;

    /// Release a claimed window back to `pending`.
    async fn release(&self, id: Uuid) -> AppResult<()>;

    /// Mark a claimed window as sent.
    async fn mark_sent(&self, id: Uuid, sent_at: DateTime<Utc>) -> AppResult<()>;

    /// Return claims older than `cutoff` to `pending`.
    async fn requeue_stale(&self, cutoff: DateTime<Utc>) -> AppResult<u64>;
}

/// Device-registration operations required by the dispatcher.
#[async_trait]
pub trait DeviceStore: Send + Sync {
    /// Fetch all active registrations for a user.
    async fn find_active_for_user(&self, user_id: Uuid) -> AppResult<Vec<DeviceRegistration>>;

    /// Deactivate a registration whose token the gateway reported dead.
    async fn deactivate(&self, id: Uuid) -> AppResult<()>;
}

#[async_trait]
impl ScheduleStore for ScheduleRepository {
    async fn find_due(&self, now: DateTime<Utc>, limit: i64) -> AppResult<Vec<MomentWindow>> {
        ScheduleRepository::find_due(self, now, limit).await
    }

    async fn claim(&self, id: Uuid, now: DateTime<Utc>) -> AppResult<bool> {
        ScheduleRepository::claim(self, id, now).await
    }

    async fn release(&self, id: Uuid) -> AppResult<()> {
        ScheduleRepository::release(self, id).await
    }

    async fn mark_sent(&self, id: Uuid, sent_at: DateTime<Utc>) -> AppResult<()> {
        ScheduleRepository::mark_sent(self, id, sent_at).await
    }

    async fn requeue_stale(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        ScheduleRepository::requeue_stale(self, cutoff).await
    }
}

#[async_trait]
impl DeviceStore for DeviceRepository {
    async fn find_active_for_user(&self, user_id: Uuid) -> AppResult<Vec<DeviceRegistration>> {
        DeviceRepository::find_active_for_user(self, user_id).await
    }

    async fn deactivate(&self, id: Uuid) -> AppResult<()> {
        DeviceRepository::deactivate(self, id).await
    }
}
