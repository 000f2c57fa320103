//! Moment-window entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::WindowStatus;

/// A moment-window schedule record.
///
/// Each row represents one pending or completed push-notification
/// obligation for a user. Rows are created by the app-activation flow
/// (external to this service) and consumed by the dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MomentWindow {
    /// Unique record identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// When the notification becomes due.
    pub notify_at: DateTime<Utc>,
    /// Current status.
    pub status: WindowStatus,
    /// When the notification was dispatched.
    pub sent_at: Option<DateTime<Utc>>,
    /// When the record was claimed by a dispatcher invocation.
    pub claimed_at: Option<DateTime<Utc>>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

