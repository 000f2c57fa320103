//! Device registration entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::platform::DevicePlatform;

/// A push-capable device belonging to a user.
///
/// A user may have several registrations (multi-device). Only rows with
/// `active = true` are eligible notification recipients; registration and
/// token refresh happen in the mobile app, outside this service.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DeviceRegistration {
    /// Unique registration identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// Mobile platform.
    pub platform: DevicePlatform,
    /// Opaque push token understood by the gateway.
    pub push_token: String,
    /// Whether this registration is an eligible recipient.
    pub active: bool,
    /// When the registration was created.
    pub created_at: DateTime<Utc>,
    /// When the registration was last updated.
    pub updated_at: DateTime<Utc>,
}
