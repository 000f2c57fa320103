//! Moment-window status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a moment-window schedule record.
///
/// Externally a record transitions `pending → sent` exactly once and is
/// never reverted. `processing` is the transient claim state held by a
/// single dispatcher invocation while it performs I/O for the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "window_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum WindowStatus {
    /// Due or not yet due; eligible for dispatch once due.
    Pending,
    /// Claimed by a dispatcher invocation that is currently working on it.
    Processing,
    /// Notification obligation discharged.
    Sent,
}

impl WindowStatus {
    /// Check if the record is in its terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Sent)
    }

    /// Check if the record can be claimed for dispatch.
    pub fn is_claimable(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Sent => "sent",
        }
    }
}

impl fmt::Display for WindowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
