//! Response DTOs.

use serde::{Deserialize, Serialize};

use glimpse_dispatch::DispatchReport;

/// Response for a completed dispatch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchRunResponse {
    /// Run summary.
    pub message: String,
    /// Records fully processed.
    pub processed: u64,
    /// Records whose notification obligation was discharged.
    pub sent: u64,
    /// Records that failed and remain pending.
    pub failed: u64,
    /// Per-record diagnostics.
    pub errors: Vec<String>,
}

impl DispatchRunResponse {
    /// Build the response body from a dispatch report.
    pub fn from_report(report: &DispatchReport) -> Self {
        Self {
            message: format!("Processed {} schedules", report.processed),
            processed: report.processed,
            sent: report.sent,
            failed: report.failed,
            errors: report.errors.clone(),
        }
    }
}

/// Response for a run that found nothing due.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmptyDispatchResponse {
    /// Fixed summary message.
    pub message: String,
    /// Always zero.
    pub processed: u64,
}

impl EmptyDispatchResponse {
    /// The canonical empty-batch body.
    pub fn new() -> Self {
        Self {
            message: "No pending schedules found".to_string(),
            processed: 0,
        }
    }
}

impl Default for EmptyDispatchResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Queue-status probe response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchStatusResponse {
    /// Pending schedule records, due or not.
    pub pending: i64,
    /// Pending records already due.
    pub due: i64,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Crate version.
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_empty_dispatch_response_has_exactly_two_fields() {
        let value = serde_json::to_value(EmptyDispatchResponse::new()).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 2);
        assert_eq!(object["message"], "No pending schedules found");
        assert_eq!(object["processed"], 0);
    }

    #[test]
    fn test_run_response_carries_report_counters() {
        let mut report = DispatchReport::new();
        let failed_id = Uuid::new_v4();
        report.record_sent();
        report.record_sent();
        report.record_failed(failed_id, "gateway unreachable");

        let value = serde_json::to_value(DispatchRunResponse::from_report(&report)).unwrap();

        assert_eq!(value["processed"], 2);
        assert_eq!(value["sent"], 2);
        assert_eq!(value["failed"], 1);
        assert_eq!(
            value["errors"][0],
            format!("{failed_id}: gateway unreachable")
        );
        // The skipped counter is log-only and must not leak into the body.
        assert!(value.get("skipped").is_none());
    }
}
