//! Per-invocation dispatch accounting.

use uuid::Uuid;

/// Aggregate result of one dispatcher pass.
///
/// Ephemeral, in-memory only; the HTTP layer maps it onto the response
/// payload. `skipped` counts records whose claim was lost to a
/// concurrent invocation and is surfaced in logs only.
#[derive(Debug, Clone, Default)]
pub struct DispatchReport {
    /// Records fully processed (transitioned to `sent`).
    pub processed: u64,
    /// Records whose notification obligation was discharged.
    pub sent: u64,
    /// Records that failed and remain `pending` for the next invocation.
    pub failed: u64,
    /// Records claimed by a concurrent invocation.
    pub skipped: u64,
    /// Per-record diagnostics, formatted `"<window id>: <message>"`.
    pub errors: Vec<String>,
}

impl DispatchReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a window transitioned to `sent`.
    pub fn record_sent(&mut self) {
        self.processed += 1;
        self.sent += 1;
    }

    /// Record a window that failed and stays `pending`.
    pub fn record_failed(&mut self, id: Uuid, message: impl std::fmt::Display) {
        self.failed += 1;
        self.errors.push(format!("{id}: {message}"));
    }

    /// Record a window whose claim was lost.
    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    /// Total records attempted this pass.
    pub fn total(&self) -> u64 {
        self.processed + self.failed + self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accounting() {
        let mut report = DispatchReport::new();
        let id = Uuid::new_v4();

        report.record_sent();
        report.record_sent();
        report.record_failed(id, "gateway unreachable");
        report.record_skipped();

        assert_eq!(report.processed, 2);
        assert_eq!(report.sent, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.total(), 4);
        assert_eq!(report.errors, vec![format!("{id}: gateway unreachable")]);
    }
}
