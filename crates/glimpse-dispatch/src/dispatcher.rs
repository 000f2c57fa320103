//! Moment-window dispatch pass.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use tracing::{debug, info, warn};

use glimpse_core::config::dispatch::DispatchConfig;
use glimpse_core::result::AppResult;
use glimpse_entity::device::model::DeviceRegistration;
use glimpse_entity::schedule::model::MomentWindow;
use glimpse_push::gateway::PushGateway;
use glimpse_push::message::PushMessage;

use crate::report::DispatchReport;
use crate::store::{DeviceStore, ScheduleStore};

const NOTIFICATION_TITLE: &str = "Moment time 📸";
const NOTIFICATION_BODY: &str = "Your moment window is open. You have two minutes to capture it.";
const NOTIFICATION_SOUND: &str = "default";

/// Outcome of processing a single claimed window.
enum WindowOutcome {
    Sent,
    Skipped,
}

/// Stateless per-invocation dispatcher for due moment windows.
///
/// Each [`run_once`](Self::run_once) pass claims up to `batch_size` due
/// records, sends one batched push-gateway call per record, and marks
/// the record sent. A failed record is released back to `pending` and
/// never aborts the pass.
pub struct MomentWindowDispatcher {
    schedules: Arc<dyn ScheduleStore>,
    devices: Arc<dyn DeviceStore>,
    gateway: Arc<dyn PushGateway>,
    config: DispatchConfig,
}

impl MomentWindowDispatcher {
    /// Create a new dispatcher.
    pub fn new(
        schedules: Arc<dyn ScheduleStore>,
        devices: Arc<dyn DeviceStore>,
        gateway: Arc<dyn PushGateway>,
        config: DispatchConfig,
    ) -> Self {
        Self {
            schedules,
            devices,
            gateway,
            config,
        }
    }

    /// Execute one dispatch pass at the given instant.
    ///
    /// Returns `Err` only when the due-window query itself fails; every
    /// later failure is absorbed into the report.
    pub async fn run_once(&self, now: DateTime<Utc>) -> AppResult<DispatchReport> {
        self.requeue_stale_claims(now).await;

        let due = self.schedules.find_due(now, self.config.batch_size).await?;
        if due.is_empty() {
            debug!("No due moment windows");
            return Ok(DispatchReport::new());
        }

        info!(count = due.len(), "Dispatching due moment windows");

        let mut report = DispatchReport::new();
        for window in &due {
            match self.process_window(window, now).await {
                Ok(WindowOutcome::Sent) => report.record_sent(),
                Ok(WindowOutcome::Skipped) => {
                    debug!(window_id = %window.id, "Window claimed elsewhere, skipping");
                    report.record_skipped();
                }
                Err(e) => {
                    warn!(window_id = %window.id, error = %e, "Window dispatch failed");
                    report.record_failed(window.id, &e);
                }
            }
        }

        info!(
            processed = report.processed,
            sent = report.sent,
            failed = report.failed,
            skipped = report.skipped,
            "Dispatch pass complete"
        );

        Ok(report)
    }

    /// Return claims abandoned by a crashed invocation to `pending`.
    ///
    /// Housekeeping only; a failure here must not block the pass.
    async fn requeue_stale_claims(&self, now: DateTime<Utc>) {
        let cutoff = now - Duration::seconds(self.config.claim_lease_seconds);
        match self.schedules.requeue_stale(cutoff).await {
            Ok(0) => {}
            Ok(n) => warn!(count = n, "Requeued stale window claims"),
            Err(e) => warn!(error = %e, "Failed to requeue stale claims"),
        }
    }

    /// Claim, deliver, and finalize a single window.
    ///
    /// Any error after a successful claim releases the record back to
    /// `pending` before propagating.
    async fn process_window(
        &self,
        window: &MomentWindow,
        now: DateTime<Utc>,
    ) -> AppResult<WindowOutcome> {
        if !self.schedules.claim(window.id, now).await? {
            return Ok(WindowOutcome::Skipped);
        }

        match self.deliver(window, now).await {
            Ok(()) => Ok(WindowOutcome::Sent),
            Err(e) => {
                if let Err(release_err) = self.schedules.release(window.id).await {
                    warn!(
                        window_id = %window.id,
                        error = %release_err,
                        "Failed to release claimed window; stale-claim requeue will recover it"
                    );
                }
                Err(e)
            }
        }
    }

    /// Send the window's notification batch and mark the record sent.
    async fn deliver(&self, window: &MomentWindow, now: DateTime<Utc>) -> AppResult<()> {
        let devices = self.devices.find_active_for_user(window.user_id).await?;

        if devices.is_empty() {
            // No recipients discharges the obligation without a gateway call.
            debug!(window_id = %window.id, user_id = %window.user_id, "No active devices");
            self.schedules.mark_sent(window.id, now).await?;
            return Ok(());
        }

        let messages: Vec<PushMessage> = devices
            .iter()
            .map(|device| self.build_message(window, device))
            .collect();

        let tickets = self.gateway.send_batch(&messages).await?;

        for (device, ticket) in devices.iter().zip(&tickets) {
            if let Some(message) = &ticket.message {
                warn!(
                    window_id = %window.id,
                    device_id = %device.id,
                    error = %message,
                    "Push ticket rejected"
                );
            }
            if ticket.is_device_not_registered() {
                self.deactivate_dead_device(device).await;
            }
        }

        self.schedules.mark_sent(window.id, now).await?;
        Ok(())
    }

    fn build_message(&self, window: &MomentWindow, device: &DeviceRegistration) -> PushMessage {
        PushMessage {
            to: device.push_token.clone(),
            sound: NOTIFICATION_SOUND.to_string(),
            title: NOTIFICATION_TITLE.to_string(),
            body: NOTIFICATION_BODY.to_string(),
            data: json!({
                "type": "moment_window",
                "window_id": window.id,
            }),
            badge: 1,
        }
    }

    /// Deactivate a registration the gateway reported as dead.
    ///
    /// The window still counts as sent; the token is simply dropped from
    /// future fan-outs.
    async fn deactivate_dead_device(&self, device: &DeviceRegistration) {
        info!(device_id = %device.id, "Deactivating unregistered device token");
        if let Err(e) = self.devices.deactivate(device.id).await {
            warn!(device_id = %device.id, error = %e, "Failed to deactivate device");
        }
    }
}

impl std::fmt::Debug for MomentWindowDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MomentWindowDispatcher")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
