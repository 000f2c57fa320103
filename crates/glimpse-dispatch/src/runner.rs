//! Interval runner — optional built-in trigger for dispatch passes.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::time;
use tracing;

use glimpse_core::config::dispatch::DispatchConfig;

use crate::dispatcher::MomentWindowDispatcher;

/// Periodic dispatch trigger for deployments without an external scheduler.
///
/// Passes run sequentially; a tick that finds an invocation still in
/// flight simply waits for it, so two passes never overlap within one
/// process. Cross-process overlap is handled by the claim step inside
/// the dispatcher itself.
///
/// Shutdown cancels a pass mid-record: the row being worked on stays
/// `processing` until the stale-claim requeue returns it to `pending`
/// after `claim_lease_seconds`, so its notification is delayed by up to
/// one lease rather than lost.
#[derive(Debug)]
pub struct DispatchRunner {
    dispatcher: Arc<MomentWindowDispatcher>,
    config: DispatchConfig,
}

impl DispatchRunner {
    /// Create a new runner.
    pub fn new(dispatcher: Arc<MomentWindowDispatcher>, config: DispatchConfig) -> Self {
        Self { dispatcher, config }
    }

    /// Run dispatch passes until the cancel signal is received.
    pub async fn run(&self, mut cancel: watch::Receiver<bool>) {
        tracing::info!(
            "Dispatch runner started with poll_interval={}s, batch_size={}",
            self.config.poll_interval_seconds,
            self.config.batch_size
        );

        let poll_interval = Duration::from_secs(self.config.poll_interval_seconds);

        loop {
            tokio::select! {
                _ = cancel.changed() => {
                    if *cancel.borrow() {
                        tracing::info!("Dispatch runner received shutdown signal");
                        break;
                    }
                }
                _ = self.run_pass() => {
                    tokio::select! {
                        _ = cancel.changed() => {
                            if *cancel.borrow() {
                                tracing::info!("Dispatch runner shutting down");
                                break;
                            }
                        }
                        _ = time::sleep(poll_interval) => {}
                    }
                }
            }
        }

        tracing::info!("Dispatch runner shut down complete");
    }

    /// Execute one pass and log its outcome.
    async fn run_pass(&self) {
        match self.dispatcher.run_once(Utc::now()).await {
            Ok(report) => {
                if report.total() > 0 {
                    tracing::info!(
                        "Scheduled pass: processed={}, sent={}, failed={}, skipped={}",
                        report.processed,
                        report.sent,
                        report.failed,
                        report.skipped
                    );
                } else {
                    tracing::trace!("Scheduled pass found no due windows");
                }
            }
            Err(e) => {
                tracing::error!("Scheduled pass failed to query due windows: {}", e);
            }
        }
    }
}
