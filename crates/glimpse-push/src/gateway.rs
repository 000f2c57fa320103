//! Push gateway trait seam.

use async_trait::async_trait;

use glimpse_core::result::AppResult;

use crate::message::{PushMessage, PushTicket};

/// Outbound push gateway.
///
/// One call submits an ordered batch of messages and returns one ticket
/// per message, in order. An `Err` means the call itself failed (non-2xx
/// status, transport error, timeout); individual rejected messages come
/// back as error tickets inside an `Ok`.
#[async_trait]
pub trait PushGateway: Send + Sync {
    /// Submit a batch of messages.
    async fn send_batch(&self, messages: &[PushMessage]) -> AppResult<Vec<PushTicket>>;
}
