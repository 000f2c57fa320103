//! HTTP push gateway client.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use glimpse_core::config::push::PushConfig;
use glimpse_core::error::{AppError, ErrorKind};
use glimpse_core::result::AppResult;

use crate::gateway::PushGateway;
use crate::message::{GatewayResponse, PushMessage, PushTicket};

/// reqwest-based [`PushGateway`] implementation.
///
/// The client carries an explicit request timeout so an unresponsive
/// gateway fails the call instead of stalling the whole invocation.
#[derive(Debug, Clone)]
pub struct HttpPushGateway {
    client: reqwest::Client,
    endpoint: String,
    access_token: Option<String>,
}

impl HttpPushGateway {
    /// Create a new gateway client from configuration.
    pub fn new(config: &PushConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::PushGateway,
                    format!("Failed to build HTTP client: {e}"),
                    e,
                )
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            access_token: config.access_token.clone(),
        })
    }
}

#[async_trait]
impl PushGateway for HttpPushGateway {
    async fn send_batch(&self, messages: &[PushMessage]) -> AppResult<Vec<PushTicket>> {
        debug!(count = messages.len(), "Submitting push batch");

        let mut request = self.client.post(&self.endpoint).json(messages);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::PushGateway,
                format!("Push gateway request failed: {e}"),
                e,
            )
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::push_gateway(format!(
                "Push gateway returned {status}: {body}"
            )));
        }

        let parsed: GatewayResponse = response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::PushGateway,
                format!("Failed to parse push gateway response: {e}"),
                e,
            )
        })?;

        if parsed.data.len() != messages.len() {
            return Err(AppError::push_gateway(format!(
                "Push gateway returned {} tickets for {} messages",
                parsed.data.len(),
                messages.len()
            )));
        }

        Ok(parsed.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{Arc, Mutex};

    use axum::Router;
    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;

    use crate::message::PushTicketStatus;

    /// Canned-response gateway stub that records the request it saw.
    #[derive(Clone)]
    struct StubState {
        status: StatusCode,
        body: String,
        seen_auth: Arc<Mutex<Option<String>>>,
        seen_body: Arc<Mutex<Option<serde_json::Value>>>,
    }

    async fn stub_handler(
        State(state): State<StubState>,
        headers: HeaderMap,
        body: String,
    ) -> (StatusCode, String) {
        *state.seen_auth.lock().unwrap() = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        *state.seen_body.lock().unwrap() = serde_json::from_str(&body).ok();
        (state.status, state.body.clone())
    }

    struct StubServer {
        endpoint: String,
        seen_auth: Arc<Mutex<Option<String>>>,
        seen_body: Arc<Mutex<Option<serde_json::Value>>>,
    }

    async fn spawn_stub(status: StatusCode, body: &str) -> StubServer {
        let seen_auth = Arc::new(Mutex::new(None));
        let seen_body = Arc::new(Mutex::new(None));
        let state = StubState {
            status,
            body: body.to_string(),
            seen_auth: Arc::clone(&seen_auth),
            seen_body: Arc::clone(&seen_body),
        };

        let app = Router::new()
            .route("/send", post(stub_handler))
            .with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        StubServer {
            endpoint: format!("http://{addr}/send"),
            seen_auth,
            seen_body,
        }
    }

    fn config(endpoint: &str, access_token: Option<&str>) -> PushConfig {
        PushConfig {
            endpoint: endpoint.to_string(),
            access_token: access_token.map(str::to_string),
            timeout_seconds: 5,
        }
    }

    fn message(to: &str) -> PushMessage {
        PushMessage {
            to: to.to_string(),
            sound: "default".to_string(),
            title: "t".to_string(),
            body: "b".to_string(),
            data: serde_json::json!({}),
            badge: 1,
        }
    }

    #[tokio::test]
    async fn test_success_returns_tickets_in_order_and_sends_bearer() {
        let stub = spawn_stub(
            StatusCode::OK,
            r#"{"data":[{"status":"ok","id":"t1"},
                       {"status":"error","details":{"error":"DeviceNotRegistered"}}]}"#,
        )
        .await;
        let gateway = HttpPushGateway::new(&config(&stub.endpoint, Some("secret"))).unwrap();

        let tickets = gateway
            .send_batch(&[message("tok-a"), message("tok-b")])
            .await
            .unwrap();

        assert_eq!(tickets.len(), 2);
        assert_eq!(tickets[0].status, PushTicketStatus::Ok);
        assert!(tickets[1].is_device_not_registered());
        assert_eq!(
            stub.seen_auth.lock().unwrap().as_deref(),
            Some("Bearer secret")
        );

        let sent = stub.seen_body.lock().unwrap().clone().unwrap();
        assert_eq!(sent.as_array().unwrap().len(), 2);
        assert_eq!(sent[0]["to"], "tok-a");
        assert_eq!(sent[1]["to"], "tok-b");
    }

    #[tokio::test]
    async fn test_non_2xx_is_hard_failure() {
        let stub = spawn_stub(StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").await;
        let gateway = HttpPushGateway::new(&config(&stub.endpoint, None)).unwrap();

        let err = gateway.send_batch(&[message("tok")]).await.unwrap_err();

        assert_eq!(err.kind, ErrorKind::PushGateway);
        // No token configured means no Authorization header on the wire.
        assert!(stub.seen_auth.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_malformed_body_is_hard_failure() {
        let stub = spawn_stub(StatusCode::OK, "not json").await;
        let gateway = HttpPushGateway::new(&config(&stub.endpoint, None)).unwrap();

        let err = gateway.send_batch(&[message("tok")]).await.unwrap_err();

        assert_eq!(err.kind, ErrorKind::PushGateway);
    }

    #[tokio::test]
    async fn test_ticket_count_mismatch_is_hard_failure() {
        let stub = spawn_stub(StatusCode::OK, r#"{"data":[{"status":"ok","id":"t1"}]}"#).await;
        let gateway = HttpPushGateway::new(&config(&stub.endpoint, None)).unwrap();

        let err = gateway
            .send_batch(&[message("tok-a"), message("tok-b")])
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::PushGateway);
    }
}
