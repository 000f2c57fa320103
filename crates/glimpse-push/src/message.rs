//! Push gateway wire types.
//!
//! Field names follow the gateway's JSON contract exactly; these structs
//! are serialization targets, not domain entities.

use serde::{Deserialize, Serialize};

/// One push message addressed to a single device token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushMessage {
    /// Recipient push token.
    pub to: String,
    /// Notification sound.
    pub sound: String,
    /// Notification title.
    pub title: String,
    /// Notification body.
    pub body: String,
    /// Opaque payload delivered to the app.
    pub data: serde_json::Value,
    /// App icon badge count.
    pub badge: i32,
}

/// Delivery status of a single ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PushTicketStatus {
    /// The gateway accepted the message.
    Ok,
    /// The gateway rejected the message.
    Error,
}

/// Per-message result returned by the gateway, in request order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushTicket {
    /// Delivery status.
    pub status: PushTicketStatus,
    /// Gateway-assigned receipt identifier (success only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Human-readable rejection message (error only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Structured rejection details (error only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<TicketDetails>,
}

/// Structured error details attached to a rejected ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketDetails {
    /// Gateway error code, e.g. `"DeviceNotRegistered"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PushTicket {
    /// Check if the ticket reports a permanently dead device token.
    pub fn is_device_not_registered(&self) -> bool {
        self.status == PushTicketStatus::Error
            && self
                .details
                .as_ref()
                .and_then(|d| d.error.as_deref())
                .is_some_and(|e| e == "DeviceNotRegistered")
    }
}

/// Gateway batch-send response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayResponse {
    /// One ticket per submitted message, in order.
    pub data: Vec<PushTicket>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_serializes_with_gateway_field_names() {
        let msg = PushMessage {
            to: "token-1".to_string(),
            sound: "default".to_string(),
            title: "t".to_string(),
            body: "b".to_string(),
            data: serde_json::json!({ "window_id": "abc" }),
            badge: 1,
        };

        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.starts_with(r#"{"to":"token-1""#));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["sound"], "default");
        assert_eq!(value["title"], "t");
        assert_eq!(value["badge"], 1);
        assert_eq!(value["data"]["window_id"], "abc");
    }

    #[test]
    fn test_response_parses_mixed_tickets() {
        let body = r#"{
            "data": [
                { "status": "ok", "id": "ticket-1" },
                { "status": "error", "message": "not registered",
                  "details": { "error": "DeviceNotRegistered" } }
            ]
        }"#;

        let parsed: GatewayResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.data.len(), 2);
        assert_eq!(parsed.data[0].status, PushTicketStatus::Ok);
        assert!(!parsed.data[0].is_device_not_registered());
        assert!(parsed.data[1].is_device_not_registered());
    }
}
