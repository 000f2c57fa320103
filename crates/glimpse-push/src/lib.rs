//! # glimpse-push
//!
//! Push gateway integration: wire types, the [`gateway::PushGateway`]
//! trait seam, and the reqwest-based HTTP implementation.

pub mod gateway;
pub mod http;
pub mod message;

pub use gateway::PushGateway;
pub use http::HttpPushGateway;
pub use message::{PushMessage, PushTicket, PushTicketStatus};
