//! # glimpse-api
//!
//! HTTP surface of the dispatcher: the dispatch trigger endpoint, a
//! queue-status probe, and health checks, built on Axum.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
