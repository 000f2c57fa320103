//! HTTP request handlers.

pub mod dispatch;
pub mod health;
