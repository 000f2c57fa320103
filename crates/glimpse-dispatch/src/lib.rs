//! # glimpse-dispatch
//!
//! The moment-window dispatcher: one stateless pass per invocation that
//! claims due schedule records, fans push notifications out to each
//! user's registered devices, and marks the records sent. Per-record
//! failures are isolated; only the initial due-window query is fatal.

pub mod dispatcher;
pub mod report;
pub mod runner;
pub mod store;

pub use dispatcher::MomentWindowDispatcher;
pub use report::DispatchReport;
pub use runner::DispatchRunner;
pub use store::{DeviceStore, ScheduleStore};
