//! # glimpse-core
//!
//! Core crate for the Glimpse moment-window dispatch service. Contains
//! configuration schemas and the unified error system.
//!
//! This crate has **no** internal dependencies on other Glimpse crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::AppError;
pub use result::AppResult;
