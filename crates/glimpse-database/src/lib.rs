//! # glimpse-database
//!
//! PostgreSQL connection management and concrete repository
//! implementations for the Glimpse schedule and device tables.

pub mod connection;
pub mod migration;
pub mod repositories;
