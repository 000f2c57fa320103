//! Application state shared across all handlers.

use std::sync::Arc;

use sqlx::PgPool;

use glimpse_core::config::AppConfig;
use glimpse_database::repositories::ScheduleRepository;
use glimpse_dispatch::MomentWindowDispatcher;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool
    pub db_pool: PgPool,
    /// Moment-window dispatcher
    pub dispatcher: Arc<MomentWindowDispatcher>,
    /// Schedule repository, used by the status probe
    pub schedule_repo: Arc<ScheduleRepository>,
}
