//! Calendar board
//!
//! A shared calendar where approved members post events. The crate carries
//! both sides of the system: the REST JSON server (`api`, `services`,
//! `repository`) and the client logic that drives it (`client`, `calendar`,
//! `session`, `screens`, `workflow`).

use std::sync::Arc;

pub mod api;
pub mod calendar;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod screens;
pub mod services;
pub mod session;
pub mod workflow;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Build the state over an open (and migrated) database pool
    pub fn new(config: AppConfig, pool: sqlx::SqlitePool) -> Self {
        let repository = repository::Repository::new(pool);
        Self {
            config: Arc::new(config),
            services: Arc::new(services::Services::new(repository)),
        }
    }
}
