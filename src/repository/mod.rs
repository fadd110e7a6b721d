//! Repository layer for database operations

pub mod events;
pub mod users;
pub mod visitor_counts;

use std::{str::FromStr, time::Duration};

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Sqlite,
};

use crate::{config::DatabaseConfig, error::AppResult};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Sqlite>,
    pub users: users::UsersRepository,
    pub events: events::EventsRepository,
    pub visitor_counts: visitor_counts::VisitorCountsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self {
            users: users::UsersRepository::new(pool.clone()),
            events: events::EventsRepository::new(pool.clone()),
            visitor_counts: visitor_counts::VisitorCountsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Open the connection pool and apply pending migrations
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Pool<Sqlite>> {
        let mut options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections);
        // An in-memory database lives only as long as its connection
        if config.url.contains(":memory:") {
            options = options.idle_timeout(None).max_lifetime(None);
        }
        let connect_options = SqliteConnectOptions::from_str(&config.url)?
            .busy_timeout(Duration::from_secs(config.busy_timeout_secs));
        let pool = options.connect_with(connect_options).await?;
        tracing::info!(url = %config.url, "database connected");

        sqlx::migrate!("./migrations").run(&pool).await.map_err(sqlx::Error::from)?;
        Ok(pool)
    }

    /// Check database connectivity
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// In-memory database with migrations applied, for tests
#[cfg(test)]
pub(crate) async fn test_pool() -> Pool<Sqlite> {
    Repository::connect(&DatabaseConfig::in_memory())
        .await
        .expect("in-memory sqlite")
}
