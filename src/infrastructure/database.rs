//! 数据库基础设施

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use std::time::Duration;
use tracing::info;

use crate::core::config::DatabaseConfig;

#[derive(Clone)]
pub struct DatabaseManager {
    pool: MySqlPool,
}

impl DatabaseManager {
    /// Builds a pool without opening a connection. The server comes up while
    /// the database container is still starting; connections are made on
    /// first use.
    pub fn connect_lazy(config: &DatabaseConfig) -> Self {
        info!(url = %config.display_url(), "Configuring database pool");

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(0)
            .acquire_timeout(config.connect_timeout())
            .idle_timeout(Duration::from_secs(60))
            .max_lifetime(Duration::from_secs(30 * 60))
            .connect_lazy_with(config.connect_options());

        Self { pool }
    }

    /// Opens the pool eagerly, failing if the database is unreachable.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        info!(url = %config.display_url(), "Connecting to database");

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout())
            .connect_with(config.connect_options())
            .await?;

        Ok(Self { pool })
    }

    pub fn get_pool(&self) -> &MySqlPool {
        &self.pool
    }
}
