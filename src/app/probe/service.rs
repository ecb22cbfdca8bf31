//! 数据库探测业务服务

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::Connection;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

use super::model::ProbeReport;
use crate::core::config::DatabaseConfig;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("timed out after {0:?} waiting for the database")]
    Timeout(Duration),

    #[error("{0}")]
    Database(#[from] sqlx::Error),
}

/// Answers whether the database can be reached and queried right now.
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    async fn check(&self) -> Result<ProbeReport, ProbeError>;
}

/// Opens a fresh connection per check; the pool is not involved so a
/// saturated pool cannot mask an outage.
#[derive(Clone)]
pub struct MySqlProbe {
    options: MySqlConnectOptions,
    timeout: Duration,
}

impl MySqlProbe {
    pub fn new(config: &DatabaseConfig) -> Self {
        Self {
            options: config.connect_options(),
            timeout: config.connect_timeout(),
        }
    }

    async fn round_trip(&self) -> Result<String, ProbeError> {
        let mut conn = MySqlConnection::connect_with(&self.options).await?;

        let result = sqlx::query_scalar::<_, String>("SELECT VERSION()")
            .fetch_one(&mut conn)
            .await;

        if let Err(e) = conn.close().await {
            warn!(error = %e, "Failed to close probe connection");
        }

        Ok(result?)
    }
}

#[async_trait]
impl ConnectivityProbe for MySqlProbe {
    /// Connect, query and close all share one deadline; a stalled server
    /// drops the connection and reports a timeout.
    async fn check(&self) -> Result<ProbeReport, ProbeError> {
        let started = Instant::now();

        let server_version = tokio::time::timeout(self.timeout, self.round_trip())
            .await
            .map_err(|_| ProbeError::Timeout(self.timeout))??;

        let report = ProbeReport::new(server_version, started.elapsed());
        debug!(
            server_version = %report.server_version,
            latency_ms = report.latency_ms,
            "Database probe succeeded"
        );
        Ok(report)
    }
}
