//! 数据库探测数据模型

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeReport {
    pub server_version: String,
    pub latency_ms: u64,
    pub checked_at: String,
}

impl ProbeReport {
    pub fn new(server_version: String, latency: Duration) -> Self {
        Self {
            server_version,
            latency_ms: latency.as_millis() as u64,
            checked_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
