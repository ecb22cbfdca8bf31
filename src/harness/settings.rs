//! 针对 compose 环境的测试运行配置

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

use super::readiness::{ReadinessError, ReadinessPoller};
use crate::core::config::{parse_value, ConfigError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Application base URL (APP_URL)
    pub app_url: String,
    /// Remote WebDriver endpoint (SELENIUM_REMOTE_URL)
    pub selenium_url: String,
    /// Readiness budget per service, in seconds (READINESS_TIMEOUT)
    pub timeout_secs: u64,
    /// Seconds between readiness attempts (READINESS_INTERVAL)
    pub interval_secs: u64,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            app_url: "http://app:5000".to_string(),
            selenium_url: "http://selenium:4444/wd/hub".to_string(),
            timeout_secs: 60,
            interval_secs: 2,
        }
    }
}

impl HarnessConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("APP_URL") {
            self.app_url = v;
        }
        if let Some(v) = lookup("SELENIUM_REMOTE_URL") {
            self.selenium_url = v;
        }
        if let Some(v) = lookup("READINESS_TIMEOUT") {
            self.timeout_secs = parse_value("READINESS_TIMEOUT", v)?;
        }
        if let Some(v) = lookup("READINESS_INTERVAL") {
            self.interval_secs = parse_value("READINESS_INTERVAL", v)?;
        }
        Ok(self)
    }

    /// Grid status endpoint: everything before `/wd/hub`, plus `/status`.
    pub fn selenium_status_url(&self) -> String {
        let base = match self.selenium_url.split_once("/wd/hub") {
            Some((base, _)) => base,
            None => self.selenium_url.as_str(),
        };
        format!("{}/status", base.trim_end_matches('/'))
    }

    /// Joins `path` onto the application base URL.
    pub fn app_path(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.app_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn poller(&self) -> Result<ReadinessPoller, ReadinessError> {
        ReadinessPoller::new(
            Duration::from_secs(self.timeout_secs),
            Duration::from_secs(self.interval_secs),
        )
    }

    /// Waits for the browser grid, then the application. The first failure
    /// aborts the wait.
    pub fn wait_for_stack(&self) -> Result<(), ReadinessError> {
        let poller = self.poller()?;

        let status_url = self.selenium_status_url();
        info!(url = %status_url, "Waiting for Selenium grid");
        poller.clone().expect_json(true).wait(&status_url)?;

        info!(url = %self.app_url, "Waiting for application");
        poller.wait(&self.app_url)?;
        Ok(())
    }
}
