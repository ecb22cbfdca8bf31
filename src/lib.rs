//! # Web Scaffold
//!
//! 基于 MySQL 的小型 Web 应用及其测试工具：
//! - `app`: 首页、数据库检查页和只读商品 API
//! - `core`: 配置、错误与响应
//! - `infrastructure`: 数据库连接池、日志和初始化脚本
//! - `harness`: 就绪轮询器与测试运行配置

pub mod app;
pub mod core;
pub mod harness;
pub mod infrastructure;

pub use crate::app::{create_app, AppState};
pub use crate::core::config::{AppConfig, DatabaseConfig, ServerConfig};
pub use crate::harness::readiness::{Readiness, ReadinessError, ReadinessPoller};
pub use crate::harness::settings::HarnessConfig;
