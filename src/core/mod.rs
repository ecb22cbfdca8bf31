//! 核心层：配置、错误与响应

pub mod config;
pub mod error;
pub mod response;
