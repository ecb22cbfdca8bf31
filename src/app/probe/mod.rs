//! 数据库连通性探测

pub mod handler;
pub mod model;
pub mod service;
