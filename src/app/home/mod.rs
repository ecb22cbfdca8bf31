//! 首页

pub mod handler;
