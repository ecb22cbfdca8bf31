//! 只读商品 API

pub mod handler;
pub mod model;
pub mod service;
