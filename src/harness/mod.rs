//! 测试工具：就绪轮询与运行配置

pub mod readiness;
pub mod settings;
