//! WPMCP 日志系统模块
//!
//! 提供结构化、异步、可配置的日志功能：
//! - 控制台和文件输出
//! - JSON 格式可选
//! - 非阻塞异步处理

pub mod config;
pub mod logger;

// 重新导出公共接口
pub use config::{LogLevel, LoggingConfig};
pub use logger::LogManager;
