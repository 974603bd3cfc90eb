use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 日志级别枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

/// 日志配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: LogLevel,
    /// 是否启用控制台输出
    pub console_enabled: bool,
    /// 是否启用文件输出
    pub file_enabled: bool,
    /// 自定义日志目录
    pub file_path: Option<PathBuf>,
    /// 是否使用 JSON 格式
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            console_enabled: true,
            file_enabled: true,
            file_path: None,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// 解析字符串为日志级别
    pub fn parse_level(level_str: &str) -> Result<LogLevel, String> {
        match level_str.to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(format!("无效的日志级别: {}", level_str)),
        }
    }

    /// 从环境变量加载配置（未设置的项保持默认值）
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(level_str) = std::env::var("RUST_LOG") {
            if let Ok(level) = Self::parse_level(&level_str) {
                config.level = level;
            }
        }

        if let Ok(enabled) = std::env::var("WPMCP_LOG_CONSOLE") {
            config.console_enabled = enabled.parse().unwrap_or(true);
        }

        if let Ok(enabled) = std::env::var("WPMCP_LOG_FILE") {
            config.file_enabled = enabled.parse().unwrap_or(true);
        }

        if let Ok(path) = std::env::var("WPMCP_LOG_PATH") {
            config.file_path = Some(path.into());
        }

        if let Ok(json_fmt) = std::env::var("WPMCP_LOG_JSON") {
            config.json_format = json_fmt.parse().unwrap_or(false);
        }

        config
    }

    /// 获取默认日志目录
    pub fn default_log_file_path() -> PathBuf {
        if let Some(data_dir) = dirs::data_dir() {
            data_dir.join("wpmcp").join("logs")
        } else {
            std::env::temp_dir().join("wpmcp").join("logs")
        }
    }

    /// 获取有效的日志目录
    pub fn get_effective_log_path(&self) -> PathBuf {
        self.file_path
            .clone()
            .unwrap_or_else(Self::default_log_file_path)
    }
}
