use crate::logging::config::LoggingConfig;
use anyhow::{anyhow, Context, Result};
use std::fs;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

/// 日志管理器
///
/// 持有非阻塞写入器的 guard，丢弃后缓冲区不再刷新。
pub struct LogManager {
    pub config: LoggingConfig,
    _guards: Vec<tracing_appender::non_blocking::WorkerGuard>,
}

impl LogManager {
    /// 初始化日志系统（环境变量覆盖默认配置）
    pub fn init() -> Result<Self> {
        Self::init_with_config(LoggingConfig::from_env())
    }

    /// 使用指定配置初始化日志系统
    pub fn init_with_config(config: LoggingConfig) -> Result<Self> {
        // 确保日志目录存在
        if config.file_enabled {
            let log_path = config.get_effective_log_path();
            fs::create_dir_all(&log_path)
                .with_context(|| format!("无法创建日志目录: {:?}", log_path))?;
        }

        let registry = Registry::default();
        let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();
        let mut guards = Vec::new();

        // 控制台日志层
        if config.console_enabled {
            let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stdout());
            guards.push(guard);
            layers.push(
                fmt::layer()
                    .with_target(false)
                    .with_file(false)
                    .with_line_number(false)
                    .with_writer(non_blocking)
                    .boxed(),
            );
        }

        // 文件日志层（按天滚动）
        if config.file_enabled {
            let file_appender =
                tracing_appender::rolling::daily(config.get_effective_log_path(), "wpmcp.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            guards.push(guard);

            let layer = if config.json_format {
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(non_blocking)
                    .boxed()
            } else {
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(non_blocking)
                    .boxed()
            };
            layers.push(layer);
        }

        let filter = EnvFilter::new(format!("wpmcp={}", config.level));
        registry
            .with(layers)
            .with(filter)
            .try_init()
            .map_err(|e| anyhow!("初始化日志订阅器失败: {e}"))?;

        tracing::info!(
            "日志系统初始化完成 - 级别: {}, 控制台: {}, 文件: {}",
            config.level,
            config.console_enabled,
            config.file_enabled
        );

        Ok(Self {
            config,
            _guards: guards,
        })
    }
}
