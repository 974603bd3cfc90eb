// lib.rs - 暴露服务层给宿主桥接层使用

pub mod commands;
pub mod data;
pub mod logging;
pub mod models;
pub mod services;
pub mod utils;

pub use models::*;
// Re-export profile manager
pub use services::profile_manager::{
    ActiveSite, ActiveStore, ProfileDescriptor, ProfileDraft, ProfileError, ProfileManager,
    ProfileStore, ProfileUpdate, ProfilesStore, SinkError, SinkStatus, SiteProfile, SyncEngine,
    SyncReport,
};
// Re-export server supervisor and chat boundary
pub use services::chat::ChatForwarder;
pub use services::server::{ServerError, ServerManager, ServerStatus};

// 重新导出常用类型
pub use anyhow::{Context, Result};

// 导出日志模块
pub use logging::{LogLevel, LogManager, LoggingConfig};

/// 宿主激活时按全局配置自动启动自动化服务器
///
/// 条件：`auto_start: true` 且存在当前档案
pub async fn auto_start_server(manager: &ProfileManager, server: &ServerManager) {
    let config = match utils::config::read_global_config() {
        Ok(Some(config)) => config,
        Ok(None) => return,
        Err(e) => {
            tracing::error!(error = %e, "读取全局配置失败");
            return;
        }
    };

    if !config.auto_start {
        return;
    }

    let profile = match manager.get_current() {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            tracing::warn!("未配置站点档案，跳过自动启动");
            return;
        }
        Err(e) => {
            tracing::error!(error = ?e, "读取当前档案失败");
            return;
        }
    };

    tracing::info!(site = %profile.name, "自动启动自动化服务器");
    if let Err(e) = server.start(&profile).await {
        tracing::error!(error = %e, "自动启动自动化服务器失败");
    }
}
