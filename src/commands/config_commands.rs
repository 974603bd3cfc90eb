//! 全局配置命令

use crate::models::GlobalConfig;
use crate::utils::config::{read_global_config, write_global_config};

/// 读取全局配置（文件不存在时返回 None）
pub async fn get_global_config() -> Result<Option<GlobalConfig>, String> {
    read_global_config()
}

/// 保存全局配置（整文件覆盖）
pub async fn save_global_config(config: GlobalConfig) -> Result<(), String> {
    write_global_config(&config)
}

/// 设置宿主激活时是否自动启动自动化服务器
pub async fn set_auto_start(enabled: bool) -> Result<(), String> {
    let mut config = read_global_config()?.unwrap_or_default();
    config.auto_start = enabled;
    write_global_config(&config)
}
