use crate::data::JsonManager;
use crate::models::GlobalConfig;
use std::fs;
use std::path::PathBuf;

/// WPMCP 配置目录 (~/.wpmcp)，若不存在则创建
pub fn config_dir() -> Result<PathBuf, String> {
    let home_dir = dirs::home_dir().ok_or("Failed to get home directory")?;
    let config_dir = home_dir.join(".wpmcp");
    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)
            .map_err(|e| format!("Failed to create config directory: {}", e))?;
    }
    Ok(config_dir)
}

/// 全局配置文件路径
pub fn global_config_path() -> Result<PathBuf, String> {
    Ok(config_dir()?.join("config.json"))
}

/// 默认设置面文件路径（宿主未注入编辑器设置路径时使用）
pub fn default_settings_path() -> Result<PathBuf, String> {
    Ok(config_dir()?.join("settings.json"))
}

/// 读取全局配置（若文件不存在返回 Ok(None)）
pub fn read_global_config() -> Result<Option<GlobalConfig>, String> {
    let config_path = global_config_path()?;
    if !config_path.exists() {
        return Ok(None);
    }

    let content =
        fs::read_to_string(&config_path).map_err(|e| format!("Failed to read config: {}", e))?;
    let config: GlobalConfig =
        serde_json::from_str(&content).map_err(|e| format!("Failed to parse config: {}", e))?;

    Ok(Some(config))
}

/// 写入全局配置（0o600 权限由 JsonManager 统一设置）
pub fn write_global_config(config: &GlobalConfig) -> Result<(), String> {
    let config_path = global_config_path()?;
    let value =
        serde_json::to_value(config).map_err(|e| format!("Failed to serialize config: {}", e))?;
    JsonManager::new()
        .write(&config_path, &value)
        .map_err(|e| format!("Failed to write config: {}", e))
}
