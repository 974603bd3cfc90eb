//! JSON 配置管理器
//!
//! 提供 JSON 配置文件的整文件读写，支持：
//! - 深度合并（保留文件中无关的键）
//! - 自动创建父目录
//! - Unix 权限设置（0o600）
//!
//! 站点档案与设置文件均为低频读写，不做缓存。

use crate::data::{DataError, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// JSON 配置管理器
pub struct JsonManager;

impl JsonManager {
    pub fn new() -> Self {
        Self
    }

    /// 读取整个 JSON 文件
    pub fn read(&self, path: &Path) -> Result<Value> {
        let content = fs::read_to_string(path).map_err(|e| DataError::io(path.to_path_buf(), e))?;
        let value: Value = serde_json::from_str(&content)?;
        Ok(value)
    }

    /// 写入整个 JSON 文件
    ///
    /// 自动创建父目录并设置权限（Unix 平台 0o600）。
    pub fn write(&self, path: &Path, value: &Value) -> Result<()> {
        // 创建父目录
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| DataError::io(parent.to_path_buf(), e))?;
        }

        // 写入文件（格式化输出）
        let content = serde_json::to_string_pretty(value)?;
        fs::write(path, content).map_err(|e| DataError::io(path.to_path_buf(), e))?;

        // 设置权限
        set_permissions(path)?;

        Ok(())
    }

    /// 深度合并 JSON 对象
    ///
    /// 文件不存在时视为空对象。
    pub fn merge(&self, path: &Path, patch: &Value) -> Result<()> {
        let mut value = if path.exists() {
            self.read(path)?
        } else {
            Value::Object(serde_json::Map::new())
        };

        merge_values(&mut value, patch);
        self.write(path, &value)
    }
}

impl Default for JsonManager {
    fn default() -> Self {
        Self::new()
    }
}

/// 深度合并 JSON 值
fn merge_values(target: &mut Value, source: &Value) {
    match (target, source) {
        (Value::Object(target_obj), Value::Object(source_obj)) => {
            for (key, value) in source_obj {
                if let Some(target_value) = target_obj.get_mut(key) {
                    // 递归合并
                    merge_values(target_value, value);
                } else {
                    // 插入新键
                    target_obj.insert(key.clone(), value.clone());
                }
            }
        }
        (target, source) => {
            // 非对象类型，直接替换
            *target = source.clone();
        }
    }
}

/// 设置文件权限（Unix 平台 0o600）
#[cfg(unix)]
fn set_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let metadata = fs::metadata(path).map_err(|e| DataError::io(path.to_path_buf(), e))?;
    let mut perms = metadata.permissions();
    perms.set_mode(0o600);
    fs::set_permissions(path, perms).map_err(|e| DataError::io(path.to_path_buf(), e))
}

#[cfg(not(unix))]
fn set_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
