//! 外部接收端同步
//!
//! 档案激活（或激活档案字段变更）后，把当前档案写入两个外部表面：
//!
//! - 设置面：编辑器全局设置 JSON 中 `wordpress-mcp` 命名空间的四个扁平键，
//!   深度合并写入，保留文件中无关的设置
//! - 描述符：工作区 `.vscode/mcp.json`，整文件覆盖，env 中只写
//!   `${input:...}` 占位引用，不落明文凭据
//!
//! 两端尽力而为、彼此独立：任一失败不回滚 Store，也不影响另一端。

use std::path::PathBuf;

use serde_json::{json, Map, Value};

use super::error::{SinkError, SinkStatus, SyncReport};
use super::types::SiteProfile;
use crate::data::JsonManager;

/// 设置面键名（wordpress-mcp 命名空间）
const SETTINGS_KEY_API_URL: &str = "wordpress-mcp.apiUrl";
const SETTINGS_KEY_USERNAME: &str = "wordpress-mcp.username";
const SETTINGS_KEY_PASSWORD: &str = "wordpress-mcp.password";
const SETTINGS_KEY_SITE_NAME: &str = "wordpress-mcp.siteName";

/// 描述符文件的工作区相对位置
const DESCRIPTOR_DIR: &str = ".vscode";
const DESCRIPTOR_FILE: &str = "mcp.json";

/// 描述符中的输入参数 id
const INPUT_API_URL: &str = "wordpress-api-url";
const INPUT_USERNAME: &str = "wordpress-username";
const INPUT_PASSWORD: &str = "wordpress-password";

/// 清空状态下的站点显示名与端点占位
const FALLBACK_SITE_NAME: &str = "WordPress";
const FALLBACK_API_URL: &str = "https://your-wordpress-site.com";

/// 描述符里登记的服务器启动方式
const SERVER_COMMAND: &str = "npx";
const SERVER_ARGS: [&str; 2] = ["-y", "@instawp/mcp-wp"];

pub struct SyncEngine {
    json: JsonManager,
    settings_path: PathBuf,
    workspace_root: Option<PathBuf>,
}

impl SyncEngine {
    /// `settings_path`: 编辑器全局设置文件；`workspace_root`: 当前打开的
    /// 工作区根目录，未打开时描述符端跳过。
    pub fn new(settings_path: PathBuf, workspace_root: Option<PathBuf>) -> Self {
        Self {
            json: JsonManager::new(),
            settings_path,
            workspace_root,
        }
    }

    /// 把档案写入两个接收端
    pub fn apply(&self, profile: &SiteProfile) -> SyncReport {
        let settings = self.write_settings(
            &profile.api_url,
            &profile.username,
            &profile.password,
            &profile.name,
        );
        let descriptor = self.write_descriptor(Some(profile));
        report(settings, descriptor)
    }

    /// 清空接收端（集合删空时触发）
    ///
    /// 设置面重置为空串占位，描述符改写为通用模板而不是删除。
    pub fn clear(&self) -> SyncReport {
        let settings = self.write_settings("", "", "", FALLBACK_SITE_NAME);
        let descriptor = self.write_descriptor(None);
        report(settings, descriptor)
    }

    /// 宿主激活时的描述符引导：只在工作区打开时写出通用模板，不碰设置面
    pub fn bootstrap_descriptor(&self) -> SinkStatus {
        let status = self.write_descriptor(None);
        if let SinkStatus::Failed(e) = &status {
            tracing::warn!(error = %e, "描述符引导写入失败");
        }
        status
    }

    // ==================== 设置面 ====================

    fn write_settings(
        &self,
        api_url: &str,
        username: &str,
        password: &str,
        site_name: &str,
    ) -> SinkStatus {
        let patch = json!({
            SETTINGS_KEY_API_URL: api_url,
            SETTINGS_KEY_USERNAME: username,
            SETTINGS_KEY_PASSWORD: password,
            SETTINGS_KEY_SITE_NAME: site_name,
        });

        match self.json.merge(&self.settings_path, &patch) {
            Ok(()) => SinkStatus::Applied,
            Err(e) => SinkStatus::Failed(SinkError::Settings(e)),
        }
    }

    // ==================== 描述符 ====================

    fn write_descriptor(&self, profile: Option<&SiteProfile>) -> SinkStatus {
        // 未打开工作区时描述符无处可写
        let Some(root) = &self.workspace_root else {
            return SinkStatus::Skipped;
        };

        let path = root.join(DESCRIPTOR_DIR).join(DESCRIPTOR_FILE);
        match self.json.write(&path, &descriptor_document(profile)) {
            Ok(()) => SinkStatus::Applied,
            Err(e) => SinkStatus::Failed(SinkError::Descriptor(e)),
        }
    }
}

fn report(settings: SinkStatus, descriptor: SinkStatus) -> SyncReport {
    if let SinkStatus::Failed(e) = &settings {
        tracing::warn!(error = %e, "设置面同步失败");
    }
    if let SinkStatus::Failed(e) = &descriptor {
        tracing::warn!(error = %e, "描述符同步失败");
    }
    SyncReport {
        settings,
        descriptor,
    }
}

/// 生成描述符文档（整文件覆盖，不与旧内容合并）
///
/// `profile` 为空时生成通用模板：服务器条目不带站点名，输入参数无默认值。
fn descriptor_document(profile: Option<&SiteProfile>) -> Value {
    let mut api_url_input = json!({
        "type": "promptString",
        "id": INPUT_API_URL,
        "description": "WordPress API URL",
        "default": FALLBACK_API_URL,
    });
    let mut username_input = json!({
        "type": "promptString",
        "id": INPUT_USERNAME,
        "description": "WordPress Username",
    });
    // 凭据参数标记为掩码输入，默认值不落盘
    let password_input = json!({
        "type": "promptString",
        "id": INPUT_PASSWORD,
        "description": "WordPress Application Password",
        "password": true,
    });

    let server_name = match profile {
        Some(p) => {
            api_url_input["default"] = json!(p.api_url);
            username_input["default"] = json!(p.username);
            format!("WordPress MCP - {}", p.name)
        }
        None => "WordPress MCP".to_string(),
    };

    let mut servers = Map::new();
    servers.insert(
        server_name,
        json!({
            "type": "stdio",
            "command": SERVER_COMMAND,
            "args": SERVER_ARGS,
            "env": {
                "WORDPRESS_API_URL": format!("${{input:{}}}", INPUT_API_URL),
                "WORDPRESS_USERNAME": format!("${{input:{}}}", INPUT_USERNAME),
                "WORDPRESS_PASSWORD": format!("${{input:{}}}", INPUT_PASSWORD),
            }
        }),
    );

    json!({
        "inputs": [api_url_input, username_input, password_input],
        "servers": servers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::profile_manager::types::ProfileDraft;
    use tempfile::TempDir;

    fn profile() -> SiteProfile {
        SiteProfile::from_draft(
            ProfileDraft {
                name: "Site A".to_string(),
                api_url: "https://a.example".to_string(),
                username: "admin".to_string(),
                password: "super-secret-app-pass".to_string(),
                custom_settings: None,
            },
            true,
        )
    }

    #[test]
    fn test_apply_writes_settings_keys() {
        let temp = TempDir::new().unwrap();
        let settings_path = temp.path().join("settings.json");
        let engine = SyncEngine::new(settings_path.clone(), None);

        let report = engine.apply(&profile());
        assert!(report.settings.is_applied());

        let content = JsonManager::new().read(&settings_path).unwrap();
        assert_eq!(content[SETTINGS_KEY_API_URL], json!("https://a.example"));
        assert_eq!(content[SETTINGS_KEY_USERNAME], json!("admin"));
        assert_eq!(content[SETTINGS_KEY_SITE_NAME], json!("Site A"));
    }

    #[test]
    fn test_apply_preserves_unrelated_settings() {
        let temp = TempDir::new().unwrap();
        let settings_path = temp.path().join("settings.json");
        let json = JsonManager::new();
        json.write(&settings_path, &json!({"editor.fontSize": 14}))
            .unwrap();

        let engine = SyncEngine::new(settings_path.clone(), None);
        engine.apply(&profile());

        let content = json.read(&settings_path).unwrap();
        assert_eq!(content["editor.fontSize"], json!(14));
    }

    #[test]
    fn test_descriptor_skipped_without_workspace() {
        let temp = TempDir::new().unwrap();
        let engine = SyncEngine::new(temp.path().join("settings.json"), None);

        let report = engine.apply(&profile());
        assert!(matches!(report.descriptor, SinkStatus::Skipped));
    }

    #[test]
    fn test_descriptor_document_shape() {
        let temp = TempDir::new().unwrap();
        let workspace = TempDir::new().unwrap();
        let engine = SyncEngine::new(
            temp.path().join("settings.json"),
            Some(workspace.path().to_path_buf()),
        );

        let report = engine.apply(&profile());
        assert!(report.descriptor.is_applied());

        let path = workspace.path().join(".vscode").join("mcp.json");
        let doc = JsonManager::new().read(&path).unwrap();

        let inputs = doc["inputs"].as_array().unwrap();
        assert_eq!(inputs.len(), 3);
        assert_eq!(inputs[0]["default"], json!("https://a.example"));
        assert_eq!(inputs[2]["password"], json!(true));
        // 凭据默认值不落盘
        assert!(inputs[2].get("default").is_none());

        let server = &doc["servers"]["WordPress MCP - Site A"];
        assert_eq!(server["type"], json!("stdio"));
        assert_eq!(server["command"], json!("npx"));
        assert_eq!(server["args"], json!(["-y", "@instawp/mcp-wp"]));
        assert_eq!(
            server["env"]["WORDPRESS_PASSWORD"],
            json!("${input:wordpress-password}")
        );
        // 整份文档不包含明文凭据
        assert!(!doc.to_string().contains("super-secret-app-pass"));
    }

    #[test]
    fn test_descriptor_overwrites_previous_content() {
        let settings = TempDir::new().unwrap();
        let workspace = TempDir::new().unwrap();
        let engine = SyncEngine::new(
            settings.path().join("settings.json"),
            Some(workspace.path().to_path_buf()),
        );

        engine.apply(&profile());

        let mut renamed = profile();
        renamed.name = "Site B".to_string();
        engine.apply(&renamed);

        let path = workspace.path().join(".vscode").join("mcp.json");
        let doc = JsonManager::new().read(&path).unwrap();
        let servers = doc["servers"].as_object().unwrap();
        // 整文件覆盖：旧条目不残留
        assert_eq!(servers.len(), 1);
        assert!(servers.contains_key("WordPress MCP - Site B"));
    }

    #[test]
    fn test_clear_resets_both_sinks() {
        let settings = TempDir::new().unwrap();
        let workspace = TempDir::new().unwrap();
        let settings_path = settings.path().join("settings.json");
        let engine = SyncEngine::new(settings_path.clone(), Some(workspace.path().to_path_buf()));

        engine.apply(&profile());
        let report = engine.clear();
        assert!(report.is_clean());

        let json = JsonManager::new();
        let content = json.read(&settings_path).unwrap();
        assert_eq!(content[SETTINGS_KEY_API_URL], json!(""));
        assert_eq!(content[SETTINGS_KEY_SITE_NAME], json!("WordPress"));

        let doc = json
            .read(&workspace.path().join(".vscode").join("mcp.json"))
            .unwrap();
        let servers = doc["servers"].as_object().unwrap();
        assert!(servers.contains_key("WordPress MCP"));
        assert_eq!(doc["inputs"][0]["default"], json!(FALLBACK_API_URL));
        assert!(doc["inputs"][1].get("default").is_none());
    }

    #[test]
    fn test_settings_failure_does_not_block_descriptor() {
        let settings = TempDir::new().unwrap();
        let workspace = TempDir::new().unwrap();
        // 把一个普通文件当作父目录，设置面写入必然失败
        let blocker = settings.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let engine = SyncEngine::new(
            blocker.join("settings.json"),
            Some(workspace.path().to_path_buf()),
        );

        let report = engine.apply(&profile());
        assert!(report.settings.is_failed());
        assert!(report.descriptor.is_applied());
        assert!(workspace.path().join(".vscode").join("mcp.json").exists());
        assert_eq!(report.warnings().len(), 1);
    }

    #[test]
    fn test_bootstrap_writes_generic_descriptor() {
        let settings = TempDir::new().unwrap();
        let workspace = TempDir::new().unwrap();
        let settings_path = settings.path().join("settings.json");
        let engine = SyncEngine::new(settings_path.clone(), Some(workspace.path().to_path_buf()));

        let status = engine.bootstrap_descriptor();
        assert!(status.is_applied());
        assert!(workspace.path().join(".vscode").join("mcp.json").exists());
        // 引导不碰设置面
        assert!(!settings_path.exists());
    }
}
