// 全局配置结构，放在 models 以便在库内共享
use serde::{Deserialize, Serialize};

/// 自动化服务器启动方式
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerLauncher {
    pub command: String,
    pub args: Vec<String>,
}

impl Default for ServerLauncher {
    fn default() -> Self {
        Self {
            command: "npx".to_string(),
            args: vec!["-y".to_string(), "@instawp/mcp-wp".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GlobalConfig {
    /// 宿主激活时是否自动启动自动化服务器
    #[serde(default)]
    pub auto_start: bool,
    /// 自定义启动方式（默认 npx -y @instawp/mcp-wp）
    #[serde(default)]
    pub launcher: Option<ServerLauncher>,
}

impl GlobalConfig {
    /// 生效的启动方式（未配置时取默认值）
    pub fn effective_launcher(&self) -> ServerLauncher {
        self.launcher.clone().unwrap_or_default()
    }
}
