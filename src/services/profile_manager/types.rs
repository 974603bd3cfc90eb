//! 站点档案数据类型定义
//!
//! 设计原则：集合保持插入顺序，当前指针单独持久化

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// 持久化记录的结构版本号
pub const STORE_VERSION: &str = "1.0.0";

// ==================== 站点档案 ====================

/// WordPress 站点档案
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteProfile {
    /// 创建时生成，之后不可变
    pub id: String,
    pub name: String,
    pub api_url: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub is_default: bool,
    /// 每次成为当前档案时刷新
    pub last_connected: DateTime<Utc>,
    /// 附加设置，核心不解释其内容，原样透传
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_settings: Option<Map<String, Value>>,
}

/// 新建档案的输入数据
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileDraft {
    pub name: String,
    pub api_url: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub custom_settings: Option<Map<String, Value>>,
}

/// 档案更新数据（省略的字段保持原值）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub api_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub custom_settings: Option<Map<String, Value>>,
}

impl SiteProfile {
    /// 档案只经由 Add 创建，id 与首个时间戳在此生成
    pub(crate) fn from_draft(draft: ProfileDraft, is_default: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            api_url: draft.api_url,
            username: draft.username,
            password: draft.password,
            is_default,
            last_connected: Utc::now(),
            custom_settings: draft.custom_settings,
        }
    }

    /// 浅合并：只替换提供的字段
    pub(crate) fn apply_update(&mut self, update: ProfileUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(api_url) = update.api_url {
            self.api_url = api_url;
        }
        if let Some(username) = update.username {
            self.username = username;
        }
        if let Some(password) = update.password {
            self.password = password;
        }
        if let Some(custom_settings) = update.custom_settings {
            self.custom_settings = Some(custom_settings);
        }
    }
}

// ==================== profiles.json 结构 ====================

/// profiles.json 顶层结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilesStore {
    pub version: String,
    /// 插入顺序即集合顺序
    pub profiles: Vec<SiteProfile>,
    pub metadata: StoreMetadata,
}

impl ProfilesStore {
    pub fn new() -> Self {
        Self {
            version: STORE_VERSION.to_string(),
            profiles: Vec::new(),
            metadata: StoreMetadata {
                last_updated: Utc::now(),
            },
        }
    }
}

impl Default for ProfilesStore {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreMetadata {
    pub last_updated: DateTime<Utc>,
}

// ==================== active.json 结构 ====================

/// active.json 顶层结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveStore {
    pub version: String,
    pub current: Option<ActiveSite>,
    pub metadata: StoreMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveSite {
    pub id: String,
    pub switched_at: DateTime<Utc>,
}

impl ActiveStore {
    pub fn new() -> Self {
        Self {
            version: STORE_VERSION.to_string(),
            current: None,
            metadata: StoreMetadata {
                last_updated: Utc::now(),
            },
        }
    }

    pub fn set_current(&mut self, id: &str) {
        self.current = Some(ActiveSite {
            id: id.to_string(),
            switched_at: Utc::now(),
        });
        self.metadata.last_updated = Utc::now();
    }

    pub fn clear_current(&mut self) {
        self.current = None;
        self.metadata.last_updated = Utc::now();
    }
}

impl Default for ActiveStore {
    fn default() -> Self {
        Self::new()
    }
}

// ==================== 描述符（宿主展示用） ====================

/// 档案描述符：密码脱敏后的展示形式
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileDescriptor {
    pub id: String,
    pub name: String,
    pub api_url: String,
    pub username: String,
    pub password_preview: String,
    pub is_default: bool,
    pub is_current: bool,
    pub last_connected: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub switched_at: Option<DateTime<Utc>>,
}

impl ProfileDescriptor {
    pub fn from_profile(profile: &SiteProfile, current: Option<&ActiveSite>) -> Self {
        let is_current = current.map(|c| c.id == profile.id).unwrap_or(false);
        let switched_at = if is_current {
            current.map(|c| c.switched_at)
        } else {
            None
        };

        Self {
            id: profile.id.clone(),
            name: profile.name.clone(),
            api_url: profile.api_url.clone(),
            username: profile.username.clone(),
            password_preview: mask_password(&profile.password),
            is_default: profile.is_default,
            is_current,
            last_connected: profile.last_connected,
            switched_at,
        }
    }
}

// ==================== 辅助函数 ====================

fn mask_password(secret: &str) -> String {
    if secret.len() <= 8 {
        return "****".to_string();
    }
    let prefix = &secret[..4];
    let suffix = &secret[secret.len() - 4..];
    format!("{}...{}", prefix, suffix)
}
