//! 站点档案生命周期管理
//!
//! 集合的唯一写入方。不变量：
//! - 集合内 id 两两不同
//! - 至多一个默认档案；首个入库的档案自动成为默认
//! - 当前指针要么为空，要么指向集合内存在的 id

use chrono::Utc;
use url::Url;

use super::error::{ProfileError, SinkStatus, SyncReport};
use super::store::ProfileStore;
use super::sync::SyncEngine;
use super::types::{ProfileDescriptor, ProfileDraft, ProfileUpdate, SiteProfile};

type Result<T> = std::result::Result<T, ProfileError>;

pub struct ProfileManager {
    store: ProfileStore,
    sync: SyncEngine,
}

impl ProfileManager {
    pub fn new(store: ProfileStore, sync: SyncEngine) -> Self {
        Self { store, sync }
    }

    // ==================== 查询 ====================

    /// 有序档案列表（插入顺序）
    pub fn list_all(&self) -> Result<Vec<SiteProfile>> {
        Ok(self.store.list()?)
    }

    /// 当前档案（指针为空或集合为空时返回 None）
    pub fn get_current(&self) -> Result<Option<SiteProfile>> {
        let Some(id) = self.store.current_id()? else {
            return Ok(None);
        };
        Ok(self.store.get(&id)?)
    }

    /// 宿主展示用描述符列表（密码脱敏）
    pub fn descriptors(&self) -> Result<Vec<ProfileDescriptor>> {
        let profiles = self.store.load_profiles()?;
        let active = self.store.load_active()?;
        Ok(profiles
            .profiles
            .iter()
            .map(|p| ProfileDescriptor::from_profile(p, active.current.as_ref()))
            .collect())
    }

    /// 宿主激活时的描述符引导：工作区打开时写出通用模板
    pub fn bootstrap_descriptor(&self) -> SinkStatus {
        self.sync.bootstrap_descriptor()
    }

    // ==================== 生命周期 ====================

    /// 新建档案
    ///
    /// 集合为空时新档案自动成为默认档案并立即切换（恰好触发一次同步）；
    /// 之后的新增不改变当前指针，由调用方显式切换。
    pub fn add(&self, draft: ProfileDraft) -> Result<(SiteProfile, SyncReport)> {
        validate_required("name", &draft.name)?;
        validate_api_url(&draft.api_url)?;
        validate_required("username", &draft.username)?;
        validate_required("password", &draft.password)?;

        let mut profiles = self.store.list()?;
        let is_first = profiles.is_empty();
        let profile = SiteProfile::from_draft(draft, is_first);
        profiles.push(profile.clone());
        self.store.replace_all(profiles)?;

        tracing::info!(id = %profile.id, name = %profile.name, "已创建站点档案");

        // 首个档案即默认档案：立即成为当前档案
        if profile.is_default {
            return self.switch(&profile.id);
        }

        Ok((profile, SyncReport::not_triggered()))
    }

    /// 更新档案（浅合并，省略的字段保持原值）
    ///
    /// 目标是当前档案时同步外部接收端。
    pub fn update(&self, id: &str, changes: ProfileUpdate) -> Result<SyncReport> {
        validate_update(&changes)?;

        let mut profiles = self.store.list()?;
        let Some(slot) = profiles.iter_mut().find(|p| p.id == id) else {
            return Err(ProfileError::NotFound { id: id.to_string() });
        };
        slot.apply_update(changes);
        let updated = slot.clone();
        self.store.replace_all(profiles)?;

        tracing::info!(id = %updated.id, name = %updated.name, "已更新站点档案");

        if self.store.current_id()?.as_deref() == Some(id) {
            return Ok(self.sync.apply(&updated));
        }
        Ok(SyncReport::not_triggered())
    }

    /// 删除档案
    ///
    /// 删除默认档案后由剩余首位补位；删除当前档案后切换到新默认，
    /// 集合删空则清空指针并触发清空同步。
    pub fn delete(&self, id: &str) -> Result<SyncReport> {
        let mut profiles = self.store.list()?;
        let Some(index) = profiles.iter().position(|p| p.id == id) else {
            return Err(ProfileError::NotFound { id: id.to_string() });
        };
        let removed = profiles.remove(index);

        // 默认档案补位：取剩余集合的首位
        if removed.is_default {
            if let Some(first) = profiles.first_mut() {
                first.is_default = true;
            }
        }
        self.store.replace_all(profiles.clone())?;

        tracing::info!(id = %removed.id, name = %removed.name, "已删除站点档案");

        if self.store.current_id()?.as_deref() == Some(id) {
            if profiles.is_empty() {
                self.store.set_current_id(None)?;
                return Ok(self.sync.clear());
            }
            let next_id = profiles
                .iter()
                .find(|p| p.is_default)
                .unwrap_or(&profiles[0])
                .id
                .clone();
            let (_, report) = self.switch(&next_id)?;
            return Ok(report);
        }
        Ok(SyncReport::not_triggered())
    }

    /// 切换当前档案
    ///
    /// 总是刷新 last_connected（即使目标已是当前档案），同步恰好触发一次。
    pub fn switch(&self, id: &str) -> Result<(SiteProfile, SyncReport)> {
        let mut profiles = self.store.list()?;
        let Some(slot) = profiles.iter_mut().find(|p| p.id == id) else {
            return Err(ProfileError::NotFound { id: id.to_string() });
        };
        slot.last_connected = Utc::now();
        let profile = slot.clone();
        self.store.replace_all(profiles)?;
        self.store.set_current_id(Some(id))?;

        tracing::info!(id = %profile.id, name = %profile.name, "已切换当前站点档案");

        let report = self.sync.apply(&profile);
        Ok((profile, report))
    }
}

// ==================== 校验 ====================

fn validate_required(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ProfileError::Validation {
            field,
            reason: "不能为空".to_string(),
        });
    }
    Ok(())
}

fn validate_api_url(value: &str) -> Result<()> {
    validate_required("api_url", value)?;
    Url::parse(value).map_err(|e| ProfileError::Validation {
        field: "api_url",
        reason: e.to_string(),
    })?;
    Ok(())
}

fn validate_update(changes: &ProfileUpdate) -> Result<()> {
    if let Some(name) = &changes.name {
        validate_required("name", name)?;
    }
    if let Some(api_url) = &changes.api_url {
        validate_api_url(api_url)?;
    }
    if let Some(username) = &changes.username {
        validate_required("username", username)?;
    }
    if let Some(password) = &changes.password {
        validate_required("password", password)?;
    }
    Ok(())
}
