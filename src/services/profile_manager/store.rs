//! 站点档案持久化
//!
//! 两条持久化记录：
//! - `profiles.json`: 有序档案集合
//! - `active.json`: 当前档案指针
//!
//! 每次变更整文件写回，写入期间持有排他文件锁；这里只做持久化，
//! 不做任何业务校验。

use std::fs::File;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde_json::Value;

use super::types::{ActiveStore, ProfilesStore, SiteProfile};
use crate::data::{DataError, JsonManager, Result};

pub struct ProfileStore {
    json: JsonManager,
    profiles_path: PathBuf,
    active_path: PathBuf,
}

impl ProfileStore {
    /// 在指定目录下打开存储（目录不存在时创建）
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| DataError::io(dir.clone(), e))?;

        Ok(Self {
            json: JsonManager::new(),
            profiles_path: dir.join("profiles.json"),
            active_path: dir.join("active.json"),
        })
    }

    /// 打开默认位置 (~/.wpmcp) 的存储
    pub fn open_default() -> anyhow::Result<Self> {
        let dir = crate::utils::config::config_dir().map_err(|e| anyhow::anyhow!(e))?;
        Ok(Self::open(dir)?)
    }

    // ==================== 记录读写 ====================

    pub fn load_profiles(&self) -> Result<ProfilesStore> {
        if !self.profiles_path.exists() {
            return Ok(ProfilesStore::new());
        }
        let value = self.json.read(&self.profiles_path)?;
        Ok(serde_json::from_value(value)?)
    }

    pub fn save_profiles(&self, store: &ProfilesStore) -> Result<()> {
        self.locked_write(&self.profiles_path, &serde_json::to_value(store)?)
    }

    pub fn load_active(&self) -> Result<ActiveStore> {
        if !self.active_path.exists() {
            return Ok(ActiveStore::new());
        }
        let value = self.json.read(&self.active_path)?;
        Ok(serde_json::from_value(value)?)
    }

    pub fn save_active(&self, store: &ActiveStore) -> Result<()> {
        self.locked_write(&self.active_path, &serde_json::to_value(store)?)
    }

    /// 排他锁保护下的整文件写入
    fn locked_write(&self, path: &Path, value: &Value) -> Result<()> {
        let lock_path = path.with_extension("lock");
        let lock_file = File::create(&lock_path).map_err(|e| DataError::io(lock_path.clone(), e))?;

        // 阻塞等待其他写操作完成
        lock_file
            .lock_exclusive()
            .map_err(|e| DataError::io(lock_path.clone(), e))?;

        // 锁在 lock_file drop 时自动释放
        self.json.write(path, value)
    }

    // ==================== 集合接口 ====================

    /// 有序档案列表（插入顺序）
    pub fn list(&self) -> Result<Vec<SiteProfile>> {
        Ok(self.load_profiles()?.profiles)
    }

    /// 按 id 查找
    pub fn get(&self, id: &str) -> Result<Option<SiteProfile>> {
        Ok(self.list()?.into_iter().find(|p| p.id == id))
    }

    /// 整集合替换写回
    pub fn replace_all(&self, profiles: Vec<SiteProfile>) -> Result<()> {
        let mut store = self.load_profiles()?;
        store.profiles = profiles;
        store.metadata.last_updated = chrono::Utc::now();
        self.save_profiles(&store)
    }

    // ==================== 当前指针 ====================

    pub fn current_id(&self) -> Result<Option<String>> {
        Ok(self.load_active()?.current.map(|c| c.id))
    }

    pub fn set_current_id(&self, id: Option<&str>) -> Result<()> {
        let mut store = self.load_active()?;
        match id {
            Some(id) => store.set_current(id),
            None => store.clear_current(),
        }
        self.save_active(&store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::profile_manager::types::ProfileDraft;
    use tempfile::TempDir;

    fn profile(name: &str) -> SiteProfile {
        SiteProfile::from_draft(
            ProfileDraft {
                name: name.to_string(),
                api_url: "https://example.com".to_string(),
                username: "admin".to_string(),
                password: "secret".to_string(),
                custom_settings: None,
            },
            false,
        )
    }

    #[test]
    fn test_empty_store_defaults() {
        let temp = TempDir::new().unwrap();
        let store = ProfileStore::open(temp.path()).unwrap();

        assert!(store.list().unwrap().is_empty());
        assert!(store.current_id().unwrap().is_none());
    }

    #[test]
    fn test_replace_all_preserves_order() {
        let temp = TempDir::new().unwrap();
        let store = ProfileStore::open(temp.path()).unwrap();

        let profiles = vec![profile("a"), profile("b"), profile("c")];
        store.replace_all(profiles.clone()).unwrap();

        let loaded = store.list().unwrap();
        let names: Vec<&str> = loaded.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_get_by_id() {
        let temp = TempDir::new().unwrap();
        let store = ProfileStore::open(temp.path()).unwrap();

        let p = profile("a");
        store.replace_all(vec![p.clone()]).unwrap();

        assert_eq!(store.get(&p.id).unwrap().unwrap().name, "a");
        assert!(store.get("missing").unwrap().is_none());
    }

    #[test]
    fn test_current_id_roundtrip() {
        let temp = TempDir::new().unwrap();
        let store = ProfileStore::open(temp.path()).unwrap();

        store.set_current_id(Some("abc")).unwrap();
        assert_eq!(store.current_id().unwrap().as_deref(), Some("abc"));

        store.set_current_id(None).unwrap();
        assert!(store.current_id().unwrap().is_none());
    }

    #[test]
    fn test_switched_at_recorded() {
        let temp = TempDir::new().unwrap();
        let store = ProfileStore::open(temp.path()).unwrap();

        store.set_current_id(Some("abc")).unwrap();
        let active = store.load_active().unwrap();
        assert!(active.current.is_some());
        assert_eq!(active.current.unwrap().id, "abc");
    }

    #[test]
    fn test_lock_file_created_next_to_record() {
        let temp = TempDir::new().unwrap();
        let store = ProfileStore::open(temp.path()).unwrap();

        store.replace_all(vec![profile("a")]).unwrap();
        assert!(temp.path().join("profiles.lock").exists());
    }
}
