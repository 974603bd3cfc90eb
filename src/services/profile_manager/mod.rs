//! 站点档案管理模块
//!
//! - `profiles.json`: 有序档案集合
//! - `active.json`: 当前档案指针
//! - 同步引擎把当前档案写入设置面与工作区描述符

mod error;
mod manager;
mod store;
mod sync;
mod types;

pub use error::{ProfileError, SinkError, SinkStatus, SyncReport};
pub use manager::ProfileManager;
pub use store::ProfileStore;
pub use sync::SyncEngine;
pub use types::{
    ActiveSite, ActiveStore, ProfileDescriptor, ProfileDraft, ProfileUpdate, ProfilesStore,
    SiteProfile, StoreMetadata, STORE_VERSION,
};
