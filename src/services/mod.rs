// 服务层模块
//
// - profile_manager: 站点档案存储、生命周期与外部同步
// - server: 自动化服务器子进程监管
// - chat: 聊天命令转发边界

pub mod chat;
pub mod profile_manager;
pub mod server;

pub use chat::ChatForwarder;
pub use profile_manager::{ProfileManager, ProfileStore, SyncEngine};
pub use server::{ServerManager, ServerStatus};
