//! 自动化服务器控制命令

use crate::services::profile_manager::ProfileManager;
use crate::services::server::ServerManager;

/// 以当前档案启动自动化服务器
pub async fn start_server(
    manager: &ProfileManager,
    server: &ServerManager,
) -> Result<(), String> {
    let profile = manager
        .get_current()
        .map_err(|e| e.to_string())?
        .ok_or("尚未配置站点档案，请先新增或切换站点")?;
    server.start(&profile).await.map_err(|e| e.to_string())
}

/// 停止自动化服务器
pub async fn stop_server(server: &ServerManager) -> Result<(), String> {
    server.stop().await.map_err(|e| e.to_string())
}

/// 重启自动化服务器（固定延迟后再启动）
pub async fn restart_server(
    manager: &ProfileManager,
    server: &ServerManager,
) -> Result<(), String> {
    let profile = manager
        .get_current()
        .map_err(|e| e.to_string())?
        .ok_or("尚未配置站点档案，请先新增或切换站点")?;
    server.restart(&profile).await.map_err(|e| e.to_string())
}

/// 自动化服务器是否在运行
pub async fn server_is_running(server: &ServerManager) -> bool {
    server.is_running().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ServerLauncher;
    use crate::services::profile_manager::{ProfileDraft, ProfileStore, SyncEngine};
    use tempfile::TempDir;

    fn manager(temp: &TempDir) -> ProfileManager {
        let store = ProfileStore::open(temp.path().join("store")).unwrap();
        let sync = SyncEngine::new(temp.path().join("settings.json"), None);
        ProfileManager::new(store, sync)
    }

    #[tokio::test]
    async fn test_start_without_profile() {
        let temp = TempDir::new().unwrap();
        let manager = manager(&temp);
        let server = ServerManager::new(ServerLauncher::default());

        let err = start_server(&manager, &server).await.unwrap_err();
        assert!(err.contains("站点档案"));
        assert!(!server_is_running(&server).await);
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn test_start_with_current_profile() {
        let temp = TempDir::new().unwrap();
        let manager = manager(&temp);
        manager
            .add(ProfileDraft {
                name: "Site A".to_string(),
                api_url: "https://a.example".to_string(),
                username: "admin".to_string(),
                password: "secret".to_string(),
                custom_settings: None,
            })
            .unwrap();

        let server = ServerManager::new(ServerLauncher {
            command: "sh".to_string(),
            args: vec!["-c".to_string(), "sleep 30".to_string()],
        });

        start_server(&manager, &server).await.unwrap();
        assert!(server_is_running(&server).await);
        stop_server(&server).await.unwrap();
    }
}
