//! 自动化服务器进程监管
//!
//! 以当前档案的凭据作为环境变量启动 WordPress 自动化 MCP 服务器子进程，
//! 转发子进程输出到日志。监管边界的失败只上报宿主，从不进入生命周期引擎。

use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::Mutex;

use crate::models::ServerLauncher;
use crate::services::profile_manager::SiteProfile;

/// 重启前的固定等待，给旧进程留出完全退出的时间（不是重试策略）
const RESTART_DELAY: Duration = Duration::from_secs(1);

/// 子进程环境变量键
const ENV_API_URL: &str = "WORDPRESS_API_URL";
const ENV_USERNAME: &str = "WORDPRESS_USERNAME";
const ENV_PASSWORD: &str = "WORDPRESS_PASSWORD";

/// 进程监管边界错误
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("自动化服务器已在运行")]
    AlreadyRunning,

    #[error("自动化服务器未在运行")]
    NotRunning,

    #[error("站点档案未配置完整，无法启动自动化服务器")]
    NotConfigured,

    #[error("启动自动化服务器失败: {0}")]
    Spawn(#[from] std::io::Error),
}

/// 服务器运行状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerStatus {
    Stopped,
    Running,
}

pub struct ServerManager {
    launcher: ServerLauncher,
    child: Arc<Mutex<Option<Child>>>,
}

impl ServerManager {
    pub fn new(launcher: ServerLauncher) -> Self {
        Self {
            launcher,
            child: Arc::new(Mutex::new(None)),
        }
    }

    /// 以给定档案的凭据启动子进程
    pub async fn start(&self, profile: &SiteProfile) -> Result<(), ServerError> {
        let mut guard = self.child.lock().await;

        // 进程可能已自行退出，先收割再判断
        if let Some(child) = guard.as_mut() {
            match child.try_wait() {
                Ok(None) => return Err(ServerError::AlreadyRunning),
                _ => *guard = None,
            }
        }

        if profile.api_url.trim().is_empty()
            || profile.username.trim().is_empty()
            || profile.password.trim().is_empty()
        {
            return Err(ServerError::NotConfigured);
        }

        let mut cmd = Command::new(&self.launcher.command);
        cmd.args(&self.launcher.args)
            .env(ENV_API_URL, &profile.api_url)
            .env(ENV_USERNAME, &profile.username)
            .env(ENV_PASSWORD, &profile.password)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd.spawn()?;

        // 转发子进程输出到日志
        if let Some(stdout) = child.stdout.take() {
            tokio::spawn(forward_output(stdout, "stdout"));
        }
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(forward_output(stderr, "stderr"));
        }

        tracing::info!(site = %profile.name, command = %self.launcher.command, "自动化服务器已启动");
        *guard = Some(child);
        Ok(())
    }

    /// 停止子进程
    pub async fn stop(&self) -> Result<(), ServerError> {
        let mut guard = self.child.lock().await;
        let Some(mut child) = guard.take() else {
            return Err(ServerError::NotRunning);
        };
        child.kill().await?;
        tracing::info!("自动化服务器已停止");
        Ok(())
    }

    /// 重启：停止后等待固定间隔再启动
    pub async fn restart(&self, profile: &SiteProfile) -> Result<(), ServerError> {
        match self.stop().await {
            Ok(()) | Err(ServerError::NotRunning) => {}
            Err(e) => return Err(e),
        }
        tokio::time::sleep(RESTART_DELAY).await;
        self.start(profile).await
    }

    /// 当前运行状态（顺带收割已退出的子进程并记录退出码）
    pub async fn status(&self) -> ServerStatus {
        let mut guard = self.child.lock().await;
        match guard.as_mut() {
            None => ServerStatus::Stopped,
            Some(child) => match child.try_wait() {
                Ok(None) => ServerStatus::Running,
                Ok(Some(status)) => {
                    tracing::info!(code = ?status.code(), "自动化服务器已退出");
                    *guard = None;
                    ServerStatus::Stopped
                }
                Err(e) => {
                    tracing::warn!(error = %e, "查询自动化服务器状态失败");
                    *guard = None;
                    ServerStatus::Stopped
                }
            },
        }
    }

    pub async fn is_running(&self) -> bool {
        self.status().await == ServerStatus::Running
    }
}

async fn forward_output<R>(reader: R, stream: &'static str)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let mut lines = BufReader::new(reader).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        tracing::info!(target: "wpmcp::server", %stream, "{}", line);
    }
}
