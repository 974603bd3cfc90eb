//! 聊天命令转发
//!
//! WordPress 操作命令不直接调用远端接口，而是把固定格式的自然语言
//! 提示交给宿主的聊天界面（代理模式）执行。提示词保持英文，与
//! 自动化服务器的工具描述一致。

use async_trait::async_trait;

/// 宿主聊天界面边界，由宿主桥接层实现
#[async_trait]
pub trait ChatForwarder: Send + Sync {
    /// 打开聊天界面并发送提示词
    async fn forward(&self, prompt: &str) -> anyhow::Result<()>;
}

/// 列出站点全部文章
pub fn list_posts_prompt() -> String {
    "List all posts on my WordPress site".to_string()
}

/// 新建指定标题的文章
pub fn create_post_prompt(title: &str) -> String {
    format!("Create a new post titled \"{title}\" on my WordPress site")
}

/// 列出站点全部页面
pub fn list_pages_prompt() -> String {
    "List all pages on my WordPress site".to_string()
}

/// 新建指定标题的页面
pub fn create_page_prompt(title: &str) -> String {
    format!("Create a new page titled \"{title}\" on my WordPress site")
}

/// 列出站点全部插件
pub fn list_plugins_prompt() -> String {
    "List all plugins on my WordPress site".to_string()
}

/// 列出站点全部媒体
pub fn list_media_prompt() -> String {
    "List all media items on my WordPress site".to_string()
}
