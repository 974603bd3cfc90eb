//! WordPress 聊天命令
//!
//! 每个命令构造固定提示词并交给宿主聊天界面。标题由宿主收集，
//! 空标题视为取消，在转发前拦截。

use crate::services::chat::{self, ChatForwarder};

/// 列出全部文章
pub async fn list_posts(forwarder: &dyn ChatForwarder) -> Result<(), String> {
    forwarder
        .forward(&chat::list_posts_prompt())
        .await
        .map_err(|e| e.to_string())
}

/// 新建文章
pub async fn create_post(forwarder: &dyn ChatForwarder, title: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("文章标题不能为空".to_string());
    }
    forwarder
        .forward(&chat::create_post_prompt(title))
        .await
        .map_err(|e| e.to_string())
}

/// 列出全部页面
pub async fn list_pages(forwarder: &dyn ChatForwarder) -> Result<(), String> {
    forwarder
        .forward(&chat::list_pages_prompt())
        .await
        .map_err(|e| e.to_string())
}

/// 新建页面
pub async fn create_page(forwarder: &dyn ChatForwarder, title: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("页面标题不能为空".to_string());
    }
    forwarder
        .forward(&chat::create_page_prompt(title))
        .await
        .map_err(|e| e.to_string())
}

/// 列出全部插件
pub async fn list_plugins(forwarder: &dyn ChatForwarder) -> Result<(), String> {
    forwarder
        .forward(&chat::list_plugins_prompt())
        .await
        .map_err(|e| e.to_string())
}

/// 列出全部媒体
pub async fn list_media(forwarder: &dyn ChatForwarder) -> Result<(), String> {
    forwarder
        .forward(&chat::list_media_prompt())
        .await
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// 记录转发内容的桩实现
    #[derive(Default)]
    struct StubForwarder {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ChatForwarder for StubForwarder {
        async fn forward(&self, prompt: &str) -> anyhow::Result<()> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_list_posts_forwards_prompt() {
        let stub = StubForwarder::default();
        list_posts(&stub).await.unwrap();

        let prompts = stub.prompts.lock().unwrap();
        assert_eq!(prompts.as_slice(), ["List all posts on my WordPress site"]);
    }

    #[tokio::test]
    async fn test_create_post_rejects_blank_title() {
        let stub = StubForwarder::default();
        let err = create_post(&stub, "  ").await.unwrap_err();
        assert!(err.contains("标题"));
        assert!(stub.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_page_embeds_title() {
        let stub = StubForwarder::default();
        create_page(&stub, "About Us").await.unwrap();

        let prompts = stub.prompts.lock().unwrap();
        assert!(prompts[0].contains("\"About Us\""));
    }
}
