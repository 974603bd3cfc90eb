//! 站点档案管理命令（宿主桥接层）
//!
//! 宿主负责所有交互：输入收集、确认对话框、取消与渲染。命令只接受
//! 完整的输入数据，错误在边界处转为字符串。

use crate::services::profile_manager::{
    ProfileDescriptor, ProfileDraft, ProfileManager, ProfileUpdate, SiteProfile,
};

/// 新增站点档案，返回创建后的档案
pub async fn add_site_profile(
    manager: &ProfileManager,
    input: ProfileDraft,
) -> Result<SiteProfile, String> {
    let (profile, report) = manager.add(input).map_err(|e| e.to_string())?;
    for warning in report.warnings() {
        tracing::warn!("{}", warning);
    }
    Ok(profile)
}

/// 编辑站点档案（省略的字段保持原值）
pub async fn edit_site_profile(
    manager: &ProfileManager,
    id: String,
    input: ProfileUpdate,
) -> Result<(), String> {
    let report = manager.update(&id, input).map_err(|e| e.to_string())?;
    for warning in report.warnings() {
        tracing::warn!("{}", warning);
    }
    Ok(())
}

/// 删除站点档案
pub async fn delete_site_profile(manager: &ProfileManager, id: String) -> Result<(), String> {
    let report = manager.delete(&id).map_err(|e| e.to_string())?;
    for warning in report.warnings() {
        tracing::warn!("{}", warning);
    }
    Ok(())
}

/// 切换当前站点档案
pub async fn switch_site_profile(
    manager: &ProfileManager,
    id: String,
) -> Result<SiteProfile, String> {
    let (profile, report) = manager.switch(&id).map_err(|e| e.to_string())?;
    for warning in report.warnings() {
        tracing::warn!("{}", warning);
    }
    Ok(profile)
}

/// 列出全部站点档案描述符（密码脱敏，供选择列表使用）
pub async fn list_site_profiles(
    manager: &ProfileManager,
) -> Result<Vec<ProfileDescriptor>, String> {
    manager.descriptors().map_err(|e| e.to_string())
}

/// 获取当前站点档案
pub async fn get_current_site_profile(
    manager: &ProfileManager,
) -> Result<Option<SiteProfile>, String> {
    manager.get_current().map_err(|e| e.to_string())
}

/// 渲染站点档案列表为 Markdown 表格（供宿主 webview 展示）
pub async fn render_site_profiles(manager: &ProfileManager) -> Result<String, String> {
    let descriptors = manager.descriptors().map_err(|e| e.to_string())?;

    let mut out = String::from("# WordPress Site Profiles\n\n");
    out.push_str("| Name | URL | Status |\n| ---- | --- | ------ |\n");
    for d in &descriptors {
        let mut status = Vec::new();
        if d.is_current {
            status.push("Current");
        }
        if d.is_default {
            status.push("Default");
        }
        let status = if status.is_empty() {
            "-".to_string()
        } else {
            status.join(", ")
        };
        out.push_str(&format!("| {} | {} | {} |\n", d.name, d.api_url, status));
    }

    Ok(out)
}
