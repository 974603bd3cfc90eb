//! 生命周期与同步错误类型

use crate::data::DataError;
use thiserror::Error;

/// 生命周期操作错误
#[derive(Error, Debug)]
pub enum ProfileError {
    /// 必填字段为空或格式非法，持久化写入前抛出
    #[error("字段校验失败: {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// 引用的档案不存在，状态不变
    #[error("站点档案不存在: {id}")]
    NotFound { id: String },

    /// 持久化失败
    #[error(transparent)]
    Data(#[from] DataError),
}

/// 单个同步接收端的写入错误
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("设置面写入失败: {0}")]
    Settings(#[source] DataError),

    #[error("描述符写入失败: {0}")]
    Descriptor(#[source] DataError),
}

/// 单个接收端的本次结果
#[derive(Debug)]
pub enum SinkStatus {
    /// 写入成功
    Applied,
    /// 本次未写入（未触发同步，或未打开工作区）
    Skipped,
    /// 写入失败，不回滚 Store，也不影响另一端
    Failed(SinkError),
}

impl SinkStatus {
    pub fn is_applied(&self) -> bool {
        matches!(self, SinkStatus::Applied)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SinkStatus::Failed(_))
    }
}

/// 一次生命周期操作的同步结果
///
/// 两个接收端彼此独立：任一失败都只作为警告上报。
#[derive(Debug)]
pub struct SyncReport {
    pub settings: SinkStatus,
    pub descriptor: SinkStatus,
}

impl SyncReport {
    /// 本次操作没有触发同步
    pub fn not_triggered() -> Self {
        Self {
            settings: SinkStatus::Skipped,
            descriptor: SinkStatus::Skipped,
        }
    }

    /// 没有任何接收端失败
    pub fn is_clean(&self) -> bool {
        !self.settings.is_failed() && !self.descriptor.is_failed()
    }

    /// 宿主可见的警告文本，每个失败的接收端一条
    pub fn warnings(&self) -> Vec<String> {
        let mut out = Vec::new();
        if let SinkStatus::Failed(e) = &self.settings {
            out.push(e.to_string());
        }
        if let SinkStatus::Failed(e) = &self.descriptor {
            out.push(e.to_string());
        }
        out
    }
}
