//! Confirmation Port - 破坏性操作确认
//!
//! 删除卷/章、永久清除回收站条目之前由 UI 层询问用户

use crate::domain::novel::{ItemId, ItemKind};

/// 需要用户确认的操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmRequest {
    /// 将卷或章移入回收站
    DeleteItem {
        kind: ItemKind,
        id: ItemId,
        title: String,
    },
    /// 永久删除一个回收站条目
    Purge { id: ItemId, label: String },
    /// 清空回收站
    EmptyTrash { count: usize },
}

impl ConfirmRequest {
    /// 提示框文本
    pub fn message(&self) -> String {
        match self {
            ConfirmRequest::DeleteItem { kind, title, .. } => match kind {
                ItemKind::Volume => format!("确定删除卷「{}」及其所有章节吗？", title),
                _ => format!("确定删除「{}」吗？", title),
            },
            ConfirmRequest::Purge { label, .. } => {
                format!("永久删除「{}」后将无法恢复，确定继续吗？", label)
            }
            ConfirmRequest::EmptyTrash { count } => {
                format!("将永久删除回收站中的 {} 项内容，确定继续吗？", count)
            }
        }
    }
}

pub trait ConfirmationPort: Send + Sync {
    fn confirm(&self, request: &ConfirmRequest) -> bool;
}
