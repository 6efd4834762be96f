//! 应用层错误定义
//!
//! 统一的命令错误类型；每个错误都能转成一条用户提示

use thiserror::Error;

use crate::domain::novel::{ItemId, NovelError};

/// 应用层错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplicationError {
    /// 领域规则拒绝
    #[error(transparent)]
    Domain(#[from] NovelError),

    /// 操作需要一个打开的章节
    #[error("当前没有打开的章节")]
    NoActiveChapter,

    /// 章节不存在
    #[error("章节不存在: {0}")]
    ChapterNotFound(ItemId),

    /// 节不存在
    #[error("节不存在: {0}")]
    SectionNotFound(ItemId),

    /// 验证错误
    #[error("{0}")]
    Validation(String),
}

impl ApplicationError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// 展示给用户的提示文本
    pub fn notification(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_message_is_passed_through() {
        let err: ApplicationError = NovelError::LastSection {
            chapter_id: "c1".into(),
        }
        .into();
        assert_eq!(
            err.notification(),
            NovelError::LastSection {
                chapter_id: "c1".into()
            }
            .to_string()
        );
    }
}
